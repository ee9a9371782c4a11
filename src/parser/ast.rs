//! Typed wrappers over the untyped rowan bracket tree.
//!
//! PDDL's surface syntax is uniform (nested bracket groups), so a single
//! wrapper, [`Group`], carries the accessors the model extractors need:
//! operator lookup on fused brackets, ordered child iteration, and
//! comment-stripped text of the bracket contents.

use smol_str::SmolStr;

use super::syntax_kind::SyntaxKind;
use super::{SyntaxNode, SyntaxToken};

/// Trait for typed wrappers over a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

/// One bracketed expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Group(SyntaxNode);

impl AstNode for Group {
    fn can_cast(kind: SyntaxKind) -> bool {
        kind == SyntaxKind::GROUP
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        Self::can_cast(node.kind()).then(|| Self(node))
    }

    fn syntax(&self) -> &SyntaxNode {
        &self.0
    }
}

/// An ordered, meaningful child of a group: a bare atom or a nested group.
/// Trivia, brackets, and section keywords are filtered out.
#[derive(Debug, Clone)]
pub enum GroupItem {
    Atom(SyntaxToken),
    Group(Group),
}

impl Group {
    /// The token that opened this group
    pub fn open_token(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|el| el.into_token())
            .next()
    }

    /// The operator name of a fused operator bracket: `(:action` → `:action`,
    /// `(and` → `and`. Plain brackets have no operator.
    pub fn operator(&self) -> Option<SmolStr> {
        let token = self.open_token()?;
        (token.kind() == SyntaxKind::OPEN_BRACKET_OP).then(|| SmolStr::new(&token.text()[1..]))
    }

    /// Direct child groups in document order
    pub fn child_groups(&self) -> impl Iterator<Item = Group> + '_ {
        self.0.children().filter_map(Group::cast)
    }

    /// The first direct atom token, e.g. the name in `(:action fly ...)`
    pub fn first_atom(&self) -> Option<SyntaxToken> {
        self.atoms().next()
    }

    /// Direct atom tokens in document order
    pub fn atoms(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        self.0
            .children_with_tokens()
            .filter_map(|el| el.into_token())
            .filter(|t| t.kind() == SyntaxKind::ATOM)
    }

    /// Direct keyword tokens in document order, e.g. `:strips` entries in a
    /// `(:requirements ...)` group
    pub fn keywords(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        self.0
            .children_with_tokens()
            .filter_map(|el| el.into_token())
            .filter(|t| t.kind() == SyntaxKind::KEYWORD)
    }

    /// Ordered meaningful children: atoms and nested groups
    pub fn items(&self) -> impl Iterator<Item = GroupItem> + '_ {
        self.0.children_with_tokens().filter_map(|el| match el {
            rowan::NodeOrToken::Node(node) => Group::cast(node).map(GroupItem::Group),
            rowan::NodeOrToken::Token(token) => {
                (token.kind() == SyntaxKind::ATOM).then(|| GroupItem::Atom(token))
            }
        })
    }

    /// Text between this group's brackets with comments removed, including
    /// the operator word of a fused bracket: `(at ?l ; here\n - location)` →
    /// `at ?l \n - location`
    pub fn nested_text(&self) -> String {
        self.text_without_comments(true)
    }

    /// Like [`Group::nested_text`] but excluding the operator word:
    /// `(:types a - b)` → ` a - b`
    pub fn arguments_text(&self) -> String {
        self.text_without_comments(false)
    }

    fn text_without_comments(&self, include_operator: bool) -> String {
        let tokens: Vec<SyntaxToken> = self
            .0
            .descendants_with_tokens()
            .filter_map(|el| el.into_token())
            .collect();
        let last = tokens.len().saturating_sub(1);
        let mut out = String::new();
        for (i, token) in tokens.iter().enumerate() {
            if token.kind() == SyntaxKind::COMMENT {
                continue;
            }
            if i == 0 {
                // The group's own opening bracket: keep only a fused operator
                if include_operator && token.kind() == SyntaxKind::OPEN_BRACKET_OP {
                    out.push_str(&token.text()[1..]);
                }
                continue;
            }
            if i == last
                && token.kind() == SyntaxKind::CLOSE_BRACKET
                && token.parent().as_ref() == Some(&self.0)
            {
                continue;
            }
            out.push_str(token.text());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn first_group(input: &str) -> Group {
        parse(input)
            .syntax()
            .children()
            .find_map(Group::cast)
            .expect("input should contain a group")
    }

    #[test]
    fn test_operator_of_fused_bracket() {
        assert_eq!(first_group("(:action a)").operator().as_deref(), Some(":action"));
        assert_eq!(first_group("(and)").operator().as_deref(), Some("and"));
        assert_eq!(first_group("(p ?x)").operator(), None);
    }

    #[test]
    fn test_nested_text_strips_comments() {
        let group = first_group("(at ?l ; where\n - location)");
        assert_eq!(group.nested_text(), "at ?l \n - location");
    }

    #[test]
    fn test_nested_text_keeps_inner_brackets() {
        let group = first_group("(= (fuel ?t) 5)");
        assert_eq!(group.nested_text(), "= (fuel ?t) 5");
    }

    #[test]
    fn test_arguments_text_drops_operator() {
        let group = first_group("(:types truck - vehicle)");
        assert_eq!(group.arguments_text(), " truck - vehicle");
    }

    #[test]
    fn test_nested_text_of_unclosed_group() {
        let group = first_group("(a b");
        assert_eq!(group.nested_text(), "a b");
    }

    #[test]
    fn test_items_in_order() {
        let group = first_group("(after c1 (at ?x ?y))");
        let items: Vec<String> = group
            .items()
            .map(|item| match item {
                GroupItem::Atom(t) => format!("atom:{}", t.text()),
                GroupItem::Group(g) => format!("group:{}", g.nested_text()),
            })
            .collect();
        assert_eq!(items, vec!["atom:c1", "group:at ?x ?y"]);
    }

    #[test]
    fn test_first_atom_skips_keywords() {
        let group = first_group("(:action fly :parameters (?p))");
        assert_eq!(group.first_atom().unwrap().text(), "fly");
    }
}
