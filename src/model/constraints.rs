//! Domain trajectory constraints.
//!
//! A `(:constraints ...)` section is implicitly conjunctive: a sole
//! `(and ...)` wrapper is flattened before the children are read. Each child
//! is a named condition, an ordering constraint, or — for anything the
//! grammar does not recognize, including bare `()` — an explicit
//! unrecognized constraint. Nothing is dropped.

use rowan::TextRange;
use smol_str::SmolStr;

use crate::parser::{AstNode, Group, GroupItem};

/// One operand of an ordering constraint: a reference to a previously named
/// condition, or an inline bracketed condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionRef {
    Named(SmolStr),
    Inline(TextRange),
}

/// A domain-level trajectory constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// `(name c1 (condition ...))` / `(named-condition c1 (...))`
    NamedCondition {
        name: Option<SmolStr>,
        condition: Option<TextRange>,
        range: TextRange,
    },
    /// `(after a b)` or `(strictly-after a b)`
    After {
        predecessor: Option<ConditionRef>,
        successor: Option<ConditionRef>,
        strict: bool,
        range: TextRange,
    },
    /// Present in the source but not understood; kept so consumers can still
    /// see and locate it
    Unrecognized { range: TextRange },
}

impl Constraint {
    pub fn range(&self) -> TextRange {
        match self {
            Constraint::NamedCondition { range, .. }
            | Constraint::After { range, .. }
            | Constraint::Unrecognized { range } => *range,
        }
    }
}

/// Extract the constraints of a `(:constraints ...)` section.
pub fn parse_constraints(section: &Group) -> Vec<Constraint> {
    let mut children: Vec<Group> = section.child_groups().collect();
    let wrapper = match children.as_slice() {
        [only] if only.operator().as_deref() == Some("and") => Some(only.clone()),
        _ => None,
    };
    if let Some(wrapper) = wrapper {
        children = wrapper.child_groups().collect();
    }
    children.iter().map(parse_constraint).collect()
}

fn parse_constraint(group: &Group) -> Constraint {
    let range = group.syntax().text_range();
    let mut items: Vec<GroupItem> = group.items().collect();

    // The head is the fused operator, or the first atom when the bracket
    // and head were separated by whitespace
    let head: Option<String> = match group.operator() {
        Some(op) => Some(op.to_string()),
        None => match items.first() {
            Some(GroupItem::Atom(token)) => {
                let head = token.text().to_string();
                items.remove(0);
                Some(head)
            }
            _ => None,
        },
    };

    match head.as_deref() {
        Some("name") | Some("named-condition") => {
            let name = items.iter().find_map(|item| match item {
                GroupItem::Atom(token) => Some(SmolStr::new(token.text())),
                GroupItem::Group(_) => None,
            });
            let condition = items.iter().find_map(|item| match item {
                GroupItem::Group(g) => Some(g.syntax().text_range()),
                GroupItem::Atom(_) => None,
            });
            Constraint::NamedCondition {
                name,
                condition,
                range,
            }
        }
        Some(kind @ ("after" | "strictly-after")) => {
            let mut operands = items.into_iter().map(|item| match item {
                GroupItem::Atom(token) => ConditionRef::Named(SmolStr::new(token.text())),
                GroupItem::Group(g) => ConditionRef::Inline(g.syntax().text_range()),
            });
            Constraint::After {
                predecessor: operands.next(),
                successor: operands.next(),
                strict: kind == "strictly-after",
                range,
            }
        }
        _ => Constraint::Unrecognized { range },
    }
}
