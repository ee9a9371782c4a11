//! Reference classification: how a variable is used at a given offset.
//!
//! Given a declared variable and a text offset where it is referenced, the
//! classifier walks upward from the leaf at that offset to the enclosing
//! structure, decides whether the offset falls in the duration, condition, or
//! effect part, finds the smallest governing expression, and reports the
//! access as a read or a write together with its temporal qualification.
//!
//! Classification never fails: whenever a containment test is inconclusive
//! the result falls back to the explicit `Unrecognized` variants, because an
//! editor must still render something for code it cannot fully interpret
//! (derived predicates, malformed constructs, offsets inside parameter
//! lists).

use rowan::{TextRange, TextSize};

use crate::parser::{AstNode, Group, SyntaxNode};

use super::domain::DomainInfo;
use super::effects::parse_effect;
use super::structures::{Structure, TimeQualifier, time_qualifier_of};
use super::variables::Variable;

/// How a reference accesses its variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableReferenceKind {
    Read,
    Write,
    /// The effect could not be parsed, so the access direction is unknown
    ReadOrWrite,
    Unrecognized,
}

/// Which part of a structure contains a reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructurePart {
    /// The offset is not inside any structure
    NotInStructure,
    Duration,
    Condition,
    Effect,
    /// Inside a structure but in none of its recognized parts
    Unrecognized,
}

/// One classified access to a variable
#[derive(Debug, Clone, PartialEq)]
pub struct VariableReferenceInfo<'a> {
    /// The enclosing action/process/event, when the offset is inside one
    pub structure: Option<&'a Structure>,
    /// `at start` / `at end` / `over all`, when the reference is governed
    /// by one
    pub time_qualifier: Option<TimeQualifier>,
    pub part: StructurePart,
    pub kind: VariableReferenceKind,
    /// The smallest governing expression, as written
    pub relevant_code: Option<String>,
    pub relevant_range: Option<TextRange>,
}

impl<'a> VariableReferenceInfo<'a> {
    fn unrecognized(structure: Option<&'a Structure>, part: StructurePart) -> Self {
        Self {
            structure,
            time_qualifier: None,
            part,
            kind: VariableReferenceKind::Unrecognized,
            relevant_code: None,
            relevant_range: None,
        }
    }
}

/// Comparison/negation operators that scope a condition reference
const CONDITION_OPERATORS: [&str; 6] = ["=", ">", "<", ">=", "<=", "not"];

/// Operators that introduce a single effect
const EFFECT_OPERATORS: [&str; 6] = [
    "assign",
    "increase",
    "decrease",
    "scale-up",
    "scale-down",
    "not",
];

/// Semantic queries over a parsed domain
pub struct ModelHierarchy<'a> {
    domain: &'a DomainInfo,
}

impl<'a> ModelHierarchy<'a> {
    pub fn new(domain: &'a DomainInfo) -> Self {
        Self { domain }
    }

    /// Classify the reference to `variable` at `offset`.
    pub fn classify(&self, variable: &Variable, offset: TextSize) -> VariableReferenceInfo<'a> {
        let Some(structure) = self.domain.structure_at(offset) else {
            return VariableReferenceInfo::unrecognized(None, StructurePart::NotInStructure);
        };

        let duration = structure.duration_range().filter(|r| r.contains(offset));
        let condition = structure.condition_range().filter(|r| r.contains(offset));
        let effect = structure.effect_range().filter(|r| r.contains(offset));

        let root = self.domain.syntax();
        let info = if let Some(bound) = duration {
            self.classify_duration(structure, &root, bound)
        } else if let Some(bound) = condition {
            self.classify_condition(structure, &root, offset, bound)
        } else if let Some(bound) = effect {
            self.classify_effect(structure, variable, &root, offset, bound)
        } else {
            VariableReferenceInfo::unrecognized(Some(structure), StructurePart::Unrecognized)
        };

        tracing::trace!(
            variable = variable.name.as_str(),
            offset = u32::from(offset),
            structure = structure.name().map(|n| n.as_str()).unwrap_or("?"),
            part = ?info.part,
            kind = ?info.kind,
            "classified variable reference"
        );
        info
    }

    fn classify_duration(
        &self,
        structure: &'a Structure,
        root: &SyntaxNode,
        bound: TextRange,
    ) -> VariableReferenceInfo<'a> {
        let relevant = node_covering(root, bound);
        VariableReferenceInfo {
            structure: Some(structure),
            time_qualifier: None,
            part: StructurePart::Duration,
            kind: VariableReferenceKind::Read,
            relevant_code: relevant.as_ref().map(node_code),
            relevant_range: relevant.map(|n| n.text_range()),
        }
    }

    fn classify_condition(
        &self,
        structure: &'a Structure,
        root: &SyntaxNode,
        offset: TextSize,
        bound: TextRange,
    ) -> VariableReferenceInfo<'a> {
        let Some(innermost) = innermost_group_at(root, offset) else {
            return VariableReferenceInfo::unrecognized(Some(structure), StructurePart::Condition);
        };
        let relevant =
            governing_group(&innermost, bound, &CONDITION_OPERATORS).unwrap_or(innermost.clone());
        VariableReferenceInfo {
            structure: Some(structure),
            time_qualifier: enclosing_time_qualifier(&innermost, bound),
            part: StructurePart::Condition,
            kind: VariableReferenceKind::Read,
            relevant_code: Some(node_code(relevant.syntax())),
            relevant_range: Some(relevant.syntax().text_range()),
        }
    }

    fn classify_effect(
        &self,
        structure: &'a Structure,
        variable: &Variable,
        root: &SyntaxNode,
        offset: TextSize,
        bound: TextRange,
    ) -> VariableReferenceInfo<'a> {
        let Some(innermost) = innermost_group_at(root, offset) else {
            return VariableReferenceInfo::unrecognized(Some(structure), StructurePart::Effect);
        };
        // With no update operator above the reference, the innermost group
        // itself is the effect (the bare make-true form)
        let relevant =
            governing_group(&innermost, bound, &EFFECT_OPERATORS).unwrap_or(innermost.clone());
        let kind = match parse_effect(&relevant) {
            Some(effect) => {
                if effect.is_write_of(&variable.name) {
                    VariableReferenceKind::Write
                } else {
                    VariableReferenceKind::Read
                }
            }
            None => VariableReferenceKind::ReadOrWrite,
        };
        VariableReferenceInfo {
            structure: Some(structure),
            time_qualifier: enclosing_time_qualifier(&innermost, bound),
            part: StructurePart::Effect,
            kind,
            relevant_code: Some(node_code(relevant.syntax())),
            relevant_range: Some(relevant.syntax().text_range()),
        }
    }
}

/// The innermost group whose span contains the offset
fn innermost_group_at(root: &SyntaxNode, offset: TextSize) -> Option<Group> {
    let token = match root.token_at_offset(offset) {
        rowan::TokenAtOffset::None => return None,
        rowan::TokenAtOffset::Single(token) => token,
        rowan::TokenAtOffset::Between(_, right) => right,
    };
    token.parent()?.ancestors().find_map(Group::cast)
}

/// Walk upward from `start` (inclusive) looking for the nearest group whose
/// operator is in `operators`. The walk stops at time qualifiers,
/// conjunction-like operators, keyword brackets, and the bounding node, in
/// which case there is no governing operator group.
fn governing_group(start: &Group, bound: TextRange, operators: &[&str]) -> Option<Group> {
    for node in start.syntax().ancestors() {
        if !bound.contains_range(node.text_range()) {
            break;
        }
        let Some(group) = Group::cast(node) else {
            continue;
        };
        if time_qualifier_of(&group).is_some() {
            break;
        }
        match group.operator() {
            Some(op) if operators.contains(&op.as_str()) => return Some(group),
            Some(op)
                if matches!(op.as_str(), "and" | "or" | "when" | "forall" | "exists")
                    || op.starts_with(':') =>
            {
                break;
            }
            _ => {}
        }
    }
    None
}

/// The nearest time-qualifier group above `start`, within `bound`
fn enclosing_time_qualifier(start: &Group, bound: TextRange) -> Option<TimeQualifier> {
    start
        .syntax()
        .ancestors()
        .take_while(|node| bound.contains_range(node.text_range()))
        .filter_map(Group::cast)
        .find_map(|group| time_qualifier_of(&group))
}

/// The deepest node covering the range (used to re-enter stored sub-ranges)
fn node_covering(root: &SyntaxNode, range: TextRange) -> Option<SyntaxNode> {
    match root.covering_element(range) {
        rowan::NodeOrToken::Node(node) => Some(node),
        rowan::NodeOrToken::Token(token) => token.parent(),
    }
}

fn node_code(node: &SyntaxNode) -> String {
    node.text().to_string().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOMAIN: &str = r#"(define (domain shuttle)
    (:predicates (docked ?s - shuttle))
    (:functions (fuel ?s - shuttle))
    (:action dock
        :parameters (?s - shuttle)
        :precondition (not (docked ?s))
        :effect (docked ?s)
    )
)"#;

    fn offset_of(needle: &str) -> TextSize {
        let position = DOMAIN.find(needle).expect("needle present");
        TextSize::new(position as u32 + 1)
    }

    #[test]
    fn test_outside_any_structure() {
        let domain = DomainInfo::parse(DOMAIN).unwrap();
        let hierarchy = ModelHierarchy::new(&domain);
        let variable = domain.get_variable("docked").unwrap().clone();
        let info = hierarchy.classify(&variable, offset_of("(docked ?s - shuttle)"));
        assert_eq!(info.part, StructurePart::NotInStructure);
        assert_eq!(info.kind, VariableReferenceKind::Unrecognized);
        assert!(info.structure.is_none());
    }

    #[test]
    fn test_parameter_list_is_unrecognized() {
        let domain = DomainInfo::parse(DOMAIN).unwrap();
        let hierarchy = ModelHierarchy::new(&domain);
        let variable = domain.get_variable("docked").unwrap().clone();
        let info = hierarchy.classify(&variable, offset_of("(?s - shuttle)\n        :precondition"));
        assert_eq!(info.part, StructurePart::Unrecognized);
        assert_eq!(info.kind, VariableReferenceKind::Unrecognized);
        assert!(info.structure.is_some());
    }

    #[test]
    fn test_negated_precondition_read() {
        let domain = DomainInfo::parse(DOMAIN).unwrap();
        let hierarchy = ModelHierarchy::new(&domain);
        let variable = domain.get_variable("docked").unwrap().clone();
        let info = hierarchy.classify(&variable, offset_of("(docked ?s))"));
        assert_eq!(info.part, StructurePart::Condition);
        assert_eq!(info.kind, VariableReferenceKind::Read);
        assert_eq!(info.relevant_code.as_deref(), Some("(not (docked ?s))"));
        assert_eq!(info.time_qualifier, None);
    }

    #[test]
    fn test_bare_effect_write() {
        let domain = DomainInfo::parse(DOMAIN).unwrap();
        let hierarchy = ModelHierarchy::new(&domain);
        let variable = domain.get_variable("docked").unwrap().clone();
        let info = hierarchy.classify(&variable, offset_of("(docked ?s)\n    )"));
        assert_eq!(info.part, StructurePart::Effect);
        assert_eq!(info.kind, VariableReferenceKind::Write);
    }
}
