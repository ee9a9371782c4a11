//! Effect expressions.
//!
//! A single effect bracket either sets a boolean predicate (bare or wrapped
//! in `(not ...)`) or updates a numeric function through one of the update
//! operators. Conjunctions, conditionals, and quantifiers are not single
//! effects; callers split those before asking.

use crate::parser::{AstNode, Group, GroupItem};

use super::normalize_whitespace;

/// One classified effect with its target variable reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// `(predicate ...)`
    MakeTrue { variable: String },
    /// `(not (predicate ...))`
    MakeFalse { variable: String },
    /// `(assign (fn ...) expr)`
    Assign { variable: String, expression: String },
    /// `(increase (fn ...) expr)`
    Increase { variable: String, expression: String },
    /// `(decrease (fn ...) expr)`
    Decrease { variable: String, expression: String },
    /// `(scale-up (fn ...) expr)`
    ScaleUp { variable: String, expression: String },
    /// `(scale-down (fn ...) expr)`
    ScaleDown { variable: String, expression: String },
}

impl Effect {
    /// The full reference to the target variable, e.g. `fuel ?t`
    pub fn variable(&self) -> &str {
        match self {
            Effect::MakeTrue { variable }
            | Effect::MakeFalse { variable }
            | Effect::Assign { variable, .. }
            | Effect::Increase { variable, .. }
            | Effect::Decrease { variable, .. }
            | Effect::ScaleUp { variable, .. }
            | Effect::ScaleDown { variable, .. } => variable,
        }
    }

    /// The head name of the target variable, e.g. `fuel`
    pub fn variable_name(&self) -> &str {
        self.variable().split_whitespace().next().unwrap_or("")
    }

    /// Whether this effect writes the named variable
    pub fn is_write_of(&self, name: &str) -> bool {
        self.variable_name().eq_ignore_ascii_case(name)
    }

    /// The right-hand expression of a numeric effect
    pub fn expression(&self) -> Option<&str> {
        match self {
            Effect::MakeTrue { .. } | Effect::MakeFalse { .. } => None,
            Effect::Assign { expression, .. }
            | Effect::Increase { expression, .. }
            | Effect::Decrease { expression, .. }
            | Effect::ScaleUp { expression, .. }
            | Effect::ScaleDown { expression, .. } => Some(expression),
        }
    }
}

/// Classify one effect bracket. Returns `None` for brackets that are not a
/// single effect (conjunctions, conditionals, quantifiers, empty brackets).
pub fn parse_effect(group: &Group) -> Option<Effect> {
    match group.operator().as_deref() {
        Some("assign") => numeric_effect(group, |variable, expression| Effect::Assign {
            variable,
            expression,
        }),
        Some("increase") => numeric_effect(group, |variable, expression| Effect::Increase {
            variable,
            expression,
        }),
        Some("decrease") => numeric_effect(group, |variable, expression| Effect::Decrease {
            variable,
            expression,
        }),
        Some("scale-up") => numeric_effect(group, |variable, expression| Effect::ScaleUp {
            variable,
            expression,
        }),
        Some("scale-down") => numeric_effect(group, |variable, expression| Effect::ScaleDown {
            variable,
            expression,
        }),
        Some("not") => {
            let inner = group.child_groups().next()?;
            Some(Effect::MakeFalse {
                variable: normalize_whitespace(&inner.nested_text()),
            })
        }
        Some("and" | "or" | "when" | "forall" | "exists") => None,
        _ => {
            let variable = normalize_whitespace(&group.nested_text());
            (!variable.is_empty()).then_some(Effect::MakeTrue { variable })
        }
    }
}

fn numeric_effect(group: &Group, build: impl FnOnce(String, String) -> Effect) -> Option<Effect> {
    let mut target: Option<String> = None;
    let mut expression: Option<String> = None;
    for item in group.items() {
        match item {
            GroupItem::Group(g) if target.is_none() => {
                target = Some(normalize_whitespace(&g.nested_text()));
            }
            GroupItem::Group(g) => {
                expression = Some(g.syntax().text().to_string().trim().to_string());
                break;
            }
            GroupItem::Atom(token) if target.is_some() => {
                expression = Some(token.text().to_string());
                break;
            }
            GroupItem::Atom(_) => return None,
        }
    }
    Some(build(target?, expression.unwrap_or_default()))
}
