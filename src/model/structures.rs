//! Actions, processes, and events.
//!
//! All four construct kinds share one surface shape: an operator bracket, an
//! optional name atom, then keyword-introduced fields. Fields are extracted
//! positionally by keyword rather than by fixed offset, so a construct that
//! omits an optional field (a process without its own `:parameters` list, an
//! action without `:precondition`) still parses.

use rowan::TextRange;
use smol_str::SmolStr;

use crate::parser::{AstNode, Group, SyntaxElement, SyntaxKind};

/// When within a durative action's span a condition or effect applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeQualifier {
    AtStart,
    AtEnd,
    OverAll,
}

impl TimeQualifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeQualifier::AtStart => "at start",
            TimeQualifier::AtEnd => "at end",
            TimeQualifier::OverAll => "over all",
        }
    }
}

impl std::fmt::Display for TimeQualifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recognize `(at start ...)`, `(at end ...)`, `(over all ...)`
pub fn time_qualifier_of(group: &Group) -> Option<TimeQualifier> {
    let operator = group.operator()?;
    let first = group.first_atom()?;
    match (operator.as_str(), first.text()) {
        ("at", "start") => Some(TimeQualifier::AtStart),
        ("at", "end") => Some(TimeQualifier::AtEnd),
        ("over", "all") => Some(TimeQualifier::OverAll),
        _ => None,
    }
}

/// `(:action ...)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstantAction {
    pub name: Option<SmolStr>,
    pub parameters: Option<TextRange>,
    pub pre_condition: Option<TextRange>,
    pub effect: Option<TextRange>,
    pub range: TextRange,
}

/// `(:durative-action ...)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurativeAction {
    pub name: Option<SmolStr>,
    pub parameters: Option<TextRange>,
    pub duration: Option<TextRange>,
    pub condition: Option<TextRange>,
    pub effect: Option<TextRange>,
    pub range: TextRange,
}

/// `(:process ...)` — continuous change while its condition holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pub name: Option<SmolStr>,
    pub parameters: Option<TextRange>,
    pub pre_condition: Option<TextRange>,
    pub effect: Option<TextRange>,
    pub range: TextRange,
}

/// `(:event ...)` — discrete change the moment its condition holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub name: Option<SmolStr>,
    pub parameters: Option<TextRange>,
    pub pre_condition: Option<TextRange>,
    pub effect: Option<TextRange>,
    pub range: TextRange,
}

/// A construct that sits where a structure sits but is not one of the four
/// recognized kinds, e.g. `(:derived ...)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognizedStructure {
    pub keyword: SmolStr,
    pub range: TextRange,
}

/// Any domain construct that owns conditions and effects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Structure {
    Instant(InstantAction),
    Durative(DurativeAction),
    Process(Process),
    Event(Event),
    Unrecognized(UnrecognizedStructure),
}

impl Structure {
    pub fn name(&self) -> Option<&SmolStr> {
        match self {
            Structure::Instant(s) => s.name.as_ref(),
            Structure::Durative(s) => s.name.as_ref(),
            Structure::Process(s) => s.name.as_ref(),
            Structure::Event(s) => s.name.as_ref(),
            Structure::Unrecognized(_) => None,
        }
    }

    pub fn range(&self) -> TextRange {
        match self {
            Structure::Instant(s) => s.range,
            Structure::Durative(s) => s.range,
            Structure::Process(s) => s.range,
            Structure::Event(s) => s.range,
            Structure::Unrecognized(s) => s.range,
        }
    }

    /// The condition (`:condition` or `:precondition`) sub-node, if declared
    pub fn condition_range(&self) -> Option<TextRange> {
        match self {
            Structure::Instant(s) => s.pre_condition,
            Structure::Durative(s) => s.condition,
            Structure::Process(s) => s.pre_condition,
            Structure::Event(s) => s.pre_condition,
            Structure::Unrecognized(_) => None,
        }
    }

    pub fn effect_range(&self) -> Option<TextRange> {
        match self {
            Structure::Instant(s) => s.effect,
            Structure::Durative(s) => s.effect,
            Structure::Process(s) => s.effect,
            Structure::Event(s) => s.effect,
            Structure::Unrecognized(_) => None,
        }
    }

    pub fn duration_range(&self) -> Option<TextRange> {
        match self {
            Structure::Durative(s) => s.duration,
            _ => None,
        }
    }

    /// Human-readable kind, used in hover-style output
    pub fn kind_name(&self) -> &'static str {
        match self {
            Structure::Instant(_) => "action",
            Structure::Durative(_) => "durative action",
            Structure::Process(_) => "process",
            Structure::Event(_) => "event",
            Structure::Unrecognized(_) => "structure",
        }
    }
}

#[derive(Default)]
struct Fields {
    name: Option<SmolStr>,
    parameters: Option<TextRange>,
    duration: Option<TextRange>,
    pre_condition: Option<TextRange>,
    condition: Option<TextRange>,
    effect: Option<TextRange>,
}

/// Parse a structure group whose operator starts with `:`.
pub(crate) fn parse_structure(group: &Group, operator: &str) -> Structure {
    let range = group.syntax().text_range();
    let f = extract_fields(group);
    match operator {
        ":action" => Structure::Instant(InstantAction {
            name: f.name,
            parameters: f.parameters,
            pre_condition: f.pre_condition.or(f.condition),
            effect: f.effect,
            range,
        }),
        ":durative-action" => Structure::Durative(DurativeAction {
            name: f.name,
            parameters: f.parameters,
            duration: f.duration,
            condition: f.condition.or(f.pre_condition),
            effect: f.effect,
            range,
        }),
        ":process" => Structure::Process(Process {
            name: f.name,
            parameters: f.parameters,
            pre_condition: f.pre_condition.or(f.condition),
            effect: f.effect,
            range,
        }),
        ":event" => Structure::Event(Event {
            name: f.name,
            parameters: f.parameters,
            pre_condition: f.pre_condition.or(f.condition),
            effect: f.effect,
            range,
        }),
        other => Structure::Unrecognized(UnrecognizedStructure {
            keyword: SmolStr::new(other),
            range,
        }),
    }
}

fn extract_fields(group: &Group) -> Fields {
    let mut fields = Fields::default();
    let mut pending_keyword: Option<SmolStr> = None;
    let mut seen_keyword = false;

    for element in group.syntax().children_with_tokens() {
        match element {
            SyntaxElement::Token(token) => match token.kind() {
                SyntaxKind::ATOM => {
                    if !seen_keyword && fields.name.is_none() {
                        fields.name = Some(SmolStr::new(token.text()));
                    }
                }
                SyntaxKind::KEYWORD => {
                    seen_keyword = true;
                    pending_keyword = Some(SmolStr::new(token.text()));
                }
                _ => {}
            },
            SyntaxElement::Node(node) => {
                let Some(child) = Group::cast(node) else { continue };
                let Some(keyword) = pending_keyword.take() else { continue };
                let target = match keyword.as_str() {
                    ":parameters" => &mut fields.parameters,
                    ":duration" => &mut fields.duration,
                    ":precondition" => &mut fields.pre_condition,
                    ":condition" => &mut fields.condition,
                    ":effect" => &mut fields.effect,
                    _ => continue,
                };
                *target = Some(child.syntax().text_range());
            }
        }
    }
    fields
}
