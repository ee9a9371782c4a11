//! Problem files: `(define (problem ...) (:domain ...) ...)`.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use rowan::TextRange;
use smol_str::SmolStr;

use crate::parser::{AstNode, Group, GroupItem, Parse, ParsingProblem, SyntaxNode, parse};

use super::normalize_whitespace;
use super::variables::parse_typed_name_list;

static PROBLEM_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\s*;[^\n]*\n)*\s*\(define\s*\(problem\s+([-\w]+)\s*\)").expect("valid regex")
});

/// The value a fact gives its variable
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FluentValue {
    Boolean(bool),
    Numeric(f64),
}

impl FluentValue {
    /// Negation flips booleans; numeric assignments have no meaningful
    /// negation and pass through unchanged.
    pub fn negate(self) -> FluentValue {
        match self {
            FluentValue::Boolean(b) => FluentValue::Boolean(!b),
            numeric => numeric,
        }
    }
}

/// One variable given a value, e.g. `at truck1 depot` = true
#[derive(Debug, Clone, PartialEq)]
pub struct VariableValue {
    pub variable_name: String,
    pub value: FluentValue,
}

impl VariableValue {
    fn negate(self) -> VariableValue {
        VariableValue {
            variable_name: self.variable_name,
            value: self.value.negate(),
        }
    }
}

/// A fact holding from a point in time; bare facts hold from time 0
#[derive(Debug, Clone, PartialEq)]
pub struct TimedVariableValue {
    pub time: f64,
    pub value: VariableValue,
}

/// `(supply-demand ...)` initial-state construct, collected separately from
/// the timed fact list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplyDemand {
    pub name: Option<SmolStr>,
    pub range: TextRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizationDirection {
    Minimize,
    Maximize,
}

/// `(:metric minimize (total-time))`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    pub direction: Option<OptimizationDirection>,
    pub expression: Option<String>,
    pub range: TextRange,
}

/// Structured view of one problem file
#[derive(Debug, Clone)]
pub struct ProblemInfo {
    pub name: Option<SmolStr>,
    /// The domain this problem instantiates
    pub domain_name: Option<SmolStr>,
    pub requirements: Vec<SmolStr>,
    /// Type → object names, in declaration order
    pub objects: IndexMap<SmolStr, Vec<SmolStr>>,
    pub init: Vec<TimedVariableValue>,
    pub supply_demands: Vec<SupplyDemand>,
    /// The goal condition node
    pub goal: Option<TextRange>,
    pub metric: Option<Metric>,
    parse: Parse,
}

impl ProblemInfo {
    /// Parse problem text. Returns `None` when the text does not carry a
    /// problem header.
    pub fn parse(text: &str) -> Option<ProblemInfo> {
        let captures = PROBLEM_HEADER.captures(text)?;
        let header_name = captures.get(2).map(|m| SmolStr::new(m.as_str()));

        let parse = parse(text);
        let mut info = ProblemInfo {
            name: header_name,
            domain_name: None,
            requirements: Vec::new(),
            objects: IndexMap::new(),
            init: Vec::new(),
            supply_demands: Vec::new(),
            goal: None,
            metric: None,
            parse,
        };

        let root = info.parse.syntax();
        let define = root
            .children()
            .filter_map(Group::cast)
            .find(|g| g.operator().as_deref() == Some("define"));
        if let Some(define) = define {
            for section in define.child_groups() {
                info.read_section(&section);
            }
        }

        tracing::debug!(
            name = info.name.as_deref().unwrap_or("?"),
            domain = info.domain_name.as_deref().unwrap_or("?"),
            init = info.init.len(),
            problems = info.parse.problems.len(),
            "parsed problem"
        );
        Some(info)
    }

    fn read_section(&mut self, section: &Group) {
        let Some(operator) = section.operator() else {
            return;
        };
        match operator.as_str() {
            "problem" => {
                if self.name.is_none() {
                    self.name = section.first_atom().map(|t| SmolStr::new(t.text()));
                }
            }
            ":domain" => {
                self.domain_name = section.first_atom().map(|t| SmolStr::new(t.text()));
            }
            ":requirements" => {
                self.requirements = section
                    .keywords()
                    .map(|t| SmolStr::new(t.text()))
                    .collect();
            }
            ":objects" => self.objects = parse_typed_name_list(&section.arguments_text()),
            ":init" => self.read_init(section),
            ":goal" => self.goal = section.child_groups().next().map(|g| g.syntax().text_range()),
            ":metric" => self.metric = Some(read_metric(section)),
            _ => {}
        }
    }

    fn read_init(&mut self, section: &Group) {
        for child in section.child_groups() {
            match child.operator().as_deref() {
                // `(at 5 (fact))` is a timed fact; `(at truck1 depot)` is a
                // plain fact for the predicate named `at`
                Some("at") => {
                    let time = child
                        .first_atom()
                        .and_then(|t| t.text().parse::<f64>().ok());
                    match time {
                        Some(time) => {
                            if let Some(value) =
                                child.child_groups().next().as_ref().and_then(parse_fact)
                            {
                                self.init.push(TimedVariableValue { time, value });
                            }
                        }
                        None => self.push_fact(&child),
                    }
                }
                Some("supply-demand") => self.supply_demands.push(SupplyDemand {
                    name: child.first_atom().map(|t| SmolStr::new(t.text())),
                    range: child.syntax().text_range(),
                }),
                _ => self.push_fact(&child),
            }
        }
    }

    fn push_fact(&mut self, group: &Group) {
        if let Some(value) = parse_fact(group) {
            self.init.push(TimedVariableValue { time: 0.0, value });
        }
    }

    pub fn syntax(&self) -> SyntaxNode {
        self.parse.syntax()
    }

    pub fn parse_result(&self) -> &Parse {
        &self.parse
    }

    pub fn problems(&self) -> &[ParsingProblem] {
        &self.parse.problems
    }
}

/// Parse one initial-state fact: a bare predicate (true), a negated fact,
/// or a `(= (fn args) value)` numeric assignment.
fn parse_fact(group: &Group) -> Option<VariableValue> {
    match group.operator().as_deref() {
        Some("not") => {
            let inner = group.child_groups().next()?;
            parse_fact(&inner).map(VariableValue::negate)
        }
        Some("=") => {
            let function = group.child_groups().next()?;
            let variable_name = normalize_whitespace(&function.nested_text());
            let value = group.items().find_map(|item| match item {
                GroupItem::Atom(token) => token.text().parse::<f64>().ok(),
                GroupItem::Group(_) => None,
            })?;
            (!variable_name.is_empty()).then_some(VariableValue {
                variable_name,
                value: FluentValue::Numeric(value),
            })
        }
        _ => {
            let variable_name = normalize_whitespace(&group.nested_text());
            (!variable_name.is_empty()).then_some(VariableValue {
                variable_name,
                value: FluentValue::Boolean(true),
            })
        }
    }
}

fn read_metric(section: &Group) -> Metric {
    let direction = section.first_atom().and_then(|t| {
        let text = t.text();
        if text.eq_ignore_ascii_case("minimize") {
            Some(OptimizationDirection::Minimize)
        } else if text.eq_ignore_ascii_case("maximize") {
            Some(OptimizationDirection::Maximize)
        } else {
            None
        }
    });
    let expression = section
        .child_groups()
        .next()
        .map(|g| normalize_whitespace(&g.syntax().text().to_string()));
    Metric {
        direction,
        expression,
        range: section.syntax().text_range(),
    }
}
