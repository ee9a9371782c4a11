//! Semantic model extracted from the bracket tree.
//!
//! Each file kind has a structured, queryable view:
//! - [`DomainInfo`] — requirements, type hierarchy, constants, declared
//!   predicates/functions, constraints, and action/process/event structures
//! - [`ProblemInfo`] — objects, timed initial facts, goal, and metric
//!
//! [`PddlFile::parse`] dispatches on the file header and never fails: text
//! matching neither header still yields its parse (tree plus problems), so
//! editors can operate on any snapshot.
//!
//! [`ModelHierarchy`] answers the semantic question the views themselves do
//! not store: given a declared variable and an offset, how is the variable
//! accessed there? Results are derived per query and never cached.

mod constraints;
mod domain;
mod effects;
mod hierarchy;
mod problem;
mod structures;
mod variables;

pub use constraints::{ConditionRef, Constraint, parse_constraints};
pub use domain::DomainInfo;
pub use effects::{Effect, parse_effect};
pub use hierarchy::{
    ModelHierarchy, StructurePart, VariableReferenceInfo, VariableReferenceKind,
};
pub use problem::{
    FluentValue, Metric, OptimizationDirection, ProblemInfo, SupplyDemand, TimedVariableValue,
    VariableValue,
};
pub use structures::{
    DurativeAction, Event, InstantAction, Process, Structure, TimeQualifier,
    UnrecognizedStructure, time_qualifier_of,
};
pub use variables::{
    Parameter, Variable, parse_parameters, parse_typed_name_list, parse_variable_declarations,
};

use crate::parser::Parse;

/// Any PDDL file, dispatched on its header
#[derive(Debug, Clone)]
pub enum PddlFile {
    Domain(DomainInfo),
    Problem(ProblemInfo),
    /// Neither header matched; the tree and problems are still available
    Unrecognized(Parse),
}

impl PddlFile {
    /// Parse any PDDL text, trying the domain header first, then the
    /// problem header.
    pub fn parse(text: &str) -> PddlFile {
        if let Some(domain) = DomainInfo::parse(text) {
            return PddlFile::Domain(domain);
        }
        if let Some(problem) = ProblemInfo::parse(text) {
            return PddlFile::Problem(problem);
        }
        PddlFile::Unrecognized(crate::parser::parse(text))
    }
}

/// Collapse runs of whitespace to single spaces
pub(crate) fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
