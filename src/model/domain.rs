//! Domain files: `(define (domain ...) ...)`.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use rowan::TextSize;
use smol_str::SmolStr;

use crate::parser::{AstNode, Group, Parse, ParsingProblem, SyntaxNode, parse};

use super::constraints::{Constraint, parse_constraints};
use super::structures::{Structure, parse_structure};
use super::variables::{
    Variable, parse_typed_name_list, parse_variable_declarations,
};

/// Header pattern: leading whitespace and comment lines, then
/// `(define (domain NAME)`. Case-insensitive like the rest of the language.
static DOMAIN_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\s*;[^\n]*\n)*\s*\(define\s*\(domain\s+([-\w]+)\s*\)").expect("valid regex")
});

/// Structured view of one domain file
///
/// Owns its parse (tree, problems, line index); all section contents are
/// plain data, so the whole object can move across threads. Sub-nodes are
/// stored as text ranges and re-entered through [`DomainInfo::syntax`].
#[derive(Debug, Clone)]
pub struct DomainInfo {
    pub name: Option<SmolStr>,
    /// `:requirements` flags as written, e.g. `:strips`
    pub requirements: Vec<SmolStr>,
    /// Type → direct subtypes, in declaration order
    pub types: IndexMap<SmolStr, Vec<SmolStr>>,
    /// Type → constant names, in declaration order
    pub constants: IndexMap<SmolStr, Vec<SmolStr>>,
    pub predicates: Vec<Variable>,
    pub functions: Vec<Variable>,
    pub constraints: Vec<Constraint>,
    pub structures: Vec<Structure>,
    parse: Parse,
}

impl DomainInfo {
    /// Parse domain text. Returns `None` when the text does not carry a
    /// domain header — the typed "not a domain" answer, so callers can try
    /// the problem parser instead.
    pub fn parse(text: &str) -> Option<DomainInfo> {
        let captures = DOMAIN_HEADER.captures(text)?;
        let header_name = captures.get(2).map(|m| SmolStr::new(m.as_str()));

        let parse = parse(text);
        let mut info = DomainInfo {
            name: header_name,
            requirements: Vec::new(),
            types: IndexMap::new(),
            constants: IndexMap::new(),
            predicates: Vec::new(),
            functions: Vec::new(),
            constraints: Vec::new(),
            structures: Vec::new(),
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
            predicates = info.predicates.len(),
            functions = info.functions.len(),
            structures = info.structures.len(),
            problems = info.parse.problems.len(),
            "parsed domain"
        );
        Some(info)
    }

    fn read_section(&mut self, section: &Group) {
        let Some(operator) = section.operator() else {
            return;
        };
        match operator.as_str() {
            "domain" => {
                if self.name.is_none() {
                    self.name = section.first_atom().map(|t| SmolStr::new(t.text()));
                }
            }
            ":requirements" => {
                self.requirements = section
                    .keywords()
                    .map(|t| SmolStr::new(t.text()))
                    .collect();
            }
            ":types" => self.types = parse_typed_name_list(&section.arguments_text()),
            ":constants" => self.constants = parse_typed_name_list(&section.arguments_text()),
            ":predicates" => self.predicates = parse_variable_declarations(section),
            ":functions" => self.functions = parse_variable_declarations(section),
            ":constraints" => self.constraints = parse_constraints(section),
            other if other.starts_with(':') => {
                self.structures.push(parse_structure(section, other));
            }
            _ => {}
        }
    }

    /// Root of the syntax tree this domain was extracted from
    pub fn syntax(&self) -> SyntaxNode {
        self.parse.syntax()
    }

    pub fn parse_result(&self) -> &Parse {
        &self.parse
    }

    pub fn problems(&self) -> &[ParsingProblem] {
        &self.parse.problems
    }

    /// Look up a declared predicate or function by name (case-insensitive)
    pub fn get_variable(&self, name: &str) -> Option<&Variable> {
        self.predicates
            .iter()
            .chain(self.functions.iter())
            .find(|v| v.matches_name(name))
    }

    /// The structure whose declared range contains the offset
    pub fn structure_at(&self, offset: TextSize) -> Option<&Structure> {
        self.structures.iter().find(|s| s.range().contains(offset))
    }
}
