//! Declared variables: predicates and functions.
//!
//! The grammar does not mark where one declaration inside `(:predicates ...)`
//! or `(:functions ...)` ends and the next begins, so declarations are
//! segmented by vertical whitespace: an empty line always starts a new
//! declaration group and discards partial accumulation, and a single newline
//! after a declaration bracket closes that declaration. Comments collected
//! before a declaration's bracket become its documentation. Consumers rely on
//! this exact chunking for documentation association, so it is locked by
//! tests rather than generalized.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use rowan::TextRange;
use smol_str::SmolStr;

use crate::parser::{AstNode, Group, SyntaxElement, SyntaxKind};

use super::normalize_whitespace;

/// A typed parameter of a declared variable: `?t - truck`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    pub name: SmolStr,
    pub type_name: SmolStr,
}

/// A declared predicate or function
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// Head name, e.g. `at`
    pub name: SmolStr,
    /// Declaration as written, whitespace-normalized: `at ?l - location`
    pub full_name: String,
    pub parameters: Vec<Parameter>,
    /// Comment lines preceding the declaration, joined with newlines
    pub documentation: Option<String>,
    pub declared_range: TextRange,
}

impl Variable {
    /// Case-insensitive name comparison; PDDL names are not case-sensitive
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// `?x ?y - block` groups inside a parameter list; every `?name` before the
/// `- type` suffix receives that type.
static TYPED_PARAMETERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"((?:\?\w+\s+)+)-\s+(\w[\w-]*)").expect("valid regex"));

static PARAMETER_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"\?(\w+)").expect("valid regex"));

/// `a b - t` groups over bare names, used for `:types`, `:constants`, and
/// `:objects` lists.
static TYPED_NAMES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"((?:\w[\w-]*\s+)+)-\s+(\w[\w-]*)").expect("valid regex"));

/// Parse a parameter list fragment into typed parameters.
///
/// Parameters without a `- type` suffix yield no entries; they remain
/// visible in the declaration's `full_name` only.
pub fn parse_parameters(text: &str) -> Vec<Parameter> {
    let mut parameters = Vec::new();
    for captures in TYPED_PARAMETERS.captures_iter(text) {
        let names = &captures[1];
        let type_name = SmolStr::new(&captures[2]);
        for name in PARAMETER_NAME.captures_iter(names) {
            parameters.push(Parameter {
                name: SmolStr::new(&name[1]),
                type_name: type_name.clone(),
            });
        }
    }
    parameters
}

/// Parse a bare-name inheritance list (`truck car - vehicle vehicle - object`)
/// into a type → members map, preserving declaration order. Names without a
/// type suffix fall under the root type `object`.
pub fn parse_typed_name_list(text: &str) -> IndexMap<SmolStr, Vec<SmolStr>> {
    let mut map: IndexMap<SmolStr, Vec<SmolStr>> = IndexMap::new();
    let mut consumed: Vec<(usize, usize)> = Vec::new();
    for captures in TYPED_NAMES.captures_iter(text) {
        let whole = captures.get(0).expect("capture 0 always present");
        consumed.push((whole.start(), whole.end()));
        let type_name = SmolStr::new(&captures[2]);
        let members = map.entry(type_name).or_default();
        members.extend(captures[1].split_whitespace().map(SmolStr::new));
    }

    // Whatever the typed groups did not cover is untyped
    let mut leftovers: Vec<SmolStr> = Vec::new();
    let mut cursor = 0;
    for (start, end) in consumed {
        leftovers.extend(text[cursor..start].split_whitespace().map(SmolStr::new));
        cursor = end;
    }
    leftovers.extend(text[cursor..].split_whitespace().map(SmolStr::new));
    if !leftovers.is_empty() {
        map.entry(SmolStr::new("object")).or_default().extend(leftovers);
    }
    map
}

/// Extract the declared variables of a `(:predicates ...)` or
/// `(:functions ...)` section.
pub fn parse_variable_declarations(section: &Group) -> Vec<Variable> {
    let mut variables = Vec::new();
    let mut pending_docs: Vec<String> = Vec::new();
    let mut open_declaration: Option<Group> = None;

    for element in section.syntax().children_with_tokens() {
        match element {
            SyntaxElement::Token(token) => match token.kind() {
                SyntaxKind::COMMENT => {
                    // Comments after a declaration's bracket on the same line
                    // are dropped, not deferred to the next declaration
                    if open_declaration.is_none() {
                        pending_docs.push(clean_comment(token.text()));
                    }
                }
                SyntaxKind::WHITESPACE => {
                    let newlines = token.text().matches('\n').count();
                    if newlines >= 2 {
                        emit(&mut open_declaration, &mut pending_docs, &mut variables);
                    } else if newlines == 1 && open_declaration.is_some() {
                        emit(&mut open_declaration, &mut pending_docs, &mut variables);
                    }
                }
                _ => {}
            },
            SyntaxElement::Node(node) => {
                if let Some(group) = Group::cast(node) {
                    if open_declaration.is_some() {
                        emit(&mut open_declaration, &mut pending_docs, &mut variables);
                    }
                    open_declaration = Some(group);
                }
            }
        }
    }
    emit(&mut open_declaration, &mut pending_docs, &mut variables);

    variables
}

fn emit(declaration: &mut Option<Group>, docs: &mut Vec<String>, out: &mut Vec<Variable>) {
    if let Some(group) = declaration.take() {
        if let Some(variable) = variable_from_declaration(&group, docs) {
            out.push(variable);
        }
    }
    docs.clear();
}

fn variable_from_declaration(group: &Group, docs: &[String]) -> Option<Variable> {
    let full_name = normalize_whitespace(&group.nested_text());
    let name = SmolStr::new(full_name.split_whitespace().next()?);
    let documentation = (!docs.is_empty()).then(|| docs.join("\n"));
    Some(Variable {
        parameters: parse_parameters(&full_name),
        declared_range: group.syntax().text_range(),
        name,
        full_name,
        documentation,
    })
}

fn clean_comment(text: &str) -> String {
    text.trim_start_matches(';').trim().to_string()
}
