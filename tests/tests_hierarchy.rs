//! Reference-classification tests
//!
//! Exercises `ModelHierarchy::classify` over a durative action and hybrid
//! (process/event) constructs: condition vs. effect placement, temporal
//! qualification, and read/write direction.
//! Run with: cargo test --test tests_hierarchy

use pddl::model::{
    DomainInfo, ModelHierarchy, StructurePart, TimeQualifier, Variable, VariableReferenceInfo,
    VariableReferenceKind,
};
use pddl::parser::TextSize;

const FLIGHT_DOMAIN: &str = r#"(define (domain flight)
    (:predicates (at ?p - plane ?l - location))
    (:functions (fuel ?p - plane) (fuel-used ?p - plane))
    (:durative-action fly
        :parameters (?p - plane ?from ?to - location)
        :duration (= ?duration 5)
        :condition (and (at start (at ?p ?from)) (over all (>= (fuel ?p) 10)))
        :effect (and (at end (not (at ?p ?from)))
                     (at end (at ?p ?to))
                     (at end (increase (fuel-used ?p) (fuel ?p))))
    )
)"#;

// ============================================================
// HELPERS
// ============================================================

/// Offset of the character `delta` positions into the first occurrence of
/// `needle`
fn offset_in(text: &str, needle: &str, delta: usize) -> TextSize {
    let position = text.find(needle).unwrap_or_else(|| {
        panic!("needle {needle:?} not found");
    });
    TextSize::new((position + delta) as u32)
}

fn classify<'a>(
    domain: &'a DomainInfo,
    variable: &Variable,
    offset: TextSize,
) -> VariableReferenceInfo<'a> {
    ModelHierarchy::new(domain).classify(variable, offset)
}

// ============================================================
// DURATIVE ACTION
// ============================================================

mod durative_tests {
    use super::*;

    #[test]
    fn test_condition_read_at_start() {
        let domain = DomainInfo::parse(FLIGHT_DOMAIN).unwrap();
        let at = domain.get_variable("at").unwrap().clone();
        let offset = offset_in(FLIGHT_DOMAIN, "(at ?p ?from))", 1);
        let info = classify(&domain, &at, offset);
        assert_eq!(info.part, StructurePart::Condition);
        assert_eq!(info.kind, VariableReferenceKind::Read);
        assert_eq!(info.time_qualifier, Some(TimeQualifier::AtStart));
        assert_eq!(info.relevant_code.as_deref(), Some("(at ?p ?from)"));
        assert_eq!(
            info.structure.and_then(|s| s.name()).map(|n| n.as_str()),
            Some("fly")
        );
    }

    #[test]
    fn test_condition_read_scoped_to_comparison() {
        let domain = DomainInfo::parse(FLIGHT_DOMAIN).unwrap();
        let fuel = domain.get_variable("fuel").unwrap().clone();
        let offset = offset_in(FLIGHT_DOMAIN, "(fuel ?p) 10", 1);
        let info = classify(&domain, &fuel, offset);
        assert_eq!(info.part, StructurePart::Condition);
        assert_eq!(info.kind, VariableReferenceKind::Read);
        assert_eq!(info.time_qualifier, Some(TimeQualifier::OverAll));
        assert_eq!(info.relevant_code.as_deref(), Some("(>= (fuel ?p) 10)"));
    }

    #[test]
    fn test_effect_write_at_end() {
        let domain = DomainInfo::parse(FLIGHT_DOMAIN).unwrap();
        let at = domain.get_variable("at").unwrap().clone();
        let offset = offset_in(FLIGHT_DOMAIN, "(not (at ?p ?from))", 6);
        let info = classify(&domain, &at, offset);
        assert_eq!(info.part, StructurePart::Effect);
        assert_eq!(info.kind, VariableReferenceKind::Write);
        assert_eq!(info.time_qualifier, Some(TimeQualifier::AtEnd));
        assert_eq!(info.relevant_code.as_deref(), Some("(not (at ?p ?from))"));
    }

    #[test]
    fn test_bare_effect_write() {
        let domain = DomainInfo::parse(FLIGHT_DOMAIN).unwrap();
        let at = domain.get_variable("at").unwrap().clone();
        let offset = offset_in(FLIGHT_DOMAIN, "(at ?p ?to)", 1);
        let info = classify(&domain, &at, offset);
        assert_eq!(info.kind, VariableReferenceKind::Write);
        assert_eq!(info.time_qualifier, Some(TimeQualifier::AtEnd));
    }

    #[test]
    fn test_numeric_effect_write_target() {
        let domain = DomainInfo::parse(FLIGHT_DOMAIN).unwrap();
        let fuel_used = domain.get_variable("fuel-used").unwrap().clone();
        let offset = offset_in(FLIGHT_DOMAIN, "(increase (fuel-used ?p)", 11);
        let info = classify(&domain, &fuel_used, offset);
        assert_eq!(info.part, StructurePart::Effect);
        assert_eq!(info.kind, VariableReferenceKind::Write);
        assert_eq!(info.time_qualifier, Some(TimeQualifier::AtEnd));
    }

    #[test]
    fn test_numeric_effect_right_hand_side_reads() {
        let domain = DomainInfo::parse(FLIGHT_DOMAIN).unwrap();
        let fuel = domain.get_variable("fuel").unwrap().clone();
        let offset = offset_in(FLIGHT_DOMAIN, "(fuel ?p))", 1);
        let info = classify(&domain, &fuel, offset);
        assert_eq!(info.part, StructurePart::Effect);
        assert_eq!(info.kind, VariableReferenceKind::Read);
    }

    #[test]
    fn test_duration_is_a_read() {
        let domain = DomainInfo::parse(FLIGHT_DOMAIN).unwrap();
        let fuel = domain.get_variable("fuel").unwrap().clone();
        let offset = offset_in(FLIGHT_DOMAIN, "?duration", 1);
        let info = classify(&domain, &fuel, offset);
        assert_eq!(info.part, StructurePart::Duration);
        assert_eq!(info.kind, VariableReferenceKind::Read);
        assert_eq!(info.time_qualifier, None);
        assert_eq!(info.relevant_code.as_deref(), Some("(= ?duration 5)"));
    }

    #[test]
    fn test_parameter_list_is_unrecognized() {
        let domain = DomainInfo::parse(FLIGHT_DOMAIN).unwrap();
        let at = domain.get_variable("at").unwrap().clone();
        let offset = offset_in(FLIGHT_DOMAIN, "?p - plane ?from", 1);
        let info = classify(&domain, &at, offset);
        assert_eq!(info.part, StructurePart::Unrecognized);
        assert_eq!(info.kind, VariableReferenceKind::Unrecognized);
    }

    #[test]
    fn test_outside_structures() {
        let domain = DomainInfo::parse(FLIGHT_DOMAIN).unwrap();
        let at = domain.get_variable("at").unwrap().clone();
        let offset = offset_in(FLIGHT_DOMAIN, "(at ?p - plane ?l - location)", 1);
        let info = classify(&domain, &at, offset);
        assert_eq!(info.part, StructurePart::NotInStructure);
        assert_eq!(info.kind, VariableReferenceKind::Unrecognized);
        assert!(info.structure.is_none());
    }
}

// ============================================================
// HYBRID CONSTRUCTS
// ============================================================

mod hybrid_tests {
    use super::*;

    const HYBRID_DOMAIN: &str = r#"(define (domain tank)
    (:predicates (filling ?t - tank))
    (:functions (level ?t - tank))
    (:process fill
        :parameters (?t - tank)
        :precondition (filling ?t)
        :effect (increase (level ?t) (* #t 2))
    )
    (:event overflow
        :parameters (?t - tank)
        :precondition (> (level ?t) 100)
        :effect (not (filling ?t))
    )
)"#;

    #[test]
    fn test_process_condition_read() {
        let domain = DomainInfo::parse(HYBRID_DOMAIN).unwrap();
        let filling = domain.get_variable("filling").unwrap().clone();
        let offset = offset_in(HYBRID_DOMAIN, "(filling ?t)\n        :effect", 1);
        let info = classify(&domain, &filling, offset);
        assert_eq!(info.part, StructurePart::Condition);
        assert_eq!(info.kind, VariableReferenceKind::Read);
        assert_eq!(info.time_qualifier, None);
    }

    #[test]
    fn test_process_effect_write() {
        let domain = DomainInfo::parse(HYBRID_DOMAIN).unwrap();
        let level = domain.get_variable("level").unwrap().clone();
        let offset = offset_in(HYBRID_DOMAIN, "(level ?t) (* #t 2)", 1);
        let info = classify(&domain, &level, offset);
        assert_eq!(info.part, StructurePart::Effect);
        assert_eq!(info.kind, VariableReferenceKind::Write);
    }

    #[test]
    fn test_event_condition_scoped_to_comparison() {
        let domain = DomainInfo::parse(HYBRID_DOMAIN).unwrap();
        let level = domain.get_variable("level").unwrap().clone();
        let offset = offset_in(HYBRID_DOMAIN, "(level ?t) 100", 1);
        let info = classify(&domain, &level, offset);
        assert_eq!(info.part, StructurePart::Condition);
        assert_eq!(info.kind, VariableReferenceKind::Read);
        assert_eq!(info.relevant_code.as_deref(), Some("(> (level ?t) 100)"));
    }

    #[test]
    fn test_event_effect_write() {
        let domain = DomainInfo::parse(HYBRID_DOMAIN).unwrap();
        let filling = domain.get_variable("filling").unwrap().clone();
        let offset = offset_in(HYBRID_DOMAIN, "(filling ?t))", 7);
        let info = classify(&domain, &filling, offset);
        assert_eq!(info.part, StructurePart::Effect);
        assert_eq!(info.kind, VariableReferenceKind::Write);
    }

    #[test]
    fn test_unparseable_effect_is_read_or_write() {
        let text = "(define (domain d)\n(:functions (f))\n(:action a :effect (assign))\n)";
        let domain = DomainInfo::parse(text).unwrap();
        let f = domain.get_variable("f").unwrap().clone();
        let offset = offset_in(text, "(assign)", 2);
        let info = classify(&domain, &f, offset);
        assert_eq!(info.part, StructurePart::Effect);
        assert_eq!(info.kind, VariableReferenceKind::ReadOrWrite);
    }
}
