//! Enrollment-rule encoder.
//!
//! For each student and each wished course, ties `Enrolled` to exactly one
//! term and exactly one section within that term, and asserts the wish as
//! mandatory: every wished course is force-enrolled, not merely offered as an option.

use crate::core::error::Diagnostic;
use crate::core::models::catalog::Catalog;
use crate::core::models::student::Student;
use crate::core::models::term::Term;
use crate::core::proposition::Proposition;
use crate::core::theory::{Lit, TheoryBuilder};

/// Encode the enrollment rules for every wished course of `student`.
///
/// Clauses are emitted in sorted-by-code order over the wish list, for
/// determinism guarantee.
pub fn encode(
    builder: &mut TheoryBuilder,
    catalog: &Catalog,
    student: &Student,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let mut wished: Vec<&String> = student.course_wish_list.iter().collect();
    wished.sort();

    for course_code in wished {
        let Some(course) = catalog.course(course_code) else {
            // Wish-list/completed-course codes are never validated against the
            // catalog at ingestion (unlike section `course_id` and friend
            // names, which are). An unresolvable code is carried through
            // verbatim; skip clause emission for it here.
            continue;
        };

        let enrolled = builder.lit(Proposition::Enrolled {
            student: student.name.clone(),
            course: course_code.clone(),
        });

        let terms = course.offered_terms();
        if terms.is_empty() {
            diagnostics.push(Diagnostic::CatalogIntegrityWarning {
                student: student.name.clone(),
                course: course_code.clone(),
            });
        }

        let term_lits: Vec<Lit> = terms
            .iter()
            .map(|&term| {
                builder.lit(Proposition::InTerm {
                    student: student.name.clone(),
                    course: course_code.clone(),
                    term,
                })
            })
            .collect();

        // Rule 1: course implies some term (empty disjunction if unoffered).
        builder.implies_any(enrolled, &term_lits);
        // Rule 2a: at most one term.
        builder.at_most_one(&term_lits);
        // Rule 2b: terms never offered are forced false.
        for term in Term::ALL {
            if !terms.contains(&term) {
                let lit = builder.lit(Proposition::InTerm {
                    student: student.name.clone(),
                    course: course_code.clone(),
                    term,
                });
                builder.unit(lit.negated());
            }
        }

        for (&term, &term_lit) in terms.iter().zip(term_lits.iter()) {
            let sections = course.sections_in(term);
            let section_lits: Vec<Lit> = sections
                .iter()
                .map(|section| {
                    builder.lit(Proposition::InSection {
                        student: student.name.clone(),
                        course: course_code.clone(),
                        term,
                        section: section.id.clone(),
                    })
                })
                .collect();

            // Rule 3: term implies some section.
            builder.implies_any(term_lit, &section_lits);
            // Rule 4: at most one section per (course, term).
            builder.at_most_one(&section_lits);
            // Rule 5: section implies its term.
            for &lit in &section_lits {
                builder.implies(lit, term_lit);
            }
        }

        // Rule 6: mandatory wish fulfillment.
        builder.unit(enrolled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::course::{Course, RequirementBundle};
    use crate::core::models::section::{Section, SectionType};
    use std::collections::{HashMap, HashSet};

    fn course_with_one_fall_section(code: &str) -> Course {
        let mut sections = HashMap::new();
        sections.insert(
            Term::Fall,
            vec![Section {
                id: format!("{code}-001"),
                course_id: code.to_string(),
                class_number: "001".to_string(),
                enrollment_capacity: 30,
                enrollment_total: 0,
                dates: Vec::new(),
                section_type: SectionType::Lecture,
            }],
        );
        Course {
            id: code.to_string(),
            code: code.to_string(),
            name: "Test".to_string(),
            department: "CS".to_string(),
            campus: "Boston".to_string(),
            academic_level: "Undergraduate".to_string(),
            units: 4.0,
            requirements: RequirementBundle::default(),
            sections,
        }
    }

    fn student_wishing(codes: &[&str]) -> Student {
        Student {
            name: "A".to_string(),
            academic_year: "Freshman".to_string(),
            program: "CS".to_string(),
            completed_courses: HashSet::new(),
            course_wish_list: codes.iter().map(|s| (*s).to_string()).collect(),
            friends: HashMap::new(),
        }
    }

    #[test]
    fn unoffered_wished_course_yields_catalog_integrity_warning() {
        let mut catalog = Catalog::new();
        let mut course = course_with_one_fall_section("CS-101");
        course.sections.clear();
        catalog.add_course(course);
        let student = student_wishing(&["CS-101"]);

        let mut builder = TheoryBuilder::new();
        let mut diagnostics = Vec::new();
        encode(&mut builder, &catalog, &student, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(
            diagnostics[0],
            Diagnostic::CatalogIntegrityWarning { .. }
        ));
    }

    #[test]
    fn single_offered_course_is_satisfiable() {
        use crate::core::solver::{BackendOutcome, SatBackend, VarisatBackend};

        let mut catalog = Catalog::new();
        catalog.add_course(course_with_one_fall_section("CS-101"));
        let student = student_wishing(&["CS-101"]);

        let mut builder = TheoryBuilder::new();
        let mut diagnostics = Vec::new();
        encode(&mut builder, &catalog, &student, &mut diagnostics);
        assert!(diagnostics.is_empty());

        let (formula, _) = builder.finish();
        let backend = VarisatBackend::new();
        assert!(matches!(backend.solve(&formula), BackendOutcome::Sat(_)));
    }
}
