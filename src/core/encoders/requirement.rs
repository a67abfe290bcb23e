//! Requirement encoder: compiles each wished course's prerequisite,
//! corequisite, and exclusion formulas into clauses over per-atom witness
//! variables, and gates `Enrolled` on all three being satisfied.

use crate::core::error::Diagnostic;
use crate::core::models::catalog::Catalog;
use crate::core::models::requirement::{Expr, Requirement};
use crate::core::models::student::Student;
use crate::core::proposition::Proposition;
use crate::core::theory::{Lit, TheoryBuilder};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Exclusion,
    Prerequisite,
    Corequisite,
}

/// Encode the prerequisite/corequisite/exclusion rules for every wished
/// course of `student`, gating `Enrolled` on all three being satisfied.
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
            continue;
        };

        let enrolled = builder.lit(Proposition::Enrolled {
            student: student.name.clone(),
            course: course_code.clone(),
        });
        let exclusion_ok = builder.lit(Proposition::ExclusionOk {
            student: student.name.clone(),
            course: course_code.clone(),
        });
        let prereq_ok = builder.lit(Proposition::PrereqOk {
            student: student.name.clone(),
            course: course_code.clone(),
        });
        let coreq_ok = builder.lit(Proposition::CoreqOk {
            student: student.name.clone(),
            course: course_code.clone(),
        });

        encode_kind(
            builder,
            catalog,
            student,
            course_code,
            &course.requirements.exclusion,
            Kind::Exclusion,
            exclusion_ok,
            diagnostics,
        );
        encode_kind(
            builder,
            catalog,
            student,
            course_code,
            &course.requirements.prerequisite,
            Kind::Prerequisite,
            prereq_ok,
            diagnostics,
        );
        encode_kind(
            builder,
            catalog,
            student,
            course_code,
            &course.requirements.corequisite,
            Kind::Corequisite,
            coreq_ok,
            diagnostics,
        );

        // Gate enrollment: Enrolled(s,c) → ExclusionOk ∧ PrereqOk ∧ CoreqOk.
        builder.implies(enrolled, exclusion_ok);
        builder.implies(enrolled, prereq_ok);
        builder.implies(enrolled, coreq_ok);
    }
}

fn encode_kind(
    builder: &mut TheoryBuilder,
    catalog: &Catalog,
    student: &Student,
    course_code: &str,
    requirement: &Requirement,
    kind: Kind,
    ok_lit: Lit,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let Requirement::Expr(expr) = requirement else {
        // No rule of this kind: vacuously satisfied.
        builder.unit(ok_lit);
        return;
    };

    let phi = compile_expr(builder, catalog, student, course_code, expr, kind, diagnostics);
    match kind {
        // ExclusionOk ↔ ¬Φ_E: the rule is "broken" when its atoms are present.
        Kind::Exclusion => builder.biconditional(ok_lit, phi.negated()),
        Kind::Prerequisite | Kind::Corequisite => builder.biconditional(ok_lit, phi),
    }
}

fn compile_expr(
    builder: &mut TheoryBuilder,
    catalog: &Catalog,
    student: &Student,
    course_code: &str,
    expr: &Expr,
    kind: Kind,
    diagnostics: &mut Vec<Diagnostic>,
) -> Lit {
    match expr {
        Expr::Atom(atom) => witness(builder, catalog, student, course_code, atom, kind, diagnostics),
        Expr::Not(inner) => {
            compile_expr(builder, catalog, student, course_code, inner, kind, diagnostics).negated()
        }
        Expr::And(lhs, rhs) => {
            let a = compile_expr(builder, catalog, student, course_code, lhs, kind, diagnostics);
            let b = compile_expr(builder, catalog, student, course_code, rhs, kind, diagnostics);
            builder.and_gate(a, b)
        }
        Expr::Or(lhs, rhs) => {
            let a = compile_expr(builder, catalog, student, course_code, lhs, kind, diagnostics);
            let b = compile_expr(builder, catalog, student, course_code, rhs, kind, diagnostics);
            builder.or_gate(a, b)
        }
    }
}

fn witness(
    builder: &mut TheoryBuilder,
    catalog: &Catalog,
    student: &Student,
    course_code: &str,
    atom: &str,
    kind: Kind,
    diagnostics: &mut Vec<Diagnostic>,
) -> Lit {
    if catalog.course(atom).is_none() {
        diagnostics.push(Diagnostic::UnknownAtomInRequirement {
            student: student.name.clone(),
            course: course_code.to_string(),
            atom: atom.to_string(),
        });
    }

    match kind {
        Kind::Exclusion => {
            let witness = builder.lit(Proposition::ExcludedExists {
                student: student.name.clone(),
                course: course_code.to_string(),
                atom: atom.to_string(),
            });
            let present = catalog.course(atom).is_some()
                && (student.completed_courses.contains(atom)
                    || student.course_wish_list.contains(atom));
            builder.unit(if present { witness } else { witness.negated() });
            witness
        }
        Kind::Prerequisite => {
            witness_with_temporal(builder, catalog, student, course_code, atom, true)
        }
        Kind::Corequisite => {
            witness_with_temporal(builder, catalog, student, course_code, atom, false)
        }
    }
}

/// Shared implementation of the prereq/coreq witness: true if completed,
/// true-with-temporal-constraint if only wished, false (and no constraint)
/// otherwise or when `atom` isn't a known course.
fn witness_with_temporal(
    builder: &mut TheoryBuilder,
    catalog: &Catalog,
    student: &Student,
    course_code: &str,
    atom: &str,
    strictly_before: bool,
) -> Lit {
    let witness = if strictly_before {
        builder.lit(Proposition::PrereqTaken {
            student: student.name.clone(),
            course: course_code.to_string(),
            atom: atom.to_string(),
        })
    } else {
        builder.lit(Proposition::CoreqTaken {
            student: student.name.clone(),
            course: course_code.to_string(),
            atom: atom.to_string(),
        })
    };

    let Some(atom_course) = catalog.course(atom) else {
        builder.unit(witness.negated());
        return witness;
    };

    if student.completed_courses.contains(atom) {
        builder.unit(witness);
        return witness;
    }

    if !student.course_wish_list.contains(atom) {
        builder.unit(witness.negated());
        return witness;
    }

    builder.unit(witness);

    let Some(course) = catalog.course(course_code) else {
        return witness;
    };
    let t_c = course.offered_terms();
    let t_x = atom_course.offered_terms();

    for &t in &t_c {
        let in_term_c = builder.lit(Proposition::InTerm {
            student: student.name.clone(),
            course: course_code.to_string(),
            term: t,
        });
        let predecessors: Vec<_> = t_x
            .iter()
            .filter(|&&t_prime| {
                if strictly_before {
                    t_prime < t
                } else {
                    t_prime <= t
                }
            })
            .copied()
            .collect();

        if predecessors.is_empty() {
            builder.unit(in_term_c.negated());
            continue;
        }

        let options: Vec<Lit> = predecessors
            .iter()
            .map(|&t_prime| {
                builder.lit(Proposition::InTerm {
                    student: student.name.clone(),
                    course: atom.to_string(),
                    term: t_prime,
                })
            })
            .collect();
        builder.implies_any(in_term_c, &options);
    }

    witness
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::encoders::enrollment;
    use crate::core::models::course::{Course, RequirementBundle};
    use crate::core::models::requirement::parse;
    use crate::core::models::section::{Section, SectionType};
    use crate::core::models::term::Term;
    use crate::core::solver::{BackendOutcome, SatBackend, VarisatBackend};
    use std::collections::{HashMap, HashSet};

    fn course_offered_in(code: &str, terms: &[Term]) -> Course {
        let mut sections = HashMap::new();
        for &term in terms {
            sections.insert(
                term,
                vec![Section {
                    id: format!("{code}-{term}-001"),
                    course_id: code.to_string(),
                    class_number: "001".to_string(),
                    enrollment_capacity: 30,
                    enrollment_total: 0,
                    dates: Vec::new(),
                    section_type: SectionType::Lecture,
                }],
            );
        }
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

    fn student(name: &str, wishes: &[&str], completed: &[&str]) -> Student {
        Student {
            name: name.to_string(),
            academic_year: "Sophomore".to_string(),
            program: "CS".to_string(),
            completed_courses: completed.iter().map(|s| (*s).to_string()).collect(),
            course_wish_list: wishes.iter().map(|s| (*s).to_string()).collect(),
            friends: HashMap::new(),
        }
    }

    #[test]
    fn exclusion_of_completed_course_forces_unsat() {
        let mut catalog = Catalog::new();
        catalog.add_course(course_offered_in("OLDC-200", &[Term::Fall]));
        let mut new_course = course_offered_in("NEWC-200", &[Term::Fall]);
        new_course.requirements.exclusion = parse("OLDC-200").unwrap();
        catalog.add_course(new_course);

        let s = student("A", &["NEWC-200"], &["OLDC-200"]);

        let mut builder = TheoryBuilder::new();
        let mut diagnostics = Vec::new();
        enrollment::encode(&mut builder, &catalog, &s, &mut diagnostics);
        encode(&mut builder, &catalog, &s, &mut diagnostics);

        let (formula, _) = builder.finish();
        let backend = VarisatBackend::new();
        assert!(matches!(backend.solve(&formula), BackendOutcome::Unsat));
    }

    #[test]
    fn exclusion_removed_becomes_satisfiable() {
        let mut catalog = Catalog::new();
        catalog.add_course(course_offered_in("OLDC-200", &[Term::Fall]));
        let mut new_course = course_offered_in("NEWC-200", &[Term::Fall]);
        new_course.requirements.exclusion = parse("OLDC-200").unwrap();
        catalog.add_course(new_course);

        let s = student("A", &["NEWC-200"], &[]);

        let mut builder = TheoryBuilder::new();
        let mut diagnostics = Vec::new();
        enrollment::encode(&mut builder, &catalog, &s, &mut diagnostics);
        encode(&mut builder, &catalog, &s, &mut diagnostics);

        let (formula, _) = builder.finish();
        let backend = VarisatBackend::new();
        assert!(matches!(backend.solve(&formula), BackendOutcome::Sat(_)));
    }

    #[test]
    fn prereq_via_coschedule_is_satisfiable() {
        let mut catalog = Catalog::new();
        catalog.add_course(course_offered_in("COMP-101", &[Term::Fall, Term::Winter]));
        let mut c2 = course_offered_in("COMP-201", &[Term::Fall, Term::Winter]);
        c2.requirements.prerequisite = parse("COMP-101").unwrap();
        catalog.add_course(c2);

        let s = student("A", &["COMP-101", "COMP-201"], &[]);

        let mut builder = TheoryBuilder::new();
        let mut diagnostics = Vec::new();
        enrollment::encode(&mut builder, &catalog, &s, &mut diagnostics);
        encode(&mut builder, &catalog, &s, &mut diagnostics);

        let (formula, _) = builder.finish();
        let backend = VarisatBackend::new();
        assert!(matches!(backend.solve(&formula), BackendOutcome::Sat(_)));
    }

    #[test]
    fn unknown_atom_in_requirement_is_flagged_and_forced_false() {
        let mut catalog = Catalog::new();
        let mut course = course_offered_in("NEWC-200", &[Term::Fall]);
        course.requirements.prerequisite = parse("MISS-404").unwrap();
        catalog.add_course(course);

        let s = student("A", &["NEWC-200"], &[]);

        let mut builder = TheoryBuilder::new();
        let mut diagnostics = Vec::new();
        enrollment::encode(&mut builder, &catalog, &s, &mut diagnostics);
        encode(&mut builder, &catalog, &s, &mut diagnostics);

        assert!(diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::UnknownAtomInRequirement { .. })));

        let (formula, _) = builder.finish();
        let backend = VarisatBackend::new();
        assert!(matches!(backend.solve(&formula), BackendOutcome::Unsat));
    }
}
