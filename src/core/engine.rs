//! Engine surface: the one synchronous `solve` entry point that wires
//! ingestion, the four encoders, the SAT backend, and the decoder together.

use crate::core::decoder::{self, Plan};
use crate::core::encoders::{enrollment, friendship, requirement, restriction};
use crate::core::error::{CompileError, Diagnostic, EngineError};
use crate::core::models::catalog::Catalog;
use crate::core::solver::{BackendOutcome, SatBackend, TheoryHandle, VarisatBackend};
use crate::core::theory::TheoryBuilder;
use std::path::Path;

/// The result of a successful [`solve`] call.
pub struct SolveOutcome {
    /// The compiled theory, retained for `satisfiable()`/`count_solutions()` diagnostics.
    pub theory_handle: TheoryHandle,
    /// The decoded per-student schedule if satisfiable, `None` on UNSAT.
    pub plan: Option<Plan>,
    /// Non-fatal diagnostics collected while encoding.
    pub diagnostics: Vec<Diagnostic>,
}

/// Ingest the five catalog files under `catalog_dir` and solve them.
///
/// # Errors
/// Returns [`EngineError::Ingestion`] on any structural catalog problem, or
/// [`EngineError::Compile`] if the SAT backend rejects the compiled theory.
pub fn solve_from_dir(catalog_dir: &Path) -> Result<SolveOutcome, EngineError> {
    let catalog = crate::core::ingest::ingest(catalog_dir)?;
    solve(&catalog)
}

/// Compile `catalog` into a CNF theory, dispatch it to the SAT backend, and
/// decode the result. One call performs exactly one solve: no shared
/// mutable state between invocations.
///
/// # Errors
/// Returns [`EngineError::Compile`] if the SAT backend rejects the compiled
/// theory outright. UNSAT is not an error; it surfaces as `plan: None`.
pub fn solve(catalog: &Catalog) -> Result<SolveOutcome, EngineError> {
    let mut builder = TheoryBuilder::new();
    let mut diagnostics = Vec::new();

    let mut students: Vec<_> = catalog.students().collect();
    students.sort_by(|a, b| a.name.cmp(&b.name));

    for student in &students {
        if student.course_wish_list.is_empty() {
            return Err(EngineError::Compile(CompileError::EmptyWishList {
                student: student.name.clone(),
            }));
        }
        enrollment::encode(&mut builder, catalog, student, &mut diagnostics);
        requirement::encode(&mut builder, catalog, student, &mut diagnostics);
        restriction::encode_time_conflicts(&mut builder, catalog, student);
    }

    restriction::encode_capacity(&mut builder, catalog, students.iter().copied());
    friendship::encode(&mut builder, catalog, &students);

    for diagnostic in &diagnostics {
        log_diagnostic(diagnostic);
    }

    let (formula, registry) = builder.finish();
    let backend: Box<dyn SatBackend> = Box::new(VarisatBackend::new());

    let outcome = backend.solve(&formula);
    let plan = match outcome {
        BackendOutcome::Sat(ref model) => Some(decoder::decode(&registry, model)),
        BackendOutcome::Unsat => None,
        BackendOutcome::Err(err) => return Err(EngineError::Compile(err)),
    };

    let theory_handle = TheoryHandle::new(formula, Box::new(VarisatBackend::new()));
    Ok(SolveOutcome {
        theory_handle,
        plan,
        diagnostics,
    })
}

fn log_diagnostic(diagnostic: &Diagnostic) {
    match diagnostic {
        Diagnostic::CatalogIntegrityWarning { student, course } => {
            logger::warn!("{student} wished {course}, which has no lecture section in any term");
        }
        Diagnostic::UnknownAtomInRequirement {
            student,
            course,
            atom,
        } => {
            logger::debug!(
                "requirement on {course} for {student} references unknown course {atom}"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::course::{Course, RequirementBundle};
    use crate::core::models::section::{Section, SectionType};
    use crate::core::models::student::Student;
    use crate::core::models::term::Term;
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

    fn student_wishing(name: &str, codes: &[&str]) -> Student {
        Student {
            name: name.to_string(),
            academic_year: "Freshman".to_string(),
            program: "CS".to_string(),
            completed_courses: HashSet::new(),
            course_wish_list: codes.iter().map(|s| (*s).to_string()).collect(),
            friends: HashMap::new(),
        }
    }

    #[test]
    fn single_student_single_course_is_satisfiable_with_a_plan() {
        let mut catalog = Catalog::new();
        catalog.add_course(course_with_one_fall_section("CS-101"));
        catalog.add_student(student_wishing("A", &["CS-101"]));

        let outcome = solve(&catalog).unwrap();
        assert!(outcome.diagnostics.is_empty());
        let plan = outcome.plan.expect("expected a satisfying plan");
        assert_eq!(
            plan.get("A").unwrap().get("FALL").unwrap(),
            &vec!["CS-101-001".to_string()]
        );
        assert!(outcome.theory_handle.satisfiable());
    }

    #[test]
    fn empty_wish_list_is_a_compile_error() {
        let mut catalog = Catalog::new();
        catalog.add_student(student_wishing("A", &[]));
        let result = solve(&catalog);
        assert!(matches!(
            result,
            Err(EngineError::Compile(CompileError::EmptyWishList { .. }))
        ));
    }

    #[test]
    fn unoffered_wish_yields_diagnostic_and_unsat_plan() {
        let mut catalog = Catalog::new();
        let mut course = course_with_one_fall_section("CS-101");
        course.sections.clear();
        catalog.add_course(course);
        catalog.add_student(student_wishing("A", &["CS-101"]));

        let outcome = solve(&catalog).unwrap();
        assert_eq!(outcome.diagnostics.len(), 1);
        assert!(outcome.plan.is_none());
    }
}
