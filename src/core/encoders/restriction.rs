//! Restriction encoder: timetable conflicts and per-section capacity.

use crate::core::conflict::conflict;
use crate::core::models::catalog::Catalog;
use crate::core::models::student::Student;
use crate::core::proposition::Proposition;
use crate::core::theory::TheoryBuilder;

/// Forbid any pair of the student's wished courses from using conflicting
/// sections in a term both are offered in.
pub fn encode_time_conflicts(builder: &mut TheoryBuilder, catalog: &Catalog, student: &Student) {
    let mut wished: Vec<&String> = student.course_wish_list.iter().collect();
    wished.sort();

    for i in 0..wished.len() {
        for j in (i + 1)..wished.len() {
            let (code1, code2) = (wished[i], wished[j]);
            let (Some(course1), Some(course2)) = (catalog.course(code1), catalog.course(code2))
            else {
                continue;
            };

            let terms1 = course1.offered_terms();
            for term in terms1 {
                if !course2.is_offered_in(term) {
                    continue;
                }
                for section1 in course1.sections_in(term) {
                    for section2 in course2.sections_in(term) {
                        if !conflict(section1, section2) {
                            continue;
                        }
                        let lit1 = builder.lit(Proposition::InSection {
                            student: student.name.clone(),
                            course: code1.clone(),
                            term,
                            section: section1.id.clone(),
                        });
                        let lit2 = builder.lit(Proposition::InSection {
                            student: student.name.clone(),
                            course: code2.clone(),
                            term,
                            section: section2.id.clone(),
                        });
                        builder.clause(vec![lit1.negated(), lit2.negated()]);
                    }
                }
            }
        }
    }
}

/// Enforce per-section seat limits across every student and every course.
///
/// Must run once globally (not per-student), since capacity is shared across
/// every wisher of the owning course.
pub fn encode_capacity<'a>(
    builder: &mut TheoryBuilder,
    catalog: &Catalog,
    students: impl Iterator<Item = &'a Student>,
) {
    let wishers: Vec<&Student> = students.collect();

    let mut course_codes: Vec<&String> = catalog.courses().map(|c| &c.code).collect();
    course_codes.sort();

    for course_code in course_codes {
        let Some(course) = catalog.course(course_code) else {
            continue;
        };
        for term in course.offered_terms() {
            for section in course.sections_in(term) {
                let free = section.free_seats();

                let mut wanting: Vec<&Student> = wishers
                    .iter()
                    .copied()
                    .filter(|s| s.course_wish_list.contains(course_code))
                    .collect();
                wanting.sort_by(|a, b| a.name.cmp(&b.name));

                let in_section_lits: Vec<_> = wanting
                    .iter()
                    .map(|student| {
                        builder.lit(Proposition::InSection {
                            student: student.name.clone(),
                            course: course_code.clone(),
                            term,
                            section: section.id.clone(),
                        })
                    })
                    .collect();

                if free == 0 {
                    for &lit in &in_section_lits {
                        builder.unit(lit.negated());
                    }
                } else {
                    builder.at_most_k(&in_section_lits, free as usize);
                }

                let has_capacity = builder.lit(Proposition::HasCapacity {
                    course: course_code.clone(),
                    term,
                    section: section.id.clone(),
                });
                for &lit in &in_section_lits {
                    builder.implies(lit, has_capacity);
                }
                if free > 0 {
                    builder.unit(has_capacity);
                } else {
                    builder.unit(has_capacity.negated());
                }
            }
        }
    }
}
