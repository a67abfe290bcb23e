//! Friendship encoder: forces `Friendship` to match the mutual-edge
//! fact, and requires reciprocal-shared-course friends to co-schedule.

use crate::core::models::catalog::Catalog;
use crate::core::models::student::Student;
use crate::core::models::term::Term;
use crate::core::proposition::Proposition;
use crate::core::theory::TheoryBuilder;

/// Encode the friendship constraints over every unordered pair of `students`.
pub fn encode(builder: &mut TheoryBuilder, catalog: &Catalog, students: &[&Student]) {
    let mut sorted: Vec<&Student> = students.to_vec();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    for i in 0..sorted.len() {
        for j in (i + 1)..sorted.len() {
            let (s1, s2) = (sorted[i], sorted[j]);
            let friendship = builder.lit(Proposition::friendship(&s1.name, &s2.name));

            if s1.is_mutual_friend(s2) {
                builder.unit(friendship);
            } else {
                builder.unit(friendship.negated());
                continue;
            }

            let mut shared: Vec<String> = s1.reciprocal_shared_courses(s2).into_iter().collect();
            shared.sort();

            for course_code in shared {
                let Some(course) = catalog.course(&course_code) else {
                    continue;
                };

                let enrolled1 = builder.lit(Proposition::Enrolled {
                    student: s1.name.clone(),
                    course: course_code.clone(),
                });
                let enrolled2 = builder.lit(Proposition::Enrolled {
                    student: s2.name.clone(),
                    course: course_code.clone(),
                });

                let mut same_options = Vec::new();
                for term in Term::ALL {
                    for section in course.sections_in(term) {
                        let in_section1 = builder.lit(Proposition::InSection {
                            student: s1.name.clone(),
                            course: course_code.clone(),
                            term,
                            section: section.id.clone(),
                        });
                        let in_section2 = builder.lit(Proposition::InSection {
                            student: s2.name.clone(),
                            course: course_code.clone(),
                            term,
                            section: section.id.clone(),
                        });
                        same_options.push(builder.and_gate(in_section1, in_section2));
                    }
                }

                let both_enrolled = builder.and_gate(enrolled1, enrolled2);
                let antecedent = builder.and_gate(both_enrolled, friendship);
                builder.implies_any(antecedent, &same_options);
            }
        }
    }
}
