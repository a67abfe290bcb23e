//! Catalog ingestion: reads the five catalog JSON files from a
//! directory into the typed entity graph.

use crate::core::error::IngestionError;
use crate::core::models::catalog::{Catalog, Department};
use crate::core::models::course::Course;
use crate::core::models::requirement::{self, Requirement};
use crate::core::models::section::{Section, SectionDate, SectionType, Weekday};
use crate::core::models::student::{Friend, Student};
use crate::core::models::term::Term;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RawCourse {
    id: String,
    department: String,
    course_code: String,
    course_name: String,
    campus: String,
    academic_level: String,
    units: f32,
}

#[derive(Debug, Deserialize)]
struct RawSectionDate {
    day: String,
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
    start_time: String,
    end_time: String,
    #[serde(default)]
    instructors: Vec<String>,
    #[serde(default)]
    location: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCourseSection {
    class_number: String,
    #[serde(default)]
    dates: Vec<RawSectionDate>,
    enrollment_capacity: u32,
    enrollment_total: u32,
    section_type: String,
}

#[derive(Debug, Deserialize)]
struct RawSectionFile {
    id: String,
    term: String,
    course_code: String,
    course_sections: Vec<RawCourseSection>,
}

#[derive(Debug, Deserialize)]
struct RawRequirementItem {
    #[serde(rename = "type")]
    kind: String,
    criteria: String,
}

#[derive(Debug, Deserialize)]
struct RawRequirementRecord {
    id: String,
    requirements: Vec<RawRequirementItem>,
}

#[derive(Debug, Deserialize)]
struct RawFriend {
    name: String,
    #[serde(default)]
    shared_courses: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawStudent {
    name: String,
    academic_year: String,
    program: String,
    #[serde(default)]
    completed_courses: Vec<String>,
    #[serde(default)]
    course_wish_list: Vec<String>,
    #[serde(default)]
    friends: Vec<RawFriend>,
}

#[derive(Debug, Deserialize)]
struct RawDepartment {
    id: String,
    code: String,
    name: String,
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, IngestionError> {
    let file_name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().to_string());
    let content = std::fs::read_to_string(path).map_err(|source| IngestionError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| IngestionError::MalformedJson {
        file: file_name,
        source,
    })
}

fn parse_term(raw: &str, context: &str) -> Result<Term, IngestionError> {
    match raw.to_ascii_uppercase().as_str() {
        "FALL" => Ok(Term::Fall),
        "WINTER" => Ok(Term::Winter),
        "SUMMER" => Ok(Term::Summer),
        _ => Err(IngestionError::InvalidTerm {
            raw: raw.to_string(),
            context: context.to_string(),
        }),
    }
}

fn parse_weekday(raw: &str) -> Option<Weekday> {
    match raw.to_ascii_uppercase().as_str() {
        "MONDAY" => Some(Weekday::Monday),
        "TUESDAY" => Some(Weekday::Tuesday),
        "WEDNESDAY" => Some(Weekday::Wednesday),
        "THURSDAY" => Some(Weekday::Thursday),
        "FRIDAY" => Some(Weekday::Friday),
        "SATURDAY" => Some(Weekday::Saturday),
        "SUNDAY" => Some(Weekday::Sunday),
        _ => None,
    }
}

/// Parses `"HH:MM"` into minutes since midnight. Any other string, including
/// the literal `"TBA"`, yields `None`.
fn parse_time(raw: &str) -> Option<u32> {
    let (hours, minutes) = raw.split_once(':')?;
    let hours: u32 = hours.trim().parse().ok()?;
    let minutes: u32 = minutes.trim().parse().ok()?;
    Some(hours * 60 + minutes)
}

fn is_tba(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("TBA")
}

fn convert_date(raw: &RawSectionDate) -> SectionDate {
    SectionDate {
        day: if is_tba(&raw.day) {
            None
        } else {
            parse_weekday(&raw.day)
        },
        start_time: if is_tba(&raw.start_time) {
            None
        } else {
            parse_time(&raw.start_time)
        },
        end_time: if is_tba(&raw.end_time) {
            None
        } else {
            parse_time(&raw.end_time)
        },
        start_date: raw
            .start_date
            .as_deref()
            .filter(|s| !is_tba(s))
            .map(str::to_string),
        end_date: raw
            .end_date
            .as_deref()
            .filter(|s| !is_tba(s))
            .map(str::to_string),
        location: raw
            .location
            .as_deref()
            .filter(|s| !is_tba(s))
            .map(str::to_string),
        instructors: raw.instructors.clone(),
    }
}

/// Resolve a list of raw course-reference strings against the catalog,
/// applying the full-year `X`/`XA`/`XB` substitution rule.
fn resolve_course_refs(catalog: &Catalog, refs: &[String]) -> HashSet<String> {
    let mut resolved = HashSet::new();
    for code in refs {
        if catalog.course(code).is_some() {
            resolved.insert(code.clone());
            continue;
        }
        let (a, b) = (format!("{code}A"), format!("{code}B"));
        if catalog.course(&a).is_some() && catalog.course(&b).is_some() {
            resolved.insert(a);
            resolved.insert(b);
        } else {
            // Unresolved reference; kept verbatim so downstream encoders see
            // a wished/completed code the catalog truly doesn't carry.
            resolved.insert(code.clone());
        }
    }
    resolved
}

/// Read the five catalog files (`departments.json`, `courses.json`,
/// `requirements.json`, `sections.json`, `students.json`) from `dir` and
/// build the typed entity graph.
///
/// # Errors
/// Returns [`IngestionError`] on any structural violation; the catalog is
/// never partially returned.
pub fn ingest(dir: &Path) -> Result<Catalog, IngestionError> {
    let mut catalog = Catalog::new();

    let departments: Vec<RawDepartment> = read_json(&dir.join("departments.json"))?;
    for dept in departments {
        catalog.add_department(Department {
            id: dept.id,
            code: dept.code,
            name: dept.name,
        });
    }

    let raw_courses: Vec<RawCourse> = read_json(&dir.join("courses.json"))?;
    let mut id_to_code: HashMap<String, String> = HashMap::new();
    for raw in raw_courses {
        id_to_code.insert(raw.id.clone(), raw.course_code.clone());
        catalog.add_course(Course {
            id: raw.id,
            code: raw.course_code,
            name: raw.course_name,
            department: raw.department,
            campus: raw.campus,
            academic_level: raw.academic_level,
            units: raw.units,
            requirements: crate::core::models::course::RequirementBundle::default(),
            sections: HashMap::new(),
        });
    }

    let raw_requirements: Vec<RawRequirementRecord> = read_json(&dir.join("requirements.json"))?;
    for record in raw_requirements {
        let code = id_to_code
            .get(&record.id)
            .cloned()
            .ok_or_else(|| IngestionError::UnknownRequirementTarget {
                id: record.id.clone(),
            })?;
        let course =
            catalog
                .course_mut(&code)
                .ok_or_else(|| IngestionError::UnknownRequirementTarget {
                    id: record.id.clone(),
                })?;

        for item in record.requirements {
            let parsed: Requirement = requirement::parse(&item.criteria).map_err(|source| {
                IngestionError::RequirementParse {
                    id: record.id.clone(),
                    source,
                }
            })?;
            match item.kind.to_ascii_uppercase().as_str() {
                "PREREQUISITE" => course.requirements.prerequisite = parsed,
                "COREQUISITE" => course.requirements.corequisite = parsed,
                "EXCLUSION" => course.requirements.exclusion = parsed,
                _ => {
                    logger::warn!(
                        "unrecognized requirement type {:?} on {}; ignoring",
                        item.kind,
                        record.id
                    );
                }
            }
        }
    }

    let section_files: Vec<RawSectionFile> = read_json(&dir.join("sections.json"))?;
    for file in section_files {
        let term = parse_term(&file.term, &file.id)?;
        let course_code = file.course_code.clone();

        for raw_section in file.course_sections {
            if !raw_section.section_type.eq_ignore_ascii_case("lecture") {
                logger::debug!(
                    "dropping non-lecture section {} ({}) for {}",
                    raw_section.class_number,
                    raw_section.section_type,
                    course_code
                );
                continue;
            }
            if raw_section.enrollment_total > raw_section.enrollment_capacity {
                return Err(IngestionError::OverCapacity {
                    section_id: format!("{course_code}_{term}_{}", raw_section.class_number),
                    total: raw_section.enrollment_total,
                    capacity: raw_section.enrollment_capacity,
                });
            }

            let course = catalog.course_mut(&course_code).ok_or_else(|| {
                IngestionError::UnknownCourseReference {
                    section_id: file.id.clone(),
                    course_id: course_code.clone(),
                }
            })?;

            let section = Section {
                id: format!("{course_code}_{term}_{}", raw_section.class_number),
                course_id: course.id.clone(),
                class_number: raw_section.class_number,
                enrollment_capacity: raw_section.enrollment_capacity,
                enrollment_total: raw_section.enrollment_total,
                dates: raw_section.dates.iter().map(convert_date).collect(),
                section_type: SectionType::Lecture,
            };
            course.sections.entry(term).or_default().push(section);
        }
    }

    let raw_students: Vec<RawStudent> = read_json(&dir.join("students.json"))?;
    for raw in raw_students {
        let completed_courses = resolve_course_refs(&catalog, &raw.completed_courses);
        let course_wish_list = resolve_course_refs(&catalog, &raw.course_wish_list);
        let friends = raw
            .friends
            .into_iter()
            .map(|f| {
                (
                    f.name.clone(),
                    Friend {
                        name: f.name,
                        shared_courses: f.shared_courses.into_iter().collect(),
                    },
                )
            })
            .collect();

        catalog.add_student(Student {
            name: raw.name,
            academic_year: raw.academic_year,
            program: raw.program,
            completed_courses,
            course_wish_list,
            friends,
        });
    }

    let student_names: HashSet<String> = catalog.students().map(|s| s.name.clone()).collect();
    for student in catalog.students() {
        for friend_name in student.friends.keys() {
            if !student_names.contains(friend_name) {
                return Err(IngestionError::UnknownFriend {
                    student: student.name.clone(),
                    friend: friend_name.clone(),
                });
            }
        }
    }

    Ok(catalog)
}
