//! Catalog aggregate: the single context passed explicitly through the
//! registry and encoders, in place of module-wide singletons.

use super::course::Course;
use super::student::Student;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A department, kept only for display lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Department id as referenced elsewhere in the catalog.
    pub id: String,
    /// Short department code.
    pub code: String,
    /// Full department name.
    pub name: String,
}

/// The full typed entity graph for one solve: every course, student, and
/// department, indexed by their natural ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    courses: HashMap<String, Course>,
    students: HashMap<String, Student>,
    departments: HashMap<String, Department>,
}

impl Catalog {
    /// An empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a course, keyed by its catalog code. Returns `true` if this
    /// replaced an existing entry.
    pub fn add_course(&mut self, course: Course) -> bool {
        self.courses.insert(course.code.clone(), course).is_some()
    }

    /// Look up a course by its catalog code.
    #[must_use]
    pub fn course(&self, code: &str) -> Option<&Course> {
        self.courses.get(code)
    }

    /// Mutable lookup of a course by its catalog code.
    pub fn course_mut(&mut self, code: &str) -> Option<&mut Course> {
        self.courses.get_mut(code)
    }

    /// All courses, in no particular order.
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    /// Insert a student, keyed by name (unique across students).
    /// Returns `true` if this replaced an existing entry.
    pub fn add_student(&mut self, student: Student) -> bool {
        self.students
            .insert(student.name.clone(), student)
            .is_some()
    }

    /// Look up a student by name.
    #[must_use]
    pub fn student(&self, name: &str) -> Option<&Student> {
        self.students.get(name)
    }

    /// All students, in no particular order.
    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.students.values()
    }

    /// Insert a department, keyed by id.
    pub fn add_department(&mut self, department: Department) {
        self.departments.insert(department.id.clone(), department);
    }

    /// Look up a department by id, for display purposes only.
    #[must_use]
    pub fn department(&self, id: &str) -> Option<&Department> {
        self.departments.get(id)
    }
}
