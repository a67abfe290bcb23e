//! Course model

use super::requirement::Requirement;
use super::section::Section;
use super::term::Term;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The prerequisite, corequisite, and exclusion rules attached to a course.
///
/// Populated post-ingestion from `requirements.json`; a course with no entry
/// in that file gets the default (all three fields `Requirement::None`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementBundle {
    /// Prerequisite expression, or `Requirement::None` if the course has none.
    pub prerequisite: Requirement,
    /// Corequisite expression, or `Requirement::None` if the course has none.
    pub corequisite: Requirement,
    /// Exclusion expression, or `Requirement::None` if the course has none.
    pub exclusion: Requirement,
}

/// A course as recorded in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Globally unique course id, as assigned by the catalog.
    pub id: String,
    /// Catalog code (e.g. "CS2510").
    pub code: String,
    /// Full course name.
    pub name: String,
    /// Owning department code.
    pub department: String,
    /// Campus the course is offered at.
    pub campus: String,
    /// Academic level (e.g. "Undergraduate", "Graduate").
    pub academic_level: String,
    /// Credit units.
    pub units: f32,

    /// Prerequisite/corequisite/exclusion rules, attached post-ingestion.
    #[serde(skip)]
    pub requirements: RequirementBundle,

    /// Lecture sections grouped by the term they're offered in.
    #[serde(skip)]
    pub sections: HashMap<Term, Vec<Section>>,
}

impl Course {
    /// The set of terms this course is offered in.
    #[must_use]
    pub fn offered_terms(&self) -> Vec<Term> {
        Term::ALL
            .into_iter()
            .filter(|t| self.sections.get(t).is_some_and(|s| !s.is_empty()))
            .collect()
    }

    /// The lecture sections offered in `term`.
    #[must_use]
    pub fn sections_in(&self, term: Term) -> &[Section] {
        self.sections.get(&term).map_or(&[], Vec::as_slice)
    }

    /// True if this course has at least one lecture section in `term`.
    #[must_use]
    pub fn is_offered_in(&self, term: Term) -> bool {
        !self.sections_in(term).is_empty()
    }
}
