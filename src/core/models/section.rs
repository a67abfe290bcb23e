//! Section and section-date models

use serde::{Deserialize, Serialize};

/// Day of the week a section-date meets on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    /// Monday.
    Monday,
    /// Tuesday.
    Tuesday,
    /// Wednesday.
    Wednesday,
    /// Thursday.
    Thursday,
    /// Friday.
    Friday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
}

/// A single weekly meeting pattern belonging to a section.
///
/// `day`, `start_time`, and `end_time` are `None` when the catalog supplied
/// the literal `"TBA"` for that component. A date with any
/// TBA temporal component never conflicts with anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionDate {
    /// Meeting day, or `None` if TBA.
    pub day: Option<Weekday>,
    /// Meeting start time in minutes since midnight, or `None` if TBA.
    pub start_time: Option<u32>,
    /// Meeting end time in minutes since midnight, or `None` if TBA.
    pub end_time: Option<u32>,
    /// Raw start-of-range date string; display-only, never parsed for conflict.
    pub start_date: Option<String>,
    /// Raw end-of-range date string; display-only, never parsed for conflict.
    pub end_date: Option<String>,
    /// Raw meeting location string, or `None` if TBA.
    pub location: Option<String>,
    /// Instructor names, order as supplied by the catalog.
    pub instructors: Vec<String>,
}

impl SectionDate {
    /// True if any temporal component (day, start, or end time) is TBA.
    ///
    /// A TBA date contributes no conflicts; the date-range fields
    /// and location are not consulted for conflict detection.
    #[must_use]
    pub const fn is_tba(&self) -> bool {
        self.day.is_none() || self.start_time.is_none() || self.end_time.is_none()
    }
}

/// A section's type as recorded in the catalog. Only [`SectionType::Lecture`]
/// sections survive ingestion into the typed entity graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionType {
    /// A lecture section; the only type the encoder ever sees.
    Lecture,
    /// A laboratory section; filtered out at ingestion.
    Lab,
    /// A tutorial section; filtered out at ingestion.
    Tutorial,
    /// A seminar section; filtered out at ingestion.
    Seminar,
}

/// A concrete class instance belonging to one course and one term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Globally unique section id across the whole catalog.
    pub id: String,
    /// The id of the course this section belongs to.
    pub course_id: String,
    /// The class number as recorded by the catalog.
    pub class_number: String,
    /// Seat ceiling.
    pub enrollment_capacity: u32,
    /// Current enrollment count, independent of anything this solve adds.
    pub enrollment_total: u32,
    /// The weekly meeting patterns for this section.
    pub dates: Vec<SectionDate>,
    /// Section type; retained for diagnostics even though only `Lecture`
    /// sections are ever constructed by ingestion.
    pub section_type: SectionType,
}

impl Section {
    /// Remaining seats, saturating at zero.
    #[must_use]
    pub fn free_seats(&self) -> u32 {
        self.enrollment_capacity
            .saturating_sub(self.enrollment_total)
    }
}
