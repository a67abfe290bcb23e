//! The engine's error taxonomy.
//!
//! `IngestionError` and `CompileError` are fatal and propagate to the
//! caller; `CatalogIntegrityWarning` and `UnknownAtomInRequirement` are not
//! exceptions and never appear here — they are surfaced as `logger::warn!`/
//! `logger::debug!` diagnostics collected alongside the solve result.
//! `Unsatisfiable` is not an error either: it's a [`crate::core::engine::SolveOutcome`] variant.

use crate::core::models::requirement::RequirementParseError;
use thiserror::Error;

/// A structural problem in catalog data, fatal before any encoding starts.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// The JSON file itself failed to deserialize.
    #[error("malformed catalog JSON in {file}: {source}")]
    MalformedJson {
        /// Which of the five catalog files failed.
        file: String,
        /// The underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },
    /// A section named a course id the catalog doesn't know about.
    #[error("section {section_id} references unknown course {course_id}")]
    UnknownCourseReference {
        /// The offending section's id.
        section_id: String,
        /// The course id it referenced.
        course_id: String,
    },
    /// A requirement bundle named a course id the catalog doesn't know about.
    #[error("requirement bundle {id} references unknown course")]
    UnknownRequirementTarget {
        /// The requirement bundle's id.
        id: String,
    },
    /// A requirement expression failed to parse.
    #[error("failed to parse requirement expression for {id}: {source}")]
    RequirementParse {
        /// The requirement bundle's id.
        id: String,
        /// The underlying parse error.
        #[source]
        source: RequirementParseError,
    },
    /// `enrollment_total` exceeded `enrollment_capacity` at ingestion.
    #[error("section {section_id} has enrollment_total {total} exceeding capacity {capacity}")]
    OverCapacity {
        /// The offending section's id.
        section_id: String,
        /// The reported total.
        total: u32,
        /// The reported capacity.
        capacity: u32,
    },
    /// A friend edge named a student not present in the roster.
    #[error("student {student} names unknown friend {friend}")]
    UnknownFriend {
        /// The student carrying the dangling edge.
        student: String,
        /// The unresolved friend name.
        friend: String,
    },
    /// A section or course record named a term string outside `{FALL, WINTER, SUMMER}`.
    #[error("invalid term {raw:?} in {context}")]
    InvalidTerm {
        /// The unrecognized term string.
        raw: String,
        /// Which file/record it came from, for diagnosis.
        context: String,
    },
    /// The catalog directory was missing a required file, or it could not be read.
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        /// The file path that could not be read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// The SAT backend rejected the compiled theory.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The backend reported a structural problem with the CNF it was handed.
    #[error("SAT backend rejected theory: {message}")]
    BackendRejected {
        /// The backend's own error message.
        message: String,
    },
    /// A student's wish list was empty, so rule 6 of the enrollment-rule
    /// encoder encoded nothing for them; flagged rather than silently solved.
    #[error("student {student} has an empty wish list; does the student wish to take any courses?")]
    EmptyWishList {
        /// The affected student's name.
        student: String,
    },
}

/// A non-exception diagnostic surfaced alongside a solve result. Neither
/// variant is a `Result::Err` — both are collected and logged.
#[derive(Debug, Clone)]
pub enum Diagnostic {
    /// A wish-listed course has no lecture section in any term. Encoded as
    /// `Enrolled` forced true against an empty disjunction, which yields
    /// UNSAT for the affected student rather than silently dropping the wish.
    CatalogIntegrityWarning {
        /// The student who wished the unoffered course.
        student: String,
        /// The unoffered course's code.
        course: String,
    },
    /// A requirement expression named a course code absent from the
    /// catalog. Its witness variable is forced false rather than raising.
    UnknownAtomInRequirement {
        /// The student the requirement is being evaluated for.
        student: String,
        /// The course carrying the requirement.
        course: String,
        /// The unresolved course-code atom.
        atom: String,
    },
}

/// Top-level error returned by [`crate::core::engine::Engine::solve`].
#[derive(Debug, Error)]
pub enum EngineError {
    /// Wraps an [`IngestionError`].
    #[error(transparent)]
    Ingestion(#[from] IngestionError),
    /// Wraps a [`CompileError`].
    #[error(transparent)]
    Compile(#[from] CompileError),
}
