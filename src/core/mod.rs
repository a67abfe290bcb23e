//! Core constraint-encoding engine: typed entity graph, proposition
//! registry, conflict oracle, encoders, CNF theory builder, SAT backend
//! adapter, decoder, and the orchestrating `Engine`.

pub mod config;
pub mod conflict;
pub mod decoder;
pub mod encoders;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod models;
pub mod proposition;
pub mod solver;
pub mod theory;

/// Returns the current version of the `course_sat` crate.
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// The `logger` module lives in a standalone crate; use `logger` directly.
