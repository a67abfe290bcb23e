//! Core library for the `coursesat` engine.
//!
//! Encodes a course-enrollment scheduling instance into a propositional
//! satisfiability problem and decodes a model back into per-student
//! timetables. Used by the CLI and, potentially, other front ends.

pub mod core;

pub use core::*;
// No logger re-exports: use the standalone `logger` crate directly.
