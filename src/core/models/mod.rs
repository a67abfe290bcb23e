//! Typed entity graph: terms, requirement expressions, sections, courses,
//! students, and the catalog aggregate that owns them all.

pub mod catalog;
pub mod course;
pub mod requirement;
pub mod section;
pub mod student;
pub mod term;

pub use catalog::{Catalog, Department};
pub use course::{Course, RequirementBundle};
pub use requirement::{Expr, Requirement, RequirementParseError};
pub use section::{Section, SectionDate, SectionType, Weekday};
pub use student::{Friend, Student};
pub use term::Term;
