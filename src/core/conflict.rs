//! Section conflict oracle.
//!
//! `conflict(A, B)` holds iff some non-TBA date of `A` and some non-TBA date
//! of `B` share a weekday and their half-open `[start, end)` minute ranges
//! overlap. Date ranges and location are never consulted.

use crate::core::models::section::Section;

/// True iff sections `a` and `b` share a weekly meeting time.
///
/// Symmetric (`conflict(a, b) == conflict(b, a)`) and reflexive for any
/// section with at least one non-TBA date (`conflict(a, a) == true`).
#[must_use]
pub fn conflict(a: &Section, b: &Section) -> bool {
    a.dates.iter().any(|date_a| {
        if date_a.is_tba() {
            return false;
        }
        b.dates.iter().any(|date_b| {
            if date_b.is_tba() {
                return false;
            }
            let (Some(day_a), Some(start_a), Some(end_a)) =
                (date_a.day, date_a.start_time, date_a.end_time)
            else {
                return false;
            };
            let (Some(day_b), Some(start_b), Some(end_b)) =
                (date_b.day, date_b.start_time, date_b.end_time)
            else {
                return false;
            };
            day_a == day_b && start_a < end_b && end_a > start_b
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::section::{SectionDate, SectionType, Weekday};

    fn section(dates: Vec<SectionDate>) -> Section {
        Section {
            id: "S".to_string(),
            course_id: "C".to_string(),
            class_number: "001".to_string(),
            enrollment_capacity: 10,
            enrollment_total: 0,
            dates,
            section_type: SectionType::Lecture,
        }
    }

    fn known(day: Weekday, start: u32, end: u32) -> SectionDate {
        SectionDate {
            day: Some(day),
            start_time: Some(start),
            end_time: Some(end),
            start_date: None,
            end_date: None,
            location: None,
            instructors: Vec::new(),
        }
    }

    fn tba() -> SectionDate {
        SectionDate {
            day: None,
            start_time: None,
            end_time: None,
            start_date: None,
            end_date: None,
            location: None,
            instructors: Vec::new(),
        }
    }

    #[test]
    fn overlapping_same_day_ranges_conflict() {
        let a = section(vec![known(Weekday::Monday, 540, 630)]);
        let b = section(vec![known(Weekday::Monday, 600, 690)]);
        assert!(conflict(&a, &b));
    }

    #[test]
    fn half_open_adjacency_does_not_conflict() {
        let a = section(vec![known(Weekday::Monday, 540, 630)]);
        let b = section(vec![known(Weekday::Monday, 630, 720)]);
        assert!(!conflict(&a, &b));
    }

    #[test]
    fn different_days_never_conflict() {
        let a = section(vec![known(Weekday::Monday, 540, 630)]);
        let b = section(vec![known(Weekday::Tuesday, 540, 630)]);
        assert!(!conflict(&a, &b));
    }

    #[test]
    fn tba_dates_never_conflict() {
        let a = section(vec![tba()]);
        let b = section(vec![known(Weekday::Monday, 540, 630)]);
        assert!(!conflict(&a, &b));
        assert!(!conflict(&a, &a));
    }

    #[test]
    fn conflict_is_symmetric() {
        let a = section(vec![known(Weekday::Wednesday, 100, 200)]);
        let b = section(vec![known(Weekday::Wednesday, 150, 250)]);
        assert_eq!(conflict(&a, &b), conflict(&b, &a));
    }

    #[test]
    fn section_with_known_date_conflicts_with_itself() {
        let a = section(vec![known(Weekday::Friday, 0, 60)]);
        assert!(conflict(&a, &a));
    }
}
