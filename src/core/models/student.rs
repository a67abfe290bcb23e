//! Student and friend-edge models.
//!
//! To avoid a cyclic reference back into the student registry, a friend edge is stored as a
//! `(name, shared_courses)` pair rather than a handle back into the student
//! registry; callers resolve the name against [`crate::core::models::catalog::Catalog`]
//! on demand.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One direction of a friend relationship.
///
/// A pair of students is **mutually** friends iff each names the other;
/// a shared course is **reciprocal** iff it appears in both directions'
/// `shared_courses` and in both students' `course_wish_list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friend {
    /// The name of the referenced student.
    pub name: String,
    /// Course codes this student wants to take alongside the named friend.
    pub shared_courses: HashSet<String>,
}

/// A student participating in the solve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Unique name, unique across all students in a solve.
    pub name: String,
    /// Academic year (e.g. "Sophomore").
    pub academic_year: String,
    /// Declared program of study.
    pub program: String,
    /// Course codes already completed.
    pub completed_courses: HashSet<String>,
    /// Course codes this student wishes to enroll in this solve.
    pub course_wish_list: HashSet<String>,
    /// Outgoing friend edges, keyed by friend name.
    pub friends: HashMap<String, Friend>,
}

impl Student {
    /// True iff `other` is named in this student's friend map.
    #[must_use]
    pub fn names_as_friend(&self, other: &str) -> bool {
        self.friends.contains_key(other)
    }

    /// True iff `self` and `other` mutually name each other as friends.
    #[must_use]
    pub fn is_mutual_friend(&self, other: &Self) -> bool {
        self.names_as_friend(&other.name) && other.names_as_friend(&self.name)
    }

    /// Course codes reciprocally shared with `other`: present in both
    /// directions' `shared_courses` and in both students' wish lists.
    #[must_use]
    pub fn reciprocal_shared_courses(&self, other: &Self) -> HashSet<String> {
        let (Some(mine), Some(theirs)) = (
            self.friends.get(&other.name),
            other.friends.get(&self.name),
        ) else {
            return HashSet::new();
        };
        mine.shared_courses
            .intersection(&theirs.shared_courses)
            .filter(|code| {
                self.course_wish_list.contains(*code) && other.course_wish_list.contains(*code)
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(name: &str, wishes: &[&str], friends: HashMap<String, Friend>) -> Student {
        Student {
            name: name.to_string(),
            academic_year: "Sophomore".to_string(),
            program: "Computer Science".to_string(),
            completed_courses: HashSet::new(),
            course_wish_list: wishes.iter().map(|s| (*s).to_string()).collect(),
            friends,
        }
    }

    fn friend_edge(name: &str, shared: &[&str]) -> Friend {
        Friend {
            name: name.to_string(),
            shared_courses: shared.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    #[test]
    fn mutual_friend_requires_both_directions() {
        let mut a_friends = HashMap::new();
        a_friends.insert("B".to_string(), friend_edge("B", &["CS-101"]));
        let a = student("A", &["CS-101"], a_friends);

        let b = student("B", &["CS-101"], HashMap::new());
        assert!(!a.is_mutual_friend(&b));
        assert!(!b.is_mutual_friend(&a));
    }

    #[test]
    fn mutual_friend_with_reciprocal_shared_course() {
        let mut a_friends = HashMap::new();
        a_friends.insert("B".to_string(), friend_edge("B", &["CS-101"]));
        let a = student("A", &["CS-101"], a_friends);

        let mut b_friends = HashMap::new();
        b_friends.insert("A".to_string(), friend_edge("A", &["CS-101"]));
        let b = student("B", &["CS-101"], b_friends);

        assert!(a.is_mutual_friend(&b));
        let shared = a.reciprocal_shared_courses(&b);
        assert_eq!(shared.len(), 1);
        assert!(shared.contains("CS-101"));
    }

    #[test]
    fn shared_course_not_reciprocal_unless_wished_by_both() {
        let mut a_friends = HashMap::new();
        a_friends.insert("B".to_string(), friend_edge("B", &["CS-101"]));
        let a = student("A", &[], a_friends);

        let mut b_friends = HashMap::new();
        b_friends.insert("A".to_string(), friend_edge("A", &["CS-101"]));
        let b = student("B", &["CS-101"], b_friends);

        assert!(a.reciprocal_shared_courses(&b).is_empty());
    }
}
