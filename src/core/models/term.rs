//! Academic term enumeration

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three offering terms, with a fixed total order `FALL < WINTER < SUMMER`
/// used by prerequisite/corequisite temporal logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Term {
    /// Fall term, earliest in the order.
    Fall,
    /// Winter term.
    Winter,
    /// Summer term, latest in the order.
    Summer,
}

impl Term {
    /// All terms in their fixed order.
    pub const ALL: [Self; 3] = [Self::Fall, Self::Winter, Self::Summer];

    /// Terms strictly before `self` in the fixed order.
    #[must_use]
    pub fn strictly_before(self) -> Vec<Self> {
        Self::ALL.into_iter().filter(|t| *t < self).collect()
    }

    /// Terms at or before `self` in the fixed order.
    #[must_use]
    pub fn at_or_before(self) -> Vec<Self> {
        Self::ALL.into_iter().filter(|t| *t <= self).collect()
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fall => "FALL",
            Self::Winter => "WINTER",
            Self::Summer => "SUMMER",
        };
        write!(f, "{name}")
    }
}
