//! Absolute time intervals and the overlap tests used against calendar busy time.
//!
//! Overlap is exclusive: an interval that ends exactly when another starts does
//! NOT overlap it. Containment of an instant is inclusive of both endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A `[start, end)` span of absolute time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// An existing calendar commitment.
pub type BusyInterval = Interval;

impl Interval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// `a.start < b.end && b.start < a.end`; touching endpoints do not count.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether `instant` lies in `[start, end]`, both ends included.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// The first interval in `others` this one overlaps.
    pub fn first_conflict<'a>(&self, others: &'a [Interval]) -> Option<&'a Interval> {
        others.iter().find(|other| self.overlaps(other))
    }
}
