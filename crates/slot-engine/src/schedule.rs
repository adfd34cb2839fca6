//! Weekly availability schedules.
//!
//! A schedule is a timezone plus an unordered set of recurring windows, each
//! tied to one day of the week and bounded by `HH:MM` wall-clock times. Windows
//! are kept as the raw strings the owner entered so that a malformed boundary
//! can be skipped at resolution time instead of rejecting the whole schedule.

use std::fmt;

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::dst::parse_timezone;
use crate::error::Result;

/// Day of the week a recurring window applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// All days, Monday first.
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// Zero-based position, Monday = 0.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "monday",
            DayOfWeek::Tuesday => "tuesday",
            DayOfWeek::Wednesday => "wednesday",
            DayOfWeek::Thursday => "thursday",
            DayOfWeek::Friday => "friday",
            DayOfWeek::Saturday => "saturday",
            DayOfWeek::Sunday => "sunday",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        DayOfWeek::ALL[weekday.num_days_from_monday() as usize]
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse a wall-clock boundary of the form `H:MM` or `HH:MM`.
///
/// Returns `None` for anything else, including out-of-range values such as
/// `"25:00"` or `"09:60"`.
pub fn parse_wall_clock(value: &str) -> Option<NaiveTime> {
    let (hour, minute) = value.trim().split_once(':')?;
    let hour = parse_component(hour)?;
    let minute = parse_component(minute)?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

fn parse_component(part: &str) -> Option<u32> {
    if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// One recurring availability window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    pub day_of_week: DayOfWeek,
    /// Local start time, `HH:MM`.
    pub start_time: String,
    /// Local end time, `HH:MM`.
    pub end_time: String,
}

impl AvailabilityWindow {
    pub fn new(day_of_week: DayOfWeek, start_time: &str, end_time: &str) -> Self {
        Self {
            day_of_week,
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
        }
    }

    /// Parsed `(start, end)` boundaries as written, or `None` if either is
    /// malformed. A backwards window is returned unchanged.
    pub fn bounds(&self) -> Option<(NaiveTime, NaiveTime)> {
        let start = parse_wall_clock(&self.start_time)?;
        let end = parse_wall_clock(&self.end_time)?;
        Some((start, end))
    }
}

/// The recurring windows of one schedule owner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklyAvailability {
    pub windows: Vec<AvailabilityWindow>,
}

/// Windows grouped by day of week.
#[derive(Debug)]
pub struct DayBuckets<'a> {
    buckets: [Vec<&'a AvailabilityWindow>; 7],
}

impl<'a> DayBuckets<'a> {
    pub fn get(&self, day: DayOfWeek) -> &[&'a AvailabilityWindow] {
        &self.buckets[day.index()]
    }
}

impl WeeklyAvailability {
    pub fn new(windows: Vec<AvailabilityWindow>) -> Self {
        Self { windows }
    }

    /// Group windows by day of week. Every day has its own bucket.
    pub fn by_day(&self) -> DayBuckets<'_> {
        let mut buckets: [Vec<&AvailabilityWindow>; 7] = std::array::from_fn(|_| Vec::new());
        for window in &self.windows {
            buckets[window.day_of_week.index()].push(window);
        }
        DayBuckets { buckets }
    }

    /// Windows for `day` ordered by start time. Windows with an unparseable
    /// start sort last, in their original order.
    pub fn windows_for_day_sorted(&self, day: DayOfWeek) -> Vec<&AvailabilityWindow> {
        let mut windows: Vec<&AvailabilityWindow> = self
            .windows
            .iter()
            .filter(|w| w.day_of_week == day)
            .collect();
        windows.sort_by_key(|w| {
            let start = parse_wall_clock(&w.start_time);
            (start.is_none(), start)
        });
        windows
    }

    /// Replace every window at once; saving a schedule never edits in place.
    pub fn replace_windows(&mut self, windows: Vec<AvailabilityWindow>) {
        self.windows = windows;
    }

    /// Check every window the way the schedule form does before saving.
    ///
    /// Returns all problems found, in window order. An empty list means the
    /// availability is well-formed.
    pub fn validate(&self) -> Vec<ScheduleIssue> {
        let mut issues = Vec::new();

        for (index, window) in self.windows.iter().enumerate() {
            let day = window.day_of_week;
            let start = parse_wall_clock(&window.start_time);
            let end = parse_wall_clock(&window.end_time);

            if start.is_none() {
                issues.push(ScheduleIssue::new(index, day, IssueKind::MalformedStart));
            }
            if end.is_none() {
                issues.push(ScheduleIssue::new(index, day, IssueKind::MalformedEnd));
            }
            let (Some(start), Some(end)) = (start, end) else {
                continue;
            };
            if start >= end {
                issues.push(ScheduleIssue::new(index, day, IssueKind::StartNotBeforeEnd));
                continue;
            }

            // Compare against earlier well-formed windows on the same day.
            let overlapping = self.windows[..index]
                .iter()
                .enumerate()
                .filter(|(_, other)| other.day_of_week == day)
                .find(|(_, other)| match other.bounds() {
                    Some((other_start, other_end)) if other_start < other_end => {
                        start < other_end && other_start < end
                    }
                    _ => false,
                });
            if let Some((other, _)) = overlapping {
                issues.push(ScheduleIssue::new(index, day, IssueKind::Overlaps { other }));
            }
        }

        issues
    }
}

/// A schedule owner's timezone and weekly availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// IANA timezone the window boundaries are written in.
    pub timezone: String,
    #[serde(default)]
    pub availability: WeeklyAvailability,
}

impl Schedule {
    pub fn new(timezone: &str, windows: Vec<AvailabilityWindow>) -> Self {
        Self {
            timezone: timezone.to_string(),
            availability: WeeklyAvailability::new(windows),
        }
    }

    /// Validate the timezone and every window.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidTimezone` if the timezone is unknown. Window
    /// problems are returned as issues, not errors.
    pub fn validate(&self) -> Result<Vec<ScheduleIssue>> {
        parse_timezone(&self.timezone)?;
        Ok(self.availability.validate())
    }
}

/// What is wrong with a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueKind {
    MalformedStart,
    MalformedEnd,
    StartNotBeforeEnd,
    /// Overlaps the window at index `other` on the same day.
    Overlaps { other: usize },
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::MalformedStart => f.write_str("start time must be HH:MM"),
            IssueKind::MalformedEnd => f.write_str("end time must be HH:MM"),
            IssueKind::StartNotBeforeEnd => f.write_str("end time must be after start time"),
            IssueKind::Overlaps { other } => {
                write!(f, "overlaps with window {}", other)
            }
        }
    }
}

/// A validation problem attached to the window at `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleIssue {
    pub index: usize,
    pub day: DayOfWeek,
    #[serde(flatten)]
    pub kind: IssueKind,
}

impl ScheduleIssue {
    fn new(index: usize, day: DayOfWeek, kind: IssueKind) -> Self {
        Self { index, day, kind }
    }
}

impl fmt::Display for ScheduleIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window {} ({}): {}", self.index, self.day, self.kind)
    }
}
