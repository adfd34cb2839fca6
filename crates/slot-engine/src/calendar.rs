//! Normalize external calendar events into busy intervals.
//!
//! The calendar collaborator hands back events in one of two shapes: timed
//! events with absolute start/end instants, and all-day events that only carry
//! dates. All-day events block the whole of every day they touch, measured in
//! the owner's timezone.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::dst::{parse_timezone, DstPolicy};
use crate::error::Result;
use crate::interval::{BusyInterval, Interval};

/// An event as returned by the owner's calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalendarEvent {
    Timed {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    AllDay {
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
}

impl CalendarEvent {
    /// The busy interval this event occupies, or `None` if it ends before it starts.
    pub fn to_busy(&self, tz: &Tz) -> Option<BusyInterval> {
        let interval = match self {
            CalendarEvent::Timed { start, end } => Interval::new(*start, *end),
            CalendarEvent::AllDay {
                start_date,
                end_date,
            } => Interval::new(start_of_day(*start_date, tz)?, end_of_day(*end_date, tz)?),
        };
        (interval.start <= interval.end).then_some(interval)
    }
}

fn start_of_day(date: NaiveDate, tz: &Tz) -> Option<DateTime<Utc>> {
    DstPolicy::ShiftForward.resolve(tz, date.and_hms_opt(0, 0, 0)?)
}

fn end_of_day(date: NaiveDate, tz: &Tz) -> Option<DateTime<Utc>> {
    DstPolicy::ShiftForward.resolve(tz, date.and_hms_milli_opt(23, 59, 59, 999)?)
}

/// Convert calendar events to busy intervals, dropping inverted events.
///
/// # Errors
/// Returns `SlotError::InvalidTimezone` if `timezone` is not a valid IANA identifier.
pub fn busy_intervals(events: &[CalendarEvent], timezone: &str) -> Result<Vec<BusyInterval>> {
    let tz = parse_timezone(timezone)?;
    Ok(events.iter().filter_map(|event| event.to_busy(&tz)).collect())
}

/// The span the calendar should be queried over for a batch of candidates:
/// from the first candidate to the end of a booking at the last one, in input
/// order.
pub fn query_range<Z: TimeZone>(
    candidates: &[DateTime<Z>],
    duration_minutes: u32,
) -> Option<Interval> {
    let first = candidates.first()?;
    let last = candidates.last()?;
    let end = last
        .with_timezone(&Utc)
        .checked_add_signed(Duration::minutes(i64::from(duration_minutes)))?;
    Some(Interval::new(first.with_timezone(&Utc), end))
}
