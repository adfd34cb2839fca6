//! Filter candidate booking starts down to the bookable ones.
//!
//! A candidate `t` survives when some availability window for its day of week
//! contains `t` (inclusive of both window boundaries) and the booking
//! `[t, t + duration)` overlaps no busy interval. Only the booking start is
//! tested against the window; a booking may run past the window end.
//!
//! The result is an order-preserving subsequence of the input. Duplicates are
//! kept. Nothing here logs or performs I/O.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::dst::{parse_timezone, DstPolicy};
use crate::error::Result;
use crate::interval::{BusyInterval, Interval};
use crate::schedule::{AvailabilityWindow, DayBuckets, DayOfWeek, WeeklyAvailability};

/// Which wall clock decides a candidate's day of week and calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayAnchor {
    /// The candidate's own offset, as given.
    #[default]
    Candidate,
    /// The candidate projected into the schedule's timezone.
    Schedule,
}

/// Read-only knobs for a resolution call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResolveOptions {
    #[serde(default)]
    pub day_anchor: DayAnchor,
    #[serde(default)]
    pub dst_policy: DstPolicy,
}

/// Return the candidates that fall inside declared availability and are free
/// of busy time, using [`ResolveOptions::default`].
///
/// # Arguments
/// - `candidates` -- Booking start instants, each in its own wall-clock offset
/// - `duration_minutes` -- Length of every booking; callers validate it is positive
/// - `availability` -- The owner's weekly windows
/// - `busy` -- Existing commitments from the owner's calendar
/// - `timezone` -- IANA timezone the window boundaries are written in
///
/// # Errors
/// Returns `SlotError::InvalidTimezone` if `timezone` is not a valid IANA
/// identifier and `candidates` is non-empty.
pub fn resolve<Z: TimeZone>(
    candidates: &[DateTime<Z>],
    duration_minutes: u32,
    availability: &WeeklyAvailability,
    busy: &[BusyInterval],
    timezone: &str,
) -> Result<Vec<DateTime<Z>>> {
    resolve_with(
        candidates,
        duration_minutes,
        availability,
        busy,
        timezone,
        ResolveOptions::default(),
    )
}

/// Identical to [`resolve`] with explicit options.
pub fn resolve_with<Z: TimeZone>(
    candidates: &[DateTime<Z>],
    duration_minutes: u32,
    availability: &WeeklyAvailability,
    busy: &[BusyInterval],
    timezone: &str,
    options: ResolveOptions,
) -> Result<Vec<DateTime<Z>>> {
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let tz = parse_timezone(timezone)?;
    let buckets = availability.by_day();
    let duration = Duration::minutes(i64::from(duration_minutes));

    Ok(candidates
        .iter()
        .filter(|t| is_bookable(*t, duration, &buckets, busy, &tz, options))
        .cloned()
        .collect())
}

fn is_bookable<Z: TimeZone>(
    t: &DateTime<Z>,
    duration: Duration,
    buckets: &DayBuckets<'_>,
    busy: &[BusyInterval],
    tz: &Tz,
    options: ResolveOptions,
) -> bool {
    let (day, date) = match options.day_anchor {
        DayAnchor::Candidate => (DayOfWeek::from(t.weekday()), t.date_naive()),
        DayAnchor::Schedule => {
            let local = t.with_timezone(tz);
            (DayOfWeek::from(local.weekday()), local.date_naive())
        }
    };

    let start = t.with_timezone(&Utc);
    let Some(end) = start.checked_add_signed(duration) else {
        return false;
    };
    let booking = Interval::new(start, end);

    let within_availability = buckets
        .get(day)
        .iter()
        .filter_map(|window| window_on_date(window, date, tz, options.dst_policy))
        .any(|window| window.contains(start));

    within_availability && booking.first_conflict(busy).is_none()
}

/// Place a recurring window on a concrete calendar date in `tz`.
///
/// Returns `None` when the window is malformed or a boundary cannot be
/// resolved under `policy`. A backwards window spans the same instants as its
/// forward counterpart.
pub fn window_on_date(
    window: &AvailabilityWindow,
    date: NaiveDate,
    tz: &Tz,
    policy: DstPolicy,
) -> Option<Interval> {
    let (start, end) = window.bounds()?;
    let start = policy.resolve(tz, date.and_time(start))?;
    let end = policy.resolve(tz, date.and_time(end))?;
    Some(Interval::new(start.min(end), start.max(end)))
}
