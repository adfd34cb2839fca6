//! Candidate booking starts offered on a booking page.
//!
//! Candidates are evenly spaced instants aligned to the step (counted from the
//! Unix epoch), so a 15-minute step always lands on :00, :15, :30 and :45 for
//! zones with whole-quarter-hour offsets.

use chrono::{DateTime, Days, Duration, Utc};
use chrono_tz::Tz;

use crate::dst::DstPolicy;
use crate::error::{Result, SlotError};

/// Every step-aligned instant in `[from, to]`, ascending.
///
/// # Errors
/// Returns `SlotError::InvalidStep` if `step_minutes` is not positive or is
/// too large to represent as a duration.
pub fn candidate_starts(
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    step_minutes: i64,
) -> Result<Vec<DateTime<Utc>>> {
    let invalid = || SlotError::InvalidStep(step_minutes);
    if step_minutes <= 0 {
        return Err(invalid());
    }
    let step = Duration::try_minutes(step_minutes).ok_or_else(invalid)?;
    let step_seconds = step_minutes.checked_mul(60).ok_or_else(invalid)?;
    if from > to {
        return Ok(Vec::new());
    }

    let from_seconds = from.timestamp();
    let mut first_seconds = from_seconds.div_euclid(step_seconds) * step_seconds;
    if first_seconds < from_seconds || from.timestamp_subsec_nanos() > 0 {
        let Some(next) = first_seconds.checked_add(step_seconds) else {
            return Ok(Vec::new());
        };
        first_seconds = next;
    }
    let Some(mut cursor) = DateTime::from_timestamp(first_seconds, 0) else {
        return Ok(Vec::new());
    };

    let mut starts = Vec::new();
    while cursor <= to {
        starts.push(cursor);
        match cursor.checked_add_signed(step) {
            Some(next) => cursor = next,
            None => break,
        }
    }
    Ok(starts)
}

/// The last instant of the local day `days` days after `now` in `tz`.
///
/// Booking pages offer slots from now until the end of that day.
pub fn horizon_end(now: DateTime<Utc>, days: u32, tz: &Tz) -> DateTime<Utc> {
    let today = now.with_timezone(tz).date_naive();
    let last_day = today
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(today);
    last_day
        .and_hms_milli_opt(23, 59, 59, 999)
        .and_then(|local| DstPolicy::ShiftForward.resolve(tz, local))
        .unwrap_or(now)
}
