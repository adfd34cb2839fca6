//! Timezone lookup and DST policies for wall-clock boundaries.
//!
//! Availability windows and booking requests are written as local wall-clock
//! times. Turning them into absolute instants has two awkward cases: the local
//! time does not exist (spring-forward gap) or exists twice (fall-back overlap).

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// Policy for wall-clock times that fall inside a DST gap.
///
/// Ambiguous times (the repeated hour on fall-back) always resolve to the
/// earlier instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DstPolicy {
    /// Move the time forward past the gap (02:30 on spring-forward becomes 03:30).
    #[default]
    ShiftForward,
    /// Treat the time as unresolvable.
    Skip,
}

impl DstPolicy {
    /// Resolve a local wall-clock time in `tz` to an absolute instant.
    ///
    /// Returns `None` for gap times under [`DstPolicy::Skip`] and for times at
    /// the edge of the representable range.
    pub fn resolve(self, tz: &Tz, local: NaiveDateTime) -> Option<DateTime<Utc>> {
        match tz.from_local_datetime(&local) {
            LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
            LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
            LocalResult::None => match self {
                DstPolicy::Skip => None,
                DstPolicy::ShiftForward => shift_past_gap(tz, local),
            },
        }
    }
}

/// Interpret a gap time with the offset in force just before the gap, which
/// lands it the same distance past the transition.
fn shift_past_gap(tz: &Tz, local: NaiveDateTime) -> Option<DateTime<Utc>> {
    let day_before = local.checked_sub_signed(Duration::hours(24))?;
    let before = tz.from_local_datetime(&day_before).earliest()?;
    let offset_seconds = before.offset().fix().local_minus_utc();
    local
        .checked_sub_signed(Duration::seconds(i64::from(offset_seconds)))
        .map(|utc| utc.and_utc())
}

/// Parse an IANA timezone identifier (e.g. "America/New_York").
///
/// # Errors
/// Returns `SlotError::InvalidTimezone` if the identifier is unknown to `chrono-tz`.
pub fn parse_timezone(timezone: &str) -> Result<Tz> {
    timezone
        .parse()
        .map_err(|_| SlotError::InvalidTimezone(timezone.to_string()))
}
