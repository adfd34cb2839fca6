//! Check a guest's booking request before it is written to the calendar.
//!
//! The guest picks a wall-clock start in their own timezone. The request is
//! accepted only if the event type is active, the start is in the future, and
//! the resolver keeps that single candidate against the owner's schedule and
//! busy time.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dst::parse_timezone;
use crate::error::{Result, SlotError};
use crate::event_type::EventType;
use crate::interval::{BusyInterval, Interval};
use crate::resolver::{resolve_with, ResolveOptions};
use crate::schedule::Schedule;

/// What a guest submits from the booking form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    /// Wall-clock start as shown to the guest.
    pub start_time: NaiveDateTime,
    /// The guest's IANA timezone.
    pub timezone: String,
    pub guest_name: String,
    pub guest_email: String,
    #[serde(default)]
    pub guest_notes: Option<String>,
}

/// A booking that passed every check, ready to be sent to the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmedSlot {
    pub event_name: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_notes: Option<String>,
}

/// Validate a booking request against the owner's event type, schedule and
/// current busy time.
///
/// # Errors
/// - `SlotError::InvalidBooking` for a blank guest name, a malformed email, or
///   a start that is not after `now`.
/// - `SlotError::EventInactive` if the event type is switched off.
/// - `SlotError::InvalidTimezone` if either the guest or schedule timezone is unknown.
/// - `SlotError::NonexistentLocalTime` if the start falls in a DST gap skipped
///   under `options.dst_policy`.
/// - `SlotError::SlotUnavailable` if the resolver rejects the start.
pub fn check_booking(
    request: &BookingRequest,
    event: &EventType,
    schedule: &Schedule,
    busy: &[BusyInterval],
    now: DateTime<Utc>,
    options: ResolveOptions,
) -> Result<ConfirmedSlot> {
    validate_guest(request)?;

    if !event.is_active {
        debug!(event = %event.name, "booking rejected: event type inactive");
        return Err(SlotError::EventInactive(event.name.clone()));
    }

    let guest_tz = parse_timezone(&request.timezone)?;
    let start = options
        .dst_policy
        .resolve(&guest_tz, request.start_time)
        .ok_or_else(|| {
            SlotError::NonexistentLocalTime(
                request.start_time.to_string(),
                request.timezone.clone(),
            )
        })?;

    if start <= now {
        return Err(SlotError::InvalidBooking(
            "start time must be in the future".to_string(),
        ));
    }

    let candidate = start.with_timezone(&guest_tz);
    let kept = resolve_with(
        &[candidate],
        event.duration_minutes,
        &schedule.availability,
        busy,
        &schedule.timezone,
        options,
    )?;

    let end = start.checked_add_signed(Duration::minutes(i64::from(event.duration_minutes)));
    let Some(end) = end.filter(|_| !kept.is_empty()) else {
        let conflict = end.and_then(|end| Interval::new(start, end).first_conflict(busy));
        match conflict {
            Some(conflict) => debug!(
                start = %start,
                busy_start = %conflict.start,
                busy_end = %conflict.end,
                "booking rejected: overlaps busy time"
            ),
            None => debug!(start = %start, "booking rejected: outside availability"),
        }
        return Err(SlotError::SlotUnavailable(start.to_rfc3339()));
    };

    info!(event = %event.name, start = %start, end = %end, "booking accepted");
    Ok(ConfirmedSlot {
        event_name: event.name.clone(),
        start,
        end,
        guest_name: request.guest_name.clone(),
        guest_email: request.guest_email.clone(),
        guest_notes: request.guest_notes.clone(),
    })
}

fn validate_guest(request: &BookingRequest) -> Result<()> {
    if request.guest_name.trim().is_empty() {
        return Err(SlotError::InvalidBooking("guest name is required".to_string()));
    }
    if !looks_like_email(&request.guest_email) {
        return Err(SlotError::InvalidBooking(format!(
            "invalid guest email: {}",
            request.guest_email
        )));
    }
    Ok(())
}

/// One `@` with a non-empty local part and a dotted domain.
fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.trim().split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}
