//! JSON request and response bodies for the CLI subcommands.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use slot_engine::calendar::busy_intervals;
use slot_engine::{BookingRequest, BusyInterval, CalendarEvent, EventType, Schedule};

/// Busy time, given either as raw intervals or as calendar events (or both).
#[derive(Debug, Default, Deserialize)]
pub struct CalendarInput {
    #[serde(default)]
    pub busy: Vec<BusyInterval>,
    #[serde(default)]
    pub events: Vec<CalendarEvent>,
}

impl CalendarInput {
    /// All busy intervals, with all-day events measured in `timezone`.
    ///
    /// `timezone` is only checked when there are events to convert.
    pub fn to_busy(&self, timezone: &str) -> slot_engine::error::Result<Vec<BusyInterval>> {
        let mut busy = self.busy.clone();
        if !self.events.is_empty() {
            busy.extend(busy_intervals(&self.events, timezone)?);
        }
        Ok(busy)
    }
}

/// Input for `slots resolve`.
#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    pub candidates: Vec<DateTime<FixedOffset>>,
    pub duration_minutes: u32,
    pub schedule: Schedule,
    #[serde(flatten)]
    pub calendar: CalendarInput,
}

/// Input for `slots available`.
#[derive(Debug, Deserialize)]
pub struct AvailableRequest {
    pub event: EventType,
    pub schedule: Schedule,
    #[serde(flatten)]
    pub calendar: CalendarInput,
}

/// Output of `slots available`.
#[derive(Debug, Serialize)]
pub struct AvailableResponse {
    pub event: String,
    pub duration: String,
    pub timezone: String,
    pub slots: Vec<String>,
}

/// Input for `slots book`.
#[derive(Debug, Deserialize)]
pub struct BookRequest {
    pub booking: BookingRequest,
    pub event: EventType,
    pub schedule: Schedule,
    #[serde(flatten)]
    pub calendar: CalendarInput,
}
