//! JSON-in, JSON-out wrappers behind the WASM exports.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::Deserialize;
use slot_engine::candidates::candidate_starts;
use slot_engine::dst::parse_timezone;
use slot_engine::{resolve, BusyInterval, Schedule};

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

/// Input format for busy intervals passed from JavaScript.
#[derive(Deserialize)]
struct BusyInput {
    start: String,
    end: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse an ISO 8601 datetime string, keeping its offset.
///
/// Accepts RFC 3339 (e.g., "2026-03-16T10:00:00-04:00") and naive local time
/// (e.g., "2026-03-16T14:00:00"), which is interpreted as UTC.
fn parse_datetime(s: &str) -> Result<DateTime<FixedOffset>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt);
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc().fixed_offset())
        .map_err(|e| format!("Invalid datetime '{}': {}", s, e))
}

fn parse_utc(s: &str) -> Result<DateTime<Utc>, String> {
    parse_datetime(s).map(|dt| dt.with_timezone(&Utc))
}

fn parse_schedule(json: &str) -> Result<Schedule, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid schedule JSON: {}", e))
}

fn parse_busy(json: &str) -> Result<Vec<BusyInterval>, String> {
    let inputs: Vec<BusyInput> =
        serde_json::from_str(json).map_err(|e| format!("Invalid busy JSON: {}", e))?;

    inputs
        .into_iter()
        .map(|input| Ok(BusyInterval::new(parse_utc(&input.start)?, parse_utc(&input.end)?)))
        .collect()
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

pub fn resolve_slots(
    candidates_json: &str,
    duration_minutes: u32,
    schedule_json: &str,
    busy_json: &str,
) -> Result<String, String> {
    let raw: Vec<String> = serde_json::from_str(candidates_json)
        .map_err(|e| format!("Invalid candidates JSON: {}", e))?;
    let candidates = raw
        .iter()
        .map(|s| parse_datetime(s))
        .collect::<Result<Vec<_>, _>>()?;
    let schedule = parse_schedule(schedule_json)?;
    let busy = parse_busy(busy_json)?;

    let kept = resolve(
        &candidates,
        duration_minutes,
        &schedule.availability,
        &busy,
        &schedule.timezone,
    )
    .map_err(|e| e.to_string())?;

    let out: Vec<String> = kept.iter().map(|t| t.to_rfc3339()).collect();
    to_json(&out)
}

pub fn available_slots(
    schedule_json: &str,
    busy_json: &str,
    duration_minutes: u32,
    from: &str,
    to: &str,
    step_minutes: i32,
    display_timezone: &str,
) -> Result<String, String> {
    let schedule = parse_schedule(schedule_json)?;
    let busy = parse_busy(busy_json)?;
    let display_tz = parse_timezone(display_timezone).map_err(|e| e.to_string())?;

    let candidates: Vec<_> = candidate_starts(parse_utc(from)?, parse_utc(to)?, i64::from(step_minutes))
        .map_err(|e| e.to_string())?
        .into_iter()
        .map(|t| t.with_timezone(&display_tz))
        .collect();

    let kept = resolve(
        &candidates,
        duration_minutes,
        &schedule.availability,
        &busy,
        &schedule.timezone,
    )
    .map_err(|e| e.to_string())?;

    let out: Vec<String> = kept.iter().map(|t| t.to_rfc3339()).collect();
    to_json(&out)
}

pub fn validate_schedule(schedule_json: &str) -> Result<String, String> {
    let schedule = parse_schedule(schedule_json)?;
    let issues = schedule.validate().map_err(|e| e.to_string())?;
    to_json(&issues)
}
