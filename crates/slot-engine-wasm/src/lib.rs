//! WASM bindings for slot-engine.
//!
//! Exposes slot resolution, booking-page slot listing, schedule validation and
//! duration labels to JavaScript via `wasm-bindgen`. All complex types are
//! passed as JSON strings.
//!
//! The JSON plumbing lives in [`json`] and returns plain `String` errors so it
//! can be tested natively; the exports below only convert errors to `JsValue`.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use wasm_bindgen::prelude::*;

pub mod json;

fn to_js(message: String) -> JsValue {
    JsValue::from_str(&message)
}

/// Filter candidate starts down to the bookable ones.
///
/// - `candidates_json` -- JSON array of ISO 8601 datetimes; offsets are kept
/// - `schedule_json` -- `{timezone, availability: [{day_of_week, start_time, end_time}]}`
/// - `busy_json` -- JSON array of `{start, end}` objects
///
/// Returns a JSON array of the kept candidates as RFC 3339 strings, in input order.
#[wasm_bindgen(js_name = "resolveSlots")]
pub fn resolve_slots(
    candidates_json: &str,
    duration_minutes: u32,
    schedule_json: &str,
    busy_json: &str,
) -> Result<String, JsValue> {
    json::resolve_slots(candidates_json, duration_minutes, schedule_json, busy_json).map_err(to_js)
}

/// List every bookable start between `from` and `to`, stepping `step_minutes`,
/// shown in `display_timezone`.
#[wasm_bindgen(js_name = "availableSlots")]
pub fn available_slots(
    schedule_json: &str,
    busy_json: &str,
    duration_minutes: u32,
    from: &str,
    to: &str,
    step_minutes: i32,
    display_timezone: &str,
) -> Result<String, JsValue> {
    json::available_slots(
        schedule_json,
        busy_json,
        duration_minutes,
        from,
        to,
        step_minutes,
        display_timezone,
    )
    .map_err(to_js)
}

/// Validate a schedule. Returns a JSON array of problems (empty when valid).
#[wasm_bindgen(js_name = "validateSchedule")]
pub fn validate_schedule(schedule_json: &str) -> Result<String, JsValue> {
    json::validate_schedule(schedule_json).map_err(to_js)
}

/// Render a duration such as "1 hr 30 mins".
#[wasm_bindgen(js_name = "formatDuration")]
pub fn format_duration(duration_minutes: u32) -> String {
    slot_engine::format_duration(duration_minutes)
}
