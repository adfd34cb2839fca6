//! Bookable event types.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// Longest event a user may define unless configured otherwise (4 hours).
pub const DEFAULT_MAX_DURATION_MINUTES: u32 = 4 * 60;

/// A kind of meeting guests can book, e.g. "30 minute intro call".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventType {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub duration_minutes: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl EventType {
    pub fn new(name: &str, duration_minutes: u32) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            duration_minutes,
            is_active: true,
        }
    }

    /// Check the fields the event form enforces.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidEventType` if the name is blank or the
    /// duration is zero or above `max_duration_minutes`.
    pub fn validate(&self, max_duration_minutes: u32) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(SlotError::InvalidEventType("name is required".to_string()));
        }
        if self.duration_minutes == 0 {
            return Err(SlotError::InvalidEventType(
                "duration must be greater than 0".to_string(),
            ));
        }
        if self.duration_minutes > max_duration_minutes {
            return Err(SlotError::InvalidEventType(format!(
                "duration must be at most {} minutes",
                max_duration_minutes
            )));
        }
        Ok(())
    }

    /// Human-readable duration, see [`format_duration`].
    pub fn duration_label(&self) -> String {
        format_duration(self.duration_minutes)
    }
}

/// Render a duration as "45 mins", "1 hr", "2 hrs 30 mins".
///
/// Units are plural only above one: "1 min", "0 min".
pub fn format_duration(duration_minutes: u32) -> String {
    let hours = duration_minutes / 60;
    let minutes = duration_minutes % 60;
    let hours_label = format!("{} {}", hours, if hours > 1 { "hrs" } else { "hr" });
    let minutes_label = format!("{} {}", minutes, if minutes > 1 { "mins" } else { "min" });

    match (hours, minutes) {
        (0, _) => minutes_label,
        (_, 0) => hours_label,
        _ => format!("{} {}", hours_label, minutes_label),
    }
}
