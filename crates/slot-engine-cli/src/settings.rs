//! Runtime settings for the `slots` CLI.
//!
//! Sources, later ones winning:
//!
//! 1. Built-in defaults
//! 2. A TOML file: `--config <path>` if given (must exist), else `./slots.toml` if present
//! 3. `SLOTS_*` environment variables, e.g. `SLOTS_HORIZON_DAYS=14`

use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use slot_engine::dst::DstPolicy;
use slot_engine::{DayAnchor, ResolveOptions};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Longest event type accepted, in minutes.
    pub max_duration_minutes: u32,
    /// Spacing of offered start times, in minutes.
    pub slot_step_minutes: i64,
    /// How many days past today the booking page offers.
    pub horizon_days: u32,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
    pub day_anchor: DayAnchor,
    pub dst_policy: DstPolicy,
}

impl Settings {
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("max_duration_minutes", 240_i64)?
            .set_default("slot_step_minutes", 15_i64)?
            .set_default("horizon_days", 60_i64)?
            .set_default("log_level", "info")?
            .set_default("day_anchor", "candidate")?
            .set_default("dst_policy", "shift_forward")?;

        let builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name("slots").required(false)),
        };

        builder
            .add_source(Environment::with_prefix("SLOTS").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            day_anchor: self.day_anchor,
            dst_policy: self.dst_policy,
        }
    }
}
