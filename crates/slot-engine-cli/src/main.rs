//! `slots` CLI — resolve bookable meeting slots from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Filter explicit candidates (stdin → stdout)
//! cat request.json | slots resolve
//!
//! # List every bookable start for an event type over the booking horizon
//! slots available -i page.json --timezone Europe/London
//!
//! # Check a guest's booking request
//! slots book -i booking.json
//!
//! # Validate a schedule before saving it
//! slots check-schedule -i schedule.json
//! ```

mod payload;
mod settings;

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use slot_engine::candidates::{candidate_starts, horizon_end};
use slot_engine::dst::parse_timezone;
use slot_engine::{check_booking, resolve_with, Schedule};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::payload::{AvailableRequest, AvailableResponse, BookRequest, ResolveRequest};
use crate::settings::Settings;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Resolve bookable meeting slots against weekly availability and calendar busy time"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file (TOML). Defaults to ./slots.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter explicit candidate starts down to the bookable ones
    Resolve {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// List bookable starts for an event type from now to the booking horizon
    Available {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Guest timezone to list slots in (defaults to the schedule's)
        #[arg(long)]
        timezone: Option<String>,
        /// Days past today to offer (overrides settings)
        #[arg(long)]
        days: Option<u32>,
        /// Treat this RFC 3339 instant as the current time
        #[arg(long)]
        now: Option<String>,
    },
    /// Check a guest's booking request and print the confirmed slot
    Book {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Treat this RFC 3339 instant as the current time
        #[arg(long)]
        now: Option<String>,
    },
    /// Validate a schedule and list every problem with its windows
    CheckSchedule {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    init_tracing(&settings.log_level);
    debug!(?settings, "settings loaded");

    match cli.command {
        Commands::Resolve { input, output } => {
            let request: ResolveRequest = read_json(input.as_deref())?;
            check_duration(request.duration_minutes, &settings)?;

            let busy = request
                .calendar
                .to_busy(&request.schedule.timezone)
                .context("Failed to read calendar busy time")?;
            let kept = resolve_with(
                &request.candidates,
                request.duration_minutes,
                &request.schedule.availability,
                &busy,
                &request.schedule.timezone,
                settings.resolve_options(),
            )
            .context("Failed to resolve candidates")?;

            info!(
                candidates = request.candidates.len(),
                kept = kept.len(),
                "resolved candidates"
            );
            write_json(output.as_deref(), &kept)?;
        }
        Commands::Available {
            input,
            output,
            timezone,
            days,
            now,
        } => {
            let request: AvailableRequest = read_json(input.as_deref())?;
            request
                .event
                .validate(settings.max_duration_minutes)
                .context("Invalid event type")?;
            if !request.event.is_active {
                anyhow::bail!("Event type '{}' is not active", request.event.name);
            }

            let now = parse_now(now.as_deref())?;
            let schedule_tz = parse_timezone(&request.schedule.timezone)?;
            let display_zone = timezone.unwrap_or_else(|| request.schedule.timezone.clone());
            let display_tz = parse_timezone(&display_zone)?;

            let end = horizon_end(now, days.unwrap_or(settings.horizon_days), &schedule_tz);
            let candidates: Vec<_> = candidate_starts(now, end, settings.slot_step_minutes)?
                .into_iter()
                .map(|t| t.with_timezone(&display_tz))
                .collect();

            let busy = request
                .calendar
                .to_busy(&request.schedule.timezone)
                .context("Failed to read calendar busy time")?;
            let kept = resolve_with(
                &candidates,
                request.event.duration_minutes,
                &request.schedule.availability,
                &busy,
                &request.schedule.timezone,
                settings.resolve_options(),
            )
            .context("Failed to resolve candidates")?;

            info!(
                event = %request.event.name,
                candidates = candidates.len(),
                kept = kept.len(),
                "listed available slots"
            );
            let response = AvailableResponse {
                event: request.event.name.clone(),
                duration: request.event.duration_label(),
                timezone: display_zone,
                slots: kept.iter().map(|t| t.to_rfc3339()).collect(),
            };
            write_json(output.as_deref(), &response)?;
        }
        Commands::Book { input, output, now } => {
            let request: BookRequest = read_json(input.as_deref())?;
            request
                .event
                .validate(settings.max_duration_minutes)
                .context("Invalid event type")?;

            let now = parse_now(now.as_deref())?;
            let busy = request
                .calendar
                .to_busy(&request.schedule.timezone)
                .context("Failed to read calendar busy time")?;
            let confirmed = check_booking(
                &request.booking,
                &request.event,
                &request.schedule,
                &busy,
                now,
                settings.resolve_options(),
            )
            .context("Booking rejected")?;

            write_json(output.as_deref(), &confirmed)?;
        }
        Commands::CheckSchedule { input } => {
            let schedule: Schedule = read_json(input.as_deref())?;
            let issues = schedule.validate().context("Invalid schedule")?;

            write_json(None, &issues)?;
            if !issues.is_empty() {
                for issue in &issues {
                    warn!(%issue, "schedule problem");
                }
                anyhow::bail!("Schedule has {} problem(s)", issues.len());
            }
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over the configured level.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn check_duration(duration_minutes: u32, settings: &Settings) -> Result<()> {
    if duration_minutes == 0 || duration_minutes > settings.max_duration_minutes {
        anyhow::bail!(
            "Duration must be between 1 and {} minutes, got {}",
            settings.max_duration_minutes,
            duration_minutes
        );
    }
    Ok(())
}

fn parse_now(value: Option<&str>) -> Result<DateTime<Utc>> {
    match value {
        Some(value) => DateTime::parse_from_rfc3339(value)
            .map(|dt| dt.with_timezone(&Utc))
            .with_context(|| format!("Invalid --now value: {}", value)),
        None => Ok(Utc::now()),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: Option<&str>) -> Result<T> {
    let raw = read_input(path)?;
    serde_json::from_str(&raw).context("Failed to parse input JSON")
}

fn write_json<T: serde::Serialize>(path: Option<&str>, value: &T) -> Result<()> {
    let pretty = serde_json::to_string_pretty(value)?;
    write_output(path, &pretty)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
