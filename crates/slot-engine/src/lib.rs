//! # slot-engine
//!
//! Bookable time-slot resolution for a meeting scheduler.
//!
//! Owners declare a weekly availability schedule in their own timezone; guests
//! pick a start time. The engine decides which candidate starts are bookable:
//! inside a declared window on the candidate's day of week and clear of every
//! busy interval pulled from the owner's calendar.
//!
//! ## Modules
//!
//! - [`resolver`] — Filter candidate starts against availability and busy time
//! - [`schedule`] — Weekly availability windows, grouping and validation
//! - [`interval`] — Absolute intervals and overlap tests
//! - [`dst`] — Timezone lookup and DST gap policies
//! - [`candidates`] — Step-aligned candidate generation for booking pages
//! - [`calendar`] — Calendar events → busy intervals
//! - [`event_type`] — Bookable event types and duration labels
//! - [`booking`] — Single-booking check before writing to the calendar
//! - [`error`] — Error types

pub mod booking;
pub mod calendar;
pub mod candidates;
pub mod dst;
pub mod error;
pub mod event_type;
pub mod interval;
pub mod resolver;
pub mod schedule;

pub use booking::{check_booking, BookingRequest, ConfirmedSlot};
pub use calendar::{busy_intervals, CalendarEvent};
pub use candidates::candidate_starts;
pub use error::SlotError;
pub use event_type::{format_duration, EventType};
pub use interval::{BusyInterval, Interval};
pub use resolver::{resolve, resolve_with, DayAnchor, ResolveOptions};
pub use schedule::{AvailabilityWindow, DayOfWeek, Schedule, WeeklyAvailability};
