//! Tests for the single-booking check.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use slot_engine::dst::DstPolicy;
use slot_engine::schedule::{AvailabilityWindow, DayOfWeek, Schedule};
use slot_engine::{check_booking, BookingRequest, BusyInterval, EventType, ResolveOptions, SlotError};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn request(start_time: NaiveDateTime, timezone: &str) -> BookingRequest {
    BookingRequest {
        start_time,
        timezone: timezone.to_string(),
        guest_name: "Ada Lovelace".to_string(),
        guest_email: "ada@example.com".to_string(),
        guest_notes: None,
    }
}

/// Weekdays 09:00-17:00 in New York.
fn owner_schedule() -> Schedule {
    Schedule::new(
        "America/New_York",
        vec![
            AvailabilityWindow::new(DayOfWeek::Monday, "09:00", "17:00"),
            AvailabilityWindow::new(DayOfWeek::Tuesday, "09:00", "17:00"),
        ],
    )
}

fn now() -> DateTime<Utc> {
    utc(2026, 3, 1, 12, 0)
}

// ── Acceptance ──────────────────────────────────────────────────────────────

#[test]
fn guest_in_another_zone_books_inside_owner_hours() {
    // 14:00 in London (GMT) on Monday 2026-03-16 is 10:00 in New York.
    let req = request(local(2026, 3, 16, 14, 0), "Europe/London");
    let event = EventType::new("Intro call", 30);

    let slot = check_booking(&req, &event, &owner_schedule(), &[], now(), ResolveOptions::default())
        .unwrap();

    assert_eq!(slot.start, utc(2026, 3, 16, 14, 0));
    assert_eq!(slot.end, utc(2026, 3, 16, 14, 30));
    assert_eq!(slot.event_name, "Intro call");
    assert_eq!(slot.guest_email, "ada@example.com");
}

// ── Rejection ───────────────────────────────────────────────────────────────

#[test]
fn start_outside_owner_hours_is_unavailable() {
    // 08:00 in New York is before the window opens.
    let req = request(local(2026, 3, 16, 8, 0), "America/New_York");
    let event = EventType::new("Intro call", 30);

    let result = check_booking(&req, &event, &owner_schedule(), &[], now(), ResolveOptions::default());

    assert!(matches!(result, Err(SlotError::SlotUnavailable(_))));
}

#[test]
fn busy_time_makes_slot_unavailable() {
    let req = request(local(2026, 3, 16, 10, 0), "America/New_York");
    let event = EventType::new("Intro call", 30);
    let busy = vec![BusyInterval::new(utc(2026, 3, 16, 13, 45), utc(2026, 3, 16, 14, 15))];

    let result = check_booking(&req, &event, &owner_schedule(), &busy, now(), ResolveOptions::default());

    assert_eq!(
        result,
        Err(SlotError::SlotUnavailable("2026-03-16T14:00:00+00:00".to_string()))
    );
}

#[test]
fn inactive_event_type_cannot_be_booked() {
    let req = request(local(2026, 3, 16, 10, 0), "America/New_York");
    let mut event = EventType::new("Retired call", 30);
    event.is_active = false;

    let result = check_booking(&req, &event, &owner_schedule(), &[], now(), ResolveOptions::default());

    assert_eq!(result, Err(SlotError::EventInactive("Retired call".to_string())));
}

#[test]
fn past_start_is_rejected() {
    let req = request(local(2026, 2, 23, 10, 0), "America/New_York");
    let event = EventType::new("Intro call", 30);

    let result = check_booking(&req, &event, &owner_schedule(), &[], now(), ResolveOptions::default());

    assert!(matches!(result, Err(SlotError::InvalidBooking(_))));
}

#[test]
fn guest_details_are_required() {
    let event = EventType::new("Intro call", 30);

    let mut nameless = request(local(2026, 3, 16, 10, 0), "America/New_York");
    nameless.guest_name = " ".to_string();
    let mut bad_email = request(local(2026, 3, 16, 10, 0), "America/New_York");
    bad_email.guest_email = "ada.example.com".to_string();

    for req in [nameless, bad_email] {
        let result = check_booking(&req, &event, &owner_schedule(), &[], now(), ResolveOptions::default());
        assert!(matches!(result, Err(SlotError::InvalidBooking(_))), "{:?}", req);
    }
}

#[test]
fn unknown_guest_timezone_is_rejected() {
    let req = request(local(2026, 3, 16, 10, 0), "Moon/Tranquility");
    let event = EventType::new("Intro call", 30);

    let result = check_booking(&req, &event, &owner_schedule(), &[], now(), ResolveOptions::default());

    assert_eq!(
        result,
        Err(SlotError::InvalidTimezone("Moon/Tranquility".to_string()))
    );
}

#[test]
fn gap_start_is_rejected_when_skipping() {
    // 02:30 on 2026-03-08 does not exist in New York.
    let req = request(local(2026, 3, 8, 2, 30), "America/New_York");
    let event = EventType::new("Intro call", 30);
    let options = ResolveOptions {
        dst_policy: DstPolicy::Skip,
        ..ResolveOptions::default()
    };

    let result = check_booking(&req, &event, &owner_schedule(), &[], now(), options);

    assert_eq!(
        result,
        Err(SlotError::NonexistentLocalTime(
            "2026-03-08 02:30:00".to_string(),
            "America/New_York".to_string()
        ))
    );
}
