//! Property-based tests for candidate resolution using proptest.
//!
//! These tests verify invariants that should hold for *any* schedule, busy set
//! and candidate batch, not just the scenarios in `resolver_tests.rs`.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use slot_engine::schedule::{AvailabilityWindow, DayOfWeek, WeeklyAvailability};
use slot_engine::{resolve, BusyInterval};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_day() -> impl Strategy<Value = DayOfWeek> {
    (0usize..7).prop_map(|i| DayOfWeek::ALL[i])
}

/// Mostly well-formed `HH:MM`, with the occasional malformed boundary.
fn arb_wall_clock() -> impl Strategy<Value = String> {
    prop_oneof![
        8 => (0u32..24, prop_oneof![Just(0u32), Just(15), Just(30), Just(45)])
            .prop_map(|(h, m)| format!("{:02}:{:02}", h, m)),
        1 => Just("25:00".to_string()),
        1 => Just("".to_string()),
    ]
}

fn arb_availability() -> impl Strategy<Value = WeeklyAvailability> {
    prop::collection::vec(
        (arb_day(), arb_wall_clock(), arb_wall_clock())
            .prop_map(|(day, start, end)| AvailabilityWindow::new(day, &start, &end)),
        0..8,
    )
    .prop_map(WeeklyAvailability::new)
}

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 16, 0, 0, 0).unwrap()
}

/// Quarter-hour instants over two weeks from 2026-03-16.
fn arb_instant() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..(14 * 96)).prop_map(|q| base() + Duration::minutes(q * 15))
}

fn arb_candidates() -> impl Strategy<Value = Vec<DateTime<Utc>>> {
    prop::collection::vec(arb_instant(), 0..40)
}

fn arb_busy() -> impl Strategy<Value = Vec<BusyInterval>> {
    prop::collection::vec(
        (arb_instant(), 1i64..240).prop_map(|(start, minutes)| {
            BusyInterval::new(start, start + Duration::minutes(minutes))
        }),
        0..10,
    )
}

fn arb_timezone() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("UTC"),
        Just("America/New_York"),
        Just("Europe/London"),
        Just("Asia/Kolkata"),
        Just("Australia/Sydney"),
    ]
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

/// Whether `sub` appears in `full` in order (not necessarily contiguously).
fn is_subsequence<T: PartialEq>(sub: &[T], full: &[T]) -> bool {
    let mut rest = full.iter();
    sub.iter().all(|item| rest.any(|candidate| candidate == item))
}

// ---------------------------------------------------------------------------
// Property 1: Output is an order-preserving subsequence of the input
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn output_is_subsequence_of_input(
        candidates in arb_candidates(),
        availability in arb_availability(),
        busy in arb_busy(),
        tz in arb_timezone(),
        duration in 1u32..=240,
    ) {
        let kept = resolve(&candidates, duration, &availability, &busy, tz).unwrap();
        prop_assert!(kept.len() <= candidates.len());
        prop_assert!(is_subsequence(&kept, &candidates));
    }
}

// ---------------------------------------------------------------------------
// Property 2: Resolution is idempotent
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn resolution_is_idempotent(
        candidates in arb_candidates(),
        availability in arb_availability(),
        busy in arb_busy(),
        tz in arb_timezone(),
        duration in 1u32..=240,
    ) {
        let first = resolve(&candidates, duration, &availability, &busy, tz).unwrap();
        let second = resolve(&candidates, duration, &availability, &busy, tz).unwrap();
        prop_assert_eq!(&first, &second);

        // Filtering the survivors again changes nothing.
        let again = resolve(&first, duration, &availability, &busy, tz).unwrap();
        prop_assert_eq!(first, again);
    }
}

// ---------------------------------------------------------------------------
// Property 3: No kept candidate overlaps busy time
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn kept_candidates_never_overlap_busy_time(
        candidates in arb_candidates(),
        availability in arb_availability(),
        busy in arb_busy(),
        tz in arb_timezone(),
        duration in 1u32..=240,
    ) {
        let kept = resolve(&candidates, duration, &availability, &busy, tz).unwrap();
        for t in kept {
            let end = t + Duration::minutes(i64::from(duration));
            for b in &busy {
                prop_assert!(
                    !(b.start < end && t < b.end),
                    "{} overlaps busy {:?}",
                    t,
                    b
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 4: Empty availability keeps nothing; empty candidates return nothing
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn no_windows_means_no_slots(
        candidates in arb_candidates(),
        busy in arb_busy(),
        tz in arb_timezone(),
    ) {
        let kept = resolve(&candidates, 30, &WeeklyAvailability::default(), &busy, tz).unwrap();
        prop_assert!(kept.is_empty());
    }

    #[test]
    fn empty_candidates_return_empty(
        availability in arb_availability(),
        busy in arb_busy(),
        tz in arb_timezone(),
    ) {
        let candidates: Vec<DateTime<Utc>> = Vec::new();
        let kept = resolve(&candidates, 30, &availability, &busy, tz).unwrap();
        prop_assert!(kept.is_empty());
    }
}

// ---------------------------------------------------------------------------
// Property 5: Removing busy time never removes a slot
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn busy_time_only_removes_slots(
        candidates in arb_candidates(),
        availability in arb_availability(),
        busy in arb_busy(),
        tz in arb_timezone(),
        duration in 1u32..=240,
    ) {
        let with_busy = resolve(&candidates, duration, &availability, &busy, tz).unwrap();
        let without_busy = resolve(&candidates, duration, &availability, &[], tz).unwrap();
        prop_assert!(is_subsequence(&with_busy, &without_busy));
    }
}
