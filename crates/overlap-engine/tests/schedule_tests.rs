//! Tests for the Schedule aggregate: submissions, replacement, common windows.

use chrono::{NaiveDate, TimeZone, Utc};
use overlap_engine::report::{format_windows, summarize};
use overlap_engine::{
    create_schedule, find_common_windows, submit_availability, Interval, OverlapError, Schedule,
    SchedulerConfig, Submission, SubmissionPolicy,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn submit(schedule: &Schedule, user: &str, tz: &str, day: &str, start: &str, end: &str) -> Schedule {
    submit_availability(
        schedule,
        &Submission::new(user, tz, day, start, end),
        &SchedulerConfig::default(),
    )
    .unwrap()
}

fn utc_iv(day: u32, sh: u32, eh: u32) -> Interval {
    Interval::new(
        Utc.with_ymd_and_hms(2024, 3, day, sh, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 3, day, eh, 0, 0).unwrap(),
    )
}

// ── Cross-timezone scenarios ────────────────────────────────────────────────

#[test]
fn new_york_and_london_on_us_spring_forward_day() {
    // New York is on EDT (UTC-4) but London is still on GMT (UTC+0), a 4h gap.
    let s = create_schedule("Sync");
    let s = submit(&s, "Alice", "America/New_York", "2024-03-10", "09:00", "12:00");
    let s = submit(&s, "Bob", "Europe/London", "2024-03-10", "13:00", "16:00");

    let windows = find_common_windows(&s, date("2024-03-10"));
    assert_eq!(windows, vec![utc_iv(10, 13, 16)]);
    assert_eq!(format_windows(&windows), "13:00-16:00 UTC");
}

#[test]
fn same_pair_a_week_earlier_uses_five_hour_gap() {
    // 2024-03-03: New York is still on EST (UTC-5).
    let s = create_schedule("Sync");
    let s = submit(&s, "Alice", "America/New_York", "2024-03-03", "09:00", "12:00");
    let s = submit(&s, "Bob", "Europe/London", "2024-03-03", "13:00", "16:00");

    assert_eq!(
        find_common_windows(&s, date("2024-03-03")),
        vec![utc_iv(3, 14, 16)]
    );
}

#[test]
fn three_zones_one_window() {
    // 2024-03-20: Tokyo UTC+9, Berlin UTC+1, New York UTC-4.
    let s = create_schedule("Global");
    let s = submit(&s, "Aiko", "Asia/Tokyo", "2024-03-20", "20:00", "23:00"); // 11Z-14Z
    let s = submit(&s, "Ben", "Europe/Berlin", "2024-03-20", "13:00", "18:00"); // 12Z-17Z
    let s = submit(&s, "Cal", "America/New_York", "2024-03-20", "09:00", "11:00"); // 13Z-15Z

    assert_eq!(
        find_common_windows(&s, date("2024-03-20")),
        vec![utc_iv(20, 13, 14)]
    );
}

// ── Participant counts ──────────────────────────────────────────────────────

#[test]
fn empty_schedule_has_no_windows() {
    let s = create_schedule("Empty");
    assert!(find_common_windows(&s, date("2024-03-10")).is_empty());
}

#[test]
fn single_participant_has_no_windows() {
    let s = create_schedule("Solo");
    let s = submit(&s, "Alice", "UTC", "2024-03-10", "09:00", "17:00");
    assert!(find_common_windows(&s, date("2024-03-10")).is_empty());
}

#[test]
fn other_dates_are_ignored() {
    let s = create_schedule("Split");
    let s = submit(&s, "Alice", "UTC", "2024-03-10", "09:00", "17:00");
    let s = submit(&s, "Bob", "UTC", "2024-03-11", "09:00", "17:00");
    assert!(find_common_windows(&s, date("2024-03-10")).is_empty());
    assert!(find_common_windows(&s, date("2024-03-11")).is_empty());
}

// ── Submission semantics ────────────────────────────────────────────────────

#[test]
fn resubmission_replaces_same_user_same_date() {
    let s = create_schedule("Replace");
    let s = submit(&s, "Alice", "UTC", "2024-03-10", "09:00", "12:00");
    let s = submit(&s, "Alice", "UTC", "2024-03-10", "14:00", "18:00");

    let entries: Vec<_> = s.entries_for("Alice", date("2024-03-10")).collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].local_range(), "14:00-18:00");

    let s = submit(&s, "Bob", "UTC", "2024-03-10", "08:00", "20:00");
    assert_eq!(
        find_common_windows(&s, date("2024-03-10")),
        vec![utc_iv(10, 14, 18)]
    );
}

#[test]
fn resubmission_keeps_other_dates_and_users() {
    let s = create_schedule("Replace");
    let s = submit(&s, "Alice", "UTC", "2024-03-10", "09:00", "12:00");
    let s = submit(&s, "Alice", "UTC", "2024-03-11", "09:00", "12:00");
    let s = submit(&s, "Bob", "UTC", "2024-03-10", "09:00", "12:00");
    let s = submit(&s, "Alice", "UTC", "2024-03-10", "13:00", "14:00");

    assert_eq!(s.availabilities.len(), 3);
    assert_eq!(s.entries_for("Alice", date("2024-03-11")).count(), 1);
    assert_eq!(s.entries_for("Bob", date("2024-03-10")).count(), 1);
}

#[test]
fn accumulate_policy_keeps_every_range() {
    let config = SchedulerConfig {
        submission_policy: SubmissionPolicy::Accumulate,
        ..SchedulerConfig::default()
    };
    let s = create_schedule("Accumulate");
    let s = submit_availability(
        &s,
        &Submission::new("Alice", "UTC", "2024-03-10", "09:00", "12:00"),
        &config,
    )
    .unwrap();
    let s = submit_availability(
        &s,
        &Submission::new("Alice", "UTC", "2024-03-10", "14:00", "18:00"),
        &config,
    )
    .unwrap();
    let s = submit(&s, "Bob", "UTC", "2024-03-10", "08:00", "20:00");

    assert_eq!(
        find_common_windows(&s, date("2024-03-10")),
        vec![utc_iv(10, 9, 12), utc_iv(10, 14, 18)]
    );
}

#[test]
fn user_names_are_trimmed_and_matched_exactly() {
    let s = create_schedule("Names");
    let s = submit(&s, "  Alice ", "UTC", "2024-03-10", "09:00", "12:00");
    let s = submit(&s, "Alice", "UTC", "2024-03-10", "10:00", "11:00");
    let s = submit(&s, "alice", "UTC", "2024-03-10", "09:00", "12:00");

    assert_eq!(s.participants_on(date("2024-03-10")), vec!["Alice", "alice"]);
    assert_eq!(
        find_common_windows(&s, date("2024-03-10")),
        vec![utc_iv(10, 10, 11)]
    );
}

#[test]
fn failed_submission_leaves_schedule_untouched() {
    let s = create_schedule("Atomic");
    let s = submit(&s, "Alice", "UTC", "2024-03-10", "09:00", "12:00");
    let before = s.clone();

    let err = submit_availability(
        &s,
        &Submission::new("Alice", "UTC", "2024-03-10", "15:00", "14:00"),
        &SchedulerConfig::default(),
    )
    .unwrap_err();

    assert!(matches!(err, OverlapError::EmptyRange { .. }));
    assert_eq!(s, before);
}

#[test]
fn blank_user_rejected() {
    let s = create_schedule("Anon");
    let err = submit_availability(
        &s,
        &Submission::new("   ", "UTC", "2024-03-10", "09:00", "12:00"),
        &SchedulerConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, OverlapError::EmptyUser));
}

// ── Summaries ───────────────────────────────────────────────────────────────

#[test]
fn summary_lists_dates_participants_and_common_windows() {
    let s = create_schedule("Summary");
    let s = submit(&s, "Bob", "Europe/London", "2024-03-11", "10:00", "11:00");
    let s = submit(&s, "Alice", "America/New_York", "2024-03-10", "09:00", "12:00");
    let s = submit(&s, "Bob", "Europe/London", "2024-03-10", "13:00", "16:00");

    let days = summarize(&s);
    assert_eq!(days.len(), 2);
    assert_eq!(days[0].date, date("2024-03-10"));
    assert_eq!(days[1].date, date("2024-03-11"));

    let first = &days[0];
    assert_eq!(first.participants.len(), 2);
    assert_eq!(first.participants[0].user, "Alice");
    assert_eq!(first.participants[0].timezone, "America/New_York");
    assert_eq!(first.participants[0].ranges, vec!["09:00-12:00"]);
    assert_eq!(first.common_label().as_deref(), Some("13:00-16:00 UTC"));

    assert!(days[1].common.is_empty());
    assert_eq!(days[1].common_label(), None);
}
