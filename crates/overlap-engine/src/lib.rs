//! # overlap-engine
//!
//! Find the times when everyone can meet, across timezones.
//!
//! Participants declare local wall-clock ranges in their own IANA timezone. The
//! engine converts them to absolute instants with real DST rules via
//! `chrono-tz`, merges each participant's ranges, and intersects the merged sets
//! to produce the common-availability windows for a date.
//!
//! ## Modules
//!
//! - [`normalize`] — local `(date, start, end, timezone)` → absolute interval
//! - [`merge`] — one participant's ranges → sorted, disjoint interval set
//! - [`intersect`] — N interval sets → common windows
//! - [`schedule`] — the `Schedule` aggregate: create, submit, find windows
//! - [`report`] — per-day summaries for display
//! - [`snapshot`] — JSON snapshots, share tokens and links
//! - [`store`] — `ScheduleStore` trait with memory and file backends
//! - [`zones`] — IANA zone table and offset lookup
//! - [`dst`] — DST gap policy
//! - [`config`] — engine configuration
//! - [`error`] — Error types

pub mod config;
pub mod dst;
pub mod error;
pub mod intersect;
pub mod interval;
pub mod merge;
pub mod normalize;
pub mod report;
pub mod schedule;
pub mod snapshot;
pub mod store;
pub mod zones;

pub use config::{SchedulerConfig, SubmissionPolicy};
pub use dst::DstPolicy;
pub use error::OverlapError;
pub use intersect::{common_windows, intersect_all, intersect_pair};
pub use interval::Interval;
pub use merge::merge_intervals;
pub use normalize::normalize;
pub use schedule::{
    create_schedule, find_common_windows, rename_schedule, submit_availability, Availability,
    Schedule, Submission,
};
