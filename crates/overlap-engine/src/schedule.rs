//! The `Schedule` aggregate and its operations.
//!
//! A schedule is a plain value: every operation takes the current snapshot and
//! returns a new one, so a failed submission leaves the caller's copy intact.

use chrono::{NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::config::{SchedulerConfig, SubmissionPolicy};
use crate::error::{OverlapError, Result};
use crate::intersect::common_windows;
use crate::interval::Interval;
use crate::merge::merge_participant;
use crate::normalize::{normalize, parse_date, parse_time, resolve_local_lenient};
use crate::zones::{parse_timezone, serde_tz};

/// One block of time a participant says they can meet, in their local zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub id: String,
    pub user: String,
    #[serde(with = "serde_tz")]
    pub timezone: Tz,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

impl Availability {
    /// The absolute interval this entry covers, or `None` if it covers no time.
    ///
    /// Gap times shift forward; submission has already applied the configured
    /// DST policy to anything created through [`submit_availability`].
    pub fn absolute_interval(&self) -> Option<Interval> {
        let interval = Interval::new(
            resolve_local_lenient(self.timezone, self.date, self.start),
            resolve_local_lenient(self.timezone, self.date, self.end),
        );
        (!interval.is_empty()).then_some(interval)
    }

    /// Local range as `HH:MM-HH:MM`.
    pub fn local_range(&self) -> String {
        format!("{}-{}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

/// One meeting-finding session, shared by its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: String,
    pub name: String,
    pub availabilities: Vec<Availability>,
}

impl Schedule {
    /// Distinct dates that have at least one entry, ascending.
    pub fn dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.availabilities.iter().map(|a| a.date).collect();
        dates.sort_unstable();
        dates.dedup();
        dates
    }

    /// Distinct users with entries on `date`, in order of first appearance.
    pub fn participants_on(&self, date: NaiveDate) -> Vec<&str> {
        let mut users: Vec<&str> = Vec::new();
        for a in self.availabilities.iter().filter(|a| a.date == date) {
            if !users.contains(&a.user.as_str()) {
                users.push(&a.user);
            }
        }
        users
    }

    pub fn entries_for<'a>(
        &'a self,
        user: &'a str,
        date: NaiveDate,
    ) -> impl Iterator<Item = &'a Availability> + 'a {
        self.availabilities
            .iter()
            .filter(move |a| a.user == user && a.date == date)
    }
}

/// Raw, unvalidated input for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub user: String,
    pub timezone: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub start: String,
    /// `HH:MM`
    pub end: String,
}

impl Submission {
    pub fn new(
        user: impl Into<String>,
        timezone: impl Into<String>,
        date: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self {
            user: user.into(),
            timezone: timezone.into(),
            date: date.into(),
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Name given to schedules created without one, e.g. `"Meeting Mar 10"`.
pub fn default_schedule_name(today: NaiveDate) -> String {
    format!("Meeting {}", today.format("%b %d"))
}

/// Create an empty schedule with a fresh id.
///
/// A blank `name` falls back to [`default_schedule_name`] for today (UTC).
pub fn create_schedule(name: &str) -> Schedule {
    let name = match name.trim() {
        "" => default_schedule_name(Utc::now().date_naive()),
        trimmed => trimmed.to_string(),
    };
    let schedule = Schedule {
        id: Uuid::new_v4().to_string(),
        name,
        availabilities: Vec::new(),
    };
    debug!(id = %schedule.id, name = %schedule.name, "created schedule");
    schedule
}

/// Rename a schedule. A blank name keeps the current one.
pub fn rename_schedule(schedule: &Schedule, name: &str) -> Schedule {
    let mut updated = schedule.clone();
    let trimmed = name.trim();
    if !trimmed.is_empty() {
        updated.name = trimmed.to_string();
    }
    updated
}

/// Validate `submission` and return the schedule with it applied.
///
/// Under [`SubmissionPolicy::ReplaceUserDay`] every earlier entry for the same
/// `(user, date)` is dropped first. The user name is trimmed.
///
/// # Errors
/// - `OverlapError::EmptyUser` for a blank user name.
/// - `InvalidTimezone`, `InvalidDate`, `InvalidTime` for malformed fields.
/// - `EmptyRange` / `NonexistentLocalTime` from normalization.
pub fn submit_availability(
    schedule: &Schedule,
    submission: &Submission,
    config: &SchedulerConfig,
) -> Result<Schedule> {
    let user = submission.user.trim();
    if user.is_empty() {
        return Err(OverlapError::EmptyUser);
    }
    let timezone = parse_timezone(&submission.timezone)?;
    let date = parse_date(&submission.date)?;
    let start = parse_time(&submission.start)?;
    let end = parse_time(&submission.end)?;
    let interval = normalize(date, start, end, timezone, config.dst_policy)?;

    let mut updated = schedule.clone();
    if config.submission_policy == SubmissionPolicy::ReplaceUserDay {
        updated
            .availabilities
            .retain(|a| !(a.user == user && a.date == date));
    }
    updated.availabilities.push(Availability {
        id: Uuid::new_v4().to_string(),
        user: user.to_string(),
        timezone,
        date,
        start,
        end,
    });

    debug!(
        schedule = %schedule.id,
        user,
        %date,
        range = %interval,
        replaced = schedule.availabilities.len() + 1 - updated.availabilities.len(),
        "submitted availability"
    );
    Ok(updated)
}

/// Common-availability windows across every participant with entries on `date`.
///
/// Each user's entries are merged (touching ranges join), then the merged sets
/// are intersected. Fewer than two participants yields an empty list.
pub fn find_common_windows(schedule: &Schedule, date: NaiveDate) -> Vec<Interval> {
    let per_user: Vec<Vec<Interval>> = schedule
        .participants_on(date)
        .into_iter()
        .map(|user| merge_participant(schedule.entries_for(user, date)))
        .collect();

    let windows = common_windows(&per_user);
    debug!(
        schedule = %schedule.id,
        %date,
        participants = per_user.len(),
        windows = windows.len(),
        "computed common windows"
    );
    windows
}

/// Serde adapter storing a [`NaiveTime`] as `HH:MM`, or `HH:MM:SS` when it
/// carries seconds.
mod hhmm {
    use chrono::{NaiveTime, Timelike};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        if time.second() == 0 {
            serializer.collect_str(&time.format("%H:%M"))
        } else {
            serializer.collect_str(&time.format("%H:%M:%S"))
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let raw = raw.trim();
        NaiveTime::parse_from_str(raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
            .map_err(|_| de::Error::custom(format!("Invalid time: {}", raw)))
    }
}
