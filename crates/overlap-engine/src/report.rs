//! Per-day summaries of a schedule, ready for display.

use chrono::NaiveDate;
use serde::Serialize;

use crate::interval::Interval;
use crate::schedule::{find_common_windows, Schedule};

/// One participant's declared ranges on a day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipantDay {
    pub user: String,
    /// Timezone of the user's first entry that day.
    pub timezone: String,
    /// Local `HH:MM-HH:MM` ranges as declared.
    pub ranges: Vec<String>,
}

/// Everything known about one date of a schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub participants: Vec<ParticipantDay>,
    pub common: Vec<Interval>,
}

impl DaySummary {
    /// Common windows rendered for humans, e.g. `"13:00-16:00 UTC"`.
    pub fn common_label(&self) -> Option<String> {
        (!self.common.is_empty()).then(|| format_windows(&self.common))
    }
}

/// Summarize every date of `schedule`, ascending.
pub fn summarize(schedule: &Schedule) -> Vec<DaySummary> {
    schedule
        .dates()
        .into_iter()
        .map(|date| summarize_day(schedule, date))
        .collect()
}

pub fn summarize_day(schedule: &Schedule, date: NaiveDate) -> DaySummary {
    let participants = schedule
        .participants_on(date)
        .into_iter()
        .map(|user| {
            let entries: Vec<_> = schedule.entries_for(user, date).collect();
            ParticipantDay {
                user: user.to_string(),
                timezone: entries
                    .first()
                    .map(|a| a.timezone.name().to_string())
                    .unwrap_or_default(),
                ranges: entries.iter().map(|a| a.local_range()).collect(),
            }
        })
        .collect();

    DaySummary {
        date,
        participants,
        common: find_common_windows(schedule, date),
    }
}

/// Comma-separated UTC windows with a trailing zone label.
pub fn format_windows(windows: &[Interval]) -> String {
    let parts: Vec<String> = windows.iter().map(Interval::to_string).collect();
    format!("{} UTC", parts.join(", "))
}
