//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::dst::DstPolicy;

/// What a new submission does to the same user's earlier entries on that date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionPolicy {
    /// Drop every earlier entry for the same `(user, date)` (last write wins).
    #[default]
    ReplaceUserDay,
    /// Keep earlier entries; a user may declare several ranges per day.
    Accumulate,
}

/// Knobs for [`submit_availability`](crate::schedule::submit_availability).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub dst_policy: DstPolicy,
    pub submission_policy: SubmissionPolicy,
}
