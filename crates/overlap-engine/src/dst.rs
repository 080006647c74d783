//! DST transition policies for local wall-clock times.

use serde::{Deserialize, Serialize};

/// Policy for local times that fall inside a spring-forward gap.
///
/// Ambiguous times (the repeated hour when clocks fall back) always resolve
/// to the earliest instant; this policy only covers times that never occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DstPolicy {
    /// Reject the time with `OverlapError::NonexistentLocalTime`.
    Reject,
    /// Read the time with the offset in effect before the gap, so 02:30 on a
    /// US spring-forward date lands on 03:30 daylight time.
    #[default]
    ShiftForward,
}
