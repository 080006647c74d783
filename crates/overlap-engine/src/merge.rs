//! Collapse one participant's declared ranges into a merged interval set.
//!
//! Sorts by start time and sweeps left to right. Ranges that overlap OR touch
//! (`next.start == current.end`) are merged into one.

use crate::interval::Interval;
use crate::schedule::Availability;

/// Merge overlapping or adjacent intervals.
///
/// Returns a sorted, pairwise-disjoint, non-touching list. Empty intervals in
/// the input are dropped.
pub fn merge_intervals(intervals: impl IntoIterator<Item = Interval>) -> Vec<Interval> {
    let mut sorted: Vec<Interval> = intervals.into_iter().filter(|i| !i.is_empty()).collect();
    if sorted.is_empty() {
        return Vec::new();
    }

    sorted.sort_by_key(|i| (i.start, i.end));

    let mut merged: Vec<Interval> = Vec::with_capacity(sorted.len());
    for interval in sorted {
        if let Some(last) = merged.last_mut() {
            if interval.start <= last.end {
                last.end = last.end.max(interval.end);
                continue;
            }
        }
        merged.push(interval);
    }

    merged
}

/// Normalize and merge one participant's entries for a single day.
///
/// Entries whose absolute range is empty (only possible for snapshots that
/// bypassed submission checks) contribute nothing.
pub fn merge_participant<'a>(entries: impl IntoIterator<Item = &'a Availability>) -> Vec<Interval> {
    merge_intervals(entries.into_iter().filter_map(Availability::absolute_interval))
}
