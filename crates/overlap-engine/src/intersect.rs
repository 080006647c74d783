//! Intersect merged interval sets across participants.
//!
//! Each candidate window from the first participant is narrowed against every
//! other participant in turn. When a candidate overlaps several intervals of a
//! participant, all overlapping pieces survive, so the result is exactly the
//! N-way intersection of the interval sets: order of participants does not
//! matter and pairwise grouping does not matter.

use crate::interval::Interval;

/// Intersect two merged interval sets (sorted, pairwise-disjoint).
///
/// Runs a two-pointer sweep in `O(a + b)`. Touching intervals do not
/// intersect.
pub fn intersect_pair(a: &[Interval], b: &[Interval]) -> Vec<Interval> {
    let mut out = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        if let Some(shared) = a[i].overlap(&b[j]) {
            out.push(shared);
        }
        // Advance whichever interval finishes first; it cannot overlap anything further.
        if a[i].end <= b[j].end {
            i += 1;
        } else {
            j += 1;
        }
    }

    out
}

/// Intersect any number of merged interval sets by folding [`intersect_pair`].
///
/// An empty input yields an empty result.
pub fn intersect_all(sets: &[Vec<Interval>]) -> Vec<Interval> {
    let Some((first, rest)) = sets.split_first() else {
        return Vec::new();
    };
    rest.iter()
        .fold(first.clone(), |acc, set| intersect_pair(&acc, set))
}

/// Windows during which every participant is available.
///
/// `participants` holds one merged interval set per distinct participant.
/// With fewer than two participants there is no common time to speak of and
/// the result is empty. Absence of overlap is an empty result, never an error.
pub fn common_windows(participants: &[Vec<Interval>]) -> Vec<Interval> {
    if participants.len() < 2 {
        return Vec::new();
    }

    let (seed, others) = (&participants[0], &participants[1..]);
    let mut windows = Vec::new();

    for candidate in seed {
        let mut pieces = vec![*candidate];
        for intervals in others {
            pieces = intersect_pair(&pieces, intervals);
            if pieces.is_empty() {
                break;
            }
        }
        windows.extend(pieces);
    }

    windows
}
