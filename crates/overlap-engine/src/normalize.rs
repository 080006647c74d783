//! Local wall-clock ranges → absolute UTC intervals.
//!
//! Conversion goes through the `chrono-tz` rule tables for the specific date,
//! so DST transitions are honoured rather than assuming a fixed offset.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::dst::DstPolicy;
use crate::error::{OverlapError, Result};
use crate::interval::Interval;
use crate::zones::parse_timezone;

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| OverlapError::InvalidDate(s.to_string()))
}

/// Parse an `HH:MM` wall-clock time. `HH:MM:SS` is accepted as well; the
/// seconds are dropped, since availability is kept at minute resolution.
pub fn parse_time(s: &str) -> Result<NaiveTime> {
    let s_trim = s.trim();
    NaiveTime::parse_from_str(s_trim, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s_trim, "%H:%M:%S"))
        .ok()
        .and_then(|t| NaiveTime::from_hms_opt(t.hour(), t.minute(), 0))
        .ok_or_else(|| OverlapError::InvalidTime(s.to_string()))
}

/// Convert a local `date`+`time` in `tz` to an absolute instant.
///
/// Ambiguous times resolve to the earliest instant. Times inside a DST gap are
/// handled according to `policy`.
///
/// # Errors
/// Returns `OverlapError::NonexistentLocalTime` for gap times under
/// [`DstPolicy::Reject`].
pub fn resolve_local(
    tz: Tz,
    date: NaiveDate,
    time: NaiveTime,
    policy: DstPolicy,
) -> Result<DateTime<Utc>> {
    let local = date.and_time(time);
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => match policy {
            DstPolicy::Reject => Err(OverlapError::NonexistentLocalTime {
                date,
                time,
                timezone: tz.name().to_string(),
            }),
            DstPolicy::ShiftForward => Ok(shift_past_gap(tz, local)),
        },
    }
}

/// Like [`resolve_local`] with [`DstPolicy::ShiftForward`], which never fails.
pub(crate) fn resolve_local_lenient(tz: Tz, date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    let local = date.and_time(time);
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => shift_past_gap(tz, local),
    }
}

/// Read a gap time with the offset in effect before the transition.
fn shift_past_gap(tz: Tz, local: NaiveDateTime) -> DateTime<Utc> {
    // A day earlier is safely before the gap; zones do not transition twice a day.
    let before = tz
        .offset_from_utc_datetime(&(local - Duration::days(1)))
        .fix();
    (local - Duration::seconds(i64::from(before.local_minus_utc()))).and_utc()
}

/// Normalize one declared local range into an absolute interval.
///
/// # Errors
/// - `OverlapError::EmptyRange` if `end <= start` on the wall clock, or if the
///   converted instants are not strictly ordered (a gap shift can cause this).
/// - `OverlapError::NonexistentLocalTime` under [`DstPolicy::Reject`].
pub fn normalize(
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
    tz: Tz,
    policy: DstPolicy,
) -> Result<Interval> {
    if end <= start {
        return Err(OverlapError::EmptyRange { date, start, end });
    }

    let abs_start = resolve_local(tz, date, start, policy)?;
    let abs_end = resolve_local(tz, date, end, policy)?;
    if abs_end <= abs_start {
        return Err(OverlapError::EmptyRange { date, start, end });
    }

    Ok(Interval::new(abs_start, abs_end))
}

/// String-level boundary for [`normalize`]: parses every field first.
///
/// # Errors
/// Returns `InvalidDate`, `InvalidTime` or `InvalidTimezone` for malformed
/// input, then anything [`normalize`] returns.
pub fn normalize_str(
    date: &str,
    start: &str,
    end: &str,
    timezone: &str,
    policy: DstPolicy,
) -> Result<Interval> {
    let tz = parse_timezone(timezone)?;
    let date = parse_date(date)?;
    let start = parse_time(start)?;
    let end = parse_time(end)?;
    normalize(date, start, end, tz, policy)
}
