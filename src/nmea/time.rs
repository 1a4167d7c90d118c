// src/nmea/time.rs
//! Fix time normalization to epoch seconds
//!
//! All paths fail soft: a value that cannot be resolved yields `None`, never
//! an error, so a bad time field degrades to "timestamp absent" instead of
//! rejecting an otherwise usable fix.

use chrono::{Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

/// Parse an NMEA `hhmmss[.sss]` time-of-day field. Fractional seconds are
/// discarded.
pub fn parse_hms(field: &str) -> Option<NaiveTime> {
    let bytes = field.as_bytes();
    if bytes.len() < 6 || !bytes[..6].iter().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hour: u32 = field[0..2].parse().ok()?;
    let minute: u32 = field[2..4].parse().ok()?;
    let second: u32 = field[4..6].parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, second)
}

/// Parse an NMEA `ddmmyy` date field. Two-digit years use the usual 69 pivot:
/// 00-68 map to 2000-2068, 69-99 to 1969-1999.
pub fn parse_ddmmyy(field: &str) -> Option<NaiveDate> {
    let bytes = field.as_bytes();
    if bytes.len() != 6 || !bytes.iter().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let day: u32 = field[0..2].parse().ok()?;
    let month: u32 = field[2..4].parse().ok()?;
    let yy: i32 = field[4..6].parse().ok()?;
    let year = if yy >= 69 { 1900 + yy } else { 2000 + yy };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Compose an epoch timestamp from a time-of-day using the current local
/// calendar date.
///
/// Inherited limitation: a fix received near local midnight can land on the
/// wrong calendar day, because the receiver's time-of-day is paired with
/// whatever date the local clock shows at normalization time. This is kept
/// as-is rather than corrected.
pub fn time_of_day_to_epoch(time: NaiveTime) -> Option<i64> {
    let today = Local::now().date_naive();
    resolve_local(today.and_time(time))
}

/// Compose an epoch timestamp from a calendar date and a time-of-day. When
/// either part is missing, falls back to the time-only path; with neither,
/// yields `None`.
pub fn date_time_to_epoch(date: Option<NaiveDate>, time: Option<NaiveTime>) -> Option<i64> {
    match (date, time) {
        (Some(d), Some(t)) => resolve_local(d.and_time(t)),
        (_, t) => t.and_then(time_of_day_to_epoch),
    }
}

fn resolve_local(dt: NaiveDateTime) -> Option<i64> {
    match Local.from_local_datetime(&dt) {
        LocalResult::Single(resolved) => Some(resolved.timestamp()),
        // DST fold: either instant is acceptable at this precision.
        LocalResult::Ambiguous(earliest, _) => Some(earliest.timestamp()),
        LocalResult::None => None,
    }
}
