//! Timestamp normalizer.
//!
//! Each function turns one dialect's timestamp token into a UTC instant and
//! returns `None` when the token breaks the numeric sub-constraints of its
//! format (day 32, hour 25, an epoch outside chrono's range). Callers run
//! these only after a structural match and map `None` to
//! [`FormatMismatch`](crate::FormatMismatch).

use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, Utc};

/// `28/Feb/2006:12:00:00 -0500`, used by the printer, user-agent and
/// web-server dialects.
pub const OFFSET_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";

/// `2006/02/28 12:00:00`, the proxy cache log.
pub const CACHE_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Syslog header time (`Feb 28 12:00:00`, day zero- or space-padded).
///
/// The format has no year, so the caller supplies one. The clock is treated
/// as UTC.
pub fn from_syslog(month: &str, day: &str, time: &str, year: i32) -> Option<DateTime<Utc>> {
    let stamp = format!("{year} {month} {} {time}", day.trim_start());
    NaiveDateTime::parse_from_str(&stamp, "%Y %b %d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

/// A zone-less fixed format, assumed to already be UTC.
pub fn from_naive_utc(token: &str, format: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(token, format)
        .ok()
        .map(|naive| naive.and_utc())
}

/// A format carrying its own UTC offset, converted to UTC.
pub fn from_offset(token: &str, format: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_str(token, format)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Like [`from_offset`], but the local date is moved into `year` before the
/// offset is applied.
pub fn from_offset_in_year(token: &str, format: &str, year: i32) -> Option<DateTime<Utc>> {
    let local: DateTime<FixedOffset> = DateTime::parse_from_str(token, format).ok()?;
    local.with_year(year).map(|dt| dt.with_timezone(&Utc))
}

/// Unix epoch seconds with a fractional part (`1141124400.123`).
///
/// The fraction is read digit-exact up to nanoseconds rather than through a
/// float, so `.1` is 100ms and not 99.999...ms.
pub fn from_epoch(token: &str) -> Option<DateTime<Utc>> {
    let (secs, frac) = match token.split_once('.') {
        Some((secs, frac)) => (secs, frac),
        None => (token, ""),
    };
    let secs: i64 = secs.parse().ok()?;
    if !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let digits: String = frac.chars().chain(std::iter::repeat('0')).take(9).collect();
    let nanos: u32 = digits.parse().ok()?;
    DateTime::from_timestamp(secs, nanos)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
