// Utility helpers for parsing, rounding and number formatting.
//
// This module centralizes all the "dirty" spreadsheet number/date handling so
// the rest of the code can assume clean, typed values.
use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta};
use num_format::{Locale, ToFormattedString};

/// Parse a string-like value into `f64` while being forgiving about
/// formatting issues that are common in spreadsheet exports.
///
/// - Accepts `Option<&str>` so callers can pass through optional fields.
/// - Trims whitespace.
/// - Rejects values that contain alphabetic characters other than an
///   exponent marker, so `"1.2e3"` parses but `"nan"` and `"abc"` do not.
/// - Strips thousands separators like `","` before parsing.
/// - Returns `None` for anything that cannot be safely parsed.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s
        .chars()
        .any(|c| c.is_ascii_alphabetic() && !c.eq_ignore_ascii_case(&'e'))
    {
        return None;
    }
    let s = s.replace(",", "");
    s.parse::<f64>().ok()
}

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
];

// Tried in order; ISO first, then day-first.
const DAY_FIRST_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d/%m/%y",
    "%d-%m-%y",
    "%d.%m.%y",
    "%d %b %Y",
    "%d-%b-%Y",
    "%d %B %Y",
    "%d-%b-%y",
    "%b %d, %Y",
    "%B %d, %Y",
];

// Only reached when the input cannot be a day-first date, e.g. `12/31/2026`.
const MONTH_FIRST_FORMATS: &[&str] = &["%m/%d/%Y", "%m-%d-%Y", "%m/%d/%y"];

/// Parse a date (optionally with a time of day) using a day-first
/// convention, so `01/02/2026` is the 1st of February.
///
/// Date-only inputs resolve to midnight. Returns `None` for anything that
/// does not look like a date.
pub fn parse_date_dayfirst(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    // `%Y` happily reads "26" as year 26, so short years are left to `%y`.
    let plausible = |dt: &NaiveDateTime| dt.year() >= 1000;

    DATE_TIME_FORMATS
        .iter()
        .filter_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .find(plausible)
        .or_else(|| {
            DAY_FIRST_FORMATS
                .iter()
                .chain(MONTH_FIRST_FORMATS)
                .filter_map(|f| NaiveDate::parse_from_str(s, f).ok())
                .filter_map(|d| d.and_hms_opt(0, 0, 0))
                .find(plausible)
        })
}

/// Convert an Excel serial day number (1900 date system) into a timestamp.
///
/// Fractions of a day become the time of day. Negative and non-finite
/// serials are rejected.
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    // Day 0 sits on 1899-12-30 to absorb Excel's phantom 1900-02-29.
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round() as i64;
    epoch.checked_add_signed(TimeDelta::try_milliseconds(millis)?)
}

/// Whole days from `start` to `end`, floored like a calendar day count:
/// `-0.5` days is `-1`, `12.9` days is `12`.
pub fn days_between(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    let delta = end - start;
    let days = delta.num_days();
    match TimeDelta::try_days(days) {
        Some(whole) if delta < whole => days - 1,
        _ => days,
    }
}

/// Round to one decimal place, half-to-even on the exact binary value.
///
/// Goes through `{:.1}` so stored values agree with formatted labels:
/// `0.35` is really `0.34999...` and rounds to `0.3`.
pub fn round1(n: f64) -> f64 {
    format!("{:.1}", n).parse().unwrap_or(n)
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Format a floating-point value with:
    // - a fixed number of decimal places, and
    // - locale-aware thousands separators (e.g., `1,234,567.89`).
    let neg = n.is_sign_negative() && n != 0.0;
    let abs_n = n.abs();
    let s = format!("{:.*}", decimals, abs_n);
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        if decimals > 0 {
            res.push('.');
            res.push_str(frac);
        }
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Thin wrapper around `num-format` for integer-like values, used for
    // counts in console messages (e.g., `9,855 rows loaded`).
    n.to_formatted_string(&Locale::en)
}

/// Format a count that may have been summed as `f64`: whole values get
/// thousands separators only, fractional values keep two decimals.
pub fn format_count(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 9.0e15 {
        format_int(n as i64)
    } else {
        format_number(n, 2)
    }
}
