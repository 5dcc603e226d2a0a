//! Date and time interpretation of numeric cells in the 1900 date system.

use crate::literal::float_text;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::fmt;

const SECONDS_PER_DAY: f64 = 86_400.0;
const MICROS_PER_DAY: i64 = 86_400_000_000;

#[derive(Debug, Clone, PartialEq)]
pub enum DateValue {
    DateTime(NaiveDateTime),
    Time(NaiveTime),
    Interval { seconds: f64 },
}

impl DateValue {
    /// Constructor-call form, e.g. `datetime.datetime(2023, 3, 15, 0, 0)`.
    pub fn repr(&self) -> String {
        match self {
            DateValue::DateTime(dt) => format!(
                "datetime.datetime({}, {}, {}, {})",
                dt.year(),
                dt.month(),
                dt.day(),
                clock_args(dt.hour(), dt.minute(), dt.second())
            ),
            DateValue::Time(t) => format!(
                "datetime.time({})",
                clock_args(t.hour(), t.minute(), t.second())
            ),
            DateValue::Interval { seconds } => {
                let (days, secs, micros) = split_interval(*seconds);
                let mut parts = Vec::new();
                if days != 0 {
                    parts.push(format!("days={days}"));
                }
                if secs != 0 {
                    parts.push(format!("seconds={secs}"));
                }
                if micros != 0 {
                    parts.push(format!("microseconds={micros}"));
                }
                if parts.is_empty() {
                    "datetime.timedelta(0)".to_string()
                } else {
                    format!("datetime.timedelta({})", parts.join(", "))
                }
            }
        }
    }

    /// Line used by the detail dump, e.g. `Value as Date: 2023-03-15T00:00:00`.
    pub fn detail_line(&self) -> String {
        match self {
            DateValue::DateTime(dt) => {
                format!("Value as Date: {}", dt.format("%Y-%m-%dT%H:%M:%S"))
            }
            DateValue::Time(t) => format!("Value as Date: {}", t.format("%H:%M:%S")),
            DateValue::Interval { seconds } => {
                format!("Value as Time Interval: {} seconds", float_text(*seconds))
            }
        }
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            DateValue::Time(t) => write!(f, "{}", t.format("%H:%M:%S")),
            DateValue::Interval { seconds } => {
                let (days, secs, micros) = split_interval(*seconds);
                let mut clock =
                    format!("{}:{:02}:{:02}", secs / 3600, secs % 3600 / 60, secs % 60);
                if micros != 0 {
                    clock.push_str(&format!(".{micros:06}"));
                }
                match days {
                    0 => f.write_str(&clock),
                    1 | -1 => write!(f, "{days} day, {clock}"),
                    _ => write!(f, "{days} days, {clock}"),
                }
            }
        }
    }
}

fn clock_args(hour: u32, minute: u32, second: u32) -> String {
    if second == 0 {
        format!("{hour}, {minute}")
    } else {
        format!("{hour}, {minute}, {second}")
    }
}

/// Whole days (possibly negative), then non-negative seconds and microseconds.
fn split_interval(seconds: f64) -> (i64, i64, i64) {
    let total = (seconds * 1_000_000.0).round() as i64;
    let days = total.div_euclid(MICROS_PER_DAY);
    let rem = total.rem_euclid(MICROS_PER_DAY);
    (days, rem / 1_000_000, rem % 1_000_000)
}

/// Whether a number format code renders its value as a date, time, or duration.
///
/// Quoted literals, escaped characters, and bracketed sections other than
/// elapsed-time markers are ignored before looking for date/time tokens.
pub fn is_date_format(code: &str) -> bool {
    if is_interval_format(code) {
        return true;
    }
    let section = code.split(';').next().unwrap_or_default();
    let mut in_quotes = false;
    let mut in_brackets = false;
    let mut escaped = false;
    for ch in section.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '"' => in_quotes = !in_quotes,
            '[' if !in_quotes => in_brackets = true,
            ']' if !in_quotes => in_brackets = false,
            _ if in_quotes || in_brackets => {}
            'd' | 'D' | 'm' | 'M' | 'y' | 'Y' | 'h' | 'H' | 's' | 'S' => return true,
            _ => {}
        }
    }
    false
}

/// Elapsed-time formats such as `[h]:mm:ss`.
pub fn is_interval_format(code: &str) -> bool {
    let lower = code.to_ascii_lowercase();
    ["[h]", "[hh]", "[m]", "[mm]", "[s]", "[ss]"]
        .iter()
        .any(|marker| lower.contains(marker))
}

/// Interpret a serial number according to its number format.
///
/// Serial 60 is the fictitious 1900-02-29 and serials below it are shifted by one
/// day so that 1 is 1900-01-01.
pub fn from_serial(serial: f64, format_code: &str) -> Option<DateValue> {
    if !serial.is_finite() {
        return None;
    }
    if is_interval_format(format_code) {
        return Some(DateValue::Interval {
            seconds: (serial * SECONDS_PER_DAY * 1_000_000.0).round() / 1_000_000.0,
        });
    }
    if (0.0..1.0).contains(&serial) {
        let secs = (serial * SECONDS_PER_DAY).round() as u32;
        return NaiveTime::from_num_seconds_from_midnight_opt(secs % 86_400, 0)
            .map(DateValue::Time);
    }

    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let days = serial.trunc() as i64;
    let days = if days < 60 { days + 1 } else { days };
    let secs = (serial.fract() * SECONDS_PER_DAY).round() as i64;
    let value = epoch
        .checked_add_signed(Duration::try_days(days)?)?
        .checked_add_signed(Duration::try_seconds(secs)?)?;
    Some(DateValue::DateTime(value))
}
