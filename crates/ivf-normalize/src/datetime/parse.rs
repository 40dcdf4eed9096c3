//! Heuristic date/time parsing.
//!
//! Imported dates arrive in whatever format the source spreadsheet used, so
//! parsing guesses the layout from its shape, in this order:
//!
//! 1. Relative keywords: `now`, `today`, `midnight`, `tomorrow`, `yesterday`
//! 2. Unix timestamps written as `@1700000000`
//! 3. RFC 3339 / RFC 2822 instants (converted to UTC)
//! 4. Numeric dates, optionally followed by a time
//! 5. Dates with month names (`15-Jan-2024`, `January 15, 2024`, ...)
//!
//! The separator decides field order for numeric dates and this ambiguity
//! is deliberate:
//!
//! | Shape        | Read as           | Example      |
//! |--------------|-------------------|--------------|
//! | `Y-m-d`      | year, month, day  | `2018-12-05` |
//! | `d-m-Y`      | day, month, year  | `05-12-2018` is 5 December |
//! | `y-m-d`      | year, month, day  | `18-12-05`   |
//! | `m/d/Y`      | month, day, year  | `05/12/2018` is 12 May |
//! | `d.m.Y`      | day, month, year  | `05.12.2018` |
//!
//! There is no reliable way to tell whether `05-12-2018` meant 5 December or
//! 12 May; callers that care must pick a separator convention upstream.
//!
//! All results are naive UTC date-times. Date-only inputs resolve to
//! midnight.

use std::sync::LazyLock;

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

static YEAR_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})([-/.])(\d{1,2})([-/.])(\d{1,2})(.*)$").expect("valid year-first regex")
});

static YEAR_LAST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})([-/.])(\d{1,2})([-/.])(\d{4}|\d{2})(.*)$")
        .expect("valid year-last regex")
});

static COMPACT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})(\d{2})(\d{2})(.*)$").expect("valid compact date regex")
});

static TIME_TAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[Tt]|\s+)(\d{1,2}):(\d{2})(?::(\d{2})(?:[.,](\d{1,9}))?)?\s*(?:([aApP])\.?[mM]\.?)?$",
    )
    .expect("valid time regex")
});

/// `15-Jan-2024`, `15 January 2024`, `Mon, 15 Jan 2024`
static DAY_MONTH_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:([A-Za-z]+),?\s+)?(\d{1,2})(?:st|nd|rd|th)?([-\s])([A-Za-z]+)\.?([-\s])(\d{4}|\d{2})(.*)$",
    )
    .expect("valid day-month-year regex")
});

/// `Jan 15, 2024`, `January 15 2024`, `Monday, January 15, 2024`
static MONTH_DAY_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:([A-Za-z]+),?\s+)?([A-Za-z]+)\.?\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+(\d{4}|\d{2})(.*)$",
    )
    .expect("valid month-day-year regex")
});

/// `2024-Jan-15`
static YEAR_MONTH_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})-([A-Za-z]+)-(\d{1,2})(.*)$").expect("valid year-month-day regex")
});

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

const WEEKDAY_NAMES: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Parse an imported value into a date-time, relative to `now`.
///
/// Returns `None` when the value matches none of the supported shapes or
/// names an impossible calendar date (e.g. `2023-02-30`).
pub fn parse_datetime(value: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    parse_relative(trimmed, now)
        .or_else(|| parse_timestamp(trimmed))
        .or_else(|| parse_rfc(trimmed))
        .or_else(|| parse_numeric(trimmed))
        .or_else(|| parse_textual(trimmed))
}

fn parse_relative(value: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let today = now.date();
    let date = match value.to_ascii_lowercase().as_str() {
        "now" => return Some(now),
        "today" | "midnight" => today,
        "tomorrow" => today.checked_add_days(Days::new(1))?,
        "yesterday" => today.checked_sub_days(Days::new(1))?,
        _ => return None,
    };
    Some(date.and_time(NaiveTime::MIN))
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let seconds: i64 = value.strip_prefix('@')?.parse().ok()?;
    DateTime::from_timestamp(seconds, 0).map(|dt| dt.naive_utc())
}

fn parse_rfc(value: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_rfc2822(value))
        .ok()
        .map(|dt| dt.naive_utc())
}

fn parse_numeric(value: &str) -> Option<NaiveDateTime> {
    if let Some(caps) = YEAR_FIRST.captures(value) {
        if caps[2] != caps[4] {
            return None;
        }
        let date = ymd(&caps[1], &caps[3], &caps[5])?;
        return with_time(date, &caps[6]);
    }

    if let Some(caps) = YEAR_LAST.captures(value) {
        if caps[2] != caps[4] {
            return None;
        }
        let separator = &caps[2];
        let (first, second, last) = (&caps[1], &caps[3], &caps[5]);
        let two_digit_year = last.len() == 2;
        let date = match separator {
            // Two-digit years with dashes are ISO-like: yy-mm-dd.
            "-" if two_digit_year => ymd(&expand_year(first)?, second, last)?,
            "-" | "." => ymd(&expand_year(last)?, second, first)?,
            // Slash is the US order: m/d/y.
            _ => ymd(&expand_year(last)?, first, second)?,
        };
        return with_time(date, &caps[6]);
    }

    if let Some(caps) = COMPACT.captures(value) {
        let date = ymd(&caps[1], &caps[2], &caps[3])?;
        return with_time(date, &caps[4]);
    }

    None
}

fn parse_textual(value: &str) -> Option<NaiveDateTime> {
    if let Some(caps) = DAY_MONTH_YEAR.captures(value) {
        if caps[3] != caps[5] || !is_weekday(caps.get(1).map(|m| m.as_str())) {
            return None;
        }
        let date = named_ymd(&caps[6], &caps[4], &caps[2])?;
        return with_time(date, &caps[7]);
    }

    if let Some(caps) = MONTH_DAY_YEAR.captures(value) {
        if !is_weekday(caps.get(1).map(|m| m.as_str())) {
            return None;
        }
        let date = named_ymd(&caps[4], &caps[2], &caps[3])?;
        return with_time(date, &caps[5]);
    }

    if let Some(caps) = YEAR_MONTH_DAY.captures(value) {
        let date = named_ymd(&caps[1], &caps[2], &caps[3])?;
        return with_time(date, &caps[4]);
    }

    None
}

/// Full name or three-letter abbreviation (plus `sept`).
fn month_number(name: &str) -> Option<u32> {
    let name = name.to_ascii_lowercase();
    MONTH_NAMES
        .iter()
        .zip(1u32..)
        .find_map(|(full, number)| names_match(full, &name).then_some(number))
        .or_else(|| (name == "sept").then_some(9))
}

/// An absent weekday is fine; a present one must be a real weekday name.
fn is_weekday(name: Option<&str>) -> bool {
    name.is_none_or(|name| {
        let name = name.to_ascii_lowercase();
        WEEKDAY_NAMES.iter().any(|full| names_match(full, &name))
    })
}

fn names_match(full: &str, name: &str) -> bool {
    name == full || (name.len() == 3 && full.starts_with(name))
}

fn named_ymd(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(
        expand_year(year)?.parse().ok()?,
        month_number(month)?,
        day.parse().ok()?,
    )
}

/// Short years follow the 1970 pivot: `00`-`69` are 2000s, `70`-`99` 1900s.
fn expand_year(year: &str) -> Option<String> {
    if year.len() > 2 {
        return Some(year.to_string());
    }
    let short: i32 = year.parse().ok()?;
    let full = if short < 70 { 2000 + short } else { 1900 + short };
    Some(full.to_string())
}

fn ymd(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

/// Attach the trailing time (if any) to `date`.
fn with_time(date: NaiveDate, tail: &str) -> Option<NaiveDateTime> {
    if tail.is_empty() {
        return Some(date.and_time(NaiveTime::MIN));
    }
    let caps = TIME_TAIL.captures(tail)?;
    let mut hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps[2].parse().ok()?;
    let second: u32 = caps.get(3).map_or(Ok(0), |m| m.as_str().parse()).ok()?;
    let nanos = caps.get(4).map_or(Some(0), |m| fraction_to_nanos(m.as_str()))?;

    if let Some(meridiem) = caps.get(5) {
        if !(1..=12).contains(&hour) {
            return None;
        }
        let pm = meridiem.as_str().eq_ignore_ascii_case("p");
        hour = match (hour, pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, true) => h + 12,
            (h, false) => h,
        };
    }

    let time = NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)?;
    Some(date.and_time(time))
}

fn fraction_to_nanos(digits: &str) -> Option<u32> {
    let padded = format!("{digits:0<9}");
    padded.get(..9)?.parse().ok()
}
