//! Output formatting with PHP `date()` format letters.
//!
//! Configuration files written for the import filter express the output
//! format as PHP format letters (`Y-m-d`, `m/d/Y`, `F j, Y`, ...). Letters
//! with no meaning are copied through, and `\` escapes the next character.
//! Instants are UTC, so timezone letters always render the UTC forms.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

#[derive(Debug, Clone, PartialEq, Eq)]
enum FormatItem {
    Letter(char),
    Literal(char),
}

/// A compiled output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    spec: String,
    items: Vec<FormatItem>,
}

impl DateFormat {
    /// Compile a format specification. Every input is a valid format.
    pub fn new(spec: &str) -> Self {
        let mut items = Vec::with_capacity(spec.len());
        let mut chars = spec.chars();
        while let Some(ch) = chars.next() {
            if ch == '\\' {
                items.push(FormatItem::Literal(chars.next().unwrap_or('\\')));
            } else if is_format_letter(ch) {
                items.push(FormatItem::Letter(ch));
            } else {
                items.push(FormatItem::Literal(ch));
            }
        }
        Self {
            spec: spec.to_string(),
            items,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.spec
    }

    /// Render `dt` using this format.
    pub fn format(&self, dt: &NaiveDateTime) -> String {
        let mut out = String::with_capacity(self.spec.len() * 2);
        for item in &self.items {
            match item {
                FormatItem::Letter(letter) => out.push_str(&render_letter(*letter, dt)),
                FormatItem::Literal(ch) => out.push(*ch),
            }
        }
        out
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self::new("Y-m-d")
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.spec)
    }
}

fn is_format_letter(ch: char) -> bool {
    matches!(
        ch,
        'd' | 'D'
            | 'j'
            | 'l'
            | 'N'
            | 'S'
            | 'w'
            | 'z'
            | 'W'
            | 'F'
            | 'm'
            | 'M'
            | 'n'
            | 't'
            | 'L'
            | 'o'
            | 'Y'
            | 'y'
            | 'a'
            | 'A'
            | 'g'
            | 'G'
            | 'h'
            | 'H'
            | 'i'
            | 's'
            | 'u'
            | 'v'
            | 'e'
            | 'I'
            | 'O'
            | 'P'
            | 'p'
            | 'T'
            | 'Z'
            | 'c'
            | 'r'
            | 'U'
    )
}

fn render_letter(letter: char, dt: &NaiveDateTime) -> String {
    match letter {
        // Day
        'd' => format!("{:02}", dt.day()),
        'D' => dt.format("%a").to_string(),
        'j' => dt.day().to_string(),
        'l' => dt.format("%A").to_string(),
        'N' => dt.weekday().number_from_monday().to_string(),
        'S' => ordinal_suffix(dt.day()).to_string(),
        'w' => dt.weekday().num_days_from_sunday().to_string(),
        'z' => dt.ordinal0().to_string(),
        // Week
        'W' => format!("{:02}", dt.iso_week().week()),
        // Month
        'F' => dt.format("%B").to_string(),
        'm' => format!("{:02}", dt.month()),
        'M' => dt.format("%b").to_string(),
        'n' => dt.month().to_string(),
        't' => days_in_month(dt.year(), dt.month()).to_string(),
        // Year
        'L' => u8::from(days_in_month(dt.year(), 2) == 29).to_string(),
        'o' => dt.iso_week().year().to_string(),
        'Y' => format!("{:04}", dt.year()),
        'y' => format!("{:02}", dt.year().rem_euclid(100)),
        // Time
        'a' => String::from(if dt.hour() < 12 { "am" } else { "pm" }),
        'A' => String::from(if dt.hour() < 12 { "AM" } else { "PM" }),
        'g' => dt.hour12().1.to_string(),
        'G' => dt.hour().to_string(),
        'h' => format!("{:02}", dt.hour12().1),
        'H' => format!("{:02}", dt.hour()),
        'i' => format!("{:02}", dt.minute()),
        's' => format!("{:02}", dt.second()),
        'u' => format!("{:06}", dt.nanosecond() % 1_000_000_000 / 1_000),
        'v' => format!("{:03}", dt.nanosecond() % 1_000_000_000 / 1_000_000),
        // Timezone
        'e' | 'T' => "UTC".to_string(),
        'I' | 'Z' => "0".to_string(),
        'O' => "+0000".to_string(),
        'P' => "+00:00".to_string(),
        'p' => "Z".to_string(),
        // Full date/time
        'c' => dt.format("%Y-%m-%dT%H:%M:%S+00:00").to_string(),
        'r' => dt.format("%a, %d %b %Y %H:%M:%S +0000").to_string(),
        'U' => dt.and_utc().timestamp().to_string(),
        other => other.to_string(),
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map_or(31, |last| last.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 3)
            .unwrap()
            .and_hms_micro_opt(15, 4, 5, 123_456)
            .unwrap()
    }

    #[test]
    fn common_formats() {
        let dt = sample();
        assert_eq!(DateFormat::new("Y-m-d").format(&dt), "2024-02-03");
        assert_eq!(DateFormat::new("m/d/Y").format(&dt), "02/03/2024");
        assert_eq!(DateFormat::new("d.m.y").format(&dt), "03.02.24");
        assert_eq!(DateFormat::new("F j, Y").format(&dt), "February 3, 2024");
        assert_eq!(DateFormat::new("D, M jS").format(&dt), "Sat, Feb 3rd");
        assert_eq!(DateFormat::new("l").format(&dt), "Saturday");
    }

    #[test]
    fn time_letters() {
        let dt = sample();
        assert_eq!(DateFormat::new("H:i:s").format(&dt), "15:04:05");
        assert_eq!(DateFormat::new("g:i a").format(&dt), "3:04 pm");
        assert_eq!(DateFormat::new("h A").format(&dt), "03 PM");
        assert_eq!(DateFormat::new("G").format(&dt), "15");
        assert_eq!(DateFormat::new("u").format(&dt), "123456");
        assert_eq!(DateFormat::new("v").format(&dt), "123");
    }

    #[test]
    fn calendar_letters() {
        let dt = sample();
        assert_eq!(DateFormat::new("N w z").format(&dt), "6 6 33");
        assert_eq!(DateFormat::new("t L").format(&dt), "29 1");
        assert_eq!(DateFormat::new("W o").format(&dt), "05 2024");
    }

    #[test]
    fn full_forms_and_timestamp() {
        let dt = sample().with_nanosecond(0).unwrap();
        assert_eq!(DateFormat::new("c").format(&dt), "2024-02-03T15:04:05+00:00");
        assert_eq!(
            DateFormat::new("r").format(&dt),
            "Sat, 03 Feb 2024 15:04:05 +0000"
        );
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(DateFormat::new("U").format(&epoch), "86400");
    }

    #[test]
    fn escapes_and_literals() {
        let dt = sample();
        assert_eq!(DateFormat::new(r"\Y\e\a\r: Y").format(&dt), "Year: 2024");
        assert_eq!(DateFormat::new("Y_#_m").format(&dt), "2024_#_02");
        assert_eq!(DateFormat::new("").format(&dt), "");
    }

    #[test]
    fn ordinal_suffixes() {
        assert_eq!(ordinal_suffix(1), "st");
        assert_eq!(ordinal_suffix(2), "nd");
        assert_eq!(ordinal_suffix(3), "rd");
        assert_eq!(ordinal_suffix(4), "th");
        assert_eq!(ordinal_suffix(11), "th");
        assert_eq!(ordinal_suffix(12), "th");
        assert_eq!(ordinal_suffix(13), "th");
        assert_eq!(ordinal_suffix(21), "st");
        assert_eq!(ordinal_suffix(22), "nd");
        assert_eq!(ordinal_suffix(31), "st");
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 4), 30);
    }
}
