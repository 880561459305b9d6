//! Lenient calendar-date parsing and year-month buckets for trend aggregation.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fmt;

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d.%m.%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%d %b %Y",
    "%d %B %Y",
    "%m/%d/%y",
    "%m-%d-%y",
    "%d.%m.%y",
    "%b %d, %y",
    "%d %b %y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%y %H:%M",
];

/// chrono's `%Y` happily reads "24" as year 24; a `%Y` layout only counts
/// when the text actually carries the year as a four-digit run.
fn year_written_in_full(text: &str, fmt: &str, date: NaiveDate) -> bool {
    if !fmt.contains("%Y") {
        return true;
    }
    let year = format!("{:04}", date.year());
    text.split(|c: char| !c.is_ascii_digit()).any(|run| run == year)
}

/// Parse free-form date text. `None` means the row has no usable date.
///
/// Two-digit years follow chrono's `%y` pivot: 00-68 land in the 2000s,
/// 69-99 in the 1900s.
pub fn parse_calendar_date(text: &str) -> Option<NaiveDate> {
    let s = text.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            if year_written_in_full(s, fmt, d) {
                return Some(d);
            }
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            if year_written_in_full(s, fmt, dt.date()) {
                return Some(dt.date());
            }
        }
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

/// Calendar-month bucket; orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl From<YearMonth> for String {
    fn from(ym: YearMonth) -> Self {
        ym.to_string()
    }
}
