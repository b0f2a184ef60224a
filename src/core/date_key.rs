//! Story-date parser.
//!
//! Story dates are free text. Three shapes carry chronological meaning and are
//! turned into an integer sort key (larger = later); everything else collapses
//! to `0` and therefore sorts first.
//!
//! | shape                          | key                        |
//! |--------------------------------|----------------------------|
//! | `Year Y, Month M, Day D`       | `Y * 10000 + M * 100 + D`  |
//! | `Year Y, Day D`                | `Y * 10000 + D`            |
//! | `Day D`                        | `D`                        |
//! | anything else, e.g. `No Date`  | `0`                        |

use regex::Regex;
use std::sync::LazyLock;

static YEAR_MONTH_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\byear\s+(\d+)\s*,\s*month\s+(\d+)\s*,\s*day\s+(\d+)")
        .expect("static regex")
});

static YEAR_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\byear\s+(\d+)\s*,\s*day\s+(\d+)").expect("static regex")
});

static DAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bday\s+(\d+)").expect("static regex"));

/// Which of the recognised shapes a date string matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateShape {
    YearMonthDay { year: u64, month: u64, day: u64 },
    YearDay { year: u64, day: u64 },
    Day { day: u64 },
    Unparsed,
}

impl DateShape {
    pub fn key(&self) -> u64 {
        let key = match *self {
            DateShape::YearMonthDay { year, month, day } => year
                .checked_mul(10_000)
                .and_then(|k| month.checked_mul(100).and_then(|m| k.checked_add(m)))
                .and_then(|k| k.checked_add(day)),
            DateShape::YearDay { year, day } => {
                year.checked_mul(10_000).and_then(|k| k.checked_add(day))
            }
            DateShape::Day { day } => Some(day),
            DateShape::Unparsed => Some(0),
        };
        key.unwrap_or(0)
    }
}

fn number(caps: &regex::Captures<'_>, idx: usize) -> Option<u64> {
    caps.get(idx)?.as_str().parse().ok()
}

/// Classify a date string, first matching shape wins.
pub fn classify(date: &str) -> DateShape {
    if let Some(c) = YEAR_MONTH_DAY.captures(date) {
        return match (number(&c, 1), number(&c, 2), number(&c, 3)) {
            (Some(year), Some(month), Some(day)) => DateShape::YearMonthDay { year, month, day },
            _ => DateShape::Unparsed,
        };
    }

    if let Some(c) = YEAR_DAY.captures(date) {
        return match (number(&c, 1), number(&c, 2)) {
            (Some(year), Some(day)) => DateShape::YearDay { year, day },
            _ => DateShape::Unparsed,
        };
    }

    if let Some(c) = DAY.captures(date) {
        return match number(&c, 1) {
            Some(day) => DateShape::Day { day },
            None => DateShape::Unparsed,
        };
    }

    DateShape::Unparsed
}

/// Sort key of a story date. Unparseable input (or a number too large for
/// `u64`) silently yields `0`.
pub fn parse_date_key(date: &str) -> u64 {
    classify(date).key()
}
