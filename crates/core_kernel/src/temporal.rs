//! Calendar types for budgets, schedules and reports
//!
//! - `YearMonth`: a calendar month, the unit of budgets and trend reports
//! - `DateRange`: an inclusive span of calendar dates

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid period: start {start} must not be after end {end}")]
    InvalidPeriod {
        start: String,
        end: String,
    },

    #[error("Invalid month: {0}")]
    InvalidMonth(u32),

    #[error("Year {0} is outside the supported calendar")]
    InvalidYear(i32),

    #[error("Cannot parse '{0}' as YYYY-MM")]
    Parse(String),
}

/// A calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a month, rejecting months outside 1..=12 and years chrono
    /// cannot represent
    pub fn new(year: i32, month: u32) -> Result<Self, TemporalError> {
        if !(1..=12).contains(&month) {
            return Err(TemporalError::InvalidMonth(month));
        }
        if !(NaiveDate::MIN.year()..=NaiveDate::MAX.year()).contains(&year) {
            return Err(TemporalError::InvalidYear(year));
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First calendar day of the month
    pub fn first_day(&self) -> NaiveDate {
        // Year and month are validated on construction, so day 1 exists.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Last calendar day of the month
    pub fn last_day(&self) -> NaiveDate {
        match self.next() {
            Some(next) => next.first_day().pred_opt().unwrap_or(NaiveDate::MAX),
            None => NaiveDate::MAX,
        }
    }

    /// The following month, `None` after the last supported month
    pub fn next(&self) -> Option<Self> {
        self.plus_months(1)
    }

    /// Adds `n` months, `None` past the last supported month
    pub fn plus_months(&self, n: u32) -> Option<Self> {
        Self::from_index(self.index() + i64::from(n))
    }

    /// Number of months from `self` to `other` (negative when `other` is earlier)
    pub fn months_between(&self, other: &YearMonth) -> i64 {
        other.index() - self.index()
    }

    /// Iterates every month from `self` through `end`, inclusive
    pub fn months_until(&self, end: YearMonth) -> impl Iterator<Item = YearMonth> {
        let start = self.index();
        let end = end.index();
        (start..=end).filter_map(Self::from_index)
    }

    /// Returns true if the date falls in this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    fn index(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month - 1)
    }

    fn from_index(index: i64) -> Option<Self> {
        let year = i32::try_from(index.div_euclid(12)).ok()?;
        let month = u32::try_from(index.rem_euclid(12)).ok()? + 1;
        Self::new(year, month).ok()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| TemporalError::Parse(s.to_string()))?;
        let year: i32 = year.parse().map_err(|_| TemporalError::Parse(s.to_string()))?;
        let month: u32 = month.parse().map_err(|_| TemporalError::Parse(s.to_string()))?;
        Self::new(year, month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// An inclusive range of calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        if start > end {
            return Err(TemporalError::InvalidPeriod {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// The full calendar month
    pub fn for_month(month: YearMonth) -> Self {
        Self {
            start: month.first_day(),
            end: month.last_day(),
        }
    }

    /// The `count` months ending with (and including) `last`, cut short at
    /// the first supported month
    pub fn trailing_months(last: YearMonth, count: u32) -> Self {
        let first = YearMonth::from_index(last.index() - i64::from(count.max(1)) + 1)
            .unwrap_or_else(|| YearMonth::from_date(NaiveDate::MIN));
        Self {
            start: first.first_day(),
            end: last.last_day(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days covered, counting both ends
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Shifts `anchor` forward by `months`, clamping the day to the target month's length
pub fn add_months_clamped(anchor: NaiveDate, months: u32) -> Option<NaiveDate> {
    anchor.checked_add_months(Months::new(months))
}
