//! Year-month value object.
//!
//! A [`YearMonth`] identifies the calendar month a timesheet belongs to and
//! is half of the key for a monthly submission.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::EngineError;

/// A calendar month identifier, serialized as `"YYYY-MM"`.
///
/// # Example
///
/// ```
/// use attendance_engine::models::YearMonth;
///
/// let ym: YearMonth = "2025-04".parse().unwrap();
/// assert_eq!(ym.year(), 2025);
/// assert_eq!(ym.month(), 4);
/// assert_eq!(ym.to_string(), "2025-04");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a year-month, validating that `month` is 1..=12.
    pub fn new(year: i32, month: u32) -> Result<Self, EngineError> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidYearMonth {
                value: format!("{year:04}-{month:02}"),
            });
        }
        Ok(Self { year, month })
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month component (1..=12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Returns the year-month containing the given date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns the first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        // month is validated at construction, so this cannot fail
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// Returns the last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .unwrap_or_default()
            .pred_opt()
            .unwrap_or_default()
    }

    /// Checks whether a date falls inside this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidYearMonth {
            value: s.to_string(),
        };

        let (year_part, month_part) = s.split_once('-').ok_or_else(invalid)?;
        if year_part.len() != 4 || month_part.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year_part.parse().map_err(|_| invalid())?;
        let month: u32 = month_part.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
