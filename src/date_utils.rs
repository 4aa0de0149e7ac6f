use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::{AppError, AppResult};

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A half-open date interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// A calendar month of a specific year. `month` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> AppResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(AppError::InvalidArgument(format!(
                "Invalid month number: {}",
                month
            )));
        }
        // Rejects years chrono cannot represent, including the following January.
        let period = Self { year, month };
        period.checked_range().ok_or_else(|| {
            AppError::InvalidArgument(format!("Invalid year: {}", year))
        })?;
        Ok(period)
    }

    /// Parse a month designator (a number 1-12 or an English month name) and a year.
    pub fn parse(month: &str, year: &str) -> AppResult<Self> {
        let month = parse_month(month)?;
        let year = year
            .trim()
            .parse::<i32>()
            .map_err(|_| AppError::InvalidArgument(format!("Invalid year: {}", year.trim())))?;
        Self::new(year, month)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[self.month as usize - 1]
    }

    /// `[first day of the month, first day of the following month)`.
    pub fn date_range(&self) -> DateRange {
        self.checked_range()
            .expect("Period::new only admits months with a representable range")
    }

    fn checked_range(&self) -> Option<DateRange> {
        let start = NaiveDate::from_ymd_opt(self.year, self.month, 1)?;
        let end = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year.checked_add(1)?, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)?
        };
        Some(DateRange { start, end })
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}

/// `[January 1st of year, January 1st of the next year)`.
pub fn year_range(year: i32) -> AppResult<DateRange> {
    let invalid = || AppError::InvalidArgument(format!("Invalid year: {}", year));
    let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(invalid)?;
    let end = year
        .checked_add(1)
        .and_then(|next| NaiveDate::from_ymd_opt(next, 1, 1))
        .ok_or_else(invalid)?;
    Ok(DateRange { start, end })
}

/// Parse a month designator into a 1-based month number.
///
/// Accepts `1`-`12` or a full English month name in any letter case.
pub fn parse_month(designator: &str) -> AppResult<u32> {
    let designator = designator.trim();

    if !designator.is_empty() && designator.chars().all(|c| c.is_ascii_digit()) {
        return designator
            .parse::<u32>()
            .ok()
            .filter(|m| (1..=12).contains(m))
            .ok_or_else(|| {
                AppError::InvalidArgument(format!("Invalid month number: {}", designator))
            });
    }

    MONTH_NAMES
        .iter()
        .position(|name| name.eq_ignore_ascii_case(designator))
        .map(|index| index as u32 + 1)
        .ok_or_else(|| AppError::InvalidArgument("Invalid month name".into()))
}

/// Resolve optional query parameters into a period.
///
/// Returns `Ok(None)` when either value is missing or blank, meaning the caller
/// should not filter by date at all.
pub fn resolve_period(month: Option<&str>, year: Option<&str>) -> AppResult<Option<Period>> {
    let month = month.map(str::trim).filter(|m| !m.is_empty());
    let year = year.map(str::trim).filter(|y| !y.is_empty());

    match (month, year) {
        (Some(month), Some(year)) => Period::parse(month, year).map(Some),
        _ => Ok(None),
    }
}

/// Parse a transaction date from `YYYY-MM-DD` or an ISO 8601 date-time.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}
