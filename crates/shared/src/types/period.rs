//! Calendar windows used to scope month- and year-based queries.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// English month names, January first.
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

/// Errors raised while building a calendar window.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// Month outside 1..=12.
    #[error("Month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),

    /// Year outside the supported range.
    #[error("Year must be between 1 and 9999, got {0}")]
    InvalidYear(i32),
}

/// A calendar month as a half-open date range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthWindow {
    year: i32,
    month: u32,
    start: NaiveDate,
    end: NaiveDate,
}

impl MonthWindow {
    /// Builds the window for `month` (1..=12) of `year`.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError` if the month or year is out of range.
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodError> {
        if !(1..=9999).contains(&year) {
            return Err(PeriodError::InvalidYear(year));
        }
        if !(1..=12).contains(&month) {
            return Err(PeriodError::InvalidMonth(month));
        }

        let start = first_day(year, month)?;
        let end = if month == 12 {
            first_day(year + 1, 1)?
        } else {
            first_day(year, month + 1)?
        };

        Ok(Self {
            year,
            month,
            start,
            end,
        })
    }

    /// Returns the previous calendar month; January rolls back to December.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::InvalidYear` when stepping back past year 1.
    pub fn previous(&self) -> Result<Self, PeriodError> {
        if self.month == 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    /// Year of this window.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Month number (1..=12).
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month (inclusive).
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// First day of the following month (exclusive).
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Midnight UTC at the start of the window.
    #[must_use]
    pub fn start_at(&self) -> DateTime<Utc> {
        self.start.and_time(NaiveTime::MIN).and_utc()
    }

    /// Midnight UTC at the end of the window (exclusive).
    #[must_use]
    pub fn end_at(&self) -> DateTime<Utc> {
        self.end.and_time(NaiveTime::MIN).and_utc()
    }

    /// Returns true if `date` falls inside the window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    /// English name of the month.
    #[must_use]
    pub fn name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }
}

/// Returns the half-open date range `[Jan 1 of year, Jan 1 of year + 1)`.
///
/// # Errors
///
/// Returns `PeriodError::InvalidYear` if the year is out of range.
pub fn year_bounds(year: i32) -> Result<(NaiveDate, NaiveDate), PeriodError> {
    let first = MonthWindow::new(year, 1)?;
    let last = MonthWindow::new(year, 12)?;
    Ok((first.start(), last.end()))
}

fn first_day(year: i32, month: u32) -> Result<NaiveDate, PeriodError> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(PeriodError::InvalidYear(year))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_bounds() {
        let window = MonthWindow::new(2024, 2).unwrap();
        assert_eq!(window.start(), date(2024, 2, 1));
        assert_eq!(window.end(), date(2024, 3, 1));
        assert!(window.contains(date(2024, 2, 29)));
        assert!(!window.contains(date(2024, 3, 1)));
        assert!(!window.contains(date(2024, 1, 31)));
    }

    #[test]
    fn test_december_ends_next_year() {
        let window = MonthWindow::new(2023, 12).unwrap();
        assert_eq!(window.end(), date(2024, 1, 1));
    }

    #[test]
    fn test_previous_of_january_is_december_of_prior_year() {
        let window = MonthWindow::new(2024, 1).unwrap();
        let previous = window.previous().unwrap();
        assert_eq!(previous.year(), 2023);
        assert_eq!(previous.month(), 12);
    }

    #[rstest]
    #[case(0)]
    #[case(13)]
    fn test_invalid_month(#[case] month: u32) {
        assert_eq!(
            MonthWindow::new(2024, month),
            Err(PeriodError::InvalidMonth(month))
        );
    }

    #[test]
    fn test_year_bounds() {
        let (start, end) = year_bounds(2025).unwrap();
        assert_eq!(start, date(2025, 1, 1));
        assert_eq!(end, date(2026, 1, 1));
    }

    #[test]
    fn test_start_at_is_midnight_utc() {
        let window = MonthWindow::new(2024, 5).unwrap();
        assert_eq!(window.start_at().to_rfc3339(), "2024-05-01T00:00:00+00:00");
    }
}
