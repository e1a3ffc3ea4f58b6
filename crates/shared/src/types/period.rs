//! Monthly reporting periods.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const MONTH_SHORT: [&str; 12] = [
    "Gen", "Feb", "Mar", "Apr", "Mag", "Giu", "Lug", "Ago", "Set", "Ott", "Nov", "Dic",
];

const MONTH_LONG: [&str; 12] = [
    "Gennaio",
    "Febbraio",
    "Marzo",
    "Aprile",
    "Maggio",
    "Giugno",
    "Luglio",
    "Agosto",
    "Settembre",
    "Ottobre",
    "Novembre",
    "Dicembre",
];

/// Errors raised when building a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// Month outside 1..=12.
    #[error("Month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),

    /// Year is not a four-digit number.
    #[error("Year must have four digits, got {0}")]
    InvalidYear(i32),
}

/// A (month, year) pair identifying one monthly record.
///
/// Ordered chronologically: by year, then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawPeriod")]
pub struct Period {
    year: i32,
    month: u32,
}

#[derive(Deserialize)]
struct RawPeriod {
    month: u32,
    year: i32,
}

impl TryFrom<RawPeriod> for Period {
    type Error = PeriodError;

    fn try_from(raw: RawPeriod) -> Result<Self, Self::Error> {
        Self::new(raw.month, raw.year)
    }
}

impl Period {
    /// Creates a validated period.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError` when the month is outside 1..=12 or the year is
    /// not a four-digit number.
    pub const fn new(month: u32, year: i32) -> Result<Self, PeriodError> {
        if month < 1 || month > 12 {
            return Err(PeriodError::InvalidMonth(month));
        }
        if year < 1000 || year > 9999 {
            return Err(PeriodError::InvalidYear(year));
        }
        Ok(Self { year, month })
    }

    /// Parses the month and year strings sent by the entry form.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError` when either value is missing, not a number, or
    /// out of range.
    pub fn parse(month: &str, year: &str) -> Result<Self, PeriodError> {
        let month = month
            .trim()
            .parse::<u32>()
            .map_err(|_| PeriodError::InvalidMonth(0))?;
        let year = year
            .trim()
            .parse::<i32>()
            .map_err(|_| PeriodError::InvalidYear(0))?;
        Self::new(month, year)
    }

    /// Month number, 1-based.
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Calendar year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// The month before this one.
    #[must_use]
    pub const fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Short label used in tables and charts, e.g. "Mar 2024".
    #[must_use]
    pub fn short_label(&self) -> String {
        format!("{} {}", MONTH_SHORT[self.month_index()], self.year)
    }

    /// Long label used in headings, e.g. "Marzo 2024".
    #[must_use]
    pub fn long_label(&self) -> String {
        format!("{} {}", MONTH_LONG[self.month_index()], self.year)
    }

    fn month_index(&self) -> usize {
        (self.month - 1) as usize
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}
