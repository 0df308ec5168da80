use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Calendar month of a specific year.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("{year}-{month:02}")]
pub struct YearMonth {
    pub year: i32,

    /// One-based month number.
    pub month: u32,
}

impl YearMonth {
    pub fn try_new(year: i32, month: u32) -> Result<Self> {
        ensure!((1..=12).contains(&month), "month must be within 1..=12, got {month}");
        Ok(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self { year: date.year(), month: date.month() }
    }

    /// Immediately preceding month, rolling January over to December of the previous year.
    #[must_use]
    pub const fn previous(self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    pub const fn is_leap_year(self) -> bool {
        (self.year % 4 == 0 && self.year % 100 != 0) || self.year % 400 == 0
    }

    pub const fn n_days(self) -> u32 {
        match self.month {
            2 if self.is_leap_year() => 29,
            2 => 28,
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    pub fn date(self, day: u32) -> Result<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
            .with_context(|| format!("day {day} does not exist in {self}"))
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        Self::of(date) == self
    }

    pub fn name(self) -> &'static str {
        u8::try_from(self.month)
            .ok()
            .and_then(|month| Month::try_from(month).ok())
            .map_or("Unknown", |month| month.name())
    }
}
