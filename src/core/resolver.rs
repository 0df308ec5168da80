use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    core::{
        calendar::YearMonth,
        generator::{Baseline, generate_month},
        random::RandomSource,
        series::MonthSeries,
    },
    prelude::*,
};

/// The month of «today» together with the month before it.
#[must_use]
#[derive(Clone, Debug, Serialize)]
pub struct MonthPair {
    pub current: MonthSeries,
    pub previous: MonthSeries,
}

impl MonthPair {
    #[instrument(skip_all, fields(today = %today))]
    pub fn generate(today: NaiveDate, rng: &mut impl RandomSource) -> Result<Self> {
        let current_month = YearMonth::of(today);
        let previous_month = current_month.previous();
        let this = Self {
            current: generate_month(current_month, today, Baseline::CURRENT_MONTH, rng)?,
            previous: generate_month(previous_month, today, Baseline::PREVIOUS_MONTH, rng)?,
        };
        info!(current = %current_month, previous = %previous_month, "generated month pair");
        Ok(this)
    }

    pub const fn current_month(&self) -> YearMonth {
        self.current.month
    }

    pub const fn previous_month(&self) -> YearMonth {
        self.previous.month
    }
}
