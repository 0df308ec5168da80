use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{
    core::calendar::YearMonth,
    prelude::*,
    quantity::{cost::Cost, energy::KilowattHours, rate::UNIT_RATE},
};

/// Metered consumption of a single completed day.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Reading {
    /// Rounded to 0.1 kWh.
    pub consumption: KilowattHours,

    /// Consumption at the unit rate, rounded to cents.
    pub cost: Cost,
}

impl Reading {
    pub fn new(consumption: KilowattHours) -> Self {
        let consumption = consumption.round_to(1);
        Self { consumption, cost: (consumption * UNIT_RATE).round_to(2) }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "RawDayRecord", try_from = "RawDayRecord")]
pub struct DayRecord {
    /// One-based day of the month.
    pub day: u32,

    pub date: NaiveDate,

    /// `None` for days which have not happened yet.
    pub reading: Option<Reading>,
}

/// Flat representation with explicit `null`s for the absent days.
#[derive(Clone, Serialize, Deserialize)]
struct RawDayRecord {
    day: u32,
    date: NaiveDate,
    consumption: Option<KilowattHours>,
    cost: Option<Cost>,
}

impl From<DayRecord> for RawDayRecord {
    fn from(record: DayRecord) -> Self {
        Self {
            day: record.day,
            date: record.date,
            consumption: record.consumption(),
            cost: record.cost(),
        }
    }
}

impl TryFrom<RawDayRecord> for DayRecord {
    type Error = Error;

    fn try_from(raw: RawDayRecord) -> Result<Self> {
        ensure!(
            raw.date.day() == raw.day,
            "day {} does not match its date {}",
            raw.day,
            raw.date,
        );
        let reading = match (raw.consumption, raw.cost) {
            (Some(consumption), Some(cost)) => {
                ensure!(consumption >= KilowattHours::ZERO, "day {}: negative consumption", raw.day);
                let reading = Reading::new(consumption);
                ensure!(
                    cost.round_to(2) == reading.cost,
                    "day {}: cost {cost} does not match consumption {consumption}, expected {}",
                    raw.day,
                    reading.cost,
                );
                Some(reading)
            }
            (None, None) => None,
            _ => bail!("day {}: cost must be present if and only if consumption is", raw.day),
        };
        Ok(Self { day: raw.day, date: raw.date, reading })
    }
}

impl DayRecord {
    pub fn consumption(&self) -> Option<KilowattHours> {
        self.reading.map(|reading| reading.consumption)
    }

    pub fn cost(&self) -> Option<Cost> {
        self.reading.map(|reading| reading.cost)
    }

    pub const fn is_absent(&self) -> bool {
        self.reading.is_none()
    }
}

/// Day-by-day records of one calendar month, ordered by day.
#[must_use]
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawMonthSeries")]
pub struct MonthSeries {
    pub month: YearMonth,
    days: Vec<DayRecord>,
}

/// Unchecked shape of [`MonthSeries`], validated on the way in.
#[derive(Deserialize)]
struct RawMonthSeries {
    month: YearMonth,
    days: Vec<DayRecord>,
}

impl TryFrom<RawMonthSeries> for MonthSeries {
    type Error = Error;

    fn try_from(raw: RawMonthSeries) -> Result<Self> {
        let month = YearMonth::try_new(raw.month.year, raw.month.month)?;
        ensure!(
            raw.days.len() <= month.n_days() as usize,
            "{month} has {} days, got {} records",
            month.n_days(),
            raw.days.len(),
        );
        for (day, record) in (1..).zip(&raw.days) {
            ensure!(record.day == day, "expected day {day}, got day {}", record.day);
            ensure!(month.contains(record.date), "{} is outside of {month}", record.date);
        }
        Ok(Self { month, days: raw.days })
    }
}

impl MonthSeries {
    /// Build a series from known consumption values, starting on the first day of the month.
    ///
    /// The series may be shorter than the month, but never longer.
    pub fn try_from_consumption<I>(month: YearMonth, consumption: I) -> Result<Self>
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let days = (1..)
            .zip(consumption)
            .map(|(day, consumption)| {
                Ok(DayRecord {
                    day,
                    date: month.date(day)?,
                    reading: consumption.map(|value| Reading::new(KilowattHours(value))),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { month, days })
    }

    pub(crate) fn from_days(month: YearMonth, days: Vec<DayRecord>) -> Self {
        Self { month, days }
    }

    pub fn days(&self) -> &[DayRecord] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Readings of the completed days, skipping the absent ones.
    pub fn completed(&self) -> impl DoubleEndedIterator<Item = &Reading> {
        self.days.iter().filter_map(|record| record.reading.as_ref())
    }

    /// Records of the completed days, skipping the absent ones.
    pub fn completed_days(&self) -> impl DoubleEndedIterator<Item = &DayRecord> {
        self.days.iter().filter(|record| !record.is_absent())
    }
}
