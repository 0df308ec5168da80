use serde::Serialize;

use crate::{
    core::series::{DayRecord, MonthSeries},
    quantity::{cost::Cost, energy::KilowattHours},
};

/// Month-to-date totals and daily averages over the completed days.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_consumption: KilowattHours,
    pub total_cost: Cost,
    pub days_completed: u32,

    /// Zero when no days are completed.
    pub daily_average_consumption: KilowattHours,

    /// Zero when no days are completed.
    pub daily_average_cost: Cost,
}

impl From<&MonthSeries> for Summary {
    fn from(series: &MonthSeries) -> Self {
        let mut total_consumption = KilowattHours::ZERO;
        let mut total_cost = Cost::ZERO;
        let mut days_completed = 0_u32;
        for reading in series.completed() {
            total_consumption += reading.consumption;
            total_cost += reading.cost;
            days_completed += 1;
        }

        let (daily_average_consumption, daily_average_cost) = if days_completed == 0 {
            (KilowattHours::ZERO, Cost::ZERO)
        } else {
            let n_days = f64::from(days_completed);
            ((total_consumption / n_days).round_to(1), (total_cost / n_days).round_to(2))
        };

        Self {
            total_consumption: total_consumption.round_to(1),
            total_cost: total_cost.round_to(2),
            days_completed,
            daily_average_consumption,
            daily_average_cost,
        }
    }
}

/// Direction of a completed day relative to the completed day before it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Trend {
    Saved,
    Increased,
}

/// Completed days, most recent first, each with its trend against the preceding completed day.
///
/// The earliest completed day has nothing to compare against.
pub fn daily_trends(series: &MonthSeries) -> Vec<(&DayRecord, Option<Trend>)> {
    let completed: Vec<_> = series.completed_days().collect();
    completed
        .iter()
        .enumerate()
        .rev()
        .map(|(index, record)| {
            let trend = index.checked_sub(1).and_then(|previous| {
                let (current, previous) = (record.consumption()?, completed[previous].consumption()?);
                Some(if current < previous { Trend::Saved } else { Trend::Increased })
            });
            (*record, trend)
        })
        .collect()
}
