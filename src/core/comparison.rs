use serde::Serialize;

use crate::{
    core::{
        calendar::YearMonth,
        series::{DayRecord, MonthSeries},
        summary::Summary,
    },
    quantity::{cost::Cost, energy::KilowattHours, rate::UNIT_RATE},
};

/// Month-over-month comparison over an equal number of completed days.
#[must_use]
#[derive(Clone, Debug, Serialize)]
pub struct Comparison {
    pub current_month: YearMonth,
    pub previous_month: YearMonth,

    /// Smaller of the two completed day counts.
    pub days_compared: u32,

    /// Sum over the first [`Comparison::days_compared`] completed days of the current month.
    pub current_consumption: KilowattHours,

    /// Sum over the first [`Comparison::days_compared`] completed days of the previous month.
    pub previous_consumption: KilowattHours,

    /// Positive when the current month uses less.
    pub energy_saved: KilowattHours,

    pub money_saved: Cost,

    /// Saved energy relative to the previous month, in whole percent.
    pub savings_percentage: i64,

    pub chart: Vec<ChartPoint>,
}

/// Same day index of both months, for plotting them side by side.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub day: u32,
    pub current: Option<KilowattHours>,
    pub previous: Option<KilowattHours>,
}

impl Comparison {
    pub fn new(current: &MonthSeries, previous: &MonthSeries) -> Self {
        let days_compared = Summary::from(current)
            .days_completed
            .min(Summary::from(previous).days_completed);
        let window = days_compared as usize;

        // Each month is filtered first and sliced second, so the windows are each month's own
        // first completed days, not necessarily the same calendar days.
        let sum_window = |series: &MonthSeries| -> KilowattHours {
            series.completed().take(window).map(|reading| reading.consumption).sum()
        };
        let current_consumption = sum_window(current);
        let previous_consumption = sum_window(previous);
        let energy_saved = previous_consumption - current_consumption;

        #[expect(clippy::cast_possible_truncation)]
        let savings_percentage = if previous_consumption > KilowattHours::ZERO {
            (energy_saved / previous_consumption * 100.0).round() as i64
        } else {
            0
        };

        let chart = (0..window)
            .map(|index| ChartPoint {
                day: u32::try_from(index + 1).unwrap_or(u32::MAX),
                current: current.days().get(index).and_then(DayRecord::consumption),
                previous: previous.days().get(index).and_then(DayRecord::consumption),
            })
            .collect();

        Self {
            current_month: current.month,
            previous_month: previous.month,
            days_compared,
            current_consumption,
            previous_consumption,
            energy_saved: energy_saved.round_to(1),
            money_saved: (energy_saved * UNIT_RATE).round_to(2),
            savings_percentage,
            chart,
        }
    }

    /// Unrounded energy difference between the compared windows.
    pub fn exact_energy_saved(&self) -> KilowattHours {
        self.previous_consumption - self.current_consumption
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn series(month: u32, consumption: &[Option<f64>]) -> MonthSeries {
        MonthSeries::try_from_consumption(
            YearMonth::try_new(2025, month).unwrap(),
            consumption.iter().copied(),
        )
        .unwrap()
    }

    #[test]
    fn test_energy_and_money_saved() {
        let current = series(3, &[Some(2.0), Some(2.5), None, None]);
        let previous = series(2, &[Some(3.0), Some(3.0), Some(3.0)]);
        let comparison = Comparison::new(&current, &previous);
        assert_eq!(comparison.days_compared, 2);
        assert_abs_diff_eq!(comparison.current_consumption.0, 4.5);
        assert_abs_diff_eq!(comparison.previous_consumption.0, 6.0);
        assert_abs_diff_eq!(comparison.energy_saved.0, 1.5);
        assert_abs_diff_eq!(comparison.money_saved.0, 7.5);
        assert_eq!(comparison.savings_percentage, 25);
    }

    #[test]
    fn test_increase_is_negative() {
        let current = series(3, &[Some(4.0), Some(4.0)]);
        let previous = series(2, &[Some(3.0), Some(3.0)]);
        let comparison = Comparison::new(&current, &previous);
        assert_abs_diff_eq!(comparison.energy_saved.0, -2.0);
        assert_abs_diff_eq!(comparison.money_saved.0, -10.0);
        assert_eq!(comparison.savings_percentage, -33);
    }

    #[test]
    fn test_filters_before_slicing() {
        let current = series(3, &[None, Some(2.0), Some(2.0)]);
        let previous = series(2, &[Some(5.0), Some(1.0), Some(1.0)]);
        let comparison = Comparison::new(&current, &previous);
        assert_eq!(comparison.days_compared, 2);
        assert_abs_diff_eq!(comparison.current_consumption.0, 4.0);
        assert_abs_diff_eq!(comparison.previous_consumption.0, 6.0);
    }

    #[test]
    fn test_nothing_to_compare() {
        let current = series(3, &[None, None]);
        let previous = series(2, &[Some(3.0)]);
        let comparison = Comparison::new(&current, &previous);
        assert_eq!(comparison.days_compared, 0);
        assert_eq!(comparison.energy_saved, KilowattHours::ZERO);
        assert_eq!(comparison.savings_percentage, 0);
        assert!(comparison.chart.is_empty());
    }

    #[test]
    fn test_chart_uses_raw_day_indices() {
        let current = series(3, &[None, Some(2.0), Some(2.0)]);
        let previous = series(2, &[Some(5.0), Some(1.0), Some(1.0)]);
        let comparison = Comparison::new(&current, &previous);
        assert_eq!(
            comparison.chart,
            [
                ChartPoint { day: 1, current: None, previous: Some(KilowattHours(5.0)) },
                ChartPoint {
                    day: 2,
                    current: Some(KilowattHours(2.0)),
                    previous: Some(KilowattHours(1.0)),
                },
            ]
        );
    }
}
