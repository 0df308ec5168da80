use bon::bon;
use serde::Serialize;

use crate::{
    core::{series::MonthSeries, summary::Summary},
    quantity::{cost::Cost, energy::KilowattHours, rate::UNIT_RATE},
};

pub const DEFAULT_MONTH_LENGTH: u32 = 30;

pub const DEFAULT_BUDGET: Cost = Cost(3000.0);

/// Linear month-end projection of the month-to-date summary.
#[must_use]
#[derive(Copy, Clone, Debug, Serialize)]
pub struct Forecast {
    #[serde(flatten)]
    pub summary: Summary,

    pub budget: Cost,

    /// May be negative when more days are completed than the assumed month length.
    pub days_remaining: i64,

    pub forecasted_total_consumption: KilowattHours,
    pub forecasted_total_cost: Cost,
    pub is_over_budget: bool,

    /// Daily reduction needed to land on the budget, zero when within budget
    /// or when no days remain to spread the reduction over.
    pub daily_savings_needed: KilowattHours,
}

#[bon]
impl Forecast {
    #[builder]
    pub fn new(
        series: &MonthSeries,
        #[builder(default = DEFAULT_MONTH_LENGTH)] month_length: u32,
        #[builder(default = DEFAULT_BUDGET)] budget: Cost,
    ) -> Self {
        let summary = Summary::from(series);
        let days_remaining = i64::from(month_length) - i64::from(summary.days_completed);

        #[expect(clippy::cast_precision_loss)]
        let remaining = days_remaining.max(0) as f64;

        let forecasted_total_consumption =
            summary.total_consumption + summary.daily_average_consumption * remaining;
        let forecasted_total_cost = summary.total_cost + summary.daily_average_cost * remaining;
        let is_over_budget = forecasted_total_cost > budget;

        let daily_savings_needed = if is_over_budget && remaining > 0.0 {
            (forecasted_total_cost - budget) / UNIT_RATE / remaining
        } else {
            KilowattHours::ZERO
        };

        Self {
            summary,
            budget,
            days_remaining,
            forecasted_total_consumption: forecasted_total_consumption.round_to(1),
            forecasted_total_cost: forecasted_total_cost.round_to(2),
            is_over_budget,
            daily_savings_needed: daily_savings_needed.round_to(1),
        }
    }
}

impl Forecast {
    /// Projected overrun, negative when under the budget.
    pub fn budget_overrun(&self) -> Cost {
        (self.forecasted_total_cost - self.budget).round_to(2)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::core::calendar::YearMonth;

    fn series(consumption: &[Option<f64>]) -> MonthSeries {
        MonthSeries::try_from_consumption(
            YearMonth::try_new(2025, 3).unwrap(),
            consumption.iter().copied(),
        )
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let forecast = Forecast::builder().series(&series(&[Some(2.0), Some(3.0), None, Some(4.0)])).build();
        assert_eq!(forecast.budget, DEFAULT_BUDGET);
        assert_eq!(forecast.days_remaining, 27);
        assert_abs_diff_eq!(forecast.forecasted_total_consumption.0, 90.0);
        assert_abs_diff_eq!(forecast.forecasted_total_cost.0, 450.0);
        assert!(!forecast.is_over_budget);
        assert_eq!(forecast.daily_savings_needed, KilowattHours::ZERO);
        assert_abs_diff_eq!(forecast.budget_overrun().0, -2550.0);
    }

    #[test]
    fn test_over_budget() {
        let forecast = Forecast::builder()
            .series(&series(&[Some(2.0), Some(3.0), None, Some(4.0)]))
            .budget(Cost(400.0))
            .build();
        assert!(forecast.is_over_budget);
        // (450 - 400) / 5 / 27 ≈ 0.37
        assert_abs_diff_eq!(forecast.daily_savings_needed.0, 0.4);
        assert_abs_diff_eq!(forecast.budget_overrun().0, 50.0);
    }

    #[test]
    fn test_no_days_remaining() {
        let forecast = Forecast::builder()
            .series(&series(&[Some(40.0), Some(40.0)]))
            .month_length(2)
            .budget(Cost(100.0))
            .build();
        assert_eq!(forecast.days_remaining, 0);
        assert!(forecast.is_over_budget);
        assert_eq!(forecast.daily_savings_needed, KilowattHours::ZERO);
    }

    #[test]
    fn test_negative_days_remaining_contribute_nothing() {
        let forecast =
            Forecast::builder().series(&series(&[Some(2.0), Some(2.0), Some(2.0)])).month_length(2).build();
        assert_eq!(forecast.days_remaining, -1);
        assert_eq!(forecast.forecasted_total_consumption, forecast.summary.total_consumption);
        assert_eq!(forecast.forecasted_total_cost, forecast.summary.total_cost);
    }

    #[test]
    fn test_zero_daily_cost_keeps_total() {
        for month_length in [0, 5, 30, 31] {
            let forecast = Forecast::builder()
                .series(&series(&[Some(0.0), Some(0.0), None]))
                .month_length(month_length)
                .build();
            assert_eq!(forecast.forecasted_total_cost, forecast.summary.total_cost);
        }
    }

    #[test]
    fn test_budget_monotonicity() {
        let series = series(&[Some(3.2), Some(4.1), Some(2.7), Some(5.5), None]);
        let mut was_over_budget = true;
        for budget in (0..=60).map(|step| Cost(f64::from(step) * 10.0)) {
            let forecast = Forecast::builder().series(&series).budget(budget).build();
            assert!(was_over_budget || !forecast.is_over_budget);
            was_over_budget = forecast.is_over_budget;
        }
        assert!(!was_over_budget);
    }

    #[test]
    fn test_all_absent() {
        let forecast = Forecast::builder().series(&series(&[None, None])).build();
        assert_eq!(forecast.days_remaining, 30);
        assert_eq!(forecast.forecasted_total_cost, Cost::ZERO);
        assert!(!forecast.is_over_budget);
    }
}
