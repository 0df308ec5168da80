use chrono::{Datelike, NaiveDate};

use crate::{
    core::{
        calendar::YearMonth,
        random::RandomSource,
        series::{DayRecord, MonthSeries, Reading},
    },
    prelude::*,
    quantity::{energy::KilowattHours, round_to},
};

/// Typical daily consumption and its spread.
#[derive(Copy, Clone, Debug)]
pub struct Baseline {
    pub base: KilowattHours,
    pub variance: KilowattHours,
}

impl Baseline {
    pub const CURRENT_MONTH: Self = Self { base: KilowattHours(2.5), variance: KilowattHours(1.0) };

    /// The previous month is deliberately heavier, so that the current one shows savings.
    pub const PREVIOUS_MONTH: Self =
        Self { base: KilowattHours(3.2), variance: KilowattHours(1.2) };
}

/// Synthesize one month of daily readings.
///
/// When `month` is the month of `today`, the days after `today` are left absent.
#[instrument(skip_all, fields(month = %month))]
pub fn generate_month(
    month: YearMonth,
    today: NaiveDate,
    baseline: Baseline,
    rng: &mut impl RandomSource,
) -> Result<MonthSeries> {
    ensure!(baseline.variance >= KilowattHours::ZERO, "variance must not be negative");

    let last_known_day = if month.contains(today) { today.day() } else { month.n_days() };
    let range = (baseline.base - baseline.variance).0..=(baseline.base + baseline.variance).0;

    let days = (1..=month.n_days())
        .map(|day| {
            let date = month.date(day)?;
            if day > last_known_day {
                return Ok(DayRecord { day, date, reading: None });
            }
            let draw = round_to(rng.uniform(range.clone()), 1).max(0.0);
            let consumption = KilowattHours(draw) * day_multiplier(day);
            Ok(DayRecord { day, date, reading: Some(Reading::new(consumption)) })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(n_days = days.len(), last_known_day, "generated");
    Ok(MonthSeries::from_days(month, days))
}

/// Weekend uplift on a fixed seven-day cycle anchored at day one, plus a mid-month uplift.
fn day_multiplier(day: u32) -> f64 {
    let mut multiplier = 1.0;
    if matches!(day % 7, 0 | 6) {
        multiplier *= 1.2;
    }
    if 10 < day && day < 20 {
        multiplier *= 1.1;
    }
    multiplier
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::{core::random::Fixed, quantity::rate::UNIT_RATE};

    fn far_future() -> NaiveDate {
        NaiveDate::from_ymd_opt(2099, 1, 1).unwrap()
    }

    #[test]
    fn test_day_count_matches_calendar() {
        let mut rng = StdRng::seed_from_u64(1);
        for year in [2023, 2024] {
            for month in 1..=12 {
                let month = YearMonth::try_new(year, month).unwrap();
                let series =
                    generate_month(month, far_future(), Baseline::CURRENT_MONTH, &mut rng)
                        .unwrap();
                assert_eq!(series.len(), month.n_days() as usize);
                assert!(series.days().iter().zip(1..).all(|(record, day)| record.day == day));
                assert_eq!(series.completed().count(), series.len());
            }
        }
    }

    #[test]
    fn test_absent_days_after_today() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        let month = YearMonth::of(today);
        let series =
            generate_month(month, today, Baseline::CURRENT_MONTH, &mut StdRng::seed_from_u64(2))
                .unwrap();
        assert_eq!(series.len(), 31);
        for record in series.days() {
            if record.day <= 15 {
                assert!(record.consumption().is_some() && record.cost().is_some());
            } else {
                assert!(record.consumption().is_none() && record.cost().is_none());
            }
        }
    }

    #[test]
    fn test_cost_is_derived_from_consumption() {
        let mut rng = StdRng::seed_from_u64(3);
        let month = YearMonth::try_new(2024, 7).unwrap();
        let series =
            generate_month(month, far_future(), Baseline::PREVIOUS_MONTH, &mut rng).unwrap();
        for reading in series.completed() {
            assert_eq!(reading.cost, (reading.consumption * UNIT_RATE).round_to(2));
            assert_eq!(reading.consumption, reading.consumption.round_to(1));
            assert!(reading.consumption.0 >= 0.0);
        }
    }

    #[test]
    fn test_multipliers() {
        let month = YearMonth::try_new(2024, 7).unwrap();
        let series =
            generate_month(month, far_future(), Baseline::CURRENT_MONTH, &mut Fixed(0.5)).unwrap();
        let consumption = |day: usize| series.days()[day - 1].consumption().unwrap().0;
        assert_abs_diff_eq!(consumption(1), 2.5);
        assert_abs_diff_eq!(consumption(6), 3.0);
        assert_abs_diff_eq!(consumption(7), 3.0);
        assert_abs_diff_eq!(consumption(13), 3.3);
        assert_abs_diff_eq!(consumption(14), 3.3);
        assert_abs_diff_eq!(consumption(20), 3.0);
        assert_abs_diff_eq!(consumption(11), 2.75, epsilon = 0.051);
    }

    #[test]
    fn test_draw_bounds() {
        let month = YearMonth::try_new(2024, 7).unwrap();
        let low =
            generate_month(month, far_future(), Baseline::CURRENT_MONTH, &mut Fixed(0.0)).unwrap();
        assert_abs_diff_eq!(low.days()[0].consumption().unwrap().0, 1.5);
        let high =
            generate_month(month, far_future(), Baseline::CURRENT_MONTH, &mut Fixed(1.0)).unwrap();
        assert_abs_diff_eq!(high.days()[0].consumption().unwrap().0, 3.5);
    }

    #[test]
    fn test_negative_draws_are_clamped() {
        let month = YearMonth::try_new(2024, 7).unwrap();
        let baseline = Baseline { base: KilowattHours(0.5), variance: KilowattHours(2.0) };
        let series = generate_month(month, far_future(), baseline, &mut Fixed(0.0)).unwrap();
        assert!(series.completed().all(|reading| reading.consumption == KilowattHours::ZERO));
    }

    #[test]
    fn test_negative_variance_is_rejected() {
        let month = YearMonth::try_new(2024, 7).unwrap();
        let baseline = Baseline { base: KilowattHours(2.5), variance: KilowattHours(-1.0) };
        assert!(generate_month(month, far_future(), baseline, &mut Fixed(0.5)).is_err());
    }

    #[test]
    fn test_past_month_is_complete() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        let month = YearMonth::try_new(2025, 2).unwrap();
        let series =
            generate_month(month, today, Baseline::PREVIOUS_MONTH, &mut Fixed(0.5)).unwrap();
        assert_eq!(series.completed().count(), 28);
    }

    #[test]
    fn test_repeated_calls_differ() {
        let mut rng = StdRng::seed_from_u64(4);
        let month = YearMonth::try_new(2024, 7).unwrap();
        let first = generate_month(month, far_future(), Baseline::CURRENT_MONTH, &mut rng).unwrap();
        let second = generate_month(month, far_future(), Baseline::CURRENT_MONTH, &mut rng).unwrap();
        let consumption =
            |series: &MonthSeries| series.days().iter().map(DayRecord::consumption).collect::<Vec<_>>();
        assert_ne!(consumption(&first), consumption(&second));
    }
}
