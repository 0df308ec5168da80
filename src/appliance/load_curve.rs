use std::array;

use serde::Serialize;

use crate::{
    appliance::category::ApplianceCategory,
    core::random::RandomSource,
    quantity::{energy::KilowattHours, power::Watts, time::Hours},
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HourlyPoint {
    pub hour: u32,

    /// Rounded to watt-hours.
    pub consumption: KilowattHours,
}

/// Synthesize a fresh 24-hour load curve from the appliance's name-based usage pattern.
///
/// Always-on appliances (24 hours a day) idle at 30% and peak at 70% of their rated power.
/// Others run in a window starting at the pattern's start hour, at 50% off-peak and 90% on peak.
pub fn generate_load_curve(
    name: &str,
    wattage: Watts,
    daily_usage_hours: Hours,
    rng: &mut impl RandomSource,
) -> [HourlyPoint; 24] {
    let pattern = ApplianceCategory::resolve(name).usage_pattern(rng);
    let always_on = daily_usage_hours >= Hours::ONE_DAY;

    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n_active_hours =
        if daily_usage_hours > Hours(12.0) { 16 } else { (daily_usage_hours.0 * 1.5).ceil() as u32 };

    array::from_fn(|hour| {
        #[expect(clippy::cast_possible_truncation)]
        let hour = hour as u32;

        let usage_factor = if always_on {
            if pattern.is_peak(hour) { 0.7 } else { 0.3 }
        } else if pattern.is_active(hour, n_active_hours) {
            if pattern.is_peak(hour) { 0.9 } else { 0.5 }
        } else {
            0.0
        };
        let usage_factor = usage_factor * rng.uniform(0.85..=1.15);

        HourlyPoint { hour, consumption: (wattage * Hours(1.0) * usage_factor).round_to(3) }
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::core::random::Fixed;

    #[test]
    fn test_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        for (name, wattage, hours) in [
            ("Air Conditioner", 1200.0, 5.0),
            ("Refrigerator", 150.0, 24.0),
            ("Washing Machine", 500.0, 1.0),
            ("Microwave", 1000.0, 0.1),
            ("Heater", 2000.0, 13.0),
        ] {
            let curve = generate_load_curve(name, Watts(wattage), Hours(hours), &mut rng);
            assert_eq!(curve.len(), 24);
            for (point, hour) in curve.iter().zip(0..) {
                assert_eq!(point.hour, hour);
                assert!(point.consumption >= KilowattHours::ZERO);
                assert!(point.consumption.0 <= wattage * 0.9 * 1.15 / 1000.0 + 0.001);
            }
        }
    }

    #[test]
    fn test_always_on() {
        let curve = generate_load_curve("Refrigerator", Watts(150.0), Hours(24.0), &mut Fixed(0.5));
        assert_abs_diff_eq!(curve[7].consumption.0, 0.105);
        assert_abs_diff_eq!(curve[3].consumption.0, 0.045);
    }

    #[test]
    fn test_active_window() {
        // Air conditioner: starts at 12, five hours of use spread over ⌈7.5⌉ = 8 hours.
        let curve =
            generate_load_curve("air conditioner", Watts(1200.0), Hours(5.0), &mut Fixed(0.5));
        let active = curve.iter().filter(|point| point.consumption > KilowattHours::ZERO).count();
        assert_eq!(active, 8);
        assert_eq!(curve[11].consumption, KilowattHours::ZERO);
        assert_abs_diff_eq!(curve[12].consumption.0, 0.6);
        assert_abs_diff_eq!(curve[14].consumption.0, 1.08);
        assert_abs_diff_eq!(curve[19].consumption.0, 1.08);
        assert_eq!(curve[20].consumption, KilowattHours::ZERO);
    }

    #[test]
    fn test_long_usage_spans_sixteen_hours() {
        let curve = generate_load_curve("TV", Watts(100.0), Hours(13.0), &mut Fixed(0.5));
        let active = curve.iter().filter(|point| point.consumption > KilowattHours::ZERO).count();
        assert_eq!(active, 16);
    }

    #[test]
    fn test_is_not_cached() {
        let mut rng = StdRng::seed_from_u64(5);
        let first = generate_load_curve("Laptop", Watts(65.0), Hours(8.0), &mut rng);
        let second = generate_load_curve("Laptop", Watts(65.0), Hours(8.0), &mut rng);
        assert_ne!(first, second);
    }
}
