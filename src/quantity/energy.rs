use std::ops::Mul;

use crate::quantity::{cost::Cost, rate::KilowattHourRate};

quantity!(KilowattHours, suffix: "kWh", precision: 1);

impl Mul<KilowattHourRate> for KilowattHours {
    type Output = Cost;

    fn mul(self, rhs: KilowattHourRate) -> Self::Output {
        Cost(self.0 * rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::quantity::rate::UNIT_RATE;

    #[test]
    fn test_mul_rate() {
        assert_abs_diff_eq!((KilowattHours(2.5) * UNIT_RATE).0, 12.5);
    }

    #[test]
    fn test_sum() {
        let total: KilowattHours = [KilowattHours(1.5), KilowattHours(2.0)].into_iter().sum();
        assert_abs_diff_eq!(total.0, 3.5);
    }
}
