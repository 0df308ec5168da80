use std::ops::Mul;

use crate::quantity::{energy::KilowattHours, time::Hours};

quantity!(Watts, suffix: "W", precision: 0);

impl Mul<Hours> for Watts {
    type Output = KilowattHours;

    fn mul(self, rhs: Hours) -> Self::Output {
        KilowattHours(self.0 * rhs.0 * 0.001)
    }
}
