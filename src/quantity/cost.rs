use std::ops::Div;

use crate::quantity::{energy::KilowattHours, rate::KilowattHourRate};

quantity!(
    /// Money in Indian rupees.
    Cost,
    suffix: "₹",
    precision: 2
);

impl Div<KilowattHourRate> for Cost {
    type Output = KilowattHours;

    fn div(self, rhs: KilowattHourRate) -> Self::Output {
        KilowattHours(self.0 / rhs.0)
    }
}
