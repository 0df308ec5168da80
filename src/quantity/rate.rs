quantity!(
    /// Rupees per kilowatt-hour.
    KilowattHourRate,
    suffix: "₹/kWh",
    precision: 2
);

/// Flat tariff applied to every kilowatt-hour, in costs, forecasts, rewards and appliances alike.
pub const UNIT_RATE: KilowattHourRate = KilowattHourRate(5.0);
