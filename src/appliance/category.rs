use serde::Serialize;

use crate::core::random::RandomSource;

/// Appliance kind with its own time-of-use habits.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApplianceCategory {
    /// Afternoon and evening cooling.
    AirConditioner,

    /// Runs around the clock, busier around meals.
    Refrigerator,

    /// Evening viewing.
    Television,

    /// Morning and evening hot water.
    WaterHeater,

    /// Either a morning or an evening load.
    WashingMachine,

    /// Working hours.
    Computer,

    /// Afternoon and night.
    Fan,

    /// Anything not recognised by name.
    Generic,
}

impl ApplianceCategory {
    /// Resolve the category by the case-insensitive appliance name.
    pub fn resolve(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "air conditioner" => Self::AirConditioner,
            "refrigerator" => Self::Refrigerator,
            "led tv" | "tv" => Self::Television,
            "water heater" => Self::WaterHeater,
            "washing machine" => Self::WashingMachine,
            "laptop" | "computer" => Self::Computer,
            "ceiling fan" | "fan" => Self::Fan,
            _ => Self::Generic,
        }
    }

    /// Usage pattern of the category. Washing machines toss a coin between morning and evening.
    pub fn usage_pattern(self, rng: &mut impl RandomSource) -> UsagePattern {
        match self {
            Self::AirConditioner => UsagePattern::new(12, &[14, 15, 16, 17, 18, 19]),
            Self::Refrigerator => UsagePattern::new(0, &[7, 8, 12, 13, 18, 19]),
            Self::Television => UsagePattern::new(18, &[19, 20, 21]),
            Self::WaterHeater => UsagePattern::new(6, &[7, 8, 19, 20]),
            Self::WashingMachine => {
                if rng.coin_flip() {
                    UsagePattern::new(8, &[9, 10])
                } else {
                    UsagePattern::new(18, &[19, 20])
                }
            }
            Self::Computer => UsagePattern::new(9, &[10, 11, 14, 15, 16]),
            Self::Fan => UsagePattern::new(13, &[14, 15, 16, 22, 23]),
            Self::Generic => UsagePattern::new(8, &[9, 10, 18, 19]),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct UsagePattern {
    /// Hour of the day when the appliance is switched on.
    pub start_hour: u32,

    pub peak_hours: &'static [u32],
}

impl UsagePattern {
    pub const fn new(start_hour: u32, peak_hours: &'static [u32]) -> Self {
        Self { start_hour, peak_hours }
    }

    pub fn is_peak(&self, hour: u32) -> bool {
        self.peak_hours.contains(&hour)
    }

    /// Whether the hour falls into the window of `n_hours` starting at the start hour,
    /// wrapping around midnight.
    pub const fn is_active(&self, hour: u32, n_hours: u32) -> bool {
        (hour + 24 - self.start_hour) % 24 < n_hours
    }
}
