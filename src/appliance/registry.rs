use std::cmp::Reverse;

use derive_more::{Display, Error};
use itertools::Itertools;
use serde::Serialize;

use crate::{
    appliance::{category::ApplianceCategory, generate_load_curve, load_curve::HourlyPoint},
    core::random::RandomSource,
    prelude::*,
    quantity::{
        cost::Cost,
        energy::KilowattHours,
        power::Watts,
        rate::UNIT_RATE,
        round_to,
        time::Hours,
    },
};

/// Billing month used for the appliance projections.
pub const DAYS_PER_MONTH: f64 = 30.0;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Appliance {
    pub id: u32,
    pub name: String,
    pub wattage: Watts,
    pub daily_usage_hours: Hours,
    pub daily_energy: KilowattHours,
    pub monthly_energy: KilowattHours,
    pub monthly_cost: Cost,

    /// Share of the registry's monthly energy at the moment the appliance was added.
    pub percent_of_total: f64,
}

impl Appliance {
    pub fn category(&self) -> ApplianceCategory {
        ApplianceCategory::resolve(&self.name)
    }

    /// Synthesize a fresh load curve, different on every call.
    pub fn load_curve(&self, rng: &mut impl RandomSource) -> [HourlyPoint; 24] {
        generate_load_curve(&self.name, self.wattage, self.daily_usage_hours, rng)
    }
}

/// Raw user input, exactly as typed into the form.
#[derive(Clone, Debug, Default)]
pub struct NewAppliance {
    pub name: String,
    pub wattage: String,
    pub hours: String,
}

impl NewAppliance {
    /// Parse and validate the input.
    ///
    /// Numbers are parsed strictly: trailing garbage like `100W` is rejected.
    pub fn validate(&self) -> Result<(&str, Watts, Hours), ApplianceRejection> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ApplianceRejection::MissingField { field: Field::Name });
        }
        let wattage = Watts(parse_positive(&self.wattage, Field::Wattage)?);
        let hours = Hours(parse_positive(&self.hours, Field::Hours)?);
        if hours > Hours::ONE_DAY {
            return Err(ApplianceRejection::InvalidValue { field: Field::Hours });
        }
        Ok((name, wattage, hours))
    }
}

fn parse_positive(value: &str, field: Field) -> Result<f64, ApplianceRejection> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ApplianceRejection::MissingField { field });
    }
    match value.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
        _ => Err(ApplianceRejection::InvalidValue { field }),
    }
}

#[derive(Copy, Clone, Debug, Display, Eq, PartialEq)]
pub enum Field {
    #[display("name")]
    Name,

    #[display("wattage")]
    Wattage,

    #[display("daily usage hours")]
    Hours,
}

#[derive(Copy, Clone, Debug, Display, Error, Eq, PartialEq)]
pub enum ApplianceRejection {
    #[display("please fill in the {field}")]
    MissingField { field: Field },

    #[display("{field} must be a positive number")]
    InvalidValue { field: Field },
}

/// In-memory list of appliances, never persisted.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct Registry(Vec<Appliance>);

impl Registry {
    /// Example appliances with their precomputed figures.
    #[must_use]
    pub fn with_catalog() -> Self {
        let entry = |id, name: &str, wattage, hours, daily, monthly, cost, percent| Appliance {
            id,
            name: name.to_string(),
            wattage: Watts(wattage),
            daily_usage_hours: Hours(hours),
            daily_energy: KilowattHours(daily),
            monthly_energy: KilowattHours(monthly),
            monthly_cost: Cost(cost),
            percent_of_total: percent,
        };
        Self(vec![
            entry(1, "Air Conditioner", 1200.0, 5.0, 6.0, 180.0, 900.0, 40.0),
            entry(2, "Refrigerator", 150.0, 24.0, 3.6, 108.0, 540.0, 24.0),
            entry(3, "LED TV", 100.0, 6.0, 0.6, 18.0, 90.0, 4.0),
            entry(4, "Water Heater", 1500.0, 2.0, 3.0, 90.0, 450.0, 20.0),
            entry(5, "Washing Machine", 500.0, 1.0, 0.5, 15.0, 75.0, 3.3),
            entry(6, "Laptop", 65.0, 8.0, 0.52, 15.6, 78.0, 3.5),
            entry(7, "Ceiling Fan", 75.0, 10.0, 0.75, 22.5, 112.5, 5.0),
        ])
    }

    pub fn appliances(&self) -> &[Appliance] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total_monthly_energy(&self) -> KilowattHours {
        self.0.iter().map(|appliance| appliance.monthly_energy).sum()
    }

    /// Validate and append a new appliance.
    ///
    /// Only the new appliance gets its share computed, the others keep theirs.
    #[instrument(skip_all, fields(name = %new.name))]
    pub fn add(&mut self, new: &NewAppliance) -> Result<Appliance, ApplianceRejection> {
        let (name, wattage, hours) = new.validate()?;

        let daily_energy = wattage * hours;
        let monthly_energy = daily_energy * DAYS_PER_MONTH;
        let monthly_cost = monthly_energy * UNIT_RATE;
        let percent_of_total = monthly_energy / (self.total_monthly_energy() + monthly_energy) * 100.0;

        #[expect(clippy::cast_possible_truncation)]
        let id = self.0.len() as u32 + 1;

        let appliance = Appliance {
            id,
            name: name.to_string(),
            wattage,
            daily_usage_hours: hours,
            daily_energy: daily_energy.round_to(2),
            monthly_energy: monthly_energy.round_to(2),
            monthly_cost: monthly_cost.round_to(2),
            percent_of_total: round_to(percent_of_total, 1),
        };
        info!(id, monthly_energy = %appliance.monthly_energy, "added");
        self.0.push(appliance.clone());
        Ok(appliance)
    }

    /// Find an appliance by its case-insensitive name.
    pub fn find(&self, name: &str) -> Option<&Appliance> {
        let name = name.trim();
        self.0.iter().find(|appliance| appliance.name.eq_ignore_ascii_case(name))
    }

    /// Largest consumers first, stable on ties.
    pub fn top_by_monthly_energy(&self, n: usize) -> Vec<&Appliance> {
        self.0.iter().sorted_by_key(|appliance| Reverse(appliance.monthly_energy)).take(n).collect()
    }

    /// Copy of the registry with every share recomputed against the current total.
    #[must_use]
    pub fn rebalanced(&self) -> Self {
        let total = self.total_monthly_energy();
        Self(
            self.0
                .iter()
                .map(|appliance| Appliance {
                    percent_of_total: if total > KilowattHours::ZERO {
                        round_to(appliance.monthly_energy / total * 100.0, 1)
                    } else {
                        0.0
                    },
                    ..appliance.clone()
                })
                .collect(),
        )
    }
}
