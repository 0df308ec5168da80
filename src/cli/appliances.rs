use clap::Parser;
use itertools::Itertools;
use serde_json::json;

use crate::{
    appliance::{NewAppliance, Registry},
    cli::Invocation,
    prelude::*,
    tables::{build_appliances_table, build_load_curve_table},
};

#[derive(Parser)]
pub struct NewApplianceArgs {
    /// Add an appliance with the given name on top of the catalog.
    #[clap(long = "add", requires = "wattage", requires = "hours")]
    pub name: Option<String>,

    /// Rated power in watts.
    #[clap(long, requires = "name")]
    pub wattage: Option<String>,

    /// Daily usage in hours.
    #[clap(long, requires = "name")]
    pub hours: Option<String>,
}

impl NewApplianceArgs {
    fn to_new_appliance(&self) -> Option<NewAppliance> {
        self.name.as_ref().map(|name| NewAppliance {
            name: name.clone(),
            wattage: self.wattage.clone().unwrap_or_default(),
            hours: self.hours.clone().unwrap_or_default(),
        })
    }
}

#[derive(Parser)]
pub struct AppliancesArgs {
    #[clap(flatten)]
    pub new: NewApplianceArgs,

    /// Only show the given number of the largest consumers.
    #[clap(long)]
    pub top: Option<usize>,

    /// Recompute every appliance's share of the total.
    #[clap(long)]
    pub rebalance: bool,
}

#[derive(Parser)]
pub struct LoadCurveArgs {
    /// Appliance name, looked up in the catalog unless wattage and hours are given.
    pub name: String,

    /// Rated power in watts.
    #[clap(long, requires = "hours")]
    pub wattage: Option<String>,

    /// Daily usage in hours.
    #[clap(long, requires = "wattage")]
    pub hours: Option<String>,
}

#[instrument(skip_all)]
pub fn appliances(invocation: &Invocation, args: &AppliancesArgs) -> Result {
    let mut registry = Registry::with_catalog();
    if let Some(new) = args.new.to_new_appliance() {
        registry.add(&new).context("could not add the appliance")?;
    }
    if args.rebalance {
        registry = registry.rebalanced();
    }
    let appliances = registry.top_by_monthly_energy(args.top.unwrap_or(registry.len()));
    invocation.emit(
        &json!({ "appliances": appliances, "totalMonthlyEnergy": registry.total_monthly_energy() }),
        || vec![build_appliances_table(&appliances)],
    )
}

#[instrument(skip_all, fields(name = %args.name))]
pub fn load_curve(invocation: &mut Invocation, args: &LoadCurveArgs) -> Result {
    let mut registry = Registry::with_catalog();
    let appliance = match (&args.wattage, &args.hours) {
        (Some(wattage), Some(hours)) => {
            let new =
                NewAppliance { name: args.name.clone(), wattage: wattage.clone(), hours: hours.clone() };
            registry.add(&new).context("invalid appliance")?
        }
        _ => registry
            .find(&args.name)
            .with_context(|| {
                let known = registry.appliances().iter().map(|appliance| &appliance.name).join(", ");
                format!("unknown appliance `{}`, known ones: {known}", args.name)
            })?
            .clone(),
    };
    debug!(category = ?appliance.category(), "resolved");
    let curve = appliance.load_curve(&mut invocation.rng);
    invocation.emit(&json!({ "appliance": appliance, "hourly": curve }), || vec![build_load_curve_table(&curve)])
}
