mod analytics;
mod appliances;
mod route;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use comfy_table::Table;
use rand::{SeedableRng, rngs::StdRng};
use serde::Serialize;

pub use self::{
    analytics::{AlertsArgs, ForecastArgs, RewardsArgs},
    appliances::{AppliancesArgs, LoadCurveArgs},
    route::RouteArgs,
};
use crate::prelude::*;

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    /// Seed for the synthetic readings, for reproducible output.
    #[clap(long, env = "KILOWATTAGE_SEED", global = true)]
    pub seed: Option<u64>,

    /// Pretend today is the given date (`YYYY-MM-DD`).
    #[clap(long, env = "KILOWATTAGE_TODAY", global = true)]
    pub today: Option<NaiveDate>,

    /// Print JSON instead of tables.
    #[clap(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// This month's totals and the daily breakdown.
    #[clap(name = "summary")]
    Summary,

    /// Project the month-end consumption and check it against the budget.
    #[clap(name = "forecast")]
    Forecast(ForecastArgs),

    /// Compare this month with the previous one.
    #[clap(name = "compare")]
    Compare,

    /// Reward points, badges, and redeemable rewards.
    #[clap(name = "rewards")]
    Rewards(RewardsArgs),

    /// Budget and daily consumption notices.
    #[clap(name = "alerts")]
    Alerts(AlertsArgs),

    /// List the appliances, optionally adding a new one.
    #[clap(name = "appliances")]
    Appliances(Box<AppliancesArgs>),

    /// Typical hourly consumption of an appliance.
    #[clap(name = "load-curve")]
    LoadCurve(Box<LoadCurveArgs>),

    /// Resolve a page route for a session.
    #[clap(name = "route")]
    Route(Box<RouteArgs>),
}

impl Args {
    pub fn run(self) -> Result {
        let mut invocation = Invocation {
            today: self.today.unwrap_or_else(|| Local::now().date_naive()),
            rng: self.seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64),
            json: self.json,
        };
        debug!(today = %invocation.today, seed = ?self.seed, "running");
        match self.command {
            Command::Summary => analytics::summary(&mut invocation),
            Command::Forecast(args) => analytics::forecast(&mut invocation, &args),
            Command::Compare => analytics::compare(&mut invocation),
            Command::Rewards(args) => analytics::rewards(&mut invocation, &args),
            Command::Alerts(args) => analytics::alerts(&mut invocation, &args),
            Command::Appliances(args) => appliances::appliances(&invocation, &args),
            Command::LoadCurve(args) => appliances::load_curve(&mut invocation, &args),
            Command::Route(args) => route::route(&invocation, &args),
        }
    }
}

/// Per-run state shared by the commands.
pub struct Invocation {
    pub today: NaiveDate,
    pub rng: StdRng,
    pub json: bool,
}

impl Invocation {
    /// Print either the JSON representation or the rendered tables.
    pub fn emit(&self, value: &impl Serialize, tables: impl FnOnce() -> Vec<Table>) -> Result {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value).context("failed to serialize the output")?);
        } else {
            for table in tables() {
                println!("{table}");
            }
        }
        Ok(())
    }
}
