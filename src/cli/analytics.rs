use clap::Parser;
use serde_json::json;

use crate::{
    cli::Invocation,
    core::{
        Comparison,
        Forecast,
        MonthPair,
        Rewards,
        Summary,
        derive_alerts,
        forecast::{DEFAULT_BUDGET, DEFAULT_MONTH_LENGTH},
        rewards::DEFAULT_POINTS_GOAL,
        summary::daily_trends,
    },
    prelude::*,
    quantity::cost::Cost,
    tables::{
        build_alerts_table,
        build_badges_table,
        build_chart_table,
        build_comparison_table,
        build_days_table,
        build_forecast_table,
        build_redemptions_table,
        build_rewards_table,
        build_summary_table,
    },
};

#[derive(Copy, Clone, Parser)]
pub struct BudgetArgs {
    /// Monthly budget in rupees.
    #[clap(long = "budget", env = "MONTHLY_BUDGET", default_value_t = DEFAULT_BUDGET.0)]
    pub budget: f64,

    /// Number of days the projection spans.
    #[clap(long, env = "MONTH_LENGTH", default_value_t = DEFAULT_MONTH_LENGTH)]
    pub month_length: u32,
}

impl BudgetArgs {
    fn forecast(self, pair: &MonthPair) -> Result<Forecast> {
        ensure!(self.month_length > 0, "month length must be positive");
        ensure!(self.budget.is_finite() && self.budget >= 0.0, "budget must be a non-negative amount");
        Ok(Forecast::builder()
            .series(&pair.current)
            .month_length(self.month_length)
            .budget(Cost(self.budget))
            .build())
    }
}

#[derive(Copy, Clone, Parser)]
pub struct ForecastArgs {
    #[clap(flatten)]
    pub budget: BudgetArgs,
}

#[derive(Copy, Clone, Parser)]
pub struct AlertsArgs {
    #[clap(flatten)]
    pub budget: BudgetArgs,
}

#[derive(Copy, Clone, Parser)]
pub struct RewardsArgs {
    /// Reward points to aim for.
    #[clap(long, env = "POINTS_GOAL", default_value_t = DEFAULT_POINTS_GOAL)]
    pub points_goal: u32,
}

fn generate(invocation: &mut Invocation) -> Result<MonthPair> {
    MonthPair::generate(invocation.today, &mut invocation.rng).context("failed to generate the readings")
}

#[instrument(skip_all)]
pub fn summary(invocation: &mut Invocation) -> Result {
    let pair = generate(invocation)?;
    let summary = Summary::from(&pair.current);
    let days = daily_trends(&pair.current);
    info!(month = %pair.current.month, days_completed = summary.days_completed, "summarized");
    invocation.emit(&json!({ "month": pair.current.month, "summary": summary, "days": pair.current.days() }), || {
        vec![build_summary_table(&summary), build_days_table(&days)]
    })
}

#[instrument(skip_all)]
pub fn forecast(invocation: &mut Invocation, args: &ForecastArgs) -> Result {
    let pair = generate(invocation)?;
    let forecast = args.budget.forecast(&pair)?;
    if forecast.is_over_budget {
        warn!(overrun = %forecast.budget_overrun(), "over budget");
    }
    invocation.emit(&forecast, || vec![build_summary_table(&forecast.summary), build_forecast_table(&forecast)])
}

#[instrument(skip_all)]
pub fn compare(invocation: &mut Invocation) -> Result {
    let pair = generate(invocation)?;
    let comparison = Comparison::new(&pair.current, &pair.previous);
    info!(days_compared = comparison.days_compared, energy_saved = %comparison.energy_saved, "compared");
    invocation.emit(&comparison, || {
        vec![build_comparison_table(&comparison), build_chart_table(&comparison.chart)]
    })
}

#[instrument(skip_all)]
pub fn rewards(invocation: &mut Invocation, args: &RewardsArgs) -> Result {
    let pair = generate(invocation)?;
    let rewards = Rewards::new(&pair.current, &pair.previous);
    let points_to_goal = rewards.points_to_goal(args.points_goal);
    invocation.emit(
        &json!({ "rewards": rewards, "pointsGoal": args.points_goal, "pointsToGoal": points_to_goal }),
        || {
            vec![
                build_rewards_table(&rewards, args.points_goal),
                build_badges_table(&rewards),
                build_redemptions_table(rewards.reward_points),
            ]
        },
    )
}

#[instrument(skip_all)]
pub fn alerts(invocation: &mut Invocation, args: &AlertsArgs) -> Result {
    let pair = generate(invocation)?;
    let forecast = args.budget.forecast(&pair)?;
    let alerts = derive_alerts(&forecast, &pair.current);
    invocation.emit(&alerts, || vec![build_alerts_table(&alerts)])
}
