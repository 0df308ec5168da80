use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    appliance::{Appliance, HourlyPoint},
    core::{
        Alert,
        Comparison,
        DayRecord,
        Forecast,
        Redemption,
        Rewards,
        Summary,
        comparison::ChartPoint,
        summary::Trend,
    },
    quantity::{cost::Cost, energy::KilowattHours},
    session::{AuthState, Route},
};

fn new_table<H: ToString>(header: impl IntoIterator<Item = H>) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table.set_header(header.into_iter().map(|title| Cell::new(title).add_attribute(Attribute::Bold)));
    table
}

fn right(content: impl ToString) -> Cell {
    Cell::new(content).set_alignment(CellAlignment::Right)
}

fn optional(value: Option<impl ToString>) -> Cell {
    value.map_or_else(|| Cell::new("n/a").add_attribute(Attribute::Dim), right)
}

#[must_use]
pub fn build_summary_table(summary: &Summary) -> Table {
    let mut table = new_table(["Total consumption", "Total cost", "Days", "Daily average", "Daily cost"]);
    table.add_row(vec![
        right(summary.total_consumption),
        right(summary.total_cost),
        right(summary.days_completed),
        right(summary.daily_average_consumption),
        right(summary.daily_average_cost),
    ]);
    table
}

#[must_use]
pub fn build_days_table(days: &[(&DayRecord, Option<Trend>)]) -> Table {
    let mut table = new_table(["Date", "Consumption", "Cost", "Trend"]);
    for (record, trend) in days {
        table.add_row(vec![
            Cell::new(record.date.format("%a %d %b")),
            optional(record.consumption()),
            optional(record.cost()),
            match trend {
                Some(Trend::Saved) => Cell::new("saved").fg(Color::Green),
                Some(Trend::Increased) => Cell::new("increased").fg(Color::Red),
                None => Cell::new(""),
            },
        ]);
    }
    table
}

#[must_use]
pub fn build_forecast_table(forecast: &Forecast) -> Table {
    let mut table = new_table([
        "Days left",
        "Forecast",
        "Forecast cost",
        "Budget",
        "Savings needed",
    ]);
    let status_color = if forecast.is_over_budget { Color::Red } else { Color::Green };
    table.add_row(vec![
        right(forecast.days_remaining),
        right(forecast.forecasted_total_consumption),
        right(forecast.forecasted_total_cost).fg(status_color),
        right(forecast.budget).add_attribute(Attribute::Dim),
        right(format!("{} / day", forecast.daily_savings_needed)).fg(
            if forecast.daily_savings_needed > KilowattHours::ZERO {
                Color::DarkYellow
            } else {
                Color::Reset
            },
        ),
    ]);
    table
}

#[must_use]
pub fn build_comparison_table(comparison: &Comparison) -> Table {
    let mut table = new_table([
        "Days",
        comparison.current_month.name(),
        comparison.previous_month.name(),
        "Saved",
        "Money saved",
        "Change",
    ]);
    let color = if comparison.energy_saved >= KilowattHours::ZERO { Color::Green } else { Color::Red };
    table.add_row(vec![
        right(comparison.days_compared),
        right(comparison.current_consumption.round()),
        right(comparison.previous_consumption.round()),
        right(comparison.energy_saved).fg(color),
        right(comparison.money_saved).fg(color),
        right(format!("{}%", comparison.savings_percentage)).fg(color),
    ]);
    table
}

#[must_use]
pub fn build_chart_table(points: &[ChartPoint]) -> Table {
    let mut table = new_table(["Day", "This month", "Last month"]);
    for point in points {
        let color = match (point.current, point.previous) {
            (Some(current), Some(previous)) if current < previous => Color::Green,
            (Some(current), Some(previous)) if current > previous => Color::Red,
            _ => Color::Reset,
        };
        table.add_row(vec![right(point.day), optional(point.current).fg(color), optional(point.previous)]);
    }
    table
}

#[must_use]
pub fn build_rewards_table(rewards: &Rewards, points_goal: u32) -> Table {
    let mut table = new_table(["Points", "To goal", "Streak", "Energy saved", "Money saved"]);
    table.add_row(vec![
        right(rewards.reward_points).add_attribute(Attribute::Bold),
        right(rewards.points_to_goal(points_goal)),
        right(format!("{} days", rewards.consecutive_saving_days)),
        right(rewards.energy_saved),
        right(rewards.money_saved),
    ]);
    table
}

#[must_use]
pub fn build_badges_table(rewards: &Rewards) -> Table {
    let mut table = new_table(["Badge", "Description", "Achieved"]);
    for badge in &rewards.badges {
        let (mark, color) = if badge.achieved { ("yes", Color::Green) } else { ("no", Color::DarkGrey) };
        table.add_row(vec![
            Cell::new(badge.name).fg(color),
            Cell::new(badge.description).add_attribute(Attribute::Dim),
            Cell::new(mark).fg(color),
        ]);
    }
    table
}

#[must_use]
pub fn build_redemptions_table(reward_points: u32) -> Table {
    let mut table = new_table(["Points", "Reward", "Available"]);
    for redemption in Redemption::CATALOG {
        let available = redemption.is_available(reward_points);
        table.add_row(vec![
            right(redemption.points),
            Cell::new(redemption.description),
            Cell::new(if available { "yes" } else { "no" }).fg(if available {
                Color::Green
            } else {
                Color::DarkGrey
            }),
        ]);
    }
    table
}

#[must_use]
pub fn build_alerts_table(alerts: &[Alert]) -> Table {
    let mut table = new_table(["Level", "Alert", "Details"]);
    for alert in alerts {
        table.add_row(vec![
            Cell::new(format!("{:?}", alert.level)).fg(alert.level.color()),
            Cell::new(alert.title).add_attribute(Attribute::Bold),
            Cell::new(&alert.description),
        ]);
    }
    table
}

#[must_use]
pub fn build_appliances_table(appliances: &[&Appliance]) -> Table {
    let mut table = new_table(["#", "Appliance", "Power", "Usage", "Daily", "Monthly", "Cost", "Share"]);
    for appliance in appliances {
        table.add_row(vec![
            right(appliance.id).add_attribute(Attribute::Dim),
            Cell::new(&appliance.name),
            right(appliance.wattage),
            right(format!("{} / day", appliance.daily_usage_hours)),
            right(format!("{:.2} kWh", appliance.daily_energy.0)),
            right(format!("{:.2} kWh", appliance.monthly_energy.0)),
            right(appliance.monthly_cost).fg(if appliance.monthly_cost >= Cost(500.0) {
                Color::Red
            } else {
                Color::Reset
            }),
            right(format!("{:.1}%", appliance.percent_of_total)),
        ]);
    }
    table
}

#[must_use]
pub fn build_load_curve_table(curve: &[HourlyPoint]) -> Table {
    let peak = curve.iter().map(|point| point.consumption).max().unwrap_or(KilowattHours::ZERO);
    let mut table = new_table(["Hour", "Consumption"]);
    for point in curve {
        let color = if point.consumption <= KilowattHours::ZERO {
            Color::DarkGrey
        } else if point.consumption >= peak * 0.75 {
            Color::Red
        } else {
            Color::Reset
        };
        table.add_row(vec![
            Cell::new(format!("{:02}:00", point.hour)),
            right(format!("{:.3} kWh", point.consumption.0)).fg(color),
        ]);
    }
    table
}

#[must_use]
pub fn build_route_table(requested: Route, resolved: Route, auth_state: &AuthState) -> Table {
    let mut table = new_table(["Requested", "Resolved", "Signed in as"]);
    let signed_in_as = auth_state.identity.as_ref().map_or_else(
        || Cell::new("nobody").add_attribute(Attribute::Dim),
        |identity| Cell::new(identity.email.as_deref().unwrap_or(&identity.username)),
    );
    table.add_row(vec![
        Cell::new(requested),
        Cell::new(resolved).fg(if requested == resolved { Color::Reset } else { Color::DarkYellow }),
        signed_in_as,
    ]);
    table
}
