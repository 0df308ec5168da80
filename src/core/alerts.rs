use comfy_table::Color;
use serde::Serialize;

use crate::core::{forecast::Forecast, series::MonthSeries};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlertLevel {
    Warning,
    Info,
    Success,
}

impl AlertLevel {
    pub const fn color(self) -> Color {
        match self {
            Self::Warning => Color::DarkYellow,
            Self::Info => Color::Cyan,
            Self::Success => Color::Green,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub title: &'static str,
    pub description: String,
}

/// Dashboard notices: projected budget overrun, the latest day-over-day change, and the daily report.
pub fn derive_alerts(forecast: &Forecast, series: &MonthSeries) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if forecast.is_over_budget {
        alerts.push(Alert {
            level: AlertLevel::Warning,
            title: "Budget alert",
            description: format!(
                "You are projected to exceed your monthly budget of {} by {}. \
                 Try to save {} per day to stay under budget.",
                forecast.budget,
                forecast.budget_overrun(),
                forecast.daily_savings_needed,
            ),
        });
    }

    let mut latest = series.completed().rev();
    if let (Some(today), Some(yesterday)) = (latest.next(), latest.next()) {
        alerts.push(if today.consumption > yesterday.consumption {
            Alert {
                level: AlertLevel::Info,
                title: "Consumption increase",
                description: format!(
                    "Today's consumption ({}) is higher than yesterday ({}).",
                    today.consumption, yesterday.consumption,
                ),
            }
        } else {
            Alert {
                level: AlertLevel::Success,
                title: "Good job!",
                description: format!(
                    "You used less energy today ({}) compared to yesterday ({}).",
                    today.consumption, yesterday.consumption,
                ),
            }
        });
    }

    alerts.push(Alert {
        level: AlertLevel::Info,
        title: "Daily report",
        description: "Your daily consumption report is now available.".to_owned(),
    });

    alerts
}
