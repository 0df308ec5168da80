use enumset::{EnumSet, EnumSetType};
use itertools::Itertools;
use serde::Serialize;

use crate::{
    core::{
        comparison::Comparison,
        series::{DayRecord, MonthSeries},
        summary::Summary,
    },
    prelude::*,
    quantity::{cost::Cost, energy::KilowattHours},
};

/// Month-to-date spending below which the budget badge is granted, regardless of the user budget.
pub const BUDGET_MASTER_THRESHOLD: Cost = Cost(3000.0);

/// Saving streak length which earns the consistency badge.
pub const CONSISTENT_SAVER_STREAK: u32 = 7;

/// Share of the previous month's consumption to save for the eco badge.
pub const ECO_WARRIOR_SHARE: f64 = 0.10;

pub const DEFAULT_POINTS_GOAL: u32 = 100;

#[derive(Debug, Serialize, EnumSetType)]
#[serde(rename_all = "kebab-case")]
pub enum BadgeKind {
    BudgetMaster,
    DailySaver,
    ConsistentSaver,
    EcoWarrior,
}

impl BadgeKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::BudgetMaster => "Budget Master",
            Self::DailySaver => "Daily Saver",
            Self::ConsistentSaver => "Consistent Saver",
            Self::EcoWarrior => "Eco Warrior",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::BudgetMaster => "Stay under the monthly budget",
            Self::DailySaver => "Save energy compared to yesterday",
            Self::ConsistentSaver => "Save energy for 7 continuous days",
            Self::EcoWarrior => "Save at least 10% energy compared to last month",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Badge {
    #[serde(rename = "id")]
    pub kind: BadgeKind,

    pub name: &'static str,
    pub description: &'static str,
    pub achieved: bool,
}

impl Badge {
    pub const fn new(kind: BadgeKind, achieved: bool) -> Self {
        Self { kind, name: kind.name(), description: kind.description(), achieved }
    }
}

/// Something the reward points can be exchanged for.
#[derive(Copy, Clone, Debug, Serialize)]
pub struct Redemption {
    pub points: u32,
    pub description: &'static str,
}

impl Redemption {
    pub const CATALOG: [Self; 3] = [
        Self { points: 50, description: "₹50 discount on the next energy bill" },
        Self { points: 100, description: "₹100 discount on the next energy bill" },
        Self { points: 200, description: "Smart power strip to reduce standby power" },
    ];

    pub const fn is_available(self, reward_points: u32) -> bool {
        reward_points >= self.points
    }
}

#[must_use]
#[derive(Clone, Debug, Serialize)]
pub struct Rewards {
    pub energy_saved: KilowattHours,
    pub money_saved: Cost,

    /// One point per whole kilowatt-hour saved.
    pub reward_points: u32,

    /// Longest run of day-over-day decreases within the compared days.
    pub consecutive_saving_days: u32,

    pub badges: Vec<Badge>,
}

impl Rewards {
    #[instrument(skip_all, fields(current = %current.month, previous = %previous.month))]
    pub fn new(current: &MonthSeries, previous: &MonthSeries) -> Self {
        let comparison = Comparison::new(current, previous);
        let energy_saved = comparison.exact_energy_saved();
        let consecutive_saving_days =
            longest_saving_streak(current.days(), comparison.days_compared as usize);

        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let reward_points = energy_saved.0.round().max(0.0) as u32;

        let mut achieved = EnumSet::<BadgeKind>::empty();
        if Summary::from(current).total_cost < BUDGET_MASTER_THRESHOLD {
            achieved.insert(BadgeKind::BudgetMaster);
        }
        if saved_since_yesterday(current.days()) {
            achieved.insert(BadgeKind::DailySaver);
        }
        if consecutive_saving_days >= CONSISTENT_SAVER_STREAK {
            achieved.insert(BadgeKind::ConsistentSaver);
        }
        if energy_saved > KilowattHours::ZERO
            && energy_saved / comparison.previous_consumption > ECO_WARRIOR_SHARE
        {
            achieved.insert(BadgeKind::EcoWarrior);
        }
        debug!(reward_points, consecutive_saving_days, ?achieved, "scored");

        Self {
            energy_saved: comparison.energy_saved,
            money_saved: comparison.money_saved,
            reward_points,
            consecutive_saving_days,
            badges: EnumSet::<BadgeKind>::all()
                .iter()
                .map(|kind| Badge::new(kind, achieved.contains(kind)))
                .collect(),
        }
    }

    pub fn achieved(&self) -> EnumSet<BadgeKind> {
        self.badges.iter().filter(|badge| badge.achieved).map(|badge| badge.kind).collect()
    }

    pub const fn points_to_goal(&self, goal: u32) -> u32 {
        goal.saturating_sub(self.reward_points)
    }
}

/// Longest run of strict day-over-day decreases among the first `n_days` raw records.
///
/// An absent day on either side of a pair breaks the run.
fn longest_saving_streak(days: &[DayRecord], n_days: usize) -> u32 {
    let mut streak = 0;
    let mut longest = 0;
    for (yesterday, today) in days.iter().take(n_days).tuple_windows() {
        match (yesterday.consumption(), today.consumption()) {
            (Some(yesterday), Some(today)) if today < yesterday => {
                streak += 1;
                longest = longest.max(streak);
            }
            _ => streak = 0,
        }
    }
    longest
}

/// Whether the last raw record is lower than the one before it. Absent days never count.
fn saved_since_yesterday(days: &[DayRecord]) -> bool {
    match days {
        [.., yesterday, today] => matches!(
            (yesterday.consumption(), today.consumption()),
            (Some(yesterday), Some(today)) if today < yesterday
        ),
        _ => false,
    }
}
