pub mod alerts;
pub mod calendar;
pub mod comparison;
pub mod forecast;
pub mod generator;
pub mod random;
pub mod resolver;
pub mod rewards;
pub mod series;
pub mod summary;

pub use self::{
    alerts::{Alert, AlertLevel, derive_alerts},
    calendar::YearMonth,
    comparison::Comparison,
    forecast::Forecast,
    generator::{Baseline, generate_month},
    random::RandomSource,
    resolver::MonthPair,
    rewards::{Badge, BadgeKind, Redemption, Rewards},
    series::{DayRecord, MonthSeries, Reading},
    summary::Summary,
};
