pub mod category;
pub mod load_curve;
pub mod registry;

pub use self::{
    category::{ApplianceCategory, UsagePattern},
    load_curve::{HourlyPoint, generate_load_curve},
    registry::{Appliance, ApplianceRejection, Field, NewAppliance, Registry},
};
