#[macro_use]
mod macros;

pub mod cost;
pub mod energy;
pub mod power;
pub mod rate;
pub mod time;

/// Round half away from zero to the given number of decimal places.
///
/// Negative zero is normalised to zero, so that `-0.04` does not render as `-0.0`.
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10_f64.powi(decimals);
    (value * scale).round() / scale + 0.0
}
