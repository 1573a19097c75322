//! Battery depletion model: converts a power draw into percent of charge lost per second.

use drone_core::constants::{HEALTH_MAX, HEALTH_MIN, SECONDS_PER_HOUR};
use drone_core::{ModelError, clamp, ensure_finite, ensure_positive};

/// Clamp a health fraction into the supported `[0.5, 1.0]` range.
#[inline]
pub fn clamp_health(health: f64) -> f64 {
    clamp(health, HEALTH_MIN, HEALTH_MAX)
}

/// Usable energy (Wh) once pack degradation is applied.
pub fn usable_capacity_wh(nominal_capacity_wh: f64, health: f64) -> Result<f64, ModelError> {
    let nominal = ensure_finite("capacity_wh", nominal_capacity_wh)?;
    let health = clamp_health(ensure_finite("battery_health", health)?);
    ensure_positive("capacity_wh", nominal)?;
    ensure_positive("battery_health", health)?;
    ensure_positive("usable_capacity_wh", nominal * health)
}

/// Percent of charge consumed per second at `power_w`.
///
/// `health` is clamped before use regardless of what the caller passes.
pub fn percent_drop_per_second(
    power_w: f64,
    nominal_capacity_wh: f64,
    health: f64,
) -> Result<f64, ModelError> {
    let power_w = ensure_finite("power_w", power_w)?;
    let usable_wh = usable_capacity_wh(nominal_capacity_wh, health)?;
    let wh_per_second = power_w / SECONDS_PER_HOUR;
    Ok(wh_per_second / usable_wh * 100.0)
}
