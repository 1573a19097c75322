//! Core units, constants, and shared primitives for the drone mission simulator workspace.

use thiserror::Error;

/// Simulation constants shared by the power, battery, and integration models.
pub mod constants {
    /// Simulated seconds advanced per integration step (batch and live alike).
    pub const STEP_SECONDS: f64 = 1.0;
    /// Safety cap on simulated time for a batch run (3 hours).
    pub const SAFETY_CAP_SECONDS: f64 = 3.0 * 3_600.0;
    /// Lower bound on instantaneous power draw (W).
    pub const MIN_POWER_W: f64 = 50.0;
    /// Accepted initial battery charge range (percent).
    pub const INITIAL_BATTERY_MIN_PCT: f64 = 10.0;
    pub const INITIAL_BATTERY_MAX_PCT: f64 = 100.0;
    /// Accepted battery health range (fraction of nominal capacity).
    pub const HEALTH_MIN: f64 = 0.5;
    pub const HEALTH_MAX: f64 = 1.0;
    /// Speed floor used when deriving live elapsed time from distance (m/s).
    pub const LIVE_SPEED_FLOOR_M_S: f64 = 0.1;
    /// Seconds per hour, used for watt to watt-hour conversion.
    pub const SECONDS_PER_HOUR: f64 = 3_600.0;
}

/// Basic unit conversion helpers.
pub mod units {
    /// Convert kilometres to metres.
    #[inline]
    pub fn km_to_m(v: f64) -> f64 {
        v * 1_000.0
    }

    /// Convert metres to kilometres.
    #[inline]
    pub fn m_to_km(v: f64) -> f64 {
        v / 1_000.0
    }

    /// Convert seconds to minutes.
    #[inline]
    pub fn seconds_to_minutes(seconds: f64) -> f64 {
        seconds / 60.0
    }
}

/// Clamp `value` into `[min, max]`.
///
/// Unlike [`f64::clamp`] this never panics on a malformed range; `min` wins when the bounds cross.
#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    min.max(max.min(value))
}

/// Errors raised by the numeric models when their inputs cannot produce a meaningful answer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("parameter `{name}` must be finite (got {value})")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("parameter `{name}` resolves to a non-positive value ({value})")]
    DegenerateConfiguration { name: &'static str, value: f64 },
}

/// Reject NaN and infinite inputs with [`ModelError::InvalidParameter`].
#[inline]
pub fn ensure_finite(name: &'static str, value: f64) -> Result<f64, ModelError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ModelError::InvalidParameter { name, value })
    }
}

/// Reject values that are zero or negative with [`ModelError::DegenerateConfiguration`].
#[inline]
pub fn ensure_positive(name: &'static str, value: f64) -> Result<f64, ModelError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ModelError::DegenerateConfiguration { name, value })
    }
}
