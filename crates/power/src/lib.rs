//! Instantaneous power-draw estimate for a small multirotor.
//!
//! The model is a sum of independent penalty terms on top of the vehicle's baseline draw:
//!
//! P = P_base + 0.6·v³ + 10·m_payload + P_wind + 0.02·h + 1.5·(10 − T)⁺
//!
//! with the total floored at [`MIN_POWER_W`]. It is tuned for intuition, not accuracy.

use drone_core::constants::MIN_POWER_W;
use drone_core::{ModelError, ensure_finite};
use drone_model::{Environment, MissionPlan, WindDirection};

const AERO_COEFF: f64 = 0.6;
const PAYLOAD_W_PER_KG: f64 = 10.0;
const HEADWIND_W_PER_M_S: f64 = 6.0;
const CROSSWIND_W_PER_M_S: f64 = 2.0;
const TAILWIND_W_PER_M_S: f64 = -3.0;
const ALTITUDE_W_PER_M: f64 = 0.02;
const COLD_THRESHOLD_C: f64 = 10.0;
const COLD_W_PER_DEG: f64 = 1.5;

/// Flight and weather conditions feeding a single power estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerInputs {
    pub speed_m_s: f64,
    pub altitude_m: f64,
    pub payload_kg: f64,
    pub wind_speed_m_s: f64,
    pub wind_direction: WindDirection,
    pub temperature_c: f64,
}

impl PowerInputs {
    /// Gather the inputs from a mission and its environment.
    pub fn from_conditions(mission: &MissionPlan, environment: &Environment) -> Self {
        Self {
            speed_m_s: mission.speed_m_s,
            altitude_m: mission.altitude_m,
            payload_kg: mission.payload_kg,
            wind_speed_m_s: environment.wind_speed_m_s,
            wind_direction: environment.wind_direction,
            temperature_c: environment.temperature_c,
        }
    }

    fn validate(&self) -> Result<(), ModelError> {
        ensure_finite("speed_m_s", self.speed_m_s)?;
        ensure_finite("altitude_m", self.altitude_m)?;
        ensure_finite("payload_kg", self.payload_kg)?;
        ensure_finite("wind_speed_m_s", self.wind_speed_m_s)?;
        ensure_finite("temperature_c", self.temperature_c)?;
        Ok(())
    }
}

/// Individual contributions to the power estimate (W), before the floor is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerBreakdown {
    pub baseline_w: f64,
    pub aerodynamic_w: f64,
    pub payload_w: f64,
    pub wind_w: f64,
    pub altitude_w: f64,
    pub temperature_w: f64,
}

impl PowerBreakdown {
    /// Sum of all terms without the floor.
    pub fn raw_total_w(&self) -> f64 {
        self.baseline_w
            + self.aerodynamic_w
            + self.payload_w
            + self.wind_w
            + self.altitude_w
            + self.temperature_w
    }

    /// Sum of all terms, floored at [`MIN_POWER_W`].
    pub fn total_w(&self) -> f64 {
        self.raw_total_w().max(MIN_POWER_W)
    }
}

/// Wind contribution per m/s of wind for a given direction.
pub fn wind_coefficient(direction: WindDirection) -> f64 {
    match direction {
        WindDirection::Headwind => HEADWIND_W_PER_M_S,
        WindDirection::Crosswind => CROSSWIND_W_PER_M_S,
        WindDirection::Tailwind => TAILWIND_W_PER_M_S,
        WindDirection::Unrecognized => 0.0,
    }
}

/// Compute each term of the power model.
///
/// Each term must stay finite; a finite input large enough to overflow its term is reported as
/// that input.
pub fn power_breakdown(
    baseline_power_w: f64,
    inputs: &PowerInputs,
) -> Result<PowerBreakdown, ModelError> {
    ensure_finite("baseline_power_w", baseline_power_w)?;
    inputs.validate()?;

    let speed = inputs.speed_m_s.max(0.0);
    let altitude_w = if inputs.altitude_m > 0.0 {
        ALTITUDE_W_PER_M * inputs.altitude_m
    } else {
        0.0
    };
    let temperature_w = if inputs.temperature_c < COLD_THRESHOLD_C {
        COLD_W_PER_DEG * (COLD_THRESHOLD_C - inputs.temperature_c)
    } else {
        0.0
    };

    let breakdown = PowerBreakdown {
        baseline_w: baseline_power_w,
        aerodynamic_w: term("speed_m_s", inputs.speed_m_s, AERO_COEFF * speed.powi(3))?,
        payload_w: term(
            "payload_kg",
            inputs.payload_kg,
            PAYLOAD_W_PER_KG * inputs.payload_kg.max(0.0),
        )?,
        wind_w: term(
            "wind_speed_m_s",
            inputs.wind_speed_m_s,
            wind_coefficient(inputs.wind_direction) * inputs.wind_speed_m_s,
        )?,
        altitude_w: term("altitude_m", inputs.altitude_m, altitude_w)?,
        temperature_w: term("temperature_c", inputs.temperature_c, temperature_w)?,
    };
    ensure_finite("power_w", breakdown.raw_total_w())?;
    Ok(breakdown)
}

fn term(input: &'static str, input_value: f64, watts: f64) -> Result<f64, ModelError> {
    if watts.is_finite() {
        Ok(watts)
    } else {
        Err(ModelError::InvalidParameter {
            name: input,
            value: input_value,
        })
    }
}

/// Estimate instantaneous power draw (W). Always finite and at least [`MIN_POWER_W`] on success.
pub fn estimate_power(baseline_power_w: f64, inputs: &PowerInputs) -> Result<f64, ModelError> {
    Ok(power_breakdown(baseline_power_w, inputs)?.total_w())
}
