//! Vehicle, environment, and mission descriptors.
//!
//! These are plain values. They are built once from user input and shared read-only by the power,
//! battery, and integration models; per-run progress lives with the run, never in here.

use drone_core::{ModelError, ensure_finite};

/// Basic vehicle definition used to check mission feasibility.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleProfile {
    pub name: String,
    pub mass_kg: f64,
    /// Nominal usable energy (Wh).
    pub capacity_wh: f64,
    /// Hover-equivalent baseline draw (W).
    pub baseline_power_w: f64,
}

impl Default for VehicleProfile {
    fn default() -> Self {
        Self {
            name: "Default quadcopter".to_string(),
            mass_kg: 2.4,
            capacity_wh: 160.0,
            baseline_power_w: 120.0,
        }
    }
}

impl VehicleProfile {
    /// Check every numeric field is finite.
    pub fn validate(&self) -> Result<(), ModelError> {
        ensure_finite("vehicle.mass_kg", self.mass_kg)?;
        ensure_finite("vehicle.capacity_wh", self.capacity_wh)?;
        ensure_finite("vehicle.baseline_power_w", self.baseline_power_w)?;
        Ok(())
    }
}

/// Wind direction relative to the direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindDirection {
    #[default]
    Headwind,
    Tailwind,
    Crosswind,
    /// Any label outside the modelled cases; contributes no wind term.
    Unrecognized,
}

impl WindDirection {
    /// Map a free-form label onto a direction. Matching is case-insensitive and never fails.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "headwind" => WindDirection::Headwind,
            "tailwind" => WindDirection::Tailwind,
            "crosswind" => WindDirection::Crosswind,
            _ => WindDirection::Unrecognized,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WindDirection::Headwind => "headwind",
            WindDirection::Tailwind => "tailwind",
            WindDirection::Crosswind => "crosswind",
            WindDirection::Unrecognized => "unrecognized",
        }
    }
}

impl std::fmt::Display for WindDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Weather conditions for a single run.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    pub wind_speed_m_s: f64,
    pub wind_direction: WindDirection,
    pub temperature_c: f64,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            wind_speed_m_s: 0.0,
            wind_direction: WindDirection::Headwind,
            temperature_c: 20.0,
        }
    }
}

impl Environment {
    pub fn validate(&self) -> Result<(), ModelError> {
        ensure_finite("environment.wind_speed_m_s", self.wind_speed_m_s)?;
        ensure_finite("environment.temperature_c", self.temperature_c)?;
        Ok(())
    }
}

/// Single-leg mission request.
///
/// Battery percent and health are stored as supplied; the simulation clamps them on use.
#[derive(Debug, Clone, PartialEq)]
pub struct MissionPlan {
    /// Free-text label for reports (e.g. a site name).
    pub location: Option<String>,
    pub route_km: f64,
    pub altitude_m: f64,
    pub speed_m_s: f64,
    pub payload_kg: f64,
    pub initial_battery_pct: f64,
    pub battery_health: f64,
}

impl Default for MissionPlan {
    fn default() -> Self {
        Self {
            location: None,
            route_km: 5.0,
            altitude_m: 0.0,
            speed_m_s: 10.0,
            payload_kg: 0.0,
            initial_battery_pct: 100.0,
            battery_health: 1.0,
        }
    }
}

impl MissionPlan {
    pub fn validate(&self) -> Result<(), ModelError> {
        ensure_finite("mission.route_km", self.route_km)?;
        ensure_finite("mission.altitude_m", self.altitude_m)?;
        ensure_finite("mission.speed_m_s", self.speed_m_s)?;
        ensure_finite("mission.payload_kg", self.payload_kg)?;
        ensure_finite("mission.initial_battery_pct", self.initial_battery_pct)?;
        ensure_finite("mission.battery_health", self.battery_health)?;
        Ok(())
    }

    /// Route length in metres.
    pub fn target_distance_m(&self) -> f64 {
        drone_core::units::km_to_m(self.route_km)
    }
}
