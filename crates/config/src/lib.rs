//! Configuration models and loaders for the drone mission simulator.

use std::fs::File;
use std::path::Path;

use drone_model::{Environment, MissionPlan, VehicleProfile, WindDirection};
use serde::Deserialize;
use thiserror::Error;

/// Vehicle entry parsed from catalogs and scenario files.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct VehicleConfig {
    pub name: String,
    pub mass_kg: f64,
    pub capacity_wh: f64,
    pub baseline_power_w: f64,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        let defaults = VehicleProfile::default();
        Self {
            name: defaults.name,
            mass_kg: defaults.mass_kg,
            capacity_wh: defaults.capacity_wh,
            baseline_power_w: defaults.baseline_power_w,
        }
    }
}

/// Weather section of a scenario file.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub wind_speed_m_s: f64,
    /// Free label; unknown values contribute no wind term.
    pub wind_direction: String,
    pub temperature_c: f64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        let defaults = Environment::default();
        Self {
            wind_speed_m_s: defaults.wind_speed_m_s,
            wind_direction: defaults.wind_direction.label().to_string(),
            temperature_c: defaults.temperature_c,
        }
    }
}

/// Mission section of a scenario file.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MissionConfig {
    pub location: Option<String>,
    pub route_km: f64,
    pub altitude_m: f64,
    pub speed_m_s: f64,
    pub payload_kg: f64,
    pub initial_battery_pct: f64,
    pub battery_health: f64,
}

impl Default for MissionConfig {
    fn default() -> Self {
        let defaults = MissionPlan::default();
        Self {
            location: defaults.location,
            route_km: defaults.route_km,
            altitude_m: defaults.altitude_m,
            speed_m_s: defaults.speed_m_s,
            payload_kg: defaults.payload_kg,
            initial_battery_pct: defaults.initial_battery_pct,
            battery_health: defaults.battery_health,
        }
    }
}

/// Complete scenario: one vehicle flying one mission in one environment.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ScenarioConfig {
    pub vehicle: VehicleConfig,
    pub environment: EnvironmentConfig,
    pub mission: MissionConfig,
}

/// Scenario converted into the model types consumed by the simulator.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub vehicle: VehicleProfile,
    pub environment: Environment,
    pub mission: MissionPlan,
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("vehicle '{0}' not found in catalog")]
    VehicleNotFound(String),
    #[error("vehicle catalog is empty")]
    EmptyCatalog,
}

impl From<VehicleConfig> for VehicleProfile {
    fn from(value: VehicleConfig) -> Self {
        VehicleProfile {
            name: value.name,
            mass_kg: value.mass_kg,
            capacity_wh: value.capacity_wh,
            baseline_power_w: value.baseline_power_w,
        }
    }
}

impl From<EnvironmentConfig> for Environment {
    fn from(value: EnvironmentConfig) -> Self {
        Environment {
            wind_speed_m_s: value.wind_speed_m_s,
            wind_direction: WindDirection::from_label(&value.wind_direction),
            temperature_c: value.temperature_c,
        }
    }
}

impl From<MissionConfig> for MissionPlan {
    fn from(value: MissionConfig) -> Self {
        MissionPlan {
            location: value.location,
            route_km: value.route_km,
            altitude_m: value.altitude_m,
            speed_m_s: value.speed_m_s,
            payload_kg: value.payload_kg,
            initial_battery_pct: value.initial_battery_pct,
            battery_health: value.battery_health,
        }
    }
}

impl From<ScenarioConfig> for Scenario {
    fn from(value: ScenarioConfig) -> Self {
        Scenario {
            vehicle: value.vehicle.into(),
            environment: value.environment.into(),
            mission: value.mission.into(),
        }
    }
}

/// Load a single scenario from a YAML or TOML file (chosen by extension).
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<Scenario, ConfigError> {
    let config: ScenarioConfig = load_record(path.as_ref())?;
    Ok(config.into())
}

/// Load vehicle configurations from a YAML list or a directory of TOML files.
pub fn load_vehicle_configs<P: AsRef<Path>>(path: P) -> Result<Vec<VehicleConfig>, ConfigError> {
    let path = path.as_ref();
    if path.is_dir() {
        load_toml_catalog(path)
    } else if is_toml(path) {
        Ok(vec![load_record(path)?])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

/// Select a vehicle from the catalog by optional name, defaulting to the first entry.
pub fn select_vehicle(
    configs: &[VehicleConfig],
    requested: Option<&str>,
) -> Result<VehicleProfile, ConfigError> {
    let first = configs.first().ok_or(ConfigError::EmptyCatalog)?;
    let chosen = match requested {
        Some(name) => {
            let upper = name.to_uppercase();
            configs
                .iter()
                .find(|cfg| cfg.name.to_uppercase() == upper)
                .ok_or_else(|| ConfigError::VehicleNotFound(name.to_string()))?
        }
        None => first,
    };
    Ok(chosen.clone().into())
}

fn is_toml(path: &Path) -> bool {
    path.extension().map(|ext| ext == "toml").unwrap_or(false)
}

fn load_record<T>(path: &Path) -> Result<T, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

/// Every `*.toml` file directly under `dir`, loaded in path order so catalogs are stable.
fn load_toml_catalog<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let file = entry?.path();
        if file.is_file() && is_toml(&file) {
            files.push(file);
        }
    }
    files.sort_unstable();

    let mut records = Vec::with_capacity(files.len());
    for file in &files {
        records.push(load_record(file)?);
    }
    Ok(records)
}
