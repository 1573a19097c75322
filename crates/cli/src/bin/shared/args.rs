use std::path::PathBuf;

use clap::{Args, ValueEnum};
use drone_mission_sim::config::{Scenario, load_scenario, load_vehicle_configs, select_vehicle};
use drone_mission_sim::{Environment, MissionPlan, VehicleProfile, WindDirection};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Log to stderr so stdout carries only results. `RUST_LOG` overrides the default level.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[derive(Copy, Clone, ValueEnum, Debug)]
pub enum WindDir {
    Headwind,
    Tailwind,
    Crosswind,
}

impl From<WindDir> for WindDirection {
    fn from(value: WindDir) -> Self {
        match value {
            WindDir::Headwind => WindDirection::Headwind,
            WindDir::Tailwind => WindDirection::Tailwind,
            WindDir::Crosswind => WindDirection::Crosswind,
        }
    }
}

/// Scenario source plus per-field overrides shared by every binary.
#[derive(Args, Debug)]
pub struct ScenarioArgs {
    /// Scenario file (YAML or TOML); built-in defaults are used when omitted
    #[arg(long)]
    pub scenario: Option<PathBuf>,

    /// Vehicle catalog (YAML list or directory of TOML files)
    #[arg(long)]
    pub vehicle_catalog: Option<PathBuf>,

    /// Vehicle name from the catalog (defaults to the first entry)
    #[arg(long, requires = "vehicle_catalog")]
    pub vehicle: Option<String>,

    /// Nominal battery capacity in Wh
    #[arg(long)]
    pub capacity_wh: Option<f64>,

    /// Baseline hover-equivalent power draw in W
    #[arg(long)]
    pub baseline_w: Option<f64>,

    /// Vehicle mass in kg
    #[arg(long)]
    pub mass_kg: Option<f64>,

    /// Free-text mission location label
    #[arg(long)]
    pub location: Option<String>,

    /// Route length in km
    #[arg(long)]
    pub route_km: Option<f64>,

    /// Cruise altitude in m
    #[arg(long)]
    pub altitude: Option<f64>,

    /// Cruise airspeed in m/s
    #[arg(long)]
    pub speed: Option<f64>,

    /// Payload mass in kg
    #[arg(long)]
    pub payload: Option<f64>,

    /// Initial battery charge in percent (clamped to 10..=100)
    #[arg(long)]
    pub battery_pct: Option<f64>,

    /// Battery health fraction (clamped to 0.5..=1.0)
    #[arg(long)]
    pub health: Option<f64>,

    /// Wind speed in m/s
    #[arg(long)]
    pub wind: Option<f64>,

    /// Wind direction relative to travel
    #[arg(long, value_enum)]
    pub wind_dir: Option<WindDir>,

    /// Ambient temperature in °C
    #[arg(long)]
    pub temp: Option<f64>,
}

impl ScenarioArgs {
    /// Build the scenario: file (or defaults), then catalog vehicle, then flag overrides.
    pub fn resolve(&self) -> anyhow::Result<Scenario> {
        let mut scenario = match &self.scenario {
            Some(path) => load_scenario(path)?,
            None => Scenario {
                vehicle: VehicleProfile::default(),
                environment: Environment::default(),
                mission: MissionPlan::default(),
            },
        };

        if let Some(catalog) = &self.vehicle_catalog {
            let configs = load_vehicle_configs(catalog)?;
            scenario.vehicle = select_vehicle(&configs, self.vehicle.as_deref())?;
        }

        let vehicle = &mut scenario.vehicle;
        override_with(&mut vehicle.capacity_wh, self.capacity_wh);
        override_with(&mut vehicle.baseline_power_w, self.baseline_w);
        override_with(&mut vehicle.mass_kg, self.mass_kg);

        let env = &mut scenario.environment;
        override_with(&mut env.wind_speed_m_s, self.wind);
        override_with(&mut env.temperature_c, self.temp);
        if let Some(dir) = self.wind_dir {
            env.wind_direction = dir.into();
        }

        let mission = &mut scenario.mission;
        if self.location.is_some() {
            mission.location = self.location.clone();
        }
        override_with(&mut mission.route_km, self.route_km);
        override_with(&mut mission.altitude_m, self.altitude);
        override_with(&mut mission.speed_m_s, self.speed);
        override_with(&mut mission.payload_kg, self.payload);
        override_with(&mut mission.initial_battery_pct, self.battery_pct);
        override_with(&mut mission.battery_health, self.health);

        Ok(scenario)
    }
}

fn override_with(field: &mut f64, value: Option<f64>) {
    if let Some(v) = value {
        *field = v;
    }
}
