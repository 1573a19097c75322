//! Fixed-step battery depletion simulation.
//!
//! Both execution modes share one transition: compute the power draw, convert it into a percent
//! drop, subtract it from the battery, and move the vehicle forward by one simulated second.
//! [`integrator::simulate`] loops that transition to a terminal condition; [`live::tick`] applies
//! it once per call so an external driver can observe progress between steps.

pub mod integrator;
pub mod live;

use drone_core::constants::{INITIAL_BATTERY_MAX_PCT, INITIAL_BATTERY_MIN_PCT, STEP_SECONDS};
use drone_core::{ModelError, clamp, ensure_finite, units};
use drone_model::{Environment, MissionPlan, VehicleProfile};
use drone_power::PowerInputs;

pub use drone_core::ModelError as SimError;
pub use integrator::simulate;
pub use live::{LiveSession, TickReport, live_summary, tick};

/// Power draw and charge drop for one step. Consumed immediately by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepResult {
    pub power_w: f64,
    pub drop_pct: f64,
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Target distance reached with charge to spare.
    Completed,
    /// Battery hit zero, possibly on the same step the target was reached.
    BatteryDepleted,
    /// Batch safety cap reached before either other condition.
    SafetyCap,
    /// The live driver stopped ticking before a terminal condition.
    Interrupted,
}

/// Terminal result of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutcomeSummary {
    pub total_time_s: f64,
    pub completed: bool,
    pub battery_left_pct: f64,
    pub distance_km: f64,
    pub termination: Termination,
}

/// Progress of a single run. Owned by the run; created fresh from the mission each time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightState {
    distance_m: f64,
    battery_pct: f64,
    ticks: u64,
}

impl FlightState {
    /// Starting state with the initial charge clamped to `[10, 100]` percent.
    pub fn initial(mission: &MissionPlan) -> Result<Self, ModelError> {
        let requested = ensure_finite("mission.initial_battery_pct", mission.initial_battery_pct)?;
        Ok(Self {
            distance_m: 0.0,
            battery_pct: clamp(requested, INITIAL_BATTERY_MIN_PCT, INITIAL_BATTERY_MAX_PCT),
            ticks: 0,
        })
    }

    pub fn distance_m(&self) -> f64 {
        self.distance_m
    }

    pub fn distance_km(&self) -> f64 {
        units::m_to_km(self.distance_m)
    }

    pub fn battery_pct(&self) -> f64 {
        self.battery_pct
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulated seconds accumulated over all applied steps.
    pub fn elapsed_s(&self) -> f64 {
        self.ticks as f64 * STEP_SECONDS
    }

    /// Apply one step: drain the battery (never below zero) and advance by `speed × dt`.
    pub fn advance(&self, step: &StepResult, speed_m_s: f64) -> Self {
        Self {
            distance_m: self.distance_m + speed_m_s.max(0.0) * STEP_SECONDS,
            battery_pct: (self.battery_pct - step.drop_pct).max(0.0),
            ticks: self.ticks + 1,
        }
    }

    pub fn reached(&self, target_m: f64) -> bool {
        self.distance_m >= target_m
    }

    pub fn depleted(&self) -> bool {
        self.battery_pct <= 0.0
    }

    /// Either natural terminal condition holds.
    pub fn is_terminal(&self, target_m: f64) -> bool {
        self.reached(target_m) || self.depleted()
    }

    fn termination(&self, target_m: f64) -> Option<Termination> {
        if self.reached(target_m) && !self.depleted() {
            Some(Termination::Completed)
        } else if self.depleted() {
            Some(Termination::BatteryDepleted)
        } else {
            None
        }
    }

    /// Fraction of the route covered, clamped to `[0, 1]`.
    pub fn progress_fraction(&self, target_m: f64) -> f64 {
        clamp(self.distance_m / target_m.max(1.0), 0.0, 1.0)
    }
}

/// Per-step kernel shared by the batch and live paths.
pub fn step_result(
    vehicle: &VehicleProfile,
    environment: &Environment,
    mission: &MissionPlan,
) -> Result<StepResult, ModelError> {
    let inputs = PowerInputs::from_conditions(mission, environment);
    let power_w = drone_power::estimate_power(vehicle.baseline_power_w, &inputs)?;
    let drop_pct =
        drone_battery::percent_drop_per_second(power_w, vehicle.capacity_wh, mission.battery_health)?;
    Ok(StepResult { power_w, drop_pct })
}

/// Validate all three inputs and return the route length in metres.
fn prepare(
    vehicle: &VehicleProfile,
    environment: &Environment,
    mission: &MissionPlan,
) -> Result<f64, ModelError> {
    vehicle.validate()?;
    environment.validate()?;
    mission.validate()?;
    drone_battery::usable_capacity_wh(vehicle.capacity_wh, mission.battery_health)?;
    Ok(mission.target_distance_m())
}

fn summarize(state: &FlightState, total_time_s: f64, termination: Termination) -> OutcomeSummary {
    OutcomeSummary {
        total_time_s,
        completed: termination == Termination::Completed,
        battery_left_pct: state.battery_pct.max(0.0),
        distance_km: state.distance_km(),
        termination,
    }
}
