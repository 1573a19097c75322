//! Incremental simulation driven by external ticks.
//!
//! Nothing here owns a timer. A driver calls [`tick`] (or [`LiveSession::advance`]) at whatever
//! cadence it likes and stops calling it to pause or cancel.

use drone_core::ModelError;
use drone_core::constants::{LIVE_SPEED_FLOOR_M_S, SAFETY_CAP_SECONDS};
use drone_model::{Environment, MissionPlan, VehicleProfile};
use tracing::trace;

use crate::{
    FlightState, OutcomeSummary, StepResult, Termination, prepare, step_result, summarize,
};

/// Apply one simulated second to `state`. Returns the next state and whether it is terminal.
///
/// A state that is already terminal is returned unchanged.
pub fn tick(
    vehicle: &VehicleProfile,
    environment: &Environment,
    mission: &MissionPlan,
    state: &FlightState,
) -> Result<(FlightState, bool), ModelError> {
    let target_m = prepare(vehicle, environment, mission)?;
    if state.is_terminal(target_m) {
        return Ok((*state, true));
    }
    let step = step_result(vehicle, environment, mission)?;
    let next = state.advance(&step, mission.speed_m_s);
    Ok((next, next.is_terminal(target_m)))
}

/// Summary for a live run, with elapsed time derived as distance ÷ speed.
///
/// Speed is floored at 0.1 m/s. This can differ from the tick count; see
/// [`LiveSession::summary_by_ticks`] for the accumulated variant.
pub fn live_summary(mission: &MissionPlan, state: &FlightState) -> OutcomeSummary {
    let time_s = state.distance_m() / mission.speed_m_s.max(LIVE_SPEED_FLOOR_M_S);
    summarize(state, time_s, live_termination(mission, state))
}

fn live_termination(mission: &MissionPlan, state: &FlightState) -> Termination {
    state
        .termination(mission.target_distance_m())
        .unwrap_or(Termination::Interrupted)
}

/// What a single [`LiveSession::advance`] call did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub state: FlightState,
    /// `None` when the session was already finished and nothing was applied.
    pub step: Option<StepResult>,
    pub terminal: bool,
}

/// Caller-owned live run over borrowed, immutable inputs.
#[derive(Debug, Clone)]
pub struct LiveSession<'a> {
    vehicle: &'a VehicleProfile,
    environment: &'a Environment,
    mission: &'a MissionPlan,
    target_m: f64,
    state: FlightState,
}

impl<'a> LiveSession<'a> {
    /// Validate the inputs and start from a fresh state.
    pub fn new(
        vehicle: &'a VehicleProfile,
        environment: &'a Environment,
        mission: &'a MissionPlan,
    ) -> Result<Self, ModelError> {
        let target_m = prepare(vehicle, environment, mission)?;
        Ok(Self {
            vehicle,
            environment,
            mission,
            target_m,
            state: FlightState::initial(mission)?,
        })
    }

    pub fn state(&self) -> &FlightState {
        &self.state
    }

    pub fn mission(&self) -> &MissionPlan {
        self.mission
    }

    pub fn environment(&self) -> &Environment {
        self.environment
    }

    pub fn target_m(&self) -> f64 {
        self.target_m
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_terminal(self.target_m)
    }

    /// Advance by one tick unless the run has already finished.
    pub fn advance(&mut self) -> Result<TickReport, ModelError> {
        if self.is_finished() {
            return Ok(TickReport {
                state: self.state,
                step: None,
                terminal: true,
            });
        }
        let step = step_result(self.vehicle, self.environment, self.mission)?;
        self.state = self.state.advance(&step, self.mission.speed_m_s);
        let terminal = self.is_finished();
        trace!(
            tick = self.state.ticks(),
            distance_m = self.state.distance_m(),
            battery_pct = self.state.battery_pct(),
            power_w = step.power_w,
            "live tick"
        );
        Ok(TickReport {
            state: self.state,
            step: Some(step),
            terminal,
        })
    }

    /// Fraction of the route covered, for progress displays.
    pub fn progress_fraction(&self) -> f64 {
        self.state.progress_fraction(self.target_m)
    }

    /// Battery percent clamped to `[0, 100]` for display.
    pub fn display_battery_pct(&self) -> f64 {
        drone_core::clamp(self.state.battery_pct(), 0.0, 100.0)
    }

    /// Summary with time derived from distance and speed.
    pub fn summary(&self) -> OutcomeSummary {
        live_summary(self.mission, &self.state)
    }

    /// Summary with time taken from the number of ticks applied, matching the batch path.
    pub fn summary_by_ticks(&self) -> OutcomeSummary {
        let termination = match self.state.termination(self.target_m) {
            Some(reason) => reason,
            None if self.state.elapsed_s() >= SAFETY_CAP_SECONDS => Termination::SafetyCap,
            None => Termination::Interrupted,
        };
        summarize(&self.state, self.state.elapsed_s(), termination)
    }
}
