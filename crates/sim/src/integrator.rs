//! Batch single-run simulation.

use drone_core::ModelError;
use drone_core::constants::SAFETY_CAP_SECONDS;
use drone_model::{Environment, MissionPlan, VehicleProfile};
use tracing::{debug, warn};

use crate::{FlightState, OutcomeSummary, Termination, prepare, step_result, summarize};

/// Run the mission to completion, battery exhaustion, or the 3-hour safety cap.
///
/// Pure in its inputs: identical arguments always give a bit-identical summary.
pub fn simulate(
    vehicle: &VehicleProfile,
    environment: &Environment,
    mission: &MissionPlan,
) -> Result<OutcomeSummary, ModelError> {
    let target_m = prepare(vehicle, environment, mission)?;
    let mut state = FlightState::initial(mission)?;
    debug!(
        route_km = mission.route_km,
        speed_m_s = mission.speed_m_s,
        initial_battery_pct = state.battery_pct(),
        "starting batch simulation"
    );

    let termination = loop {
        if let Some(reason) = state.termination(target_m) {
            break reason;
        }
        if state.elapsed_s() >= SAFETY_CAP_SECONDS {
            break Termination::SafetyCap;
        }
        let step = step_result(vehicle, environment, mission)?;
        state = state.advance(&step, mission.speed_m_s);
    };

    if termination == Termination::SafetyCap {
        warn!(
            elapsed_s = state.elapsed_s(),
            distance_m = state.distance_m(),
            "simulation stopped at safety cap"
        );
    }

    let summary = summarize(&state, state.elapsed_s(), termination);
    debug!(
        ?termination,
        total_time_s = summary.total_time_s,
        battery_left_pct = summary.battery_left_pct,
        distance_km = summary.distance_km,
        "batch simulation finished"
    );
    Ok(summary)
}
