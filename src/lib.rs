//! Battery-endurance simulation for small aerial vehicles.
//!
//! The façade re-exports the workspace crates so front-ends (the CLI today) depend on one crate.
//! The physics are deliberately simplified and meant for exploring trade-offs, not for planning
//! real flights.

pub use drone_battery as battery;
pub use drone_config as config;
pub use drone_core as common;
pub use drone_export as export;
pub use drone_model as model;
pub use drone_power as power;
pub use drone_sim as sim;

pub use drone_model::{Environment, MissionPlan, VehicleProfile, WindDirection};
pub use drone_sim::{OutcomeSummary, Termination, simulate};

