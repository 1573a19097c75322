use std::path::PathBuf;

use clap::Parser;
use drone_mission_sim::export::report::OutcomeReport;
use drone_mission_sim::export::summary::{RunMode, write_summary};
use drone_mission_sim::simulate;

#[path = "shared/args.rs"]
mod args;

/// Predict whether a mission is feasible on one battery charge.
#[derive(Parser, Debug)]
#[command(author, version, about = "Batch mission feasibility estimate")]
struct Cli {
    #[command(flatten)]
    scenario: args::ScenarioArgs,

    /// Write a JSON summary to this path
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    args::init_tracing();
    let cli = Cli::parse();
    let scenario = cli.scenario.resolve()?;

    let summary = simulate(&scenario.vehicle, &scenario.environment, &scenario.mission)?;

    if let Some(location) = &scenario.mission.location {
        println!("Location       : {}", location);
    }
    println!("Vehicle        : {}", scenario.vehicle.name);
    println!(
        "{}",
        OutcomeReport::new(&summary, &scenario.mission, &scenario.environment)
    );

    if let Some(path) = &cli.json {
        write_summary(
            path,
            RunMode::Batch,
            &scenario.vehicle,
            &scenario.environment,
            &scenario.mission,
            &summary,
        )?;
        tracing::info!(path = %path.display(), "wrote JSON summary");
    }

    Ok(())
}
