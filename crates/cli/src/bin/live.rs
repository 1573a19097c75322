use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::Parser;
use drone_mission_sim::common::constants::SAFETY_CAP_SECONDS;
use drone_mission_sim::export::report::OutcomeReport;
use drone_mission_sim::export::summary::{RunMode, write_summary};
use drone_mission_sim::export::trace;
use drone_mission_sim::sim::LiveSession;
use tracing::info;

#[path = "shared/args.rs"]
mod args;

/// Step a mission one simulated second at a time, reporting progress as it goes.
#[derive(Parser, Debug)]
#[command(author, version, about = "Live tick-by-tick mission simulation")]
struct Cli {
    #[command(flatten)]
    scenario: args::ScenarioArgs,

    /// Wall-clock delay between ticks in milliseconds (0 runs as fast as possible)
    #[arg(long, default_value_t = 0)]
    tick_ms: u64,

    /// Stop driving ticks after this many, even if the run has not finished
    #[arg(long, default_value_t = SAFETY_CAP_SECONDS as u64)]
    max_ticks: u64,

    /// Log progress every N ticks
    #[arg(long, default_value_t = 60)]
    every: u64,

    /// Write a per-tick CSV trace to this path (`-` for stdout; the report then goes to stderr)
    #[arg(long)]
    trace: Option<PathBuf>,

    /// Write a JSON summary to this path
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    args::init_tracing();
    let cli = Cli::parse();
    let scenario = cli.scenario.resolve()?;

    let mut session = LiveSession::new(&scenario.vehicle, &scenario.environment, &scenario.mission)?;
    let mut writer = cli
        .trace
        .as_deref()
        .map(trace::TraceWriter::create)
        .transpose()?;
    // Keep stdout clean for CSV rows when the trace is streamed there.
    let report_to_stderr = cli.trace.as_deref().is_some_and(trace::is_stdout);

    let every = cli.every.max(1);
    for _ in 0..cli.max_ticks {
        let report = session.advance()?;
        if let Some(w) = writer.as_mut() {
            w.record(&report)?;
        }
        if report.terminal || report.state.ticks() % every == 0 {
            info!(
                tick = report.state.ticks(),
                distance_km = report.state.distance_km(),
                progress = session.progress_fraction(),
                battery_pct = session.display_battery_pct(),
                "progress"
            );
        }
        if report.terminal {
            break;
        }
        if cli.tick_ms > 0 {
            thread::sleep(Duration::from_millis(cli.tick_ms));
        }
    }
    if let Some(w) = writer {
        let rows = w.finish()?;
        info!(rows, "trace written");
    }

    let summary = session.summary();
    let by_ticks = session.summary_by_ticks();
    let mut out: Box<dyn Write> = if report_to_stderr {
        Box::new(io::stderr())
    } else {
        Box::new(io::stdout())
    };
    writeln!(
        out,
        "{}",
        OutcomeReport::new(&summary, session.mission(), session.environment())
    )?;
    writeln!(
        out,
        "Ticks applied  : {} (tick-accumulated time {:.0} s, distance-derived {:.0} s)",
        session.state().ticks(),
        by_ticks.total_time_s,
        summary.total_time_s
    )?;

    if let Some(path) = &cli.json {
        write_summary(
            path,
            RunMode::Live,
            &scenario.vehicle,
            &scenario.environment,
            &scenario.mission,
            &summary,
        )?;
        info!(path = %path.display(), "wrote JSON summary");
    }

    Ok(())
}
