//! Human-readable reports, CSV tick traces, and JSON summaries.

use thiserror::Error;

/// Errors surfaced while writing export artifacts.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Create the directory that will hold `path`, if it names one.
fn ensure_parent_dir(path: &std::path::Path) -> std::io::Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir),
        _ => Ok(()),
    }
}

pub mod report {
    use std::fmt;

    use drone_model::{Environment, MissionPlan, WindDirection};
    use drone_sim::{OutcomeSummary, Termination};

    const HEADWIND_TIP_THRESHOLD_M_S: f64 = 2.0;
    const LOW_CHARGE_TIP_PCT: f64 = 80.0;
    const WORN_PACK_TIP_HEALTH: f64 = 0.9;

    /// Text rendering of an outcome with advice for the next attempt.
    #[derive(Debug, Clone, PartialEq)]
    pub struct OutcomeReport {
        pub status: &'static str,
        pub totals: String,
        pub conditions: String,
        pub tips: Vec<&'static str>,
    }

    impl OutcomeReport {
        pub fn new(summary: &OutcomeSummary, mission: &MissionPlan, env: &Environment) -> Self {
            let status = match summary.termination {
                Termination::Completed => "Mission Completed",
                Termination::BatteryDepleted => "Mission Aborted (Low Battery)",
                Termination::SafetyCap => "Mission Aborted (Time Limit Reached)",
                Termination::Interrupted => "Mission Stopped",
            };
            let minutes = drone_core::units::seconds_to_minutes(summary.total_time_s);
            let totals = format!(
                "Time: {:.0} min | Battery Left: {:.0}% | Distance: {:.1} km",
                minutes, summary.battery_left_pct, summary.distance_km
            );
            let conditions = format!(
                "Wind: {} at {:.1} m/s | Altitude: {:.0} m | Speed: {:.1} m/s",
                env.wind_direction, env.wind_speed_m_s, mission.altitude_m, mission.speed_m_s
            );
            Self {
                status,
                totals,
                conditions,
                tips: tips(summary, mission, env),
            }
        }
    }

    impl fmt::Display for OutcomeReport {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            writeln!(f, "{}", self.status)?;
            writeln!(f, "{}", self.totals)?;
            writeln!(f, "{}", self.conditions)?;
            write!(f, "Tips: {}", self.tips.join(" "))
        }
    }

    /// Advice derived from the outcome and the inputs that produced it.
    pub fn tips(
        summary: &OutcomeSummary,
        mission: &MissionPlan,
        env: &Environment,
    ) -> Vec<&'static str> {
        if summary.completed {
            return vec![
                "Mission parameters look safe. Consider extending route length or testing different winds.",
            ];
        }

        let mut tips = vec!["Reduce speed or payload to conserve energy."];
        if env.wind_direction == WindDirection::Headwind
            && env.wind_speed_m_s > HEADWIND_TIP_THRESHOLD_M_S
        {
            tips.push("Headwinds are costly; try tailwind or lower wind conditions.");
        }
        if mission.initial_battery_pct < LOW_CHARGE_TIP_PCT {
            tips.push("Start with a higher battery percentage for safety.");
        }
        if mission.battery_health < WORN_PACK_TIP_HEALTH {
            tips.push("Old batteries reduce usable energy; consider better packs.");
        }
        tips
    }
}

pub mod trace {
    use std::fs::File;
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    use drone_sim::TickReport;

    const COLUMNS: [&str; 6] = [
        "tick",
        "elapsed_s",
        "distance_m",
        "battery_pct",
        "power_w",
        "drop_pct",
    ];

    /// Path that selects standard output instead of a file.
    pub const STDOUT_PATH: &str = "-";

    /// True when `path` selects standard output.
    pub fn is_stdout(path: &Path) -> bool {
        path.as_os_str() == STDOUT_PATH
    }

    /// Buffered CSV sink for tick records. The header is written on creation.
    pub struct TraceWriter {
        sink: BufWriter<Box<dyn Write>>,
        rows: u64,
    }

    impl TraceWriter {
        /// Open `path` (creating missing directories) or standard output for [`STDOUT_PATH`].
        pub fn create(path: &Path) -> io::Result<Self> {
            let sink: Box<dyn Write> = if is_stdout(path) {
                Box::new(io::stdout())
            } else {
                crate::ensure_parent_dir(path)?;
                Box::new(File::create(path)?)
            };
            Self::from_sink(sink)
        }

        /// Wrap an arbitrary sink, e.g. an in-memory buffer.
        pub fn from_sink(sink: Box<dyn Write>) -> io::Result<Self> {
            let mut sink = BufWriter::new(sink);
            writeln!(sink, "{}", COLUMNS.join(","))?;
            Ok(Self { sink, rows: 0 })
        }

        /// Append the row for `report`. Ticks that applied no step are skipped.
        pub fn record(&mut self, report: &TickReport) -> io::Result<bool> {
            match Record::from_report(report) {
                Some(row) => {
                    row.write_to(&mut self.sink)?;
                    self.rows += 1;
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        /// Rows written so far, excluding the header.
        pub fn rows(&self) -> u64 {
            self.rows
        }

        /// Flush buffered rows.
        pub fn finish(mut self) -> io::Result<u64> {
            self.sink.flush()?;
            Ok(self.rows)
        }
    }

    /// One CSV row per applied tick.
    #[derive(Debug, Clone, Copy)]
    pub struct Record {
        pub tick: u64,
        pub elapsed_s: f64,
        pub distance_m: f64,
        pub battery_pct: f64,
        pub power_w: f64,
        pub drop_pct: f64,
    }

    impl Record {
        /// Build a row from a tick report; `None` if the tick applied no step.
        pub fn from_report(report: &TickReport) -> Option<Self> {
            let step = report.step?;
            Some(Self {
                tick: report.state.ticks(),
                elapsed_s: report.state.elapsed_s(),
                distance_m: report.state.distance_m(),
                battery_pct: report.state.battery_pct(),
                power_w: step.power_w,
                drop_pct: step.drop_pct,
            })
        }

        /// Row text in column order.
        pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
            writeln!(
                writer,
                "{},{:.1},{:.3},{:.6},{:.3},{:.8}",
                self.tick,
                self.elapsed_s,
                self.distance_m,
                self.battery_pct,
                self.power_w,
                self.drop_pct,
            )
        }
    }
}

pub mod summary {
    use std::fs::File;
    use std::path::Path;

    use chrono::Utc;
    use drone_model::{Environment, MissionPlan, VehicleProfile};
    use drone_sim::{OutcomeSummary, Termination};
    use serde::Serialize;
    use serde_json::to_writer_pretty;

    use crate::ExportError;

    /// Which execution mode produced the summary.
    #[derive(Debug, Clone, Copy, Serialize)]
    #[serde(rename_all = "lowercase")]
    pub enum RunMode {
        Batch,
        Live,
    }

    #[derive(Serialize)]
    struct SummarySidecar<'a> {
        generated_utc: String,
        mode: RunMode,
        vehicle: &'a str,
        location: Option<&'a str>,
        route_km: f64,
        speed_m_s: f64,
        altitude_m: f64,
        payload_kg: f64,
        wind_direction: &'static str,
        wind_speed_m_s: f64,
        temperature_c: f64,
        total_time_s: f64,
        completed: bool,
        battery_left_pct: f64,
        distance_km: f64,
        termination: &'static str,
    }

    fn termination_label(termination: Termination) -> &'static str {
        match termination {
            Termination::Completed => "completed",
            Termination::BatteryDepleted => "battery_depleted",
            Termination::SafetyCap => "safety_cap",
            Termination::Interrupted => "interrupted",
        }
    }

    /// Write a pretty-printed JSON summary of one run.
    pub fn write_summary(
        output: &Path,
        mode: RunMode,
        vehicle: &VehicleProfile,
        environment: &Environment,
        mission: &MissionPlan,
        summary: &OutcomeSummary,
    ) -> Result<(), ExportError> {
        crate::ensure_parent_dir(output)?;

        let sidecar = SummarySidecar {
            generated_utc: Utc::now().to_rfc3339(),
            mode,
            vehicle: &vehicle.name,
            location: mission.location.as_deref(),
            route_km: mission.route_km,
            speed_m_s: mission.speed_m_s,
            altitude_m: mission.altitude_m,
            payload_kg: mission.payload_kg,
            wind_direction: environment.wind_direction.label(),
            wind_speed_m_s: environment.wind_speed_m_s,
            temperature_c: environment.temperature_c,
            total_time_s: summary.total_time_s,
            completed: summary.completed,
            battery_left_pct: summary.battery_left_pct,
            distance_km: summary.distance_km,
            termination: termination_label(summary.termination),
        };
        to_writer_pretty(File::create(output)?, &sidecar)?;
        Ok(())
    }
}
