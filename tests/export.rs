use std::fs;
use std::path::Path;

use csv::Reader;
use drone_mission_sim::export::report::{OutcomeReport, tips};
use drone_mission_sim::export::summary::{RunMode, write_summary};
use drone_mission_sim::export::trace;
use drone_mission_sim::sim::LiveSession;
use drone_mission_sim::{Environment, MissionPlan, VehicleProfile, WindDirection, simulate};

fn headwind_haul() -> (VehicleProfile, Environment, MissionPlan) {
    let environment = Environment {
        wind_speed_m_s: 10.0,
        wind_direction: WindDirection::Headwind,
        temperature_c: 25.0,
    };
    let mission = MissionPlan {
        route_km: 50.0,
        altitude_m: 100.0,
        speed_m_s: 15.0,
        payload_kg: 3.0,
        ..MissionPlan::default()
    };
    (VehicleProfile::default(), environment, mission)
}

#[test]
fn completed_mission_gets_single_reassuring_tip() {
    let vehicle = VehicleProfile::default();
    let env = Environment::default();
    let mission = MissionPlan::default();
    let summary = simulate(&vehicle, &env, &mission).unwrap();

    let report = OutcomeReport::new(&summary, &mission, &env);
    assert_eq!(report.status, "Mission Completed");
    assert_eq!(report.tips.len(), 1);
    let text = report.to_string();
    assert!(text.contains("Time: 8 min"), "{text}");
    assert!(text.contains("Distance: 5.0 km"), "{text}");
    assert!(text.contains("Wind: headwind at 0.0 m/s"), "{text}");
}

#[test]
fn aborted_mission_collects_relevant_tips() {
    let (vehicle, env, mission) = headwind_haul();
    let summary = simulate(&vehicle, &env, &mission).unwrap();
    let advice = tips(&summary, &mission, &env);
    assert_eq!(advice.len(), 2);
    assert!(advice[0].starts_with("Reduce speed or payload"));
    assert!(advice[1].starts_with("Headwinds are costly"));

    let worn = MissionPlan {
        initial_battery_pct: 60.0,
        battery_health: 0.7,
        ..mission
    };
    let summary = simulate(&vehicle, &env, &worn).unwrap();
    let advice = tips(&summary, &worn, &env);
    assert_eq!(advice.len(), 4);

    let report = OutcomeReport::new(&summary, &worn, &env);
    assert_eq!(report.status, "Mission Aborted (Low Battery)");
}

#[test]
fn safety_cap_has_its_own_status() {
    let vehicle = VehicleProfile {
        capacity_wh: 1_000.0,
        ..VehicleProfile::default()
    };
    let env = Environment::default();
    let mission = MissionPlan {
        speed_m_s: 0.0,
        ..MissionPlan::default()
    };
    let summary = simulate(&vehicle, &env, &mission).unwrap();
    let report = OutcomeReport::new(&summary, &mission, &env);
    assert_eq!(report.status, "Mission Aborted (Time Limit Reached)");
}

#[test]
fn tick_trace_round_trips_through_csv() {
    let vehicle = VehicleProfile::default();
    let env = Environment::default();
    let mission = MissionPlan {
        route_km: 0.2,
        ..MissionPlan::default()
    };
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("trace.csv");

    let mut session = LiveSession::new(&vehicle, &env, &mission).unwrap();
    let mut writer = trace::TraceWriter::create(&path).unwrap();
    loop {
        let report = session.advance().unwrap();
        assert!(writer.record(&report).unwrap());
        if report.terminal {
            break;
        }
    }
    // A finished session applies no step, so nothing more is written.
    assert!(!writer.record(&session.advance().unwrap()).unwrap());
    assert_eq!(writer.rows(), 20);
    assert_eq!(writer.finish().unwrap(), 20);

    let mut reader = Reader::from_path(&path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(&headers[0], "tick");
    assert_eq!(&headers[3], "battery_pct");

    let rows: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 20);
    assert_eq!(&rows[19][0], "20");
    assert_eq!(&rows[19][2], "200.000");
    assert_eq!(&rows[0][4], "720.000");
}

#[test]
fn json_summary_carries_outcome_and_inputs() {
    let (vehicle, env, mission) = headwind_haul();
    let summary = simulate(&vehicle, &env, &mission).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("summary.json");

    write_summary(&path, RunMode::Batch, &vehicle, &env, &mission, &summary).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["mode"], "batch");
    assert_eq!(value["completed"], false);
    assert_eq!(value["termination"], "battery_depleted");
    assert_eq!(value["wind_direction"], "headwind");
    assert_eq!(value["total_time_s"], 258.0);
    assert!(value["generated_utc"].as_str().unwrap().contains('T'));
}

#[test]
fn dash_selects_stdout_for_traces() {
    assert!(trace::is_stdout(Path::new(trace::STDOUT_PATH)));
    assert!(!trace::is_stdout(Path::new("out/-.csv")));
}

#[test]
fn in_memory_trace_starts_with_header() {
    let writer = trace::TraceWriter::from_sink(Box::new(Vec::new())).unwrap();
    assert_eq!(writer.finish().unwrap(), 0);
}
