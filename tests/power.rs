use approx::assert_relative_eq;
use drone_mission_sim::WindDirection;
use drone_mission_sim::common::ModelError;
use drone_mission_sim::power::{PowerInputs, estimate_power, power_breakdown};

const BASELINE_W: f64 = 120.0;

fn calm(speed_m_s: f64) -> PowerInputs {
    PowerInputs {
        speed_m_s,
        altitude_m: 0.0,
        payload_kg: 0.0,
        wind_speed_m_s: 0.0,
        wind_direction: WindDirection::Headwind,
        temperature_c: 20.0,
    }
}

#[test]
fn cruise_power_is_baseline_plus_cubic_speed_term() {
    let power = estimate_power(BASELINE_W, &calm(10.0)).unwrap();
    assert_relative_eq!(power, 720.0, epsilon = 1e-9);
}

#[test]
fn every_penalty_term_contributes() {
    let inputs = PowerInputs {
        speed_m_s: 15.0,
        altitude_m: 100.0,
        payload_kg: 3.0,
        wind_speed_m_s: 10.0,
        wind_direction: WindDirection::Headwind,
        temperature_c: 25.0,
    };
    let terms = power_breakdown(BASELINE_W, &inputs).unwrap();
    assert_relative_eq!(terms.aerodynamic_w, 2025.0, epsilon = 1e-9);
    assert_relative_eq!(terms.payload_w, 30.0);
    assert_relative_eq!(terms.wind_w, 60.0);
    assert_relative_eq!(terms.altitude_w, 2.0, epsilon = 1e-12);
    assert_eq!(terms.temperature_w, 0.0);
    assert_relative_eq!(terms.total_w(), 2237.0, epsilon = 1e-9);
}

#[test]
fn negative_speed_behaves_like_hover() {
    let backwards = estimate_power(BASELINE_W, &calm(-4.0)).unwrap();
    let hover = estimate_power(BASELINE_W, &calm(0.0)).unwrap();
    assert_eq!(backwards, hover);
    assert_eq!(hover, BASELINE_W);
}

#[test]
fn negative_payload_and_altitude_add_nothing() {
    let mut inputs = calm(0.0);
    inputs.payload_kg = -2.0;
    inputs.altitude_m = -30.0;
    assert_eq!(estimate_power(BASELINE_W, &inputs).unwrap(), BASELINE_W);
}

#[test]
fn cold_air_adds_linear_penalty_below_ten_degrees() {
    let mut inputs = calm(0.0);
    inputs.temperature_c = 10.0;
    assert_eq!(estimate_power(BASELINE_W, &inputs).unwrap(), BASELINE_W);
    inputs.temperature_c = 0.0;
    assert_relative_eq!(estimate_power(BASELINE_W, &inputs).unwrap(), 135.0);
    inputs.temperature_c = -10.0;
    assert_relative_eq!(estimate_power(BASELINE_W, &inputs).unwrap(), 150.0);
}

#[test]
fn tailwind_draws_less_than_headwind() {
    let mut head = calm(10.0);
    head.wind_speed_m_s = 20.0;
    let mut tail = head;
    tail.wind_direction = WindDirection::Tailwind;
    let mut cross = head;
    cross.wind_direction = WindDirection::Crosswind;

    let p_head = estimate_power(BASELINE_W, &head).unwrap();
    let p_tail = estimate_power(BASELINE_W, &tail).unwrap();
    let p_cross = estimate_power(BASELINE_W, &cross).unwrap();
    assert!(p_tail < p_cross && p_cross < p_head);
    assert_relative_eq!(p_head - p_tail, 180.0, epsilon = 1e-9);
}

#[test]
fn unrecognized_wind_direction_has_no_effect() {
    let mut inputs = calm(5.0);
    inputs.wind_speed_m_s = 12.0;
    inputs.wind_direction = WindDirection::from_label("gusty");
    assert_eq!(inputs.wind_direction, WindDirection::Unrecognized);
    let terms = power_breakdown(BASELINE_W, &inputs).unwrap();
    assert_eq!(terms.wind_w, 0.0);
}

#[test]
fn power_is_floored_at_fifty_watts() {
    let mut inputs = calm(0.0);
    inputs.wind_direction = WindDirection::Tailwind;
    inputs.wind_speed_m_s = 30.0;
    assert_eq!(estimate_power(20.0, &inputs).unwrap(), 50.0);
}

#[test]
fn non_finite_inputs_are_rejected() {
    let mut inputs = calm(f64::NAN);
    let err = estimate_power(BASELINE_W, &inputs).unwrap_err();
    assert!(matches!(
        err,
        ModelError::InvalidParameter {
            name: "speed_m_s",
            ..
        }
    ));

    inputs.speed_m_s = 5.0;
    inputs.temperature_c = f64::NEG_INFINITY;
    assert!(matches!(
        estimate_power(BASELINE_W, &inputs),
        Err(ModelError::InvalidParameter {
            name: "temperature_c",
            ..
        })
    ));

    assert!(estimate_power(f64::INFINITY, &calm(1.0)).is_err());
}

#[test]
fn overflowing_speed_is_blamed_on_speed() {
    let err = estimate_power(BASELINE_W, &calm(1e103)).unwrap_err();
    assert_eq!(
        err,
        ModelError::InvalidParameter {
            name: "speed_m_s",
            value: 1e103
        }
    );
}

#[test]
fn overflowing_terms_never_yield_infinite_power() {
    let mut inputs = calm(0.0);
    inputs.payload_kg = f64::MAX;
    assert!(matches!(
        estimate_power(BASELINE_W, &inputs),
        Err(ModelError::InvalidParameter {
            name: "payload_kg",
            ..
        })
    ));

    // Every term finite on its own, but the sum overflows.
    let mut inputs = calm(0.0);
    inputs.payload_kg = f64::MAX / 15.0;
    inputs.wind_speed_m_s = f64::MAX / 9.0;
    assert!(matches!(
        estimate_power(BASELINE_W, &inputs),
        Err(ModelError::InvalidParameter { name: "power_w", .. })
    ));
}
