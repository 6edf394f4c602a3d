//! Integration tests for the guided calibration session
//!
//! These tests drive the full workflow across the library surface:
//! - Five-step guided calibration with press-capture-press bracketing
//! - Handoff from calibration to per-tick readings
//! - Fixture script replay and expectation verification

use stick_pilot::calibration::CalibrationEvent;
use stick_pilot::config::{AppConfig, CalibrationConfig};
use stick_pilot::fixtures::{self, FixtureCatalog};
use stick_pilot::sensor::StickSample;
use stick_pilot::session::{Session, SessionOutput};
use stick_pilot::Direction;

fn sample(x: u16, y: u16) -> StickSample {
    StickSample::new(x, y)
}

/// Bracket one guided step with button presses while holding `s`,
/// collecting every non-idle event along the way.
fn run_step(session: &mut Session, s: StickSample, events: &mut Vec<CalibrationEvent>) {
    let mut record = |output: SessionOutput| match output {
        SessionOutput::Calibrating(CalibrationEvent::Idle) => {}
        SessionOutput::Calibrating(event) => events.push(event),
        SessionOutput::Reading(reading) => panic!("unexpected reading: {:?}", reading),
    };

    for _ in 0..6 {
        record(session.tick(s, true));
    }
    record(session.tick(s, false));
    for _ in 0..20 {
        record(session.tick(s, true));
    }
    record(session.tick(s, false));
}

#[test]
fn test_end_to_end_guided_calibration() {
    let mut session = Session::new(CalibrationConfig::default());
    let mut events = Vec::new();

    run_step(&mut session, sample(32768, 32768), &mut events);
    run_step(&mut session, sample(1000, 32768), &mut events);
    run_step(&mut session, sample(64000, 32768), &mut events);
    run_step(&mut session, sample(32768, 64000), &mut events);
    run_step(&mut session, sample(32768, 1000), &mut events);

    // Five prompts, in the guided order, exactly once each
    let prompts: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            CalibrationEvent::Prompt { step } => Some(step.display_name()),
            _ => None,
        })
        .collect();
    assert_eq!(prompts, vec!["CENTER", "LEFT", "RIGHT", "UP", "DOWN"]);

    // The last event carries the finished record
    let calibration = match events.last() {
        Some(CalibrationEvent::Finished { calibration }) => calibration,
        other => panic!("expected Finished event, got {:?}", other),
    };
    assert_eq!(calibration.center, (32768, 32768));
    assert_eq!(calibration.min, (1000, 1000));
    assert_eq!(calibration.max, (64000, 64000));
    assert!((calibration.dead_zone.0 - 9450.0).abs() < f32::EPSILON);
    assert!((calibration.dead_zone.1 - 9450.0).abs() < f32::EPSILON);

    // Subsequent ticks classify
    match session.tick(sample(32768, 32768), true) {
        SessionOutput::Reading(reading) => {
            assert_eq!(reading.x_percent, 0);
            assert_eq!(reading.y_percent, 0);
            assert_eq!(reading.direction, Direction::Center);
        }
        other => panic!("expected reading, got {:?}", other),
    }
    match session.tick(sample(64000, 32768), true) {
        SessionOutput::Reading(reading) => {
            assert_eq!(reading.x_percent, 100);
            assert_eq!(reading.y_percent, 0);
            assert_eq!(reading.direction, Direction::Right);
        }
        other => panic!("expected reading, got {:?}", other),
    }
}

#[test]
fn test_guided_sweep_fixture_meets_expectations() {
    let catalog = FixtureCatalog::default();
    let script = catalog.load("guided_sweep").expect("fixture present");
    let outcome = fixtures::run_script(&script, &AppConfig::default());

    assert_eq!(outcome.readings.len(), 5);
    let expectations = script.expectations.as_ref().expect("expectations present");
    if let Err(diff) = fixtures::verify(expectations, &outcome.readings) {
        panic!("fixture diff: {}", diff.to_json());
    }
}

#[test]
fn test_inverted_stick_recovers_during_replay() {
    // Operator pushes UP on a stick whose Y axis reads inverted; the
    // engine swaps the extremes and readings stay consistent
    let mut session = Session::new(CalibrationConfig::default());
    let mut events = Vec::new();

    run_step(&mut session, sample(32768, 32768), &mut events);
    run_step(&mut session, sample(1000, 32768), &mut events);
    run_step(&mut session, sample(64000, 32768), &mut events);
    run_step(&mut session, sample(32768, 1000), &mut events); // UP reads low
    run_step(&mut session, sample(32768, 64000), &mut events); // DOWN reads high

    let calibration = session.calibration().expect("calibrated");
    assert!(calibration.min.1 < calibration.max.1);
    assert_eq!(calibration.min.1, 1000);
    assert_eq!(calibration.max.1, 64000);
}
