//! Fixture utilities for the deterministic CLI harness.
//!
//! This module discovers fixture scripts, parses tick inputs and
//! optional expectation JSON, and runs scripts through a `Session`.
//! Scripts are plain JSON: one entry per tick with raw axis values and
//! the button level, plus optional expected readings for verification.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::analysis::classifier::{Direction, Reading};
use crate::calibration::progress::CalibrationEvent;
use crate::config::AppConfig;
use crate::sensor::StickSample;
use crate::session::{Session, SessionOutput};

/// Default location for fixture script assets.
pub const DEFAULT_FIXTURE_ROOT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures");

/// One scripted tick of sensor input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FixtureTick {
    pub x: u16,
    pub y: u16,
    /// Button level for the tick (`true` = released)
    #[serde(default = "default_released")]
    pub button_released: bool,
}

fn default_released() -> bool {
    true
}

/// JSON fixture schema: scripted inputs plus optional expectations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureScript {
    pub name: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub ticks: Vec<FixtureTick>,
    /// Expected readings, index-aligned with the post-calibration output
    #[serde(default)]
    pub expectations: Option<Vec<ExpectedReading>>,
}

/// Expected reading definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectedReading {
    pub x_percent: i32,
    pub y_percent: i32,
    pub direction: Direction,
    /// Allowed absolute deviation on the percent fields
    #[serde(default)]
    pub tolerance: i32,
}

impl ExpectedReading {
    fn matches(&self, actual: &Reading) -> bool {
        (actual.x_percent - self.x_percent).abs() <= self.tolerance
            && (actual.y_percent - self.y_percent).abs() <= self.tolerance
            && actual.direction == self.direction
    }
}

/// Outcome of running a script through a session.
#[derive(Debug)]
pub struct ReplayOutcome {
    /// Calibration events, Idle ticks filtered out
    pub events: Vec<CalibrationEvent>,
    /// Readings produced after calibration finished
    pub readings: Vec<Reading>,
}

/// Detailed diff entry for a single expectation failure.
#[derive(Debug)]
pub struct ExpectationFailure {
    pub index: usize,
    pub expected: Option<ExpectedReading>,
    pub actual: Option<Reading>,
}

/// Outcome of comparing actual readings with expectations.
#[derive(Debug)]
pub struct ExpectationDiff {
    pub failures: Vec<ExpectationFailure>,
}

impl ExpectationDiff {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "failures": self.failures.iter().map(|failure| {
                serde_json::json!({
                    "index": failure.index,
                    "expected": failure.expected,
                    "actual": failure.actual,
                })
            }).collect::<Vec<_>>()
        })
    }
}

/// Compare readings against expectations, index-wise.
pub fn verify(
    expectations: &[ExpectedReading],
    actual: &[Reading],
) -> std::result::Result<(), ExpectationDiff> {
    let mut failures = Vec::new();

    for (idx, expected) in expectations.iter().enumerate() {
        match actual.get(idx) {
            Some(reading) if expected.matches(reading) => {}
            other => failures.push(ExpectationFailure {
                index: idx,
                expected: Some(expected.clone()),
                actual: other.copied(),
            }),
        }
    }

    for (idx, reading) in actual.iter().enumerate().skip(expectations.len()) {
        failures.push(ExpectationFailure {
            index: idx,
            expected: None,
            actual: Some(*reading),
        });
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(ExpectationDiff { failures })
    }
}

/// Run a script through a fresh session, collecting events and readings.
pub fn run_script(script: &FixtureScript, config: &AppConfig) -> ReplayOutcome {
    let mut session = Session::new(config.calibration.clone());
    let mut events = Vec::new();
    let mut readings = Vec::new();

    for tick in &script.ticks {
        let sample = StickSample::new(tick.x, tick.y);
        match session.tick(sample, tick.button_released) {
            SessionOutput::Calibrating(CalibrationEvent::Idle) => {}
            SessionOutput::Calibrating(event) => events.push(event),
            SessionOutput::Reading(reading) => readings.push(reading),
        }
    }

    ReplayOutcome { events, readings }
}

/// Catalog responsible for discovering fixture scripts on disk.
pub struct FixtureCatalog {
    root: PathBuf,
}

impl FixtureCatalog {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List all fixture script names.
    pub fn discover(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        if !self.root.exists() {
            return Ok(names);
        }

        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                let path = entry.path();
                if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                    names.push(
                        path.file_stem()
                            .and_then(|s| s.to_str())
                            .unwrap_or_default()
                            .to_string(),
                    );
                }
            }
        }

        names.sort();
        Ok(names)
    }

    /// Load a script by name or path.
    pub fn load(&self, fixture: &str) -> Result<FixtureScript> {
        let path = self.resolve_fixture_path(fixture)?;
        let json = fs::read_to_string(&path)
            .with_context(|| format!("reading fixture {}", path.display()))?;
        serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))
    }

    fn resolve_fixture_path(&self, fixture: &str) -> Result<PathBuf> {
        let as_path = Path::new(fixture);
        if as_path.exists() {
            return Ok(as_path.to_path_buf());
        }

        let candidate = self.root.join(format!("{fixture}.json"));
        if candidate.exists() {
            Ok(candidate)
        } else {
            Err(anyhow!(
                "Fixture '{fixture}' not found in {}",
                self.root.display()
            ))
        }
    }
}

impl Default for FixtureCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_FIXTURE_ROOT)
    }
}
