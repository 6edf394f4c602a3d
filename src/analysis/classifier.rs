// Classifier - direction and normalized position from raw samples
//
// A pure mapping from one raw sample pair plus a finished `Calibration`
// to a `Reading`. Bit-for-bit reproducible for identical integer inputs;
// this is the contract surface for tests.
//
// Decision order for direction:
// 1. Both deltas strictly inside the dead zone -> Center
// 2. |dx| > |dy| -> Right/Left by the sign of dx
// 3. Otherwise -> Up/Down by the sign of dy (ties go vertical)

use crate::calibration::state::Calibration;
use crate::sensor::StickSample;

/// Normalized output range bounds
pub const PERCENT_MIN: i32 = -100;
pub const PERCENT_MAX: i32 = 100;

/// Coarse stick direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    Center,
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Get human-readable name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            Direction::Center => "CENTER",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
            Direction::Up => "UP",
            Direction::Down => "DOWN",
        }
    }
}

/// One tick of classified output
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Reading {
    /// X position in [-100, +100] relative to calibrated min/max
    pub x_percent: i32,
    /// Y position in [-100, +100] relative to calibrated min/max
    pub y_percent: i32,
    pub direction: Direction,
    pub button_pressed: bool,
}

/// Linear rescale of `value` from `[val_min, val_max]` to [-100, +100],
/// truncated toward zero.
///
/// Guard: a degenerate axis (`val_max == val_min`, stick never moved
/// during calibration) maps to 0 rather than dividing by zero.
pub fn map_value(value: i32, val_min: i32, val_max: i32) -> i32 {
    if val_max == val_min {
        return 0;
    }
    let span_new = (PERCENT_MAX - PERCENT_MIN) as f64;
    let span_old = (val_max - val_min) as f64;
    ((value - val_min) as f64 * span_new / span_old + PERCENT_MIN as f64) as i32
}

/// Classify one raw sample against the calibrated center and dead zone
pub fn get_direction(x: u16, y: u16, calibration: &Calibration) -> Direction {
    let dx = x as i32 - calibration.center.0;
    let dy = y as i32 - calibration.center.1;

    if (dx.abs() as f32) < calibration.dead_zone.0 && (dy.abs() as f32) < calibration.dead_zone.1 {
        return Direction::Center;
    }

    // The strict > favors the vertical axis on |dx| == |dy|
    if dx.abs() > dy.abs() {
        if dx > 0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if dy > 0 {
        Direction::Up
    } else {
        Direction::Down
    }
}

/// Classifier owns the finished calibration for the rest of the run
pub struct Classifier {
    calibration: Calibration,
}

impl Classifier {
    pub fn new(calibration: Calibration) -> Self {
        Self { calibration }
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Produce the per-tick `Reading` for one raw sample
    pub fn classify(&self, sample: StickSample, button_pressed: bool) -> Reading {
        Reading {
            x_percent: map_value(
                sample.x as i32,
                self.calibration.min.0 as i32,
                self.calibration.max.0 as i32,
            ),
            y_percent: map_value(
                sample.y as i32,
                self.calibration.min.1 as i32,
                self.calibration.max.1 as i32,
            ),
            direction: get_direction(sample.x, sample.y, &self.calibration),
            button_pressed,
        }
    }
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
