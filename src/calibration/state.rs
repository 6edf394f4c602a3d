// Calibration record and per-step accumulation
//
// The accumulator is the mutable working set of the guided sequence.
// Finalizing it produces an immutable `Calibration` that outlives the
// rest of the run; the procedure discards the accumulator afterwards.
//
// The center point uses the truncating integer running average
// `center = (center * n + sample) / (n + 1)` applied per sample. The
// per-update truncation is kept deliberately for bit-compatibility with
// the reference behavior (an accumulate-then-divide variant rounds
// differently).

use crate::calibration::step::CalibrationStep;
use crate::sensor::StickSample;

/// Finished calibration record: created once, immutable afterwards
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Calibration {
    /// Raw rest position per axis, running average of the CENTER step
    pub center: (i32, i32),
    /// Raw extremes observed during LEFT (x) and DOWN (y)
    pub min: (u16, u16),
    /// Raw extremes observed during RIGHT (x) and UP (y)
    pub max: (u16, u16),
    /// Band around center reported as CENTER, per axis
    pub dead_zone: (f32, f32),
}

/// Mutable working set for the guided sequence
#[derive(Debug, Clone)]
pub struct CalibrationAccumulator {
    center_x: i64,
    center_y: i64,
    center_samples: u32,
    min_x: u16,
    max_x: u16,
    min_y: u16,
    max_y: u16,
}

impl Default for CalibrationAccumulator {
    fn default() -> Self {
        Self {
            // Mid-scale until the CENTER step overwrites them
            center_x: 32768,
            center_y: 32768,
            center_samples: 0,
            // Extremes start inverted so the first sample always wins
            min_x: u16::MAX,
            max_x: 0,
            min_y: u16::MAX,
            max_y: 0,
        }
    }
}

impl CalibrationAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one sample into the accumulator for the given step
    pub fn record(&mut self, step: CalibrationStep, sample: StickSample) {
        match step {
            CalibrationStep::Center => {
                if self.center_samples == 0 {
                    self.center_x = sample.x as i64;
                    self.center_y = sample.y as i64;
                } else {
                    let n = self.center_samples as i64;
                    self.center_x = (self.center_x * n + sample.x as i64) / (n + 1);
                    self.center_y = (self.center_y * n + sample.y as i64) / (n + 1);
                }
                self.center_samples += 1;
            }
            CalibrationStep::Left => self.min_x = self.min_x.min(sample.x),
            CalibrationStep::Right => self.max_x = self.max_x.max(sample.x),
            CalibrationStep::Up => self.max_y = self.max_y.max(sample.y),
            CalibrationStep::Down => self.min_y = self.min_y.min(sample.y),
        }
    }

    /// Repair an inverted Y range at the end of the DOWN step
    ///
    /// A stick wired upside down records min_y >= max_y. This is a
    /// correction, not an error: the values are swapped and the swap is
    /// logged.
    pub fn correct_inverted_y(&mut self) {
        if self.min_y >= self.max_y {
            log::warn!(
                "min_y {} >= max_y {}, swapping Y extremes",
                self.min_y,
                self.max_y
            );
            std::mem::swap(&mut self.min_y, &mut self.max_y);
        }
    }

    /// Consume the accumulator into an immutable `Calibration`
    ///
    /// Guards the min < max invariant on both axes and derives the
    /// per-axis dead zone as `ratio * (max - min)`.
    pub fn finish(mut self, dead_zone_ratio: f32) -> Calibration {
        if self.min_x >= self.max_x && self.min_x != self.max_x {
            log::warn!(
                "min_x {} >= max_x {}, swapping X extremes",
                self.min_x,
                self.max_x
            );
            std::mem::swap(&mut self.min_x, &mut self.max_x);
        }
        if self.min_y >= self.max_y && self.min_y != self.max_y {
            std::mem::swap(&mut self.min_y, &mut self.max_y);
        }

        Calibration {
            center: (self.center_x as i32, self.center_y as i32),
            min: (self.min_x, self.min_y),
            max: (self.max_x, self.max_y),
            dead_zone: (
                (self.max_x - self.min_x) as f32 * dead_zone_ratio,
                (self.max_y - self.min_y) as f32 * dead_zone_ratio,
            ),
        }
    }

    /// Y extreme recorded so far for the UP step (display use)
    pub fn max_y(&self) -> u16 {
        self.max_y
    }

    /// Y extreme recorded so far for the DOWN step (display use)
    pub fn min_y(&self) -> u16 {
        self.min_y
    }
}
