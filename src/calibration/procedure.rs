// CalibrationProcedure - guided sample collection state machine
//
// The procedure is advanced one tick at a time with a fresh sample and
// the current button level; it never blocks and never fails. Each of the
// five steps has two sub-phases: Armed (waiting for a press to start
// capture) and Capturing (accumulating samples until a second press).
//
// Button debouncing lives inside the transition logic: an accepted
// falling edge starts a tick countdown during which further edges are
// ignored, instead of relying on host-loop sleeps.

use crate::calibration::progress::{CalibrationEvent, CalibrationProgress};
use crate::calibration::state::{Calibration, CalibrationAccumulator};
use crate::calibration::step::CalibrationStep;
use crate::config::CalibrationConfig;
use crate::error::CalibrationError;
use crate::sensor::StickSample;

/// CalibrationProcedure drives the five-step guided sequence
pub struct CalibrationProcedure {
    /// Current step; `None` once the sequence is terminal
    current: Option<CalibrationStep>,
    /// Whether a press has armed sample capture for the current step
    collecting: bool,
    /// Samples captured in the current step
    sample_count: u32,
    /// Whether the step's prompt event has been emitted
    instruction_shown: bool,
    /// Button level on the previous tick (`true` = released)
    last_button_released: bool,
    /// Ticks left during which button edges are ignored
    debounce_remaining: u32,
    accumulator: CalibrationAccumulator,
    /// Finished record, kept so `finalize` can be called after the
    /// `Finished` event was consumed
    result: Option<Calibration>,
    config: CalibrationConfig,
}

impl CalibrationProcedure {
    pub fn new(config: CalibrationConfig) -> Self {
        Self {
            current: Some(CalibrationStep::Center),
            collecting: false,
            sample_count: 0,
            instruction_shown: false,
            last_button_released: true,
            debounce_remaining: 0,
            accumulator: CalibrationAccumulator::new(),
            result: None,
            config,
        }
    }

    /// Create with default configuration
    pub fn new_default() -> Self {
        Self::new(CalibrationConfig::default())
    }

    /// Advance the state machine by one tick
    ///
    /// # Arguments
    /// * `sample` - Fresh raw reading for this tick
    /// * `button_released` - Button level (`true` = released)
    ///
    /// # Returns
    /// The single event produced by this tick. Terminal procedures
    /// return `CalibrationEvent::Done` forever.
    pub fn tick(&mut self, sample: StickSample, button_released: bool) -> CalibrationEvent {
        let Some(step) = self.current else {
            self.last_button_released = button_released;
            return CalibrationEvent::Done;
        };

        let edge = self.falling_edge(button_released);
        self.last_button_released = button_released;

        if !self.collecting {
            if edge {
                self.collecting = true;
                self.sample_count = 0;
                self.instruction_shown = true;
                self.debounce_remaining = self.config.debounce_ticks;
                log::debug!("capture started for step {}", step.display_name());
                return CalibrationEvent::CaptureStarted { step };
            }
            if !self.instruction_shown {
                self.instruction_shown = true;
                return CalibrationEvent::Prompt { step };
            }
            return CalibrationEvent::Idle;
        }

        if edge {
            self.debounce_remaining = self.config.debounce_ticks;
            return self.complete_step(step);
        }

        self.accumulator.record(step, sample);
        self.sample_count += 1;
        if self.sample_count % self.config.progress_every_n_samples == 0 {
            CalibrationEvent::SampleRecorded {
                step,
                samples: self.sample_count,
                sample,
            }
        } else {
            CalibrationEvent::Idle
        }
    }

    /// Detect a released-to-pressed transition, suppressed while the
    /// debounce countdown is live
    fn falling_edge(&mut self, button_released: bool) -> bool {
        if self.debounce_remaining > 0 {
            self.debounce_remaining -= 1;
            return false;
        }
        self.last_button_released && !button_released
    }

    fn complete_step(&mut self, step: CalibrationStep) -> CalibrationEvent {
        let samples = self.sample_count;
        log::info!(
            "step {} completed with {} samples",
            step.display_name(),
            samples
        );

        match step {
            CalibrationStep::Up => {
                log::info!("UP recorded, max_y = {}", self.accumulator.max_y());
            }
            CalibrationStep::Down => {
                log::info!("DOWN recorded, min_y = {}", self.accumulator.min_y());
                self.accumulator.correct_inverted_y();
            }
            _ => {}
        }

        self.collecting = false;
        self.sample_count = 0;
        self.instruction_shown = false;
        self.current = step.next();

        if self.current.is_some() {
            return CalibrationEvent::StepCompleted { step, samples };
        }

        let calibration = std::mem::take(&mut self.accumulator)
            .finish(self.config.dead_zone_ratio);
        log::info!(
            "calibration finished: center=({}, {}) x=[{}-{}] y=[{}-{}] dead_zone=({:.0}, {:.0})",
            calibration.center.0,
            calibration.center.1,
            calibration.min.0,
            calibration.max.0,
            calibration.min.1,
            calibration.max.1,
            calibration.dead_zone.0,
            calibration.dead_zone.1
        );
        self.result = Some(calibration.clone());
        CalibrationEvent::Finished { calibration }
    }

    /// Get current calibration progress
    ///
    /// Returns `None` once the sequence is terminal.
    pub fn get_progress(&self) -> Option<CalibrationProgress> {
        self.current.map(|step| CalibrationProgress {
            current_step: step,
            collecting: self.collecting,
            samples_collected: self.sample_count,
        })
    }

    /// Check if the guided sequence has finished
    pub fn is_complete(&self) -> bool {
        self.current.is_none()
    }

    /// Get the finished record
    ///
    /// # Returns
    /// * `Ok(Calibration)` - Sequence finished
    /// * `Err(CalibrationError::NotComplete)` - Steps remain
    pub fn finalize(&self) -> Result<Calibration, CalibrationError> {
        self.result.clone().ok_or(CalibrationError::NotComplete)
    }

    /// Start the guided sequence over from CENTER
    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone());
    }
}
