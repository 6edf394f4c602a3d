// Progress tracking for the calibration workflow
//
// Per-tick events surfaced to the presentation layer, plus a progress
// snapshot for callers that poll instead of consuming events.

use crate::calibration::state::Calibration;
use crate::calibration::step::CalibrationStep;
use crate::sensor::StickSample;

/// Progress information for the current calibration step
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CalibrationProgress {
    /// Step currently being calibrated
    pub current_step: CalibrationStep,
    /// Whether sample capture for this step has been armed by a press
    pub collecting: bool,
    /// Samples captured in the current step
    pub samples_collected: u32,
}

/// One tick's worth of calibration output
///
/// Exactly one event is produced per tick. `Idle` covers ticks with
/// nothing to report (waiting for a press, or a sample between progress
/// notifications).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub enum CalibrationEvent {
    /// Nothing to report this tick
    Idle,
    /// The step's operator instruction should be shown (once per step)
    Prompt { step: CalibrationStep },
    /// A press armed sample capture for the step
    CaptureStarted { step: CalibrationStep },
    /// Periodic capture notification (every Nth accumulated sample)
    SampleRecorded {
        step: CalibrationStep,
        samples: u32,
        sample: StickSample,
    },
    /// A second press closed the step
    StepCompleted { step: CalibrationStep, samples: u32 },
    /// All five steps are done; the finished record is attached
    Finished { calibration: Calibration },
    /// The procedure is terminal and ignores further ticks
    Done,
}

impl CalibrationEvent {
    /// Whether this event carries the finished calibration
    pub fn is_finished(&self) -> bool {
        matches!(self, CalibrationEvent::Finished { .. })
    }
}
