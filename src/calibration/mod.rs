// Calibration module - guided calibration workflow and record storage
//
// Components:
// 1. CalibrationStep: the fixed five-step sequence
// 2. CalibrationProcedure: tick-driven sample collection state machine
// 3. Calibration / CalibrationAccumulator: finished record and its
//    mutable working set
//
// The workflow:
// 1. Create CalibrationProcedure
// 2. Feed it one sample + button level per tick; the operator brackets
//    each step with button presses
// 3. The `Finished` event (or `finalize()`) yields the immutable record

pub mod procedure;
pub mod progress;
pub mod state;
pub mod step;

pub use procedure::CalibrationProcedure;
pub use progress::{CalibrationEvent, CalibrationProgress};
pub use state::{Calibration, CalibrationAccumulator};
pub use step::CalibrationStep;
