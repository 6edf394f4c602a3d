// Stick Pilot - joystick calibration and direction monitor
// Guided five-step calibration feeding a normalized direction classifier

// Module declarations
pub mod analysis;
pub mod calibration;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod sensor;
pub mod session;

// Re-exports for convenience
pub use analysis::{Classifier, Direction, Reading};
pub use calibration::{Calibration, CalibrationEvent, CalibrationProcedure, CalibrationStep};
pub use sensor::{SensorSource, StickSample};
pub use session::{Session, SessionOutput};
