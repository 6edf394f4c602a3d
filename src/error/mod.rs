// Error types for the stick pilot library
//
// The calibration engine itself cannot fail: it only accepts or ignores
// inputs, and malformed extremes are self-corrected. The errors here
// cover API misuse at the seams around the engine.

use std::fmt;

/// Calibration-related errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalibrationError {
    /// A finished `Calibration` was requested before all five guided
    /// steps completed
    NotComplete,
}

impl fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalibrationError::NotComplete => {
                write!(f, "calibration not complete: guided sequence still running")
            }
        }
    }
}

impl std::error::Error for CalibrationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calibration_error_display() {
        let err = CalibrationError::NotComplete;
        assert!(format!("{}", err).contains("not complete"));
    }
}
