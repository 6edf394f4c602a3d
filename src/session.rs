// Session - tick driver seam between calibration and normal operation
//
// Owns the calibration procedure until it finishes, then consumes the
// resulting record into a classifier for the rest of the run. One actor,
// advanced synchronously one tick at a time; the caller provides pacing.

use crate::analysis::classifier::{Classifier, Reading};
use crate::calibration::procedure::CalibrationProcedure;
use crate::calibration::progress::CalibrationEvent;
use crate::calibration::state::Calibration;
use crate::config::CalibrationConfig;
use crate::sensor::StickSample;

/// What one tick produced
#[derive(Debug, Clone)]
pub enum SessionOutput {
    /// Guided sequence still running; event for the presentation layer
    Calibrating(CalibrationEvent),
    /// Calibrated: one classified reading per tick
    Reading(Reading),
}

enum Phase {
    Calibrating(CalibrationProcedure),
    Running(Classifier),
}

/// Session drives calibration-then-classification over a shared tick
pub struct Session {
    phase: Phase,
}

impl Session {
    pub fn new(config: CalibrationConfig) -> Self {
        Self {
            phase: Phase::Calibrating(CalibrationProcedure::new(config)),
        }
    }

    /// Create with default calibration configuration
    pub fn new_default() -> Self {
        Self::new(CalibrationConfig::default())
    }

    /// Advance one tick
    ///
    /// While calibrating, forwards to the procedure; the tick that emits
    /// `Finished` also hands the record to the classifier, so the very
    /// next tick yields a `Reading`.
    pub fn tick(&mut self, sample: StickSample, button_released: bool) -> SessionOutput {
        let event = match &mut self.phase {
            Phase::Running(classifier) => {
                return SessionOutput::Reading(classifier.classify(sample, !button_released));
            }
            Phase::Calibrating(procedure) => procedure.tick(sample, button_released),
        };

        if let CalibrationEvent::Finished { calibration } = &event {
            log::debug!("switching session to classification");
            self.phase = Phase::Running(Classifier::new(calibration.clone()));
        }
        SessionOutput::Calibrating(event)
    }

    /// Whether the guided sequence has finished
    pub fn is_calibrated(&self) -> bool {
        matches!(self.phase, Phase::Running(_))
    }

    /// The finished record, once calibrated
    pub fn calibration(&self) -> Option<&Calibration> {
        match &self.phase {
            Phase::Running(classifier) => Some(classifier.calibration()),
            Phase::Calibrating(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::classifier::Direction;

    fn sample(x: u16, y: u16) -> StickSample {
        StickSample::new(x, y)
    }

    /// Bracket one guided step with presses, holding `s`
    fn run_step(session: &mut Session, s: StickSample) {
        for _ in 0..6 {
            session.tick(s, true);
        }
        session.tick(s, false);
        for _ in 0..20 {
            session.tick(s, true);
        }
        session.tick(s, false);
    }

    fn calibrate(session: &mut Session) {
        run_step(session, sample(32768, 32768));
        run_step(session, sample(1000, 32768));
        run_step(session, sample(64000, 32768));
        run_step(session, sample(32768, 64000));
        run_step(session, sample(32768, 1000));
    }

    #[test]
    fn test_phase_handoff_after_finished() {
        let mut session = Session::new_default();
        assert!(!session.is_calibrated());
        calibrate(&mut session);
        assert!(session.is_calibrated());

        let calibration = session.calibration().unwrap();
        assert_eq!(calibration.center, (32768, 32768));

        match session.tick(sample(32768, 32768), true) {
            SessionOutput::Reading(reading) => {
                assert_eq!(reading.direction, Direction::Center);
                assert!(!reading.button_pressed);
            }
            SessionOutput::Calibrating(event) => panic!("still calibrating: {:?}", event),
        }
    }

    #[test]
    fn test_reading_reports_button_pressed() {
        let mut session = Session::new_default();
        calibrate(&mut session);

        match session.tick(sample(64000, 32768), false) {
            SessionOutput::Reading(reading) => {
                assert_eq!(reading.direction, Direction::Right);
                assert_eq!(reading.x_percent, 100);
                assert!(reading.button_pressed);
            }
            SessionOutput::Calibrating(event) => panic!("still calibrating: {:?}", event),
        }
    }
}
