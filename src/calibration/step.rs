// Guided calibration steps
//
// The operator walks the stick through five positions in a fixed order.
// The order is monotonic: a step is never revisited.

/// Position being calibrated
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CalibrationStep {
    /// Step 1: stick at rest, derives the center point
    Center,
    /// Step 2: stick held left, records the X minimum
    Left,
    /// Step 3: stick held right, records the X maximum
    Right,
    /// Step 4: stick held up, records the Y maximum
    Up,
    /// Step 5: stick held down, records the Y minimum
    Down,
}

impl CalibrationStep {
    /// Total number of guided steps
    pub const COUNT: usize = 5;

    /// Get the next step in the calibration sequence
    ///
    /// # Returns
    /// * `Some(CalibrationStep)` - Next step to run
    /// * `None` - Calibration sequence complete
    pub fn next(&self) -> Option<CalibrationStep> {
        match self {
            CalibrationStep::Center => Some(CalibrationStep::Left),
            CalibrationStep::Left => Some(CalibrationStep::Right),
            CalibrationStep::Right => Some(CalibrationStep::Up),
            CalibrationStep::Up => Some(CalibrationStep::Down),
            CalibrationStep::Down => None,
        }
    }

    /// Zero-based position in the sequence
    pub fn index(&self) -> usize {
        match self {
            CalibrationStep::Center => 0,
            CalibrationStep::Left => 1,
            CalibrationStep::Right => 2,
            CalibrationStep::Up => 3,
            CalibrationStep::Down => 4,
        }
    }

    /// Get human-readable name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            CalibrationStep::Center => "CENTER",
            CalibrationStep::Left => "LEFT",
            CalibrationStep::Right => "RIGHT",
            CalibrationStep::Up => "UP",
            CalibrationStep::Down => "DOWN",
        }
    }

    /// Operator prompt shown when the step becomes current
    pub fn instruction(&self) -> &'static str {
        match self {
            CalibrationStep::Center => "LEAVE the joystick at CENTER",
            CalibrationStep::Left => "PUSH the joystick LEFT",
            CalibrationStep::Right => "PUSH the joystick RIGHT",
            CalibrationStep::Up => "PUSH the joystick UP",
            CalibrationStep::Down => "PUSH the joystick DOWN",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_order() {
        assert_eq!(CalibrationStep::Center.next(), Some(CalibrationStep::Left));
        assert_eq!(CalibrationStep::Left.next(), Some(CalibrationStep::Right));
        assert_eq!(CalibrationStep::Right.next(), Some(CalibrationStep::Up));
        assert_eq!(CalibrationStep::Up.next(), Some(CalibrationStep::Down));
        assert_eq!(CalibrationStep::Down.next(), None);
    }

    #[test]
    fn test_step_index_matches_order() {
        let mut step = CalibrationStep::Center;
        let mut expected = 0;
        loop {
            assert_eq!(step.index(), expected);
            match step.next() {
                Some(next) => {
                    step = next;
                    expected += 1;
                }
                None => break,
            }
        }
        assert_eq!(expected + 1, CalibrationStep::COUNT);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(CalibrationStep::Center.display_name(), "CENTER");
        assert_eq!(CalibrationStep::Down.display_name(), "DOWN");
    }
}
