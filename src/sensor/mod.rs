// Sensor module - joystick hardware seam
//
// The core never talks to pins or ADC registers directly. It consumes a
// `SensorSource`, one synchronous read per value per tick. The hardware
// contract mirrors a pull-up wired push button: `true` means released.

pub mod simulated;

pub use simulated::SimulatedStick;

/// One raw two-axis sample, produced once per tick and not retained.
///
/// Axis values are unprocessed ADC readings in `[0, 65535]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StickSample {
    pub x: u16,
    pub y: u16,
}

impl StickSample {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Source of raw joystick readings
///
/// Implementations are external collaborators (hardware, simulation,
/// scripted playback). All reads are synchronous and infallible by
/// contract: the source always returns in-range values.
pub trait SensorSource {
    /// Raw X axis reading in `[0, 65535]`
    fn read_axis_x(&mut self) -> u16;

    /// Raw Y axis reading in `[0, 65535]`
    fn read_axis_y(&mut self) -> u16;

    /// Button level: `true` = released, `false` = pressed (pull-up)
    fn read_button(&mut self) -> bool;

    /// Read both axes as one sample
    fn sample(&mut self) -> StickSample {
        StickSample {
            x: self.read_axis_x(),
            y: self.read_axis_y(),
        }
    }
}
