// SimulatedStick - synthetic joystick for the demo subcommand
//
// Plays the part of an operator working through the guided sequence:
// rest, press, hold each extreme with a little jitter, press again.
// After calibration it sweeps the four directions forever.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::sensor::{SensorSource, StickSample};

const REST: (u16, u16) = (32768, 32768);
const LEFT: (u16, u16) = (1200, 32768);
const RIGHT: (u16, u16) = (64200, 32768);
const UP: (u16, u16) = (32768, 64200);
const DOWN: (u16, u16) = (32768, 1200);

/// Jitter applied to every axis reading, in raw ADC counts
const JITTER: i32 = 250;

/// Frames of held position per calibration step
const HOLD_FRAMES: usize = 24;

#[derive(Debug, Clone, Copy)]
struct Frame {
    sample: StickSample,
    button_released: bool,
}

/// Deterministic (seeded) scripted operator
pub struct SimulatedStick {
    frames: Vec<Frame>,
    cursor: usize,
    /// Index the cursor wraps back to once the script tail is reached
    loop_from: usize,
}

impl SimulatedStick {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut frames = Vec::new();

        // Guided sequence: the step order the procedure expects
        for target in [REST, LEFT, RIGHT, UP, DOWN] {
            push_step(&mut frames, &mut rng, target);
        }

        // Demo tail: sweep every direction, looped forever
        let loop_from = frames.len();
        for target in [REST, RIGHT, REST, LEFT, REST, UP, REST, DOWN] {
            for _ in 0..10 {
                frames.push(Frame {
                    sample: jittered(&mut rng, target),
                    button_released: true,
                });
            }
        }

        Self {
            frames,
            cursor: 0,
            loop_from,
        }
    }

    fn current(&self) -> Frame {
        self.frames[self.cursor]
    }

    fn advance(&mut self) {
        self.cursor += 1;
        if self.cursor >= self.frames.len() {
            self.cursor = self.loop_from;
        }
    }
}

impl SensorSource for SimulatedStick {
    fn read_axis_x(&mut self) -> u16 {
        self.current().sample.x
    }

    fn read_axis_y(&mut self) -> u16 {
        self.current().sample.y
    }

    // The driver reads the button last each tick, which ends the frame.
    fn read_button(&mut self) -> bool {
        let released = self.current().button_released;
        self.advance();
        released
    }
}

fn push_step(frames: &mut Vec<Frame>, rng: &mut StdRng, target: (u16, u16)) {
    // Idle long enough for the prompt and the debounce window left by
    // the previous step's closing press
    for _ in 0..6 {
        frames.push(Frame {
            sample: jittered(rng, REST),
            button_released: true,
        });
    }
    // Press to start capturing
    frames.push(Frame {
        sample: jittered(rng, target),
        button_released: false,
    });
    // Hold the position; long enough to outlast the debounce window
    for _ in 0..HOLD_FRAMES {
        frames.push(Frame {
            sample: jittered(rng, target),
            button_released: true,
        });
    }
    // Press to finish the step
    frames.push(Frame {
        sample: jittered(rng, target),
        button_released: false,
    });
}

fn jittered(rng: &mut StdRng, (x, y): (u16, u16)) -> StickSample {
    StickSample {
        x: (x as i32 + rng.gen_range(-JITTER..=JITTER)).clamp(0, u16::MAX as i32) as u16,
        y: (y as i32 + rng.gen_range(-JITTER..=JITTER)).clamp(0, u16::MAX as i32) as u16,
    }
}
