// Analysis module - normalized position and direction classification

pub mod classifier;

pub use classifier::{get_direction, map_value, Classifier, Direction, Reading};
