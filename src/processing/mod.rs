// src/processing/mod.rs
pub mod evaluator;
pub mod indices;
pub mod ramp;
pub mod setup;

// Re-export main components
pub use evaluator::{BandSample, BlockOutput, IndexEvaluator, PixelOutput};
pub use ramp::{ColorRamp, ColorStop};
pub use setup::{setup, Setup};
