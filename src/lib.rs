// src/lib.rs
pub mod batch;
pub mod cli;
pub mod error;
pub mod logger;
pub mod processing;
pub mod utils;

pub use processing::{setup, BandSample, ColorRamp, IndexEvaluator, PixelOutput};
