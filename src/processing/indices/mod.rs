// src/processing/indices/mod.rs
pub mod nbr;

// Re-export indices
pub use nbr::Nbr;

use crate::processing::evaluator::BandSample;

/// Trait for per-pixel spectral index calculators
pub trait IndexCalculator: Send + Sync {
    /// Compute the index for a single pixel
    fn compute(&self, sample: &BandSample) -> f32;

    /// Band identifiers read by `compute`, in host naming
    fn input_bands(&self) -> &[&'static str];

    /// Return the name of the index
    fn name(&self) -> &str;
}
