// src/processing/indices/nbr.rs
use crate::processing::evaluator::BandSample;
use crate::processing::indices::IndexCalculator;

/// Normalized Burn Ratio: (NIR - SWIR) / (NIR + SWIR) over Sentinel-2 B08 and B12
pub struct Nbr {
    name: String,
}

impl Nbr {
    pub const INPUT_BANDS: [&'static str; 2] = ["B08", "B12"];

    pub fn new(name: Option<String>) -> Self {
        Self {
            name: name.unwrap_or_else(|| "NBR".to_string()),
        }
    }
}

impl Default for Nbr {
    fn default() -> Self {
        Self::new(None)
    }
}

impl IndexCalculator for Nbr {
    /// Evaluated in f64 and narrowed once, so reflectances like 0.6/0.2 land on 0.5.
    ///
    /// A zero denominator is left to IEEE semantics: `x/0` is infinite, `0/0` is NaN.
    fn compute(&self, sample: &BandSample) -> f32 {
        let (nir, swir) = (f64::from(sample.b08), f64::from(sample.b12));
        ((nir - swir) / (nir + swir)) as f32
    }

    fn input_bands(&self) -> &[&'static str] {
        &Self::INPUT_BANDS
    }

    fn name(&self) -> &str {
        &self.name
    }
}
