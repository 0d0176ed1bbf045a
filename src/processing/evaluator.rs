// src/processing/evaluator.rs
//! Per-pixel index evaluation into a visual and a numeric output.

use rayon::prelude::*;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, warn};

use crate::error::BlockError;
use crate::processing::indices::{IndexCalculator, Nbr};
use crate::processing::ramp::ColorRamp;
use crate::processing::setup::Setup;

pub const MIN_INDEX: f32 = 0.0;
pub const MAX_INDEX: f32 = 1.0;

/// No-data marker for the numeric output.
pub const NO_DATA: f32 = f32::NAN;

/// Visual output for pixels outside the index domain.
pub const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

/// Band values the host supplies for one pixel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandSample {
    #[serde(rename = "B08")]
    pub b08: f32,
    #[serde(rename = "B12")]
    pub b12: f32,
    /// 1 for valid data, 0 otherwise.
    #[serde(rename = "dataMask", deserialize_with = "deserialize_mask")]
    pub data_mask: u8,
}

/// Accepts the mask as an integer or as an integral float such as `1.0`.
fn deserialize_mask<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MaskRepr {
        Int(u8),
        Float(f64),
    }

    match MaskRepr::deserialize(deserializer)? {
        MaskRepr::Int(mask) => Ok(mask),
        MaskRepr::Float(mask) if mask.fract() == 0.0 && (0.0..=255.0).contains(&mask) => Ok(mask as u8),
        MaskRepr::Float(mask) => Err(de::Error::custom(format!(
            "dataMask must be an integer in 0..=255, got {}",
            mask
        ))),
    }
}

impl BandSample {
    pub const fn new(b08: f32, b12: f32, data_mask: u8) -> Self {
        Self {
            b08,
            b12,
            data_mask,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.data_mask == 1
    }
}

/// Both outputs for one pixel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PixelOutput {
    /// R, G, B and the pixel's data mask as alpha.
    pub default: [u8; 4],
    /// Raw index, or [`NO_DATA`] for masked pixels.
    #[serde(serialize_with = "serialize_index")]
    pub index: f32,
}

/// JSON has no non-finite numbers: NaN (no data) becomes `null` and a raw
/// infinite index becomes `"Infinity"` / `"-Infinity"`.
fn serialize_index<S: Serializer>(index: &f32, serializer: S) -> Result<S::Ok, S::Error> {
    if index.is_nan() {
        serializer.serialize_none()
    } else if *index == f32::INFINITY {
        serializer.serialize_str("Infinity")
    } else if *index == f32::NEG_INFINITY {
        serializer.serialize_str("-Infinity")
    } else {
        serializer.serialize_f32(*index)
    }
}

impl PixelOutput {
    /// The visual output with alpha scaled to the 8-bit range.
    pub fn rgba8(&self) -> [u8; 4] {
        let [r, g, b, a] = self.default;
        [r, g, b, if a > 0 { u8::MAX } else { 0 }]
    }

    pub fn has_data(&self) -> bool {
        !self.index.is_nan()
    }
}

/// Interleaved outputs for a run of pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockOutput {
    /// `4 * len` bytes, RGBA per pixel with alpha scaled to 0/255.
    pub rgba: Vec<u8>,
    pub index: Vec<f32>,
}

impl BlockOutput {
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Evaluates an index over pixels and renders it through a color ramp.
///
/// The ramp is owned and never mutated, so a single evaluator can be shared
/// across threads for the whole session.
pub struct IndexEvaluator<I: IndexCalculator = Nbr> {
    calculator: I,
    ramp: ColorRamp,
}

impl IndexEvaluator<Nbr> {
    pub fn new(ramp: ColorRamp) -> Self {
        Self::with_calculator(Nbr::default(), ramp)
    }
}

impl Default for IndexEvaluator<Nbr> {
    fn default() -> Self {
        Self::new(ColorRamp::burn_scar())
    }
}

impl<I: IndexCalculator> IndexEvaluator<I> {
    pub fn with_calculator(calculator: I, ramp: ColorRamp) -> Self {
        debug!(
            index = calculator.name(),
            stops = ramp.stops().len(),
            "Index evaluator ready"
        );
        Self { calculator, ramp }
    }

    pub fn calculator(&self) -> &I {
        &self.calculator
    }

    pub fn ramp(&self) -> &ColorRamp {
        &self.ramp
    }

    /// Declared inputs and outputs for the host.
    pub fn setup(&self) -> Setup {
        Setup::for_calculator(&self.calculator)
    }

    pub fn evaluate(&self, sample: BandSample) -> PixelOutput {
        let index = self.calculator.compute(&sample);

        PixelOutput {
            default: self.visualize(index, sample.data_mask),
            index: if sample.is_valid() { index } else { NO_DATA },
        }
    }

    /// Color for `index`, or [`TRANSPARENT`] when it falls outside the domain.
    ///
    /// Non-finite values are rejected before the range comparison since NaN is
    /// unordered and would otherwise pass it.
    pub fn visualize(&self, index: f32, data_mask: u8) -> [u8; 4] {
        if !index.is_finite() || !(MIN_INDEX..=MAX_INDEX).contains(&index) {
            return TRANSPARENT;
        }

        let color = self.ramp.process(index);
        [color.r, color.g, color.b, data_mask]
    }

    pub fn evaluate_all(&self, samples: &[BandSample]) -> Vec<PixelOutput> {
        samples.par_iter().map(|&sample| self.evaluate(sample)).collect()
    }

    /// Evaluate equal-length band slices into interleaved output buffers.
    ///
    /// The visual buffer holds [`PixelOutput::rgba8`], ready for 8-bit tiles.
    pub fn evaluate_block(
        &self,
        b08: &[f32],
        b12: &[f32],
        data_mask: &[u8],
    ) -> Result<BlockOutput, BlockError> {
        if b08.len() != b12.len() || b08.len() != data_mask.len() {
            warn!(
                b08 = b08.len(),
                b12 = b12.len(),
                data_mask = data_mask.len(),
                "Band slices differ in length"
            );
            return Err(BlockError::LengthMismatch {
                b08: b08.len(),
                b12: b12.len(),
                data_mask: data_mask.len(),
            });
        }

        let len = b08.len();
        let mut rgba = vec![0u8; len * 4];
        let mut index = vec![NO_DATA; len];

        rgba.par_chunks_exact_mut(4)
            .zip(index.par_iter_mut())
            .enumerate()
            .for_each(|(i, (pixel, value))| {
                let output = self.evaluate(BandSample::new(b08[i], b12[i], data_mask[i]));
                pixel.copy_from_slice(&output.rgba8());
                *value = output.index;
            });

        debug!(pixels = len, index = self.calculator.name(), "Block evaluated");
        Ok(BlockOutput { rgba, index })
    }
}
