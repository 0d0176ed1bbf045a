// src/processing/setup.rs
use serde::{Deserialize, Serialize};

use crate::processing::indices::{IndexCalculator, Nbr};

pub const DATA_MASK_BAND: &str = "dataMask";
pub const DEFAULT_OUTPUT: &str = "default";
pub const INDEX_OUTPUT: &str = "index";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SampleType {
    Auto,
    Uint8,
    Float32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputDescriptor {
    pub id: String,
    pub bands: usize,
    #[serde(rename = "sampleType", default, skip_serializing_if = "Option::is_none")]
    pub sample_type: Option<SampleType>,
}

/// Inputs the host must supply per pixel and the rasters it gets back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setup {
    pub input: Vec<String>,
    pub output: Vec<OutputDescriptor>,
}

impl Setup {
    pub fn for_calculator<I: IndexCalculator + ?Sized>(calculator: &I) -> Self {
        let input = calculator
            .input_bands()
            .iter()
            .copied()
            .chain([DATA_MASK_BAND])
            .map(str::to_string)
            .collect();

        Self {
            input,
            output: vec![
                OutputDescriptor {
                    id: DEFAULT_OUTPUT.to_string(),
                    bands: 4,
                    sample_type: None,
                },
                OutputDescriptor {
                    id: INDEX_OUTPUT.to_string(),
                    bands: 1,
                    sample_type: Some(SampleType::Float32),
                },
            ],
        }
    }

    pub fn output(&self, id: &str) -> Option<&OutputDescriptor> {
        self.output.iter().find(|o| o.id == id)
    }
}

/// Setup for the burn-scar index.
pub fn setup() -> Setup {
    Setup::for_calculator(&Nbr::default())
}
