// src/batch.rs
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::processing::{BandSample, ColorRamp, IndexEvaluator, PixelOutput};

#[derive(Deserialize, Serialize, Debug)]
pub struct BatchConfig {
    /// Overrides the session ramp for this batch.
    #[serde(default)]
    pub ramp: Option<ColorRamp>,
    pub samples: Vec<BandSample>,
}

impl BatchConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read batch config {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid batch config {}", path.display()))
    }
}

pub fn load_ramp(path: &Path) -> Result<ColorRamp> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read color ramp {}", path.display()))?;
    ColorRamp::from_json(&content)
        .with_context(|| format!("Invalid color ramp {}", path.display()))
}

/// Evaluate every sample of the batch config at `config_path`.
///
/// The config's own ramp wins over `session_ramp`.
pub fn process_batch(config_path: &Path, session_ramp: ColorRamp) -> Result<Vec<PixelOutput>> {
    let config = BatchConfig::from_file(config_path)?;
    let ramp = config.ramp.unwrap_or(session_ramp);
    let evaluator = IndexEvaluator::new(ramp);

    info!(
        "Starting batch evaluation of {} samples from {}",
        config.samples.len(),
        config_path.display()
    );

    let outputs = evaluator.evaluate_all(&config.samples);

    let no_data = outputs.iter().filter(|o| !o.has_data()).count();
    info!(
        "Batch evaluation complete: {} pixels, {} without data",
        outputs.len(),
        no_data
    );
    Ok(outputs)
}

/// Write `value` as JSON to `output`, or to stdout when no path is given.
pub fn write_json<T: Serialize + ?Sized>(value: &T, output: Option<&Path>, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };

    match output {
        Some(path) => {
            fs::write(path, json + "\n")
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", json)?;
        }
    }
    Ok(())
}
