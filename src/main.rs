// src/main.rs
use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use tracing::debug;

use burn_index::batch::{load_ramp, process_batch, write_json};
use burn_index::cli::{Cli, Commands};
use burn_index::utils::Color;
use burn_index::{logger, setup, BandSample, ColorRamp, IndexEvaluator};

#[derive(Serialize)]
struct RampSample {
    value: f32,
    color: Color,
    rgb: [u8; 3],
}

fn main() -> Result<()> {
    logger::init();
    let cli = Cli::parse();

    let ramp = match &cli.ramp {
        Some(path) => load_ramp(path)?,
        None => ColorRamp::burn_scar(),
    };
    let output = cli.output.as_deref();

    match &cli.command {
        Commands::Setup => write_json(&setup(), output, cli.pretty)?,
        Commands::Ramp { value } => {
            let color = ramp.process(*value);
            let sample = RampSample {
                value: *value,
                color,
                rgb: color.to_array(),
            };
            write_json(&sample, output, cli.pretty)?;
        }
        Commands::Eval { b08, b12, mask } => {
            let evaluator = IndexEvaluator::new(ramp);
            let sample = BandSample::new(*b08, *b12, *mask);
            debug!(?sample, "Evaluating pixel");
            write_json(&evaluator.evaluate(sample), output, cli.pretty)?;
        }
        Commands::Batch { config } => {
            let outputs = process_batch(config, ramp)?;
            write_json(&outputs, output, cli.pretty)?;
        }
    }

    Ok(())
}
