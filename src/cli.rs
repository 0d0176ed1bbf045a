use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "burn-index")]
#[command(about = "Burn-scar index evaluator with color-ramp visualization")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Write JSON results to this file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Color ramp JSON file: [[position, color], ...]
    #[arg(short, long, global = true)]
    pub ramp: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the declared input bands and output rasters
    Setup,

    /// Map a value in [0, 1] through the color ramp
    Ramp {
        /// Value to interpolate
        #[arg(short, long, allow_negative_numbers = true)]
        value: f32,
    },

    /// Evaluate a single pixel
    Eval {
        /// NIR band (Sentinel-2 B08)
        #[arg(long, allow_negative_numbers = true)]
        b08: f32,

        /// SWIR band (Sentinel-2 B12)
        #[arg(long, allow_negative_numbers = true)]
        b12: f32,

        /// Validity mask: 1 for valid data, 0 otherwise
        #[arg(short, long, default_value = "1")]
        mask: u8,
    },

    /// Evaluate every sample listed in a JSON batch config
    Batch {
        /// Batch config: { "ramp": [...], "samples": [{ "B08", "B12", "dataMask" }, ...] }
        config: PathBuf,
    },
}
