use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Trim rendered spreadsheet pages and encode them under a size budget.
#[derive(Debug, Parser)]
#[command(name = "rangeshot", about, version)]
pub struct Cli {
    /// Log every encode attempt (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Crop uniform background from a page and write it as PNG
    Trim {
        /// Rendered page (PNG, JPEG, ...)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output PNG path
        #[arg(short, long, value_name = "OUTPUT")]
        output: PathBuf,

        /// Pixels of background kept around the content
        #[arg(long, default_value_t = 0)]
        padding: u32,

        /// Background color as RRGGBB. Default: top-left pixel
        #[arg(long, value_parser = parse_hex_color)]
        background: Option<[u8; 3]>,

        /// Contrast factor applied to the difference image (default: 3.0)
        #[arg(long, conflicts_with = "affine")]
        contrast: Option<f32>,

        /// Affine remap of the difference image as SCALE,BIAS (e.g. 1.0,-100)
        #[arg(long, value_parser = parse_affine, allow_hyphen_values = true)]
        affine: Option<(f32, f32)>,
    },

    /// Encode an image as JPEG under a byte budget
    Encode {
        /// Source image
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output JPEG path
        #[arg(short, long, value_name = "OUTPUT")]
        output: PathBuf,

        #[command(flatten)]
        budget: BudgetArgs,

        /// Exit with code 2 if the budget could not be met
        #[arg(long)]
        strict: bool,
    },

    /// Sharpen, trim and encode each page into its own JPEG
    Process {
        /// Rendered pages
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<PathBuf>,

        /// Directory for the encoded pages
        #[arg(long, value_name = "DIR")]
        out_dir: PathBuf,

        /// JSON pipeline configuration
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Exit with code 2 if any page could not meet the budget
        #[arg(long)]
        strict: bool,
    },

    /// Trim each page and stack them into one encoded report page
    Compose {
        /// Rendered pages, top to bottom
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<PathBuf>,

        /// Output JPEG path
        #[arg(short, long, value_name = "OUTPUT")]
        output: PathBuf,

        /// JSON pipeline configuration
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Caption for the next input, in order (repeatable)
        #[arg(long = "caption", value_name = "TEXT")]
        captions: Vec<String>,

        /// TrueType/OpenType font used to draw captions
        #[arg(long, value_name = "FILE")]
        font: Option<PathBuf>,

        /// Exit with code 2 if the budget could not be met
        #[arg(long)]
        strict: bool,
    },
}

/// Overrides for the encoder budget. Unset flags keep the defaults.
#[derive(Debug, Default, clap::Args)]
pub struct BudgetArgs {
    /// Maximum output size in bytes (default: 4194304)
    #[arg(long)]
    pub max_bytes: Option<usize>,

    /// Comma-separated quality ladder (default: 95,85,75,65,55)
    #[arg(long, value_delimiter = ',')]
    pub qualities: Option<Vec<u8>>,

    /// Per-round downscale factor (default: 0.96)
    #[arg(long)]
    pub downscale_factor: Option<f64>,

    /// Number of downscale rounds (default: 3)
    #[arg(long)]
    pub rounds: Option<u32>,

    /// Quality used while downscaling (default: 65)
    #[arg(long)]
    pub fallback_quality: Option<u8>,
}

fn parse_hex_color(s: &str) -> Result<[u8; 3], String> {
    let hex = s.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(format!("expected RRGGBB, got '{s}'"));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| format!("invalid hex color '{s}'"))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

fn parse_affine(s: &str) -> Result<(f32, f32), String> {
    let (scale, bias) = s
        .split_once(',')
        .ok_or_else(|| format!("expected SCALE,BIAS, got '{s}'"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f32>()
            .map_err(|_| format!("invalid number '{v}' in '{s}'"))
    };
    Ok((parse(scale)?, parse(bias)?))
}
