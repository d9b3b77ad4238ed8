use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use image::{ColorType, ImageFormat};
use rangeshot_core::decode::{decode_page, PixelLayout, RasterImage};
use rangeshot_core::encode::{EncodeBudget, EncodedBuffer};
use rangeshot_core::PipelineConfig;

use crate::cli::BudgetArgs;

/// How a command finished when it did not fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// At least one output is a best-effort result over the budget.
    OverBudget,
}

impl Outcome {
    /// Process exit code; over-budget results only fail in strict mode.
    pub fn exit_code(self, strict: bool) -> i32 {
        match self {
            Outcome::OverBudget if strict => 2,
            _ => 0,
        }
    }

    pub fn of(encoded: &EncodedBuffer) -> Self {
        if encoded.is_within_budget() {
            Outcome::Done
        } else {
            Outcome::OverBudget
        }
    }

    pub fn merge(self, other: Outcome) -> Self {
        if self == Outcome::OverBudget || other == Outcome::OverBudget {
            Outcome::OverBudget
        } else {
            Outcome::Done
        }
    }
}

/// Read and decode an image file.
pub fn read_image(path: &Path) -> Result<RasterImage> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    decode_page(&bytes).with_context(|| format!("failed to decode {}", path.display()))
}

/// Write an image as PNG, keeping its channel layout.
pub fn write_png(path: &Path, image: &RasterImage) -> Result<()> {
    let color = match image.layout {
        PixelLayout::Gray => ColorType::L8,
        PixelLayout::GrayAlpha => ColorType::La8,
        PixelLayout::Rgb => ColorType::Rgb8,
        PixelLayout::Rgba => ColorType::Rgba8,
    };
    image::save_buffer_with_format(
        path,
        &image.pixels,
        image.width,
        image.height,
        color,
        ImageFormat::Png,
    )
    .with_context(|| format!("failed to write {}", path.display()))
}

/// Write an encoded buffer to disk.
pub fn write_encoded(path: &Path, encoded: &EncodedBuffer) -> Result<()> {
    fs::write(path, encoded.bytes()).with_context(|| format!("failed to write {}", path.display()))
}

/// Load a JSON pipeline configuration, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    let Some(path) = path else {
        return Ok(PipelineConfig::default());
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

/// Apply command-line overrides on top of a budget.
pub fn apply_budget_args(mut budget: EncodeBudget, args: &BudgetArgs) -> EncodeBudget {
    if let Some(max_bytes) = args.max_bytes {
        budget.max_bytes = max_bytes;
    }
    if let Some(ladder) = &args.qualities {
        budget.quality_ladder = ladder.clone();
    }
    if let Some(factor) = args.downscale_factor {
        budget.downscale_factor = factor;
    }
    if let Some(rounds) = args.rounds {
        budget.max_downscale_rounds = rounds;
    }
    if let Some(quality) = args.fallback_quality {
        budget.fallback_quality = quality;
    }
    budget
}

/// Output path for `input` inside `out_dir`, with the encoder's extension.
pub fn output_path(out_dir: &Path, input: &Path, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "page".to_string());
    out_dir.join(format!("{stem}.{extension}"))
}

/// Output paths for every input, rejecting inputs that would overwrite each
/// other (same file stem in different directories).
pub fn output_paths(out_dir: &Path, inputs: &[PathBuf], extension: &str) -> Result<Vec<PathBuf>> {
    let mut seen: HashMap<PathBuf, &Path> = HashMap::new();
    let mut paths = Vec::with_capacity(inputs.len());
    for input in inputs {
        let output = output_path(out_dir, input, extension);
        if let Some(previous) = seen.insert(output.clone(), input) {
            bail!(
                "inputs {} and {} both map to {}",
                previous.display(),
                input.display(),
                output.display()
            );
        }
        paths.push(output);
    }
    Ok(paths)
}

/// One-line summary of an encode result for stdout.
pub fn describe(encoded: &EncodedBuffer) -> String {
    let fit = if encoded.is_within_budget() {
        ""
    } else {
        " (over budget)"
    };
    format!(
        "{}x{} q{} {} bytes{}",
        encoded.width(),
        encoded.height(),
        encoded.quality(),
        encoded.len(),
        fit
    )
}
