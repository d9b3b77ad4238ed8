use std::path::Path;

use anyhow::{Context, Result};
use rangeshot_core::trim::{trim, DifferenceAmplification, TrimOptions};
use tracing::info;

use crate::shared::{read_image, write_png, Outcome};

pub fn run(
    input: &Path,
    output: &Path,
    padding: u32,
    background: Option<[u8; 3]>,
    contrast: Option<f32>,
    affine: Option<(f32, f32)>,
) -> Result<Outcome> {
    let page = read_image(input)?;

    let mut options = TrimOptions::default().with_padding(padding);
    options.background = background;
    if let Some(factor) = contrast {
        options = options.with_amplification(DifferenceAmplification::ContrastScale { factor });
    }
    if let Some((scale, bias)) = affine {
        options = options.with_amplification(DifferenceAmplification::AffineRemap { scale, bias });
    }

    let trimmed =
        trim(&page, &options).with_context(|| format!("failed to trim {}", input.display()))?;
    write_png(output, &trimmed)?;

    info!(input = %input.display(), output = %output.display(), "trimmed");
    println!("{}x{} -> {}x{}", page.width, page.height, trimmed.width, trimmed.height);
    Ok(Outcome::Done)
}
