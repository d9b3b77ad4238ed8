use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use rangeshot_core::pipeline::process_report;
use rangeshot_core::{CaptionFont, ReportSection};

use crate::shared::{describe, load_config, read_image, write_encoded, Outcome};

pub fn run(
    inputs: &[PathBuf],
    output: &Path,
    config: Option<&Path>,
    captions: &[String],
    font: Option<&Path>,
) -> Result<Outcome> {
    if captions.len() > inputs.len() {
        bail!(
            "{} captions given for {} inputs",
            captions.len(),
            inputs.len()
        );
    }
    let config = load_config(config)?;
    let font = font.map(load_font).transpose()?;

    let mut sections = inputs
        .iter()
        .map(|input| read_image(input).map(ReportSection::new))
        .collect::<Result<Vec<_>>>()?;
    for (section, caption) in sections.iter_mut().zip(captions) {
        section.caption = Some(caption.clone());
    }

    let encoded =
        process_report(&sections, &config, font.as_ref()).context("failed to compose report")?;
    write_encoded(output, &encoded)?;

    println!("{}", describe(&encoded));
    Ok(Outcome::of(&encoded))
}

fn load_font(path: &Path) -> Result<CaptionFont> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read font {}", path.display()))?;
    CaptionFont::from_bytes(&bytes).with_context(|| format!("failed to load font {}", path.display()))
}
