use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rangeshot_core::encode::ImageFormatTag;
use rangeshot_core::pipeline::process_page;

use crate::shared::{describe, load_config, output_paths, read_image, write_encoded, Outcome};

pub fn run(inputs: &[PathBuf], out_dir: &Path, config: Option<&Path>) -> Result<Outcome> {
    let config = load_config(config)?;
    let outputs = output_paths(out_dir, inputs, ImageFormatTag::Jpeg.extension())?;
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let mut outcome = Outcome::Done;
    for (input, output) in inputs.iter().zip(&outputs) {
        let page = read_image(input)?;
        let processed = process_page(&page, &config)
            .with_context(|| format!("failed to process {}", input.display()))?;
        write_encoded(output, &processed.encoded)?;

        println!(
            "{} -> {} {}",
            input.display(),
            output.display(),
            describe(&processed.encoded)
        );
        outcome = outcome.merge(Outcome::of(&processed.encoded));
    }
    Ok(outcome)
}
