use std::path::Path;

use anyhow::{Context, Result};
use rangeshot_core::encode::{encode_within_budget, EncodeBudget};

use crate::cli::BudgetArgs;
use crate::shared::{apply_budget_args, describe, read_image, write_encoded, Outcome};

pub fn run(input: &Path, output: &Path, args: &BudgetArgs) -> Result<Outcome> {
    let image = read_image(input)?;
    let budget = apply_budget_args(EncodeBudget::default(), args);

    let encoded = encode_within_budget(&image, &budget)
        .with_context(|| format!("failed to encode {}", input.display()))?;
    write_encoded(output, &encoded)?;

    println!("{}", describe(&encoded));
    Ok(Outcome::of(&encoded))
}
