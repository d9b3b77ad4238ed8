mod cli;
mod compose_cmd;
mod encode_cmd;
mod process_cmd;
mod shared;
mod trim_cmd;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (result, strict) = match cli.command {
        cli::Commands::Trim {
            ref input,
            ref output,
            padding,
            background,
            contrast,
            affine,
        } => (
            trim_cmd::run(input, output, padding, background, contrast, affine),
            false,
        ),
        cli::Commands::Encode {
            ref input,
            ref output,
            ref budget,
            strict,
        } => (encode_cmd::run(input, output, budget), strict),
        cli::Commands::Process {
            ref inputs,
            ref out_dir,
            ref config,
            strict,
        } => (process_cmd::run(inputs, out_dir, config.as_deref()), strict),
        cli::Commands::Compose {
            ref inputs,
            ref output,
            ref config,
            ref captions,
            ref font,
            strict,
        } => (
            compose_cmd::run(inputs, output, config.as_deref(), captions, font.as_deref()),
            strict,
        ),
    };

    match result {
        Ok(outcome) => {
            let code = outcome.exit_code(strict);
            if code != 0 {
                eprintln!("Error: output exceeds the size budget");
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "rangeshot=debug,rangeshot_core=debug"
    } else {
        "rangeshot=info,rangeshot_core=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
