use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sixelv::cli::Cli;
use sixelv::config::{self, Config, OutputFormat};
use sixelv::convert::convert_file;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout carries image data, so logs go to stderr
    let default_filter = if cli.verbose {
        "sixelv=debug,sixel_reductor=debug"
    } else {
        "sixelv=warn,sixel_reductor=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(io::stderr),
        )
        .init();

    if cli.output.is_some() && cli.files.len() > 1 {
        anyhow::bail!("--output takes exactly one input file, got {}", cli.files.len());
    }

    let mut settings = Config::load(config::config_path(cli.config.clone()).as_deref());
    cli.apply(&mut settings);
    let converter = settings.converter().context("Invalid settings")?;

    let mut out: Box<dyn Write> = match cli.output.as_deref() {
        None | Some("-") => Box::new(BufWriter::new(io::stdout().lock())),
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path))?,
        )),
    };

    for (i, file) in cli.files.iter().enumerate() {
        if i > 0 && settings.output_format == OutputFormat::Sixel {
            out.write_all(b"\n")?;
        }
        match convert_file(file, &converter, settings.output_format, &mut *out) {
            Ok(()) => {}
            Err(e) if cli.ignore_error => {
                tracing::warn!(%e, file = %file, "Conversion failed, skipping");
            }
            Err(e) => {
                out.flush()?;
                return Err(e).with_context(|| format!("Failed to convert {}", file));
            }
        }
    }
    out.flush().context("Failed to flush output")?;
    Ok(())
}
