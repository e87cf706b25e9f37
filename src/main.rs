//! `pixelflow-simd`: reports how the vector library was built.
//!
//! ```text
//! pixelflow-simd [--json] [--require <config.json>] [--self-check]
//! ```
//!
//! `--require` exits with an error when this build does not satisfy the tier
//! named in the given JSON config. `--self-check` runs the active tier against
//! the scalar reference.

use anyhow::Context;
use clap::Parser;
use log::{error, info};
use pixelflow_simd::{verify_against_scalar, Active, SimdConfig};
use std::path::PathBuf;

/// Reports the backend tier and index policy this library was built with.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Print the configuration (and the self check report) as JSON
    #[arg(long)]
    json: bool,

    /// Fail unless this build satisfies the tier in the given JSON config
    #[arg(long, value_name = "CONFIG")]
    require: Option<PathBuf>,

    /// Compare the active tier against the scalar reference
    #[arg(long)]
    self_check: bool,
}

fn main() -> anyhow::Result<()> {
    // Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let args = Args::parse();
    let config = SimdConfig::current();
    config.log_summary();

    if let Some(path) = &args.require {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let expected = SimdConfig::from_json(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        if let Err(e) = config.satisfies(&expected) {
            error!("{}", e);
            return Err(e).context("Build does not satisfy the required configuration");
        }
        info!("Build satisfies {}", path.display());
    }

    if args.self_check {
        let report = verify_against_scalar::<Active>().context("Self check failed")?;
        info!(
            "Self check passed: {} exact lanes, {} tolerance lanes, max relative error {:e}",
            report.exact_lanes, report.tolerance_lanes, report.max_relative_error
        );
        if args.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    if args.json {
        println!("{}", config.to_json_pretty()?);
    }

    Ok(())
}
