mod cli;

use clap::Parser;
use cli::Cli;
use enumgen_core::{BuildConfig, EnumFileGenerator, EnumgenConfig, EnumgenError, GenerationReport};
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let _cli = Cli::parse();

    // Set RUST_LOG=debug for debug output; a successful run prints nothing by default.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(report) => {
            debug!("{:?}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Enum generation failed during {}: {}", e.stage(), e);
            eprintln!("enumgen: {} failed: {}", e.stage(), e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<GenerationReport, EnumgenError> {
    info!("Starting enumgen");

    let config = EnumgenConfig::new()?;
    let build_config = BuildConfig::from_config(&config);
    debug!(
        "Input: {:?}, output: {:?}, formatter: {}",
        build_config.input_path, build_config.output_path, build_config.formatter
    );

    let report = EnumFileGenerator::new(build_config).generate()?;
    info!(
        "Wrote {} families ({} members) to {:?}",
        report.families, report.members, report.output_path
    );
    Ok(report)
}
