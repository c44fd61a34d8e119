use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use dc_core::config::DitherConfig;
use dc_core::error::CoreError;

pub mod cli;
pub mod process;

fn main() -> Result<ExitCode> {
    // 1. Parse CLI
    let cli = cli::Cli::parse();

    // 2. Logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    if cli.list {
        for label in dc_filters::available_labels() {
            println!("{label}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    // 3. No source, or `help`: print usage and the filter list
    let Some(source) = cli.source_path() else {
        process::print_help();
        return Ok(ExitCode::SUCCESS);
    };

    // 4. Config file, then CLI overrides
    let mut config = resolve_config(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);

    let Some(label) = cli.filter_label(&config) else {
        process::print_help();
        return Ok(ExitCode::SUCCESS);
    };

    // 5. Process
    println!("DitherCL - processing...");
    match process::run(source, &label, &config) {
        Ok(path) => {
            println!("Processed image: {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
        // already reported along with the filter list
        Err(e)
            if matches!(
                e.downcast_ref::<CoreError>(),
                Some(CoreError::UnknownFilter { .. })
            ) =>
        {
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e),
    }
}

/// Load the config file if one was given; missing files fall back to defaults.
fn resolve_config(path: Option<&Path>) -> Result<DitherConfig> {
    match path {
        Some(path) if path.exists() => dc_core::config::load_config(path),
        Some(path) => {
            log::warn!("Config not found: {}. Using defaults.", path.display());
            Ok(DitherConfig::default())
        }
        None => Ok(DitherConfig::default()),
    }
}
