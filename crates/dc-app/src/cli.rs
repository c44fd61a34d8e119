use std::path::PathBuf;

use clap::Parser;
use dc_core::config::DitherConfig;

/// DitherCL: black-and-white image dithering.
#[derive(Parser, Debug)]
#[command(name = "dithercl", version, about, long_about = None, disable_help_subcommand = true)]
pub struct Cli {
    /// Image to process (PNG, JPEG, BMP, GIF). `help` prints the filter list.
    pub source: Option<PathBuf>,

    /// Filter label, exact and case-sensitive. See --list.
    pub filter: Option<String>,

    /// Quantization threshold. Defaults to 128, not range-checked.
    #[arg(allow_hyphen_values = true)]
    pub threshold: Option<i32>,

    /// TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output directory. Defaults to the current directory.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Seed for the Random filter.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable row-parallel execution.
    #[arg(long, default_value_t = false)]
    pub sequential: bool,

    /// Print the available filters, one per line.
    #[arg(long, default_value_t = false)]
    pub list: bool,

    /// Log level: error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Source path, unless the invocation is a help request (no source, or `help`).
    #[must_use]
    pub fn source_path(&self) -> Option<&PathBuf> {
        self.source.as_ref().filter(|p| p.as_os_str() != "help")
    }

    /// Filter label from the command line, falling back to the config file.
    #[must_use]
    pub fn filter_label(&self, config: &DitherConfig) -> Option<String> {
        self.filter.clone().or_else(|| config.filter.clone())
    }

    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply_overrides(&self, config: &mut DitherConfig) {
        if let Some(v) = self.threshold {
            config.threshold = v;
        }
        if let Some(v) = self.seed {
            config.seed = Some(v);
        }
        if self.sequential {
            config.parallel = false;
        }
        if let Some(ref v) = self.output {
            config.output_dir = Some(v.clone());
        }
    }
}
