use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Default quantization threshold.
pub const DEFAULT_THRESHOLD: i32 = 128;

/// Application configuration, loadable from TOML.
///
/// Every field has a sane default; CLI flags override whatever the file sets.
///
/// # Example
/// ```
/// use dc_core::config::DitherConfig;
/// let config = DitherConfig::default();
/// assert_eq!(config.threshold, 128);
/// assert!(config.parallel);
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct DitherConfig {
    /// Quantization threshold. Expected in [0, 255] but never validated.
    pub threshold: i32,
    /// Filter label used when none is given on the command line.
    pub filter: Option<String>,
    /// Seed for the `Random` filter. `None` = fresh entropy each run.
    pub seed: Option<u64>,
    /// Allow row-parallel execution for order-independent filters.
    pub parallel: bool,
    /// Directory receiving processed images. `None` = current directory.
    pub output_dir: Option<PathBuf>,
}

impl Default for DitherConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            filter: None,
            seed: None,
            parallel: true,
            output_dir: None,
        }
    }
}

impl DitherConfig {
    /// Per-invocation parameters handed to a filter.
    #[must_use]
    pub fn filter_config(&self) -> FilterConfig {
        FilterConfig {
            threshold: self.threshold,
            seed: self.seed,
            parallel: self.parallel,
        }
    }
}

/// Parameters threaded into a single filter invocation.
///
/// Replaces any process-wide threshold: two invocations running at the same
/// time each see exactly the values they were started with.
///
/// # Example
/// ```
/// use dc_core::config::FilterConfig;
/// let config = FilterConfig::default().with_threshold(90).with_seed(7);
/// assert_eq!(config.threshold, 90);
/// assert_eq!(config.seed, Some(7));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterConfig {
    /// Quantization threshold, compared against the (possibly adjusted) gray level.
    pub threshold: i32,
    /// Seed for the `Random` filter.
    pub seed: Option<u64>,
    /// Row-parallel execution for order-independent filters.
    pub parallel: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            seed: None,
            parallel: true,
        }
    }
}

impl FilterConfig {
    #[must_use]
    pub fn with_threshold(mut self, threshold: i32) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Intermediate TOML structure, every value optional.
#[derive(Deserialize)]
struct ConfigFile {
    dither: Option<DitherSection>,
    output: Option<OutputSection>,
}

/// `[dither]` section, all fields optional for partial override.
#[derive(Deserialize)]
struct DitherSection {
    threshold: Option<i32>,
    filter: Option<String>,
    seed: Option<u64>,
    parallel: Option<bool>,
}

/// `[output]` section.
#[derive(Deserialize)]
struct OutputSection {
    directory: Option<PathBuf>,
}

/// Parse TOML text and merge it over the defaults.
///
/// # Errors
/// Returns [`CoreError::Config`] if the text is not valid TOML for this schema.
///
/// # Example
/// ```
/// use dc_core::config::parse_config;
/// let config = parse_config("[dither]\nthreshold = 100\n").unwrap();
/// assert_eq!(config.threshold, 100);
/// assert!(config.parallel);
/// ```
pub fn parse_config(content: &str) -> Result<DitherConfig> {
    let file: ConfigFile =
        toml::from_str(content).map_err(|e| CoreError::Config(e.to_string()))?;

    let mut config = DitherConfig::default();

    if let Some(d) = file.dither {
        if let Some(v) = d.threshold {
            config.threshold = v;
        }
        if let Some(v) = d.filter {
            config.filter = Some(v);
        }
        if let Some(v) = d.seed {
            config.seed = Some(v);
        }
        if let Some(v) = d.parallel {
            config.parallel = v;
        }
    }
    if let Some(o) = file.output
        && let Some(v) = o.directory
    {
        config.output_dir = Some(v);
    }

    if !(0..=255).contains(&config.threshold) {
        log::warn!(
            "threshold {} outside 0-255, every pixel will quantize the same way",
            config.threshold
        );
    }
    Ok(config)
}

/// Load a TOML file and merge it over the defaults.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use dc_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<DitherConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Unable to read {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Invalid config in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_yields_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, DitherConfig::default());
    }

    #[test]
    fn sections_override_defaults() {
        let config = parse_config(
            "[dither]\nthreshold = 64\nfilter = \"Stucki\"\nseed = 42\nparallel = false\n\
             [output]\ndirectory = \"out\"\n",
        )
        .unwrap();
        assert_eq!(config.threshold, 64);
        assert_eq!(config.filter.as_deref(), Some("Stucki"));
        assert_eq!(config.seed, Some(42));
        assert!(!config.parallel);
        assert_eq!(config.output_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn out_of_range_threshold_is_accepted() {
        let config = parse_config("[dither]\nthreshold = 400\n").unwrap();
        assert_eq!(config.threshold, 400);
        assert_eq!(config.filter_config().threshold, 400);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        for text in ["[dither\nthreshold = ", "[dither]\nthreshold = \"high\"\n"] {
            let err = parse_config(text).unwrap_err();
            assert!(
                matches!(err.downcast_ref::<CoreError>(), Some(CoreError::Config(_))),
                "{text:?}: {err}"
            );
        }
    }

    #[test]
    fn output_section_without_directory_keeps_default() {
        let config = parse_config("[output]\n").unwrap();
        assert_eq!(config.output_dir, None);
        let config = parse_config("[output]\ndirectory = \"renders\"\n").unwrap();
        assert_eq!(config.output_dir, Some(PathBuf::from("renders")));
    }

    #[test]
    fn load_config_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[dither]\nthreshold = 12").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.threshold, 12);
    }

    #[test]
    fn load_config_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(&dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn filter_config_builder_chains() {
        let config = FilterConfig::default()
            .with_threshold(3)
            .with_parallel(false);
        assert_eq!(
            config,
            FilterConfig {
                threshold: 3,
                seed: None,
                parallel: false
            }
        );
    }
}
