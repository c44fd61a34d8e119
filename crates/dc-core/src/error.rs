use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Referenced file does not exist.
    #[error("{path} does not exist")]
    FileNotFound {
        /// Path that was not found.
        path: String,
    },

    /// Unsupported file or data format.
    #[error("unsupported format: {format}")]
    UnsupportedFormat {
        /// The format string that is unsupported.
        format: String,
    },

    /// Source and destination surfaces disagree on their dimensions.
    #[error("invalid dimensions: {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: usize,
        /// Height value.
        height: usize,
    },

    /// Filter label not present in the registry.
    #[error("{label} is not a valid filter")]
    UnknownFilter {
        /// The label that failed to resolve.
        label: String,
    },

    /// A filter worker thread panicked before completing.
    #[error("filter worker for {label} panicked")]
    WorkerPanicked {
        /// Label of the filter that was running.
        label: &'static str,
    },
}
