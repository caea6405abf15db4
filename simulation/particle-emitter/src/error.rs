use std::io;
use thiserror::Error;

/// Error types for loading and converting emitter settings
///
/// The simulation itself has no fatal states; these errors only arise at the
/// edges where settings are read from disk or parsed.
#[derive(Error, Debug)]
pub enum EmitterError {
    /// I/O Error during reading or writing a settings file
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Settings file extension is not one of the supported formats
    #[error("Unsupported settings format: '{0}' (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),

    /// JSON settings could not be parsed or written
    #[cfg(feature = "serde-support")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML settings could not be parsed or written
    #[cfg(feature = "serde-support")]
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

/// Result type using EmitterError
pub type Result<T> = std::result::Result<T, EmitterError>;
