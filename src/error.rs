//! Error types for the posture tracker library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// Tracker thresholds or frame rate are unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Filter initialization or processing error
    #[error("Filter error: {0}")]
    FilterError(String),

    /// Configuration file could not be parsed or written
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A landmark stream line is not valid JSON for a frame
    #[error("Line {line}: malformed landmark frame: {source}")]
    MalformedFrame {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
