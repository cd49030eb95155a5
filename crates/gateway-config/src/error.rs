//! Configuration errors.

use std::path::PathBuf;

/// Errors raised while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Providers file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Providers file is not valid YAML of the expected shape
    #[error("Failed to parse {path}: {source}")]
    Parse {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_yaml::Error,
    },

    /// A provider entry is unusable
    #[error("Invalid provider entry #{index}: {message}")]
    InvalidProvider {
        /// Zero-based position in the file
        index: usize,
        /// What is wrong with it
        message: String,
    },

    /// An environment variable holds an unusable value
    #[error("Invalid value for {key}: {message}")]
    InvalidEnv {
        /// Variable name
        key: String,
        /// What is wrong with it
        message: String,
    },
}
