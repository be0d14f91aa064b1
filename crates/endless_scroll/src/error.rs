//! Error types
//!
//! The scroll behavior itself never fails: misuse shows up as layout drift,
//! and defensive checks quietly do nothing. Errors only come from the edges
//! that read external input, which are config files and scenarios.

use thiserror::Error;

/// Errors raised while loading configuration or running scenarios
#[derive(Error, Debug)]
pub enum EndlessError {
    /// Config file is not valid TOML or has the wrong shape
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config could not be rendered back to TOML
    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Config parsed but holds unusable values
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Scenario file is not valid JSON or has the wrong shape
    #[cfg(feature = "headless")]
    #[error("Failed to parse scenario: {0}")]
    ScenarioParse(#[from] serde_json::Error),

    /// A scenario assertion did not hold
    #[error("Scenario step {step} failed: {message}")]
    Assertion { step: usize, message: String },

    /// Reading an input file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for config and scenario operations
pub type Result<T> = std::result::Result<T, EndlessError>;
