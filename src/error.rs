//! Error types for SutraAuton

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// SutraAuton error types
///
/// Only routine definition and configuration loading are fallible. Timed-out
/// motion steps and condition gates are ordinary outcomes, not errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file parse error
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Routine definition rejected at construction time
    #[error("Invalid routine: {0}")]
    InvalidRoutine(String),

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// No routine registered under the requested name
    #[error("Unknown routine: {0}")]
    UnknownRoutine(String),
}
