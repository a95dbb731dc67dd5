use thiserror::Error;

/// Top-level error type for the Upkeep system.
///
/// Each variant wraps a subsystem-specific error. Subsystem crates define
/// their own error types and implement `From<SubsystemError> for UpkeepError`
/// so that the `?` operator works seamlessly across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UpkeepError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Trigger error: {0}")]
    Trigger(String),

    #[error("Handler error: {0}")]
    Handler(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for UpkeepError {
    fn from(err: toml::de::Error) -> Self {
        UpkeepError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for UpkeepError {
    fn from(err: toml::ser::Error) -> Self {
        UpkeepError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for UpkeepError {
    fn from(err: serde_json::Error) -> Self {
        UpkeepError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Upkeep operations.
pub type Result<T> = std::result::Result<T, UpkeepError>;
