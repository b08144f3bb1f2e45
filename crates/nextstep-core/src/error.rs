use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The message was empty after normalization.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Catalog data is missing or malformed. Fatal at startup.
    #[error("Failed to load catalog from {path}: {reason}")]
    CatalogLoad { path: PathBuf, reason: String },

    /// A delegated classifier or generator failed. Absorbed by fallbacks.
    #[error("External service unavailable: {0}")]
    ExternalServiceUnavailable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub fn catalog(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::CatalogLoad { path: path.into(), reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
