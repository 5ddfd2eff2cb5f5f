use thiserror::Error;

/// Crate-wide error type. The first three variants are the recoverable,
/// per-item conditions reported back to callers as structured data; the
/// rest only occur during startup (directory load, configuration).
#[derive(Error, Debug)]
pub enum BreatheError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Upstream unavailable: {message}")]
    UpstreamUnavailable { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl BreatheError {
    /// Transient errors are the only ones a store adapter may retry.
    /// An absent document is `Ok(None)` at the port, so a missing reading
    /// can never be retried.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            BreatheError::UpstreamUnavailable { .. } | BreatheError::Io(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, BreatheError>;
