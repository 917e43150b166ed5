/// Convenience result type used across the crate.
pub type MandalaResult<T> = Result<T, MandalaError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum MandalaError {
    /// The caller supplied no intention text.
    #[error("empty input: an intention must contain at least one non-whitespace character")]
    EmptyInput,

    /// A digest was expected but the byte length was not 32.
    #[error("invalid digest length: expected 32 bytes, got {len}")]
    InvalidDigestLength {
        /// Length of the rejected input.
        len: usize,
    },

    /// The drawing surface could not be acquired or resized.
    #[error("render surface unavailable: {0}")]
    RenderSurfaceUnavailable(String),

    /// Reading or writing persisted session state failed.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Invalid user-provided configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// The intention was refused by the session's text classifier.
    #[error("intention rejected: {0}")]
    Rejected(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MandalaError {
    /// Build a [`MandalaError::InvalidDigestLength`] value.
    pub fn invalid_digest_length(len: usize) -> Self {
        Self::InvalidDigestLength { len }
    }

    /// Build a [`MandalaError::RenderSurfaceUnavailable`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::RenderSurfaceUnavailable(msg.into())
    }

    /// Build a [`MandalaError::Persistence`] value.
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Build a [`MandalaError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MandalaError::Rejected`] value.
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }

    /// Build a [`MandalaError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
