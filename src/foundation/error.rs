/// Convenience result type used across vidtrim.
pub type TrimResult<T> = Result<T, TrimError>;

/// Top-level error taxonomy used by editor and pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum TrimError {
    /// Invalid user-provided configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// The probe process failed or produced output that could not be parsed.
    #[error("media probe error: {0}")]
    MediaProbe(String),

    /// Copying a remote source into the cache failed.
    #[error("media fetch error: {0}")]
    MediaFetch(String),

    /// The encoder reported a non-success return code.
    #[error("encode error: {0}")]
    Encode(String),

    /// Still-frame extraction failed. Never crosses the snapshot pipeline boundary.
    #[error("snapshot error: {0}")]
    Snapshot(String),

    /// An editor operation was requested in a phase that does not accept it.
    #[error("invalid phase: {0}")]
    InvalidPhase(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TrimError {
    /// Build a [`TrimError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TrimError::MediaProbe`] value.
    pub fn media_probe(msg: impl Into<String>) -> Self {
        Self::MediaProbe(msg.into())
    }

    /// Build a [`TrimError::MediaFetch`] value.
    pub fn media_fetch(msg: impl Into<String>) -> Self {
        Self::MediaFetch(msg.into())
    }

    /// Build a [`TrimError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`TrimError::Snapshot`] value.
    pub fn snapshot(msg: impl Into<String>) -> Self {
        Self::Snapshot(msg.into())
    }

    /// Build a [`TrimError::InvalidPhase`] value.
    pub fn invalid_phase(msg: impl Into<String>) -> Self {
        Self::InvalidPhase(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
