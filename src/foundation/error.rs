/// Convenience result type used across the mask rasterizer.
pub type MaskResult<T> = Result<T, MaskError>;

/// Top-level error taxonomy used by mask APIs.
///
/// Degenerate geometry is never an error: splines that cannot be filled are
/// skipped and layers that end up empty are kept as empty layers.
#[derive(thiserror::Error, Debug)]
pub enum MaskError {
    /// Invalid render options or mask description data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing mask descriptions.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Construction was interrupted through the cancellation flag.
    #[error("mask build cancelled")]
    Cancelled,

    /// Failures of the build machinery itself (e.g. worker pool setup).
    #[error("build error: {0}")]
    Build(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MaskError {
    /// Build a [`MaskError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MaskError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`MaskError::Build`] value.
    pub fn build(msg: impl Into<String>) -> Self {
        Self::Build(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
