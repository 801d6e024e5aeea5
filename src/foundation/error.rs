/// Convenience result type used across the crate.
pub type OverlayResult<T> = Result<T, OverlayError>;

/// Top-level error taxonomy used by the augmentation APIs.
#[derive(thiserror::Error, Debug)]
pub enum OverlayError {
    /// Invalid constructor-time configuration (empty font catalog, bad parameter ranges).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A font/text pair could not be rasterized.
    #[error("rendering error: {0}")]
    Rendering(String),

    /// An input image was rejected before processing.
    #[error("input error: {0}")]
    Input(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OverlayError {
    /// Build an [`OverlayError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build an [`OverlayError::Rendering`] value.
    pub fn rendering(msg: impl Into<String>) -> Self {
        Self::Rendering(msg.into())
    }

    /// Build an [`OverlayError::Input`] value.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Build an [`OverlayError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
