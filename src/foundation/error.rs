/// Convenience result type used across printmock.
pub type MockupResult<T> = Result<T, MockupError>;

/// Error taxonomy for placement, compositing and export.
#[derive(thiserror::Error, Debug)]
pub enum MockupError {
    /// A template, mask or source image could not be decoded (or is degenerate).
    #[error("image load error: {0}")]
    ImageLoad(String),

    /// A placement or area with non-positive or non-finite extent.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Configuration or template calibration rejected.
    #[error("validation error: {0}")]
    Validation(String),

    /// Raster encoding failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Rasterization failed.
    #[error("render error: {0}")]
    Render(String),

    /// Anything else, usually IO with context attached.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MockupError {
    pub fn image_load(msg: impl Into<String>) -> Self {
        Self::ImageLoad(msg.into())
    }

    pub fn invalid_geometry(msg: impl Into<String>) -> Self {
        Self::InvalidGeometry(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Whether retrying with other input bytes can succeed.
    pub fn is_image_load(&self) -> bool {
        matches!(self, Self::ImageLoad(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
