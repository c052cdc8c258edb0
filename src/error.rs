use thiserror::Error;

/// Result type alias for operations that may fail with [`StripError`].
pub type StripResult<T> = std::result::Result<T, StripError>;

/// Error types that can occur while converting a raster into vector
/// documents.
///
/// Dimension mismatches between pipeline stages are programming errors
/// and are asserted, not represented here.
#[derive(Debug, Error)]
pub enum StripError {
    /// Conversion parameter outside its declared range.
    #[error("parameter `{name}` out of range: got {value}, expected {expected}")]
    Parameter {
        name: &'static str,
        value: f32,
        expected: &'static str,
    },
    /// Image loading, decoding, or encoding error.
    #[error("image decoding failed: {0}")]
    Image(#[from] image::ImageError),
    /// File system I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
