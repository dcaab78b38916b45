use thiserror::Error;

/// Result type alias for operations that may fail with [`BackdropError`].
pub type BackdropResult<T> = std::result::Result<T, BackdropError>;

/// Error types that can occur while choosing a background and tracing an image.
///
/// The color model and the search itself never fail; these variants come from
/// image I/O, the tracer, and caller-supplied arguments.
#[derive(Debug, Error)]
pub enum BackdropError {
    /// Image loading, decoding, or encoding error.
    #[error("Image processing failed: {0}")]
    Image(#[from] image::ImageError),
    /// File system I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Shape tracing failed.
    #[error("Tracing failed: {0}")]
    Trace(String),
    /// A color string could not be parsed into an 8-bit RGB triplet.
    #[error("Invalid color `{0}`: expected `#rrggbb`, `rrggbb` or `r,g,b` with channels in 0-255")]
    InvalidColor(String),
    /// An option or argument is outside its accepted range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
