/// Errors raised when constructing or describing a [`Raster`](crate::Raster).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RasterError {
    #[error("sample buffer length {actual} does not match dimensions (expected {expected})")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("raster must have at least one band")]
    ZeroBands,
    #[error("unsupported bit depth: {0}")]
    UnsupportedBitDepth(u8),
}
