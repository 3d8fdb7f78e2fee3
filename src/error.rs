use std::io;

/// Errors from BMP decoding.
///
/// A decode either fully succeeds or fails with exactly one of these;
/// no partial pixel buffer is ever produced.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    /// Open, seek, or read failure on the underlying source.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// Structurally invalid header: bad signature, wrong info-header
    /// size, or a palette that overlaps the pixel data.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// Structurally valid but unimplemented: compression, an unhandled
    /// bit depth, or a pixel array cut short by end of file.
    #[error("unsupported format: {0}")]
    Unsupported(String),

    /// A pixel sample referenced a palette slot beyond the loaded table.
    #[error("palette index {index} out of range (palette has {len} entries)")]
    PaletteIndexOutOfRange { index: usize, len: usize },

    /// Buffer access outside the declared width and height.
    #[error("pixel ({x}, {y}) out of bounds for {width}x{height} buffer")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// A configured decode limit was exceeded.
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),
}
