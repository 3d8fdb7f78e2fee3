//! # bmpbuf
//!
//! Uncompressed BMP (Windows DIB) decoder producing a top-down RGB
//! pixel buffer, aimed at tooling that turns desktop image files into
//! something a constrained target can consume.
//!
//! ## Supported
//!
//! - "BM" files with the classic 40-byte BITMAPINFOHEADER
//! - Bit depths 1, 4, 8 (palette-indexed), 16 (packed 5-6-5), 24 (BGR)
//! - Bottom-up and top-down scanline order; output is always top-down
//!
//! ## Non-Goals
//!
//! - RLE4/RLE8 compression (rejected as unsupported)
//! - BMP encoding, 32-bit/alpha pixels, V4/V5 header variants
//! - Color management beyond channel extraction
//!
//! ## Usage
//!
//! ```no_run
//! let image = bmpbuf::decode_path("logo.bmp")?;
//! println!("{}x{}", image.width(), image.height());
//! let top_left = image.get(0, 0)?;
//! println!("r={} g={} b={}", top_left.r, top_left.g, top_left.b);
//! # Ok::<(), bmpbuf::BmpError>(())
//! ```
//!
//! Decoding is all-or-nothing: any failure aborts the decode with a
//! single [`BmpError`] and no partial buffer.

#![forbid(unsafe_code)]

mod buffer;
mod error;
mod limits;

pub mod bmp;

// Re-exports
pub use bmp::{BmpDecoder, BmpHeader, ChannelBits, RGB565, decode_path, probe};
pub use buffer::ImageBuffer;
pub use error::BmpError;
pub use limits::Limits;
pub use rgb::RGB8;
