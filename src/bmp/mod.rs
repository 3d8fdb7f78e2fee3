//! Uncompressed BMP (Windows DIB) decoding.
//!
//! Pipeline: header validation, conditional color-table load, then one
//! seek-and-read pass per scanline, expanding samples into a top-down
//! [`ImageBuffer`](crate::ImageBuffer).

mod decode;
mod header;
mod palette;
mod pixels;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub use decode::BmpDecoder;
pub use header::BmpHeader;
pub use pixels::{ChannelBits, RGB565};

use crate::buffer::ImageBuffer;
use crate::error::BmpError;

/// Cheap check whether `data` looks like a BMP this crate can decode:
/// "BM" signature followed by a classic 40-byte info header.
pub fn probe(data: &[u8]) -> bool {
    if let Some(magic) = data.get(0..2) {
        if magic == b"BM" {
            if let Some(&size) = data.get(14) {
                return u32::from(size) == header::INFO_HEADER_LEN;
            }
        }
    }
    false
}

/// Decode the BMP file at `path`.
///
/// The file handle lives only inside this call: it is released on every
/// exit path, early validation failures included.
pub fn decode_path<P: AsRef<Path>>(path: P) -> Result<ImageBuffer, BmpError> {
    let file = File::open(path)?;
    BmpDecoder::new(BufReader::new(file)).decode()
}
