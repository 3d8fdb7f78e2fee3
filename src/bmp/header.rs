//! BITMAPFILEHEADER / BITMAPINFOHEADER parsing and validation.
//!
//! Fields are decoded little-endian, one by one, from the raw byte
//! blocks; nothing here depends on native struct layout.

use std::io::Read;

use log::{debug, trace};

use crate::error::BmpError;

/// Size of the file header block.
pub(crate) const FILE_HEADER_LEN: usize = 14;

/// The only supported info-header variant (classic BITMAPINFOHEADER).
pub(crate) const INFO_HEADER_LEN: u32 = 40;

/// Bit depths this decoder handles.
const SUPPORTED_DEPTHS: [u16; 5] = [1, 4, 8, 16, 24];

/// Parsed and validated BMP header, immutable once read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpHeader {
    /// Declared total file size. Informational only.
    pub file_size: u32,
    /// Absolute byte offset of the pixel data.
    pub data_offset: u32,
    /// Info-header size; always [`INFO_HEADER_LEN`] after validation.
    pub info_header_size: u32,
    /// Image width in pixels, > 0.
    pub width: u32,
    /// Row count (magnitude of the stored signed height).
    pub height: u32,
    /// True when the stored height was positive: the first scanline in
    /// the file is the visual bottom row.
    pub bottom_up: bool,
    /// Bits per pixel: one of 1, 4, 8, 16, 24.
    pub bit_depth: u16,
    /// Compression method; always 0 (BI_RGB) after validation.
    pub compression: u32,
    /// Declared palette length; 0 means the maximum for the bit depth.
    pub colors_used: u32,
}

impl BmpHeader {
    /// Read and validate exactly 14 + 40 header bytes from `source`,
    /// leaving its cursor at byte 54.
    ///
    /// Bad signature or info-header size is [`BmpError::InvalidHeader`];
    /// nonzero compression or an unhandled bit depth is
    /// [`BmpError::Unsupported`]; short reads surface as [`BmpError::Io`].
    pub fn read<R: Read>(source: &mut R) -> Result<BmpHeader, BmpError> {
        let mut file_header = [0u8; FILE_HEADER_LEN];
        source.read_exact(&mut file_header)?;

        if &file_header[0..2] != b"BM" {
            return Err(BmpError::InvalidHeader(format!(
                "signature [{:#04x}, {:#04x}] is not \"BM\"",
                file_header[0], file_header[1]
            )));
        }

        let file_size = u32_le(&file_header, 2);
        // 4 reserved bytes at offset 6, ignored
        let data_offset = u32_le(&file_header, 10);

        let mut info_header = [0u8; INFO_HEADER_LEN as usize];
        source.read_exact(&mut info_header)?;

        let info_header_size = u32_le(&info_header, 0);
        if info_header_size != INFO_HEADER_LEN {
            return Err(BmpError::InvalidHeader(format!(
                "info header size {info_header_size} (only BITMAPINFOHEADER, 40, is supported)"
            )));
        }

        if data_offset < FILE_HEADER_LEN as u32 + INFO_HEADER_LEN {
            return Err(BmpError::InvalidHeader(format!(
                "data offset {data_offset} points inside the headers"
            )));
        }

        let width = i32_le(&info_header, 4);
        if width <= 0 {
            return Err(BmpError::InvalidHeader(format!(
                "width {width} is not positive"
            )));
        }

        let height = i32_le(&info_header, 8);
        if height == 0 {
            return Err(BmpError::InvalidHeader("height is zero".into()));
        }

        let planes = u16_le(&info_header, 12);
        let bit_depth = u16_le(&info_header, 14);

        let compression = u32_le(&info_header, 16);
        if compression != 0 {
            return Err(BmpError::Unsupported(format!(
                "compression method {compression} (only uncompressed BI_RGB is supported)"
            )));
        }

        if !SUPPORTED_DEPTHS.contains(&bit_depth) {
            return Err(BmpError::Unsupported(format!(
                "bit depth {bit_depth} (supported: {SUPPORTED_DEPTHS:?})"
            )));
        }

        let raw_bitmap_size = u32_le(&info_header, 20);
        let x_pels_per_meter = i32_le(&info_header, 24);
        let y_pels_per_meter = i32_le(&info_header, 28);
        let colors_used = u32_le(&info_header, 32);
        let important_colors = u32_le(&info_header, 36);

        let header = BmpHeader {
            file_size,
            data_offset,
            info_header_size,
            width: width as u32,
            height: height.unsigned_abs(),
            bottom_up: height > 0,
            bit_depth,
            compression,
            colors_used,
        };

        debug!(
            "bmp header: {}x{} {}bpp, {}, data offset {}",
            header.width,
            header.height,
            header.bit_depth,
            if header.bottom_up {
                "bottom-up"
            } else {
                "top-down"
            },
            header.data_offset
        );
        trace!("file size field: {file_size}");
        trace!("color planes: {planes}");
        trace!("raw bitmap size field: {raw_bitmap_size}");
        trace!("resolution: {x_pels_per_meter}x{y_pels_per_meter} px/m");
        trace!("colors used: {colors_used}, important: {important_colors}");

        Ok(header)
    }

    /// Number of color-table entries implied by the header: the declared
    /// count, or the bit depth's maximum when the field is zero. Zero for
    /// direct-color depths.
    pub fn palette_len(&self) -> usize {
        if self.bit_depth > 8 {
            0
        } else if self.colors_used != 0 {
            self.colors_used as usize
        } else {
            1 << self.bit_depth
        }
    }
}

fn u16_le(buf: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([buf[at], buf[at + 1]])
}

fn u32_le(buf: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

fn i32_le(buf: &[u8], at: usize) -> i32 {
    u32_le(buf, at) as i32
}
