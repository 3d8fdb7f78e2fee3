//! Scanline iteration and the decoder driving header → palette → rows.

use std::io::{self, Read, Seek, SeekFrom};

use log::debug;
use rgb::RGB8;

use crate::bmp::header::BmpHeader;
use crate::bmp::palette::read_palette;
use crate::bmp::pixels::{RGB565, expand_bgr, expand_indexed, expand_packed_u16, unpack_indices};
use crate::buffer::ImageBuffer;
use crate::error::BmpError;
use crate::limits::Limits;

// ── Decoder ─────────────────────────────────────────────────────────

/// Streaming BMP decoder over any seekable byte source.
///
/// Decoding is synchronous and single-pass per call; the decoder owns
/// its source exclusively and every call is independent of any other
/// decode. For in-memory data wrap the bytes in [`std::io::Cursor`].
pub struct BmpDecoder<R> {
    source: R,
    limits: Option<Limits>,
    header: Option<BmpHeader>,
}

impl<R: Read + Seek> BmpDecoder<R> {
    pub fn new(source: R) -> BmpDecoder<R> {
        BmpDecoder {
            source,
            limits: None,
            header: None,
        }
    }

    /// Like [`BmpDecoder::new`], with resource limits enforced once the
    /// header is parsed.
    pub fn new_with_limits(source: R, limits: Limits) -> BmpDecoder<R> {
        BmpDecoder {
            source,
            limits: Some(limits),
            header: None,
        }
    }

    /// Read and validate the headers without touching pixel data.
    ///
    /// Idempotent: the parsed header is cached, so calling this before
    /// [`BmpDecoder::decode`] costs nothing extra.
    pub fn read_header(&mut self) -> Result<BmpHeader, BmpError> {
        if let Some(header) = self.header {
            return Ok(header);
        }
        let header = BmpHeader::read(&mut self.source)?;
        if let Some(limits) = &self.limits {
            limits.check_dimensions(header.width, header.height)?;
            limits.check_alloc(output_bytes(&header))?;
        }
        self.header = Some(header);
        Ok(header)
    }

    /// `(width, height)` once [`BmpDecoder::read_header`] has run.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.header.map(|h| (h.width, h.height))
    }

    /// Decode the whole image into a top-down [`ImageBuffer`],
    /// consuming the decoder and its source.
    pub fn decode(mut self) -> Result<ImageBuffer, BmpError> {
        let header = self.read_header()?;
        let palette = read_palette(&mut self.source, &header)?;
        decode_rows(&mut self.source, &header, &palette)
    }
}

// ── Scanline geometry ───────────────────────────────────────────────

/// Byte layout of one stored scanline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RowGeometry {
    /// Bytes holding actual samples: `ceil(width * bit_depth / 8)`.
    pub bytes_per_row: usize,
    /// Filler bytes aligning the row to a 4-byte boundary.
    pub padding: usize,
    /// Distance between row starts; always a multiple of 4.
    pub row_stride: usize,
}

impl RowGeometry {
    pub(crate) fn from_header(header: &BmpHeader) -> RowGeometry {
        let bytes_per_row = (header.width as usize * usize::from(header.bit_depth)).div_ceil(8);
        let padding = (4 - bytes_per_row % 4) % 4;
        RowGeometry {
            bytes_per_row,
            padding,
            row_stride: bytes_per_row + padding,
        }
    }
}

// ── Row decoding ────────────────────────────────────────────────────

/// Read every scanline of `source`, expand its samples, and place each
/// decoded row in a top-down [`ImageBuffer`].
///
/// Bottom-up files (the common case) map file row `r` to output row
/// `height - 1 - r`; top-down files keep file order.
pub(crate) fn decode_rows<R: Read + Seek>(
    source: &mut R,
    header: &BmpHeader,
    palette: &[RGB8],
) -> Result<ImageBuffer, BmpError> {
    let width = header.width as usize;
    let height = header.height as usize;
    let geometry = RowGeometry::from_header(header);

    debug!(
        "row geometry: {} sample bytes + {} padding = {} stride",
        geometry.bytes_per_row, geometry.padding, geometry.row_stride
    );

    if usize::try_from(output_bytes(header)).is_err() {
        return Err(BmpError::LimitExceeded(format!(
            "{}x{} image exceeds addressable memory",
            header.width, header.height
        )));
    }

    let mut image = ImageBuffer::new(width, height);
    let mut row = vec![0u8; geometry.row_stride];
    // Scratch for one index byte per pixel at sub-byte depths.
    let mut indices = vec![0u8; if header.bit_depth < 8 { width } else { 0 }];

    for file_row in 0..height {
        let offset = u64::from(header.data_offset) + file_row as u64 * geometry.row_stride as u64;
        source.seek(SeekFrom::Start(offset))?;
        read_pixel_row(source, &mut row)?;

        let y = if header.bottom_up {
            height - 1 - file_row
        } else {
            file_row
        };
        expand_row(
            header,
            palette,
            &row[..geometry.bytes_per_row],
            &mut indices,
            image.row_mut(y),
        )?;
    }

    Ok(image)
}

/// Fill `row` from the source. A clean end-of-file inside the pixel
/// array means the file is shorter than its header declares, which is
/// an unsupported (truncated) file rather than an I/O fault.
fn read_pixel_row<R: Read>(source: &mut R, row: &mut [u8]) -> Result<(), BmpError> {
    source.read_exact(row).map_err(|err| {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            BmpError::Unsupported("pixel array truncated before the declared row count".into())
        } else {
            BmpError::Io(err)
        }
    })
}

/// Expand one scanline's raw samples into `out` (`width` pixels).
fn expand_row(
    header: &BmpHeader,
    palette: &[RGB8],
    raw: &[u8],
    indices: &mut [u8],
    out: &mut [RGB8],
) -> Result<(), BmpError> {
    match header.bit_depth {
        1 | 4 => {
            unpack_indices(header.bit_depth, raw, indices);
            for (pixel, &index) in out.iter_mut().zip(indices.iter()) {
                *pixel = expand_indexed(palette, usize::from(index))?;
            }
        }
        8 => {
            for (pixel, &index) in out.iter_mut().zip(raw.iter()) {
                *pixel = expand_indexed(palette, usize::from(index))?;
            }
        }
        16 => {
            for (pixel, group) in out.iter_mut().zip(raw.chunks_exact(2)) {
                let word = u16::from_le_bytes([group[0], group[1]]);
                *pixel = expand_packed_u16(word, RGB565);
            }
        }
        24 => {
            for (pixel, group) in out.iter_mut().zip(raw.chunks_exact(3)) {
                *pixel = expand_bgr(group);
            }
        }
        // Anything else is rejected during header validation.
        depth => {
            return Err(BmpError::Unsupported(format!(
                "unhandled bit depth {depth}"
            )));
        }
    }
    Ok(())
}

fn output_bytes(header: &BmpHeader) -> u64 {
    u64::from(header.width) * u64::from(header.height) * 3
}

#[cfg(test)]
mod tests {
    use super::RowGeometry;
    use crate::bmp::header::BmpHeader;

    fn header(width: u32, bit_depth: u16) -> BmpHeader {
        BmpHeader {
            file_size: 0,
            data_offset: 54,
            info_header_size: 40,
            width,
            height: 1,
            bottom_up: true,
            bit_depth,
            compression: 0,
            colors_used: 0,
        }
    }

    #[test]
    fn stride_is_padded_to_four_bytes() {
        let g = RowGeometry::from_header(&header(3, 24));
        assert_eq!(g.bytes_per_row, 9);
        assert_eq!(g.padding, 3);
        assert_eq!(g.row_stride, 12);

        let g = RowGeometry::from_header(&header(21, 1));
        assert_eq!(g.bytes_per_row, 3);
        assert_eq!(g.padding, 1);
        assert_eq!(g.row_stride, 4);

        for width in 1..64 {
            for bit_depth in [1u16, 4, 8, 16, 24] {
                let g = RowGeometry::from_header(&header(width, bit_depth));
                assert_eq!(g.row_stride % 4, 0, "width {width} depth {bit_depth}");
            }
        }
    }
}
