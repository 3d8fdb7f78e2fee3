//! Color-table loading for palette-indexed bit depths.

use std::io::{Read, Seek, SeekFrom};

use log::debug;
use rgb::RGB8;

use crate::bmp::header::{BmpHeader, FILE_HEADER_LEN};
use crate::error::BmpError;

/// Bytes per color-table entry in the file: (Blue, Green, Red, reserved).
const PALETTE_ENTRY_LEN: usize = 4;

/// Load the color table declared by `header`, reordering each file entry
/// from (B, G, R, reserved) to canonical (R, G, B).
///
/// Returns an empty palette for direct-color depths. The table must fit
/// between the info header and `data_offset`; one that would overlap the
/// pixel data is rejected as [`BmpError::InvalidHeader`].
pub(crate) fn read_palette<R: Read + Seek>(
    source: &mut R,
    header: &BmpHeader,
) -> Result<Vec<RGB8>, BmpError> {
    if header.bit_depth > 8 {
        return Ok(Vec::new());
    }

    let len = header.palette_len();
    let max_len = 1usize << header.bit_depth;
    if len > max_len {
        return Err(BmpError::InvalidHeader(format!(
            "palette count {len} exceeds max for {}-bit depth ({max_len})",
            header.bit_depth
        )));
    }

    let palette_offset = FILE_HEADER_LEN as u64 + u64::from(header.info_header_size);
    let palette_end = palette_offset + (len * PALETTE_ENTRY_LEN) as u64;
    if palette_end > u64::from(header.data_offset) {
        return Err(BmpError::InvalidHeader(format!(
            "palette of {len} entries overlaps pixel data at offset {}",
            header.data_offset
        )));
    }

    source.seek(SeekFrom::Start(palette_offset))?;

    let mut raw = vec![0u8; len * PALETTE_ENTRY_LEN];
    source.read_exact(&mut raw)?;

    let palette = raw
        .chunks_exact(PALETTE_ENTRY_LEN)
        .map(|entry| RGB8 {
            r: entry[2],
            g: entry[1],
            b: entry[0],
        })
        .collect();

    debug!("loaded {len} palette entries");
    Ok(palette)
}
