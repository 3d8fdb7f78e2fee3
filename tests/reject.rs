//! Rejection tests: every malformed or unsupported input must fail with
//! the right error kind and produce no pixel buffer.

use std::io::Cursor;

use bmpbuf::{BmpDecoder, BmpError, Limits};

/// Same builder as `tests/decode.rs`: palette entries are (R, G, B),
/// `rows` is the raw padded pixel array, bottom row first.
fn bmp_bytes(width: i32, height: i32, bit_depth: u16, palette: &[[u8; 3]], rows: &[u8]) -> Vec<u8> {
    let data_offset = 54 + 4 * palette.len() as u32;
    let file_size = data_offset + rows.len() as u32;

    let mut out = Vec::new();
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&data_offset.to_le_bytes());
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&bit_depth.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&(rows.len() as u32).to_le_bytes());
    out.extend_from_slice(&2835u32.to_le_bytes());
    out.extend_from_slice(&2835u32.to_le_bytes());
    out.extend_from_slice(&(palette.len() as u32).to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    for &[r, g, b] in palette {
        out.extend_from_slice(&[b, g, r, 0]);
    }
    out.extend_from_slice(rows);
    out
}

fn small_24bit() -> Vec<u8> {
    let rows = [
        0, 0, 255, 0, 255, 0, 0, 0, //
        255, 0, 0, 255, 255, 255, 0, 0,
    ];
    bmp_bytes(2, 2, 24, &[], &rows)
}

fn decode(data: &[u8]) -> Result<bmpbuf::ImageBuffer, BmpError> {
    BmpDecoder::new(Cursor::new(data)).decode()
}

#[test]
fn rejects_bad_signature() {
    let mut data = small_24bit();
    data[0] = b'P';
    data[1] = b'M';
    match decode(&data) {
        Err(BmpError::InvalidHeader(_)) => {}
        other => panic!("expected InvalidHeader, got {other:?}"),
    }
}

#[test]
fn rejects_non_classic_info_header() {
    let mut data = small_24bit();
    data[14..18].copy_from_slice(&124u32.to_le_bytes()); // BITMAPV5HEADER
    match decode(&data) {
        Err(BmpError::InvalidHeader(_)) => {}
        other => panic!("expected InvalidHeader, got {other:?}"),
    }
}

#[test]
fn rejects_rle8_compression() {
    let mut data = small_24bit();
    data[30..34].copy_from_slice(&1u32.to_le_bytes()); // BI_RLE8
    match decode(&data) {
        Err(BmpError::Unsupported(_)) => {}
        other => panic!("expected Unsupported, got {other:?}"),
    }
}

#[test]
fn rejects_32_bit_pixels() {
    let mut data = small_24bit();
    data[28..30].copy_from_slice(&32u16.to_le_bytes());
    match decode(&data) {
        Err(BmpError::Unsupported(_)) => {}
        other => panic!("expected Unsupported, got {other:?}"),
    }
}

#[test]
fn rejects_zero_width() {
    let data = bmp_bytes(0, 1, 24, &[], &[0, 0, 0, 0]);
    match decode(&data) {
        Err(BmpError::InvalidHeader(_)) => {}
        other => panic!("expected InvalidHeader, got {other:?}"),
    }
}

#[test]
fn rejects_zero_height() {
    let data = bmp_bytes(1, 0, 24, &[], &[0, 0, 0, 0]);
    match decode(&data) {
        Err(BmpError::InvalidHeader(_)) => {}
        other => panic!("expected InvalidHeader, got {other:?}"),
    }
}

#[test]
fn rejects_data_offset_inside_headers() {
    let mut data = small_24bit();
    data[10..14].copy_from_slice(&20u32.to_le_bytes());
    match decode(&data) {
        Err(BmpError::InvalidHeader(_)) => {}
        other => panic!("expected InvalidHeader, got {other:?}"),
    }
}

#[test]
fn truncated_header_is_an_io_error() {
    let data = small_24bit();
    match decode(&data[..30]) {
        Err(BmpError::Io(_)) => {}
        other => panic!("expected Io, got {other:?}"),
    }
}

#[test]
fn truncated_pixel_array_is_unsupported() {
    let data = small_24bit();
    match decode(&data[..data.len() - 4]) {
        Err(BmpError::Unsupported(_)) => {}
        other => panic!("expected Unsupported, got {other:?}"),
    }
}

#[test]
fn palette_index_beyond_table_is_rejected() {
    // Two palette entries, but a pixel referencing slot 5.
    let palette = [[0, 0, 0], [255, 255, 255]];
    let data = bmp_bytes(1, 1, 8, &palette, &[5, 0, 0, 0]);
    match decode(&data) {
        Err(BmpError::PaletteIndexOutOfRange { index: 5, len: 2 }) => {}
        other => panic!("expected PaletteIndexOutOfRange, got {other:?}"),
    }
}

#[test]
fn rejects_palette_overlapping_pixel_data() {
    let palette = [[0, 0, 0], [255, 255, 255], [1, 2, 3], [4, 5, 6]];
    let mut data = bmp_bytes(1, 1, 8, &palette, &[0, 0, 0, 0]);
    // Pull the data offset back inside the color table.
    data[10..14].copy_from_slice(&58u32.to_le_bytes());
    match decode(&data) {
        Err(BmpError::InvalidHeader(_)) => {}
        other => panic!("expected InvalidHeader, got {other:?}"),
    }
}

#[test]
fn rejects_palette_count_above_depth_maximum() {
    let palette = [[0, 0, 0], [255, 255, 255]];
    let mut data = bmp_bytes(1, 1, 1, &palette, &[0x80, 0, 0, 0]);
    // colors_used = 5 on a 1-bit image (max 2).
    data[46..50].copy_from_slice(&5u32.to_le_bytes());
    match decode(&data) {
        Err(BmpError::InvalidHeader(_)) => {}
        other => panic!("expected InvalidHeader, got {other:?}"),
    }
}

#[test]
fn limits_cap_pixel_count() {
    let data = small_24bit();
    let limits = Limits {
        max_pixels: Some(1),
        ..Default::default()
    };
    match BmpDecoder::new_with_limits(Cursor::new(&data), limits).decode() {
        Err(BmpError::LimitExceeded(_)) => {}
        other => panic!("expected LimitExceeded, got {other:?}"),
    }
}

#[test]
fn limits_cap_output_allocation() {
    let data = small_24bit();
    let limits = Limits {
        max_alloc_bytes: Some(8), // 2x2 RGB needs 12
        ..Default::default()
    };
    match BmpDecoder::new_with_limits(Cursor::new(&data), limits).decode() {
        Err(BmpError::LimitExceeded(_)) => {}
        other => panic!("expected LimitExceeded, got {other:?}"),
    }
}
