#![no_main]
use std::io::Cursor;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decoding arbitrary bytes must never panic.
    let _ = bmpbuf::probe(data);
    let _ = bmpbuf::BmpDecoder::new(Cursor::new(data)).decode();
});
