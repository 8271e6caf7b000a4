#![no_main]

use libfuzzer_sys::fuzz_target;
use message_compression::{HuffmanCodec, Packet};

fuzz_target!(|data: &[u8]| {
    let mut lengths = vec![0u8; 256];
    lengths[..64].fill(7);
    lengths[64..192].fill(9);
    lengths[192..].fill(8);
    let codec = HuffmanCodec::from_lengths(&lengths).unwrap();
    let _ = codec.decompress_packet(&mut Packet::new(data), None);

    // Tables that pass validation must decode arbitrary input without panicking.
    let (lengths, payload) = data.split_at(data.len().min(512) / 2);
    if let Ok(codec) = HuffmanCodec::from_lengths(lengths) {
        let _ = codec.decompress_packet(&mut Packet::new(payload), None);
    }
});
