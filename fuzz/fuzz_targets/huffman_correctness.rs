#![no_main]

use libfuzzer_sys::fuzz_target;
use message_compression::{format_message, HuffmanCodec, Packet, PacketBuilder};

fuzz_target!(|data: &[u8]| {
    let mut lengths = vec![0u8; 256];
    lengths[..64].fill(7);
    lengths[64..192].fill(9);
    lengths[192..].fill(8);
    let codec = HuffmanCodec::from_lengths(&lengths).unwrap();

    let message = String::from_utf8_lossy(data);
    let mut builder = PacketBuilder::new();

    match codec.compress(&message, &mut builder) {
        Ok(()) => {
            let mut packet = Packet::new(builder.as_bytes());
            let decoded = codec.decompress_packet(&mut packet, None).unwrap();

            let expected = format_message(&message);
            assert_eq!(decoded.chars().map(|c| c as u32 as u8).collect::<Vec<_>>(), expected);
        }
        Err(_) => {}
    }
});
