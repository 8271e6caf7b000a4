use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lipsum::lipsum;
use message_compression::{HuffmanCodec, Packet, PacketBuilder};

fn text_lengths() -> Vec<u8> {
    let mut lengths = vec![0u8; 256];
    lengths[..64].fill(7);
    lengths[64..192].fill(9);
    lengths[192..].fill(8);
    lengths
}

fn huffman_compression(c: &mut Criterion) {
    let codec = HuffmanCodec::from_lengths(&text_lengths()).unwrap();
    let input = lipsum(16);

    c.bench_function("huffman compression", |b| {
        b.iter(|| {
            let mut builder = PacketBuilder::with_capacity(128);
            codec.compress(black_box(&input), &mut builder).unwrap();
            builder
        })
    });
}

fn huffman_decompression(c: &mut Criterion) {
    let codec = HuffmanCodec::from_lengths(&text_lengths()).unwrap();
    let input = lipsum(16);
    let mut builder = PacketBuilder::new();
    codec.compress(&input, &mut builder).unwrap();
    let compressed = builder.into_inner();

    c.bench_function("huffman decompression", |b| {
        b.iter(|| {
            let mut packet = Packet::new(black_box(&compressed));
            codec.decompress_packet(&mut packet, None).unwrap()
        })
    });
}

criterion_group!(benches, huffman_compression, huffman_decompression);
criterion_main!(benches);
