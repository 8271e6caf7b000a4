use criterion::{black_box, criterion_group, criterion_main, Criterion};
use message_compression::{HuffmanCodec, HuffmanTable, PacketBuilder};

fn criterion_benchmark(c: &mut Criterion) {
    let table = HuffmanTable::from_lengths(&[8; 256]).unwrap();
    let codec = HuffmanCodec::new(table);
    let random_input = (0..80)
        .map(|_| char::from(rand::random::<u8>()))
        .collect::<String>();

    c.bench_function("huffman compression, random latin-1", |b| {
        b.iter(|| {
            let mut builder = PacketBuilder::new();
            codec.compress(black_box(&random_input), &mut builder).unwrap();
            builder
        })
    });

    c.bench_function("huffman table build", |b| {
        b.iter(|| HuffmanTable::from_lengths(black_box(&[8; 256])).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
