use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use huffman::{encode, HuffmanCodec};

fn sample_text() -> String {
	"The quick brown fox jumps over the lazy dog. ".repeat(2048)
}

fn bench_encode(c: &mut Criterion) {
	let text = sample_text();
	let mut group = c.benchmark_group("encode");
	group.throughput(Throughput::Bytes(text.len() as u64));
	group.bench_function("encode_pangram", |b| {
		let mut codec = HuffmanCodec::default();
		b.iter(|| codec.encode(&text));
	});
	group.finish();
}

fn bench_decode(c: &mut Criterion) {
	let text = sample_text();
	let encoded = encode(&text);
	let mut group = c.benchmark_group("decode");
	group.throughput(Throughput::Bytes(encoded.encoded_text.len() as u64));
	group.bench_function("decode_pangram", |b| {
		let mut codec = HuffmanCodec::default();
		b.iter(|| codec.decode(&encoded.encoded_text, &encoded.freq_table).unwrap());
	});
	group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
