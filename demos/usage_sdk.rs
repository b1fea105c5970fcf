use huffman::{compression_ratio, serializer, HuffmanCodec};

fn main() {
	let text = "hello hello hello hello";
	let mut codec = HuffmanCodec::default();
	let encoded = codec.encode(text);
	println!(
		"encoded {} symbols -> {} bits ({:.2}% saved)",
		text.chars().count(),
		encoded.bit_len(),
		compression_ratio(text, &encoded.encoded_text)
	);

	let freq_json = serializer::frequency_to_json(&encoded.freq_table).unwrap();
	println!("frequency table: {}", freq_json);

	let table = serializer::frequency_from_json(&freq_json).unwrap();
	let restored = codec.decode(&encoded.encoded_text, &table).unwrap();
	println!("restored: {}", restored);
}
