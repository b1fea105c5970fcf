//! Compression statistics
//!
//! Sizes are measured against an uncompressed baseline of 8 bits per symbol.

use crate::codec::Encoded;
use serde::Serialize;

pub const BASELINE_BITS_PER_SYMBOL: usize = 8;

/// Space saved by `encoded` relative to `original`, in percent.
///
/// `(1 - encoded_bits / (original_symbols * 8)) * 100`. Negative when the
/// encoding is longer than the baseline; 0.0 for empty `original`.
pub fn compression_ratio(original: &str, encoded: &str) -> f64 {
    ratio_percent(original.chars().count(), encoded.len())
}

fn ratio_percent(original_symbols: usize, encoded_bits: usize) -> f64 {
    if original_symbols == 0 {
        return 0.0;
    }
    let original_bits = (original_symbols * BASELINE_BITS_PER_SYMBOL) as f64;
    (1.0 - encoded_bits as f64 / original_bits) * 100.0
}

/// Statistics from an encode operation
#[derive(Debug, Clone, Serialize)]
pub struct CompressionStats {
    pub original_symbols: usize,
    pub distinct_symbols: usize,
    pub original_bits: usize,
    pub encoded_bits: usize,
    pub ratio_percent: f64,
    /// Shannon entropy of the input, bits per symbol.
    pub entropy: f64,
    pub average_code_length: f64,
}

impl CompressionStats {
    pub fn from_encoded(encoded: &Encoded) -> Self {
        let original_symbols = encoded.freq_table.total() as usize;
        let encoded_bits = encoded.bit_len();
        Self {
            original_symbols,
            distinct_symbols: encoded.freq_table.len(),
            original_bits: original_symbols * BASELINE_BITS_PER_SYMBOL,
            encoded_bits,
            ratio_percent: ratio_percent(original_symbols, encoded_bits),
            entropy: encoded.freq_table.entropy(),
            average_code_length: encoded.code_table.average_code_length(&encoded.freq_table),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode;

    #[test]
    fn test_compression_ratio() {
        assert_eq!(compression_ratio("aaaaaaaaaa", "0000000000"), 87.5);
        assert_eq!(compression_ratio("ab", "0101010101010101"), 0.0);
        assert_eq!(compression_ratio("a", "0101010101"), -25.0);
    }

    #[test]
    fn test_empty_original() {
        assert_eq!(compression_ratio("", ""), 0.0);
    }

    #[test]
    fn test_counts_symbols_not_bytes() {
        // Two symbols, four UTF-8 bytes.
        assert_eq!(compression_ratio("éé", "00"), 87.5);
    }

    #[test]
    fn test_stats_from_encoded() {
        let text = "aabbbcccc";
        let encoded = encode(text);
        let stats = CompressionStats::from_encoded(&encoded);

        assert_eq!(stats.original_symbols, 9);
        assert_eq!(stats.distinct_symbols, 3);
        assert_eq!(stats.original_bits, 72);
        assert_eq!(stats.encoded_bits, 14);
        assert_eq!(stats.ratio_percent, compression_ratio(text, &encoded.encoded_text));

        // Huffman codes are never shorter than the entropy bound
        assert!(stats.average_code_length >= stats.entropy);
        assert!(stats.average_code_length < stats.entropy + 1.0);
    }
}
