//! # Huffman text codec
//!
//! Lossless Huffman coding for text. Each character gets a variable-length
//! binary code based on how often it occurs, and the encoding is written as
//! a string of `'0'` and `'1'` characters.
//!
//! ## Features
//!
//! - **Deterministic trees**: equal frequency tables always produce equal
//!   codes, so the frequency table alone is enough to decode
//! - **Degenerate inputs handled**: empty text and one-symbol alphabets
//!   need no special casing by callers
//! - **Decode policies**: lenient decoding drops trailing garbage, strict
//!   decoding reports it
//! - **Portable tables**: code and frequency tables serialize to JSON
//!
//! ## Quick Start
//!
//! ```rust
//! use huffman::{decode, encode};
//!
//! let encoded = encode("aabbbcccc");
//! assert!(encoded.code_table.is_prefix_free());
//!
//! let decoded = decode(&encoded.encoded_text, &encoded.freq_table).unwrap();
//! assert_eq!(decoded, "aabbbcccc");
//! ```
//!
//! ### Keeping a Codec Around
//!
//! ```rust
//! use huffman::{CodecConfig, DecodePolicy, HuffmanCodec};
//!
//! let mut codec = HuffmanCodec::new(CodecConfig::default().with_policy(DecodePolicy::Strict));
//! let encoded = codec.encode("mississippi");
//!
//! // The codec remembers the table of its last call
//! let json = codec.serialize().unwrap();
//! let mut other = HuffmanCodec::default();
//! other.deserialize(&json).unwrap();
//! assert_eq!(other.code_table(), &encoded.code_table);
//!
//! // Strict decoding rejects a truncated bit string
//! let truncated = &encoded.encoded_text[..encoded.encoded_text.len() - 1];
//! assert!(codec.decode(truncated, &encoded.freq_table).is_err());
//! ```

pub mod cli;
pub mod codec;
pub mod codes;
pub mod config;
pub mod error;
pub mod frequency;
pub mod serializer;
pub mod stats;
pub mod tree;

// Re-export commonly used types for convenience
pub use codec::{decode, encode, Encoded, HuffmanCodec};
pub use codes::CodeTable;
pub use config::{CodecConfig, DecodePolicy};
pub use error::{HuffmanError, Result};
pub use frequency::FrequencyTable;
pub use stats::{compression_ratio, CompressionStats};
pub use tree::{HuffmanNode, HuffmanTree};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
