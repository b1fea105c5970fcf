//! Text encoder and decoder
//!
//! Ties the frequency table, tree builder and code generator together and
//! owns the policy for degenerate inputs:
//!
//! - empty input encodes and decodes to an empty string;
//! - a one-symbol alphabet always uses the code `"0"` and never builds a tree;
//! - trailing bits that do not complete a code are dropped under
//!   [`DecodePolicy::Lenient`] and rejected under [`DecodePolicy::Strict`].
//!
//! [`DecodePolicy::Lenient`]: crate::config::DecodePolicy::Lenient
//! [`DecodePolicy::Strict`]: crate::config::DecodePolicy::Strict

use crate::codes::CodeTable;
use crate::config::CodecConfig;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::serializer;
use crate::tree::HuffmanTree;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Result of one encode call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Encoded {
    /// Concatenated codes, one `'0'`/`'1'` character per bit.
    pub encoded_text: String,
    /// Everything the decoder needs to rebuild `code_table`.
    pub freq_table: FrequencyTable,
    pub code_table: CodeTable,
}

impl Encoded {
    pub fn bit_len(&self) -> usize {
        self.encoded_text.len()
    }
}

/// Huffman codec holding the code table of its most recent call.
///
/// `encode` and `decode` take `&mut self` because they replace that table;
/// share work across threads with one codec per thread.
#[derive(Debug, Clone, Default)]
pub struct HuffmanCodec {
    config: CodecConfig,
    codes: CodeTable,
    tree: Option<HuffmanTree>,
}

impl HuffmanCodec {
    pub fn new(config: CodecConfig) -> Self {
        Self {
            config,
            codes: CodeTable::new(),
            tree: None,
        }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Code table built by the last encode, decode or deserialize.
    pub fn code_table(&self) -> &CodeTable {
        &self.codes
    }

    /// Tree built by the last encode or decode. Single-symbol and empty
    /// inputs have none.
    pub fn tree(&self) -> Option<&HuffmanTree> {
        self.tree.as_ref()
    }

    fn rebuild(&mut self, frequencies: &FrequencyTable) {
        self.tree = None;
        self.codes = match frequencies.sole_entry() {
            Some((symbol, _)) => CodeTable::single(symbol),
            None => match HuffmanTree::build(frequencies) {
                Some(tree) => {
                    let codes = CodeTable::from_tree(&tree);
                    self.tree = Some(tree);
                    codes
                }
                None => CodeTable::new(),
            },
        };
    }

    pub fn encode(&mut self, text: &str) -> Encoded {
        let freq_table = FrequencyTable::from_text(text);
        self.rebuild(&freq_table);

        let encoded_text = match freq_table.sole_entry() {
            Some((_, count)) => "0".repeat(count as usize),
            None => {
                let bits: usize = freq_table
                    .iter()
                    .filter_map(|(symbol, count)| self.codes.code(symbol).map(|code| code.len() * count as usize))
                    .sum();
                let mut encoded = String::with_capacity(bits);
                for code in text.chars().filter_map(|symbol| self.codes.code(symbol)) {
                    encoded.push_str(code);
                }
                encoded
            }
        };

        debug!(
            "encoded {} symbols ({} distinct) into {} bits",
            freq_table.total(),
            freq_table.len(),
            encoded_text.len()
        );

        Encoded {
            encoded_text,
            freq_table,
            code_table: self.codes.clone(),
        }
    }

    /// Decode `bits` with the code table rebuilt from `freq_table`.
    ///
    /// Under the lenient policy bits that do not complete a code are dropped
    /// and whatever decoded before them is returned. The only lenient failure
    /// is a one-symbol table whose count does not fit in memory.
    pub fn decode(&mut self, bits: &str, freq_table: &FrequencyTable) -> Result<String> {
        self.rebuild(freq_table);
        let strict = self.config.is_strict();

        if bits.is_empty() {
            return Ok(String::new());
        }

        if let Some((symbol, count)) = freq_table.sole_entry() {
            if strict && (bits.len() as u64 != count || bits.chars().any(|bit| bit != '0')) {
                return Err(HuffmanError::MalformedInput(format!(
                    "expected {} zero bits for single-symbol table, got {:?}",
                    count, bits
                )));
            }
            return repeat_symbol(symbol, count);
        }

        if self.codes.is_empty() {
            if strict {
                return Err(HuffmanError::MalformedInput(
                    "bits supplied with an empty frequency table".to_string(),
                ));
            }
            warn!("no codes to decode {} bits with; returning empty text", bits.len());
            return Ok(String::new());
        }

        let max_code_len = self.codes.max_code_len();
        // Every decoded symbol consumes at least one bit.
        let expected = usize::try_from(freq_table.total()).unwrap_or(usize::MAX);
        let mut decoded = String::with_capacity(expected.min(bits.len()));
        let mut pending = String::with_capacity(max_code_len);
        let mut pending_start = 0;
        let mut stalled = false;

        for (position, bit) in bits.chars().enumerate() {
            if strict && bit != '0' && bit != '1' {
                return Err(HuffmanError::MalformedInput(format!(
                    "invalid bit {:?} at position {}",
                    bit, position
                )));
            }

            if pending.is_empty() {
                pending_start = position;
            }
            pending.push(bit);

            if let Some(symbol) = self.codes.symbol(&pending) {
                decoded.push(symbol);
                pending.clear();
            } else if pending.len() > max_code_len {
                // Longer than every code, so no later bit can complete a match.
                stalled = true;
                break;
            }
        }

        if stalled || !pending.is_empty() {
            let dropped = bits.chars().count() - pending_start;
            if strict {
                return Err(HuffmanError::MalformedInput(format!(
                    "{} trailing bits starting at position {} do not form a code",
                    dropped, pending_start
                )));
            }
            warn!("dropping {} undecodable bits starting at position {}", dropped, pending_start);
        }

        debug!("decoded {} bits into {} symbols", bits.len(), decoded.chars().count());
        Ok(decoded)
    }

    /// Serialize the current code table (not the tree).
    pub fn serialize(&self) -> Result<String> {
        serializer::serialize(&self.codes)
    }

    /// Replace the current code table. The tree is discarded.
    pub fn deserialize(&mut self, json: &str) -> Result<()> {
        self.codes = serializer::deserialize(json)?;
        self.tree = None;
        Ok(())
    }
}

fn repeat_symbol(symbol: char, count: u64) -> Result<String> {
    let too_large = || {
        HuffmanError::MalformedInput(format!("count {} for symbol {:?} is too large to decode", count, symbol))
    };
    let repeats = usize::try_from(count).map_err(|_| too_large())?;
    let bytes = repeats.checked_mul(symbol.len_utf8()).ok_or_else(too_large)?;

    let mut decoded = String::new();
    decoded.try_reserve_exact(bytes).map_err(|_| too_large())?;
    decoded.extend(std::iter::repeat(symbol).take(repeats));
    Ok(decoded)
}

/// Encode `text` with a fresh codec.
pub fn encode(text: &str) -> Encoded {
    HuffmanCodec::default().encode(text)
}

/// Decode `bits` leniently with a fresh codec.
pub fn decode(bits: &str, freq_table: &FrequencyTable) -> Result<String> {
    HuffmanCodec::default().decode(bits, freq_table)
}
