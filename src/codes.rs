//! Code assignment
//!
//! Walks a Huffman tree and gives each leaf the path that reaches it:
//! `'0'` for every left edge and `'1'` for every right edge.

use crate::frequency::FrequencyTable;
use crate::serializer::CodeRecord;
use crate::tree::{HuffmanNode, HuffmanTree};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Symbol to code mapping together with its inverse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CodeRecord")]
pub struct CodeTable {
    codes: BTreeMap<char, String>,
    #[serde(rename = "reverseCodes")]
    reverse: BTreeMap<String, char>,
}

impl CodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table for a one-symbol alphabet, which always uses the code `"0"`.
    pub fn single(symbol: char) -> Self {
        let mut table = Self::new();
        table.insert(symbol, "0".to_string());
        table
    }

    /// Depth-first walk with an explicit stack, left subtree first.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut table = Self::new();
        let mut stack: Vec<(&HuffmanNode, String)> = vec![(tree.root(), String::new())];

        while let Some((node, path)) = stack.pop() {
            match node {
                HuffmanNode::Leaf { symbol, .. } => {
                    let code = if path.is_empty() { "0".to_string() } else { path };
                    table.insert(*symbol, code);
                }
                HuffmanNode::Internal { left, right, .. } => {
                    stack.push((&**right, format!("{}1", path)));
                    stack.push((&**left, format!("{}0", path)));
                }
            }
        }
        table
    }

    pub(crate) fn insert(&mut self, symbol: char, code: String) {
        self.reverse.insert(code.clone(), symbol);
        self.codes.insert(symbol, code);
    }

    pub fn code(&self, symbol: char) -> Option<&str> {
        self.codes.get(&symbol).map(String::as_str)
    }

    pub fn symbol(&self, code: &str) -> Option<char> {
        self.reverse.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code.as_str()))
    }

    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(String::len).max().unwrap_or(0)
    }

    /// True when no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        // In sorted order a code's extensions follow it directly.
        let sorted: Vec<&String> = self.reverse.keys().collect();
        sorted
            .windows(2)
            .all(|pair| !pair[1].starts_with(pair[0].as_str()))
    }

    /// Expected code length in bits, weighted by `frequencies`.
    pub fn average_code_length(&self, frequencies: &FrequencyTable) -> f64 {
        let total = frequencies.total();
        if total == 0 {
            return 0.0;
        }

        let weighted_bits: f64 = frequencies
            .iter()
            .filter_map(|(symbol, count)| self.code(symbol).map(|code| code.len() as f64 * count as f64))
            .sum();
        weighted_bits / total as f64
    }
}
