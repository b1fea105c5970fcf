//! Symbol frequency analysis
//!
//! Counts how often each character occurs in a text. The table iterates in
//! ascending symbol order, which is the order the tree builder creates its
//! leaves in, so equal tables always produce equal trees.

use crate::error::{HuffmanError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// Occurrence count of every symbol in a text. Counts are never zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<char, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build frequency table from text
    pub fn from_text(text: &str) -> Self {
        let mut counts = BTreeMap::new();
        for symbol in text.chars() {
            *counts.entry(symbol).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Set the count for `symbol`, replacing any previous value.
    ///
    /// Fails when `count` is zero or would push the total past `u64::MAX`.
    pub fn insert(&mut self, symbol: char, count: u64) -> Result<()> {
        if count == 0 {
            return Err(HuffmanError::InvalidFormat(format!(
                "symbol {:?} has a zero count",
                symbol
            )));
        }
        let others = self.total() - self.get(symbol).unwrap_or(0);
        if others.checked_add(count).is_none() {
            return Err(HuffmanError::InvalidFormat(format!(
                "count {} for symbol {:?} overflows the table total",
                count, symbol
            )));
        }
        self.counts.insert(symbol, count);
        Ok(())
    }

    pub fn get(&self, symbol: char) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the length of the source text in symbols.
    /// Saturates at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.counts.values().fold(0, |total, &count| total.saturating_add(count))
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }

    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.counts.keys().copied()
    }

    /// The only entry of a one-symbol table.
    pub fn sole_entry(&self) -> Option<(char, u64)> {
        if self.counts.len() == 1 {
            self.iter().next()
        } else {
            None
        }
    }

    /// Shannon entropy in bits per symbol
    pub fn entropy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }

        let total = total as f64;
        let mut entropy = 0.0;
        for &count in self.counts.values() {
            let probability = count as f64 / total;
            entropy -= probability * probability.log2();
        }
        entropy
    }
}

impl TryFrom<BTreeMap<char, u64>> for FrequencyTable {
    type Error = HuffmanError;

    fn try_from(counts: BTreeMap<char, u64>) -> Result<Self> {
        let mut table = FrequencyTable::new();
        for (symbol, count) in counts {
            table.insert(symbol, count)?;
        }
        Ok(table)
    }
}

impl FromIterator<(char, u64)> for FrequencyTable {
    /// Zero counts are skipped; repeated symbols accumulate, saturating at
    /// `u64::MAX`.
    fn from_iter<I: IntoIterator<Item = (char, u64)>>(iter: I) -> Self {
        let mut counts = BTreeMap::new();
        for (symbol, count) in iter.into_iter().filter(|(_, count)| *count > 0) {
            let entry: &mut u64 = counts.entry(symbol).or_insert(0);
            *entry = entry.saturating_add(count);
        }
        Self { counts }
    }
}

impl Serialize for FrequencyTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.counts.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FrequencyTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let counts = BTreeMap::<char, u64>::deserialize(deserializer)?;
        FrequencyTable::try_from(counts).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_table() {
        let table = FrequencyTable::from_text("hello, world!");

        assert_eq!(table.get('l'), Some(3));
        assert_eq!(table.get('o'), Some(2));
        assert_eq!(table.get('z'), None);
        assert_eq!(table.total(), 13);
        assert_eq!(table.len(), 10);
    }

    #[test]
    fn test_empty_text() {
        let table = FrequencyTable::from_text("");
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
        assert_eq!(table.entropy(), 0.0);
        assert_eq!(table.sole_entry(), None);
    }

    #[test]
    fn test_iteration_is_sorted() {
        let table = FrequencyTable::from_text("cabbage");
        let symbols: Vec<char> = table.symbols().collect();
        assert_eq!(symbols, vec!['a', 'b', 'c', 'e', 'g']);
    }

    #[test]
    fn test_unicode_and_whitespace() {
        let table = FrequencyTable::from_text("é é\n");
        assert_eq!(table.get('é'), Some(2));
        assert_eq!(table.get(' '), Some(1));
        assert_eq!(table.get('\n'), Some(1));
    }

    #[test]
    fn test_zero_count_rejected() {
        let mut table = FrequencyTable::new();
        assert!(table.insert('a', 0).is_err());
        table.insert('a', 4).unwrap();
        assert_eq!(table.sole_entry(), Some(('a', 4)));
    }

    #[test]
    fn test_from_iter_skips_zeros() {
        let table: FrequencyTable = vec![('a', 2), ('b', 0), ('a', 1)].into_iter().collect();
        assert_eq!(table.get('a'), Some(3));
        assert_eq!(table.get('b'), None);
    }

    #[test]
    fn test_total_cannot_overflow() {
        let mut table = FrequencyTable::new();
        table.insert('a', u64::MAX).unwrap();
        assert!(matches!(table.insert('b', 1), Err(HuffmanError::InvalidFormat(_))));
        assert_eq!(table.get('b'), None);

        // Replacing an entry only counts the new value.
        table.insert('a', u64::MAX - 1).unwrap();
        table.insert('b', 1).unwrap();
        assert_eq!(table.total(), u64::MAX);

        assert!(serde_json::from_str::<FrequencyTable>(r#"{"a":18446744073709551615,"b":1}"#).is_err());
    }

    #[test]
    fn test_from_iter_saturates() {
        let table: FrequencyTable = vec![('a', u64::MAX), ('a', 5), ('b', 1)].into_iter().collect();
        assert_eq!(table.get('a'), Some(u64::MAX));
        assert_eq!(table.total(), u64::MAX);
    }

    #[test]
    fn test_entropy() {
        // Single symbol carries no information
        assert_eq!(FrequencyTable::from_text("aaaa").entropy(), 0.0);

        // Two equally likely symbols: one bit each
        let entropy = FrequencyTable::from_text("abab").entropy();
        assert!((entropy - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_json_shape() {
        let table = FrequencyTable::from_text("aab");
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"a":2,"b":1}"#);

        let restored: FrequencyTable = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, table);

        assert!(serde_json::from_str::<FrequencyTable>(r#"{"a":0}"#).is_err());
    }
}
