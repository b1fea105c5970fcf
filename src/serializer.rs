//! JSON form of code and frequency tables
//!
//! A code table is stored as `{"codes": {...}, "reverseCodes": {...}}`, one
//! object per direction. Malformed JSON surfaces as
//! [`HuffmanError::Serialization`]; well-formed JSON describing an impossible
//! table surfaces as [`HuffmanError::InvalidFormat`].

use crate::codes::CodeTable;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::{Read, Write};

/// Unvalidated wire form of a [`CodeTable`].
#[derive(Debug, Deserialize)]
pub(crate) struct CodeRecord {
    codes: BTreeMap<char, String>,
    #[serde(rename = "reverseCodes")]
    reverse_codes: BTreeMap<String, char>,
}

impl TryFrom<CodeRecord> for CodeTable {
    type Error = HuffmanError;

    fn try_from(record: CodeRecord) -> Result<Self> {
        if record.codes.len() != record.reverse_codes.len() {
            return Err(HuffmanError::InvalidFormat(format!(
                "{} codes but {} reverse codes",
                record.codes.len(),
                record.reverse_codes.len()
            )));
        }

        let mut table = CodeTable::new();
        for (symbol, code) in record.codes {
            if code.is_empty() || !code.chars().all(|bit| bit == '0' || bit == '1') {
                return Err(HuffmanError::InvalidFormat(format!(
                    "code {:?} for symbol {:?} is not a bit string",
                    code, symbol
                )));
            }
            if record.reverse_codes.get(&code) != Some(&symbol) {
                return Err(HuffmanError::InvalidFormat(format!(
                    "reverse code {:?} does not map back to {:?}",
                    code, symbol
                )));
            }
            table.insert(symbol, code);
        }

        if !table.is_prefix_free() {
            return Err(HuffmanError::InvalidFormat("codes do not form a prefix code".to_string()));
        }
        Ok(table)
    }
}

pub fn serialize(table: &CodeTable) -> Result<String> {
    Ok(serde_json::to_string(table)?)
}

pub fn deserialize(json: &str) -> Result<CodeTable> {
    let record: CodeRecord = serde_json::from_str(json)?;
    CodeTable::try_from(record)
}

pub fn to_writer<W: Write>(writer: &mut W, table: &CodeTable) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, table)?;
    writer.flush()?;
    Ok(())
}

pub fn from_reader<R: Read>(reader: &mut R) -> Result<CodeTable> {
    let record: CodeRecord = serde_json::from_reader(reader)?;
    CodeTable::try_from(record)
}

pub fn frequency_to_json(table: &FrequencyTable) -> Result<String> {
    Ok(serde_json::to_string(table)?)
}

pub fn frequency_from_json(json: &str) -> Result<FrequencyTable> {
    let counts: BTreeMap<char, u64> = serde_json::from_str(json)?;
    FrequencyTable::try_from(counts)
}

pub fn frequency_to_writer<W: Write>(writer: &mut W, table: &FrequencyTable) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, table)?;
    writer.flush()?;
    Ok(())
}

pub fn frequency_from_reader<R: Read>(reader: &mut R) -> Result<FrequencyTable> {
    let counts: BTreeMap<char, u64> = serde_json::from_reader(reader)?;
    FrequencyTable::try_from(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::HuffmanTree;

    fn table_for(text: &str) -> CodeTable {
        let tree = HuffmanTree::build(&FrequencyTable::from_text(text)).unwrap();
        CodeTable::from_tree(&tree)
    }

    #[test]
    fn test_round_trip() {
        let table = table_for("hello world\n\ttabs and newlines");
        let json = serialize(&table).unwrap();
        assert_eq!(deserialize(&json).unwrap(), table);
    }

    #[test]
    fn test_record_shape() {
        let json = serialize(&CodeTable::single('a')).unwrap();
        assert_eq!(json, r#"{"codes":{"a":"0"},"reverseCodes":{"0":"a"}}"#);
    }

    #[test]
    fn test_empty_table() {
        let json = serialize(&CodeTable::new()).unwrap();
        assert!(deserialize(&json).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(deserialize("{not json"), Err(HuffmanError::Serialization(_))));
        assert!(matches!(deserialize(r#"{"codes":{}}"#), Err(HuffmanError::Serialization(_))));
    }

    #[test]
    fn test_inconsistent_tables_rejected() {
        let mismatched = r#"{"codes":{"a":"0","b":"1"},"reverseCodes":{"0":"b","1":"a"}}"#;
        assert!(matches!(deserialize(mismatched), Err(HuffmanError::InvalidFormat(_))));

        let not_bits = r#"{"codes":{"a":"2"},"reverseCodes":{"2":"a"}}"#;
        assert!(matches!(deserialize(not_bits), Err(HuffmanError::InvalidFormat(_))));

        let not_prefix_free = r#"{"codes":{"a":"0","b":"01"},"reverseCodes":{"0":"a","01":"b"}}"#;
        assert!(matches!(deserialize(not_prefix_free), Err(HuffmanError::InvalidFormat(_))));
    }

    #[test]
    fn test_writer_reader_round_trip() {
        let table = table_for("mississippi");
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &table).unwrap();

        let restored = from_reader(&mut buffer.as_slice()).unwrap();
        assert_eq!(restored, table);
    }

    #[test]
    fn test_frequency_json() {
        let table = FrequencyTable::from_text("a b");
        let json = frequency_to_json(&table).unwrap();
        assert_eq!(frequency_from_json(&json).unwrap(), table);

        assert!(matches!(
            frequency_from_json(r#"{"a":0}"#),
            Err(HuffmanError::InvalidFormat(_))
        ));
        assert!(matches!(
            frequency_from_json(r#"{"a":18446744073709551615,"b":1}"#),
            Err(HuffmanError::InvalidFormat(_))
        ));

        let mut buffer = Vec::new();
        frequency_to_writer(&mut buffer, &table).unwrap();
        assert_eq!(frequency_from_reader(&mut buffer.as_slice()).unwrap(), table);
    }
}
