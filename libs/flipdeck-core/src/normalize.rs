//! Normalization of dataset records into raw pairs.
//!
//! Datasets spell their fields in more than one way. Each side of a pair has
//! an ordered list of accepted keys; the first key present wins.
//!
//! ```json
//! [
//!   { "question": "hiša", "answer": "house" },
//!   { "slovenian": "pes", "english": "dog" }
//! ]
//! ```

use crate::types::RawPair;
use serde_json::Value;
use std::str::FromStr;

/// Accepted key spellings for each side of a pair, in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAliases {
    pub primary: Vec<String>,
    pub secondary: Vec<String>,
}

impl Default for FieldAliases {
    fn default() -> Self {
        Self {
            primary: vec!["question".to_string(), "slovenian".to_string()],
            secondary: vec!["answer".to_string(), "english".to_string()],
        }
    }
}

impl FieldAliases {
    fn resolve(keys: &[String], record: &Value) -> String {
        keys.iter()
            .find_map(|key| record.get(key).and_then(text_of))
            .unwrap_or_default()
    }
}

/// What to do with records whose both sides normalize to empty text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlankRecords {
    /// Drop them.
    #[default]
    Skip,
    /// Keep them as blank cards.
    Keep,
}

impl FromStr for BlankRecords {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skip" => Ok(Self::Skip),
            "keep" => Ok(Self::Keep),
            other => Err(other.to_string()),
        }
    }
}

/// Text value of a field. `null` counts as absent, as do arrays and objects.
fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Normalize one record. Records that are not objects become blank pairs.
pub fn normalize_record(record: &Value, aliases: &FieldAliases) -> RawPair {
    RawPair {
        primary_text: FieldAliases::resolve(&aliases.primary, record),
        secondary_text: FieldAliases::resolve(&aliases.secondary, record),
    }
}

/// Normalize a batch of records, applying the blank-record policy.
pub fn normalize_records(
    records: &[Value],
    aliases: &FieldAliases,
    blanks: BlankRecords,
) -> Vec<RawPair> {
    let mut skipped = 0usize;
    let pairs: Vec<RawPair> = records
        .iter()
        .map(|record| normalize_record(record, aliases))
        .filter(|pair| {
            let drop = blanks == BlankRecords::Skip && pair.is_blank();
            if drop {
                skipped += 1;
            }
            !drop
        })
        .collect();

    if skipped > 0 {
        tracing::warn!(skipped, "skipped records with no text on either side");
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn first_alias_wins() {
        let record = json!({"question": "hiša", "slovenian": "dom", "answer": "house"});
        let pair = normalize_record(&record, &FieldAliases::default());
        assert_eq!(pair, RawPair::new("hiša", "house"));
    }

    #[test]
    fn falls_back_to_second_alias() {
        let record = json!({"slovenian": "pes", "english": "dog"});
        let pair = normalize_record(&record, &FieldAliases::default());
        assert_eq!(pair, RawPair::new("pes", "dog"));
    }

    #[test]
    fn null_counts_as_absent() {
        let record = json!({"question": null, "slovenian": "mačka", "answer": null, "english": "cat"});
        let pair = normalize_record(&record, &FieldAliases::default());
        assert_eq!(pair, RawPair::new("mačka", "cat"));
    }

    #[test]
    fn missing_side_becomes_empty_string() {
        let record = json!({"english": "tree"});
        let pair = normalize_record(&record, &FieldAliases::default());
        assert_eq!(pair, RawPair::new("", "tree"));
    }

    #[test]
    fn numbers_are_stringified() {
        let record = json!({"question": "ena", "answer": 1});
        let pair = normalize_record(&record, &FieldAliases::default());
        assert_eq!(pair.secondary_text, "1");
    }

    #[test]
    fn blank_records_are_skipped_by_default() {
        let records = vec![json!({"question": "a", "answer": "b"}), json!({}), json!("oops")];
        let pairs = normalize_records(&records, &FieldAliases::default(), BlankRecords::default());
        assert_eq!(pairs, vec![RawPair::new("a", "b")]);
    }

    #[test]
    fn blank_records_can_be_kept() {
        let records = vec![json!({}), json!({"other": "x"})];
        let pairs = normalize_records(&records, &FieldAliases::default(), BlankRecords::Keep);
        assert_eq!(pairs, vec![RawPair::default(), RawPair::default()]);
    }

    #[test]
    fn custom_aliases() {
        let aliases = FieldAliases {
            primary: vec!["de".to_string()],
            secondary: vec!["en".to_string()],
        };
        let pair = normalize_record(&json!({"de": "Haus", "en": "house"}), &aliases);
        assert_eq!(pair, RawPair::new("Haus", "house"));
    }

    #[test]
    fn parses_blank_policy() {
        assert_eq!("skip".parse::<BlankRecords>(), Ok(BlankRecords::Skip));
        assert_eq!("keep".parse::<BlankRecords>(), Ok(BlankRecords::Keep));
        assert_eq!("drop".parse::<BlankRecords>(), Err("drop".to_string()));
    }
}
