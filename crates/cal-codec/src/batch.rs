//! Parser for the batch text format.
//!
//! ```text
//! record := id "," manufacturer "," partNumber "," "[" component ("." component)* "]"
//! batch  := record (";" record)*
//! ids    := id ("," id)*
//! ```
//!
//! Empty component tokens are dropped. Id lists come in two flavours:
//! [`parse_id_list`] drops empty ids, [`split_id_list`] keeps them.
//!
//! Parsing is split into per-record steps so callers can look at a record's
//! id before deciding whether its fields are well formed.

use cal_types::AssetId;

use crate::error::{CodecError, CodecResult};

pub const RECORD_SEPARATOR: char = ';';
pub const FIELD_SEPARATOR: char = ',';
pub const COMPONENT_SEPARATOR: char = '.';

/// Fields of a complex batch record.
const COMPLEX_FIELDS: usize = 4;

/// One asset described by a batch payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchRecord {
    pub id: AssetId,
    pub manufacturer: String,
    pub part_number: String,
    pub components: Vec<AssetId>,
}

/// Split a batch payload into its raw records.
///
/// An empty payload yields one empty record, which then fails to parse.
pub fn split_records(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(RECORD_SEPARATOR)
}

/// The id field of a raw record, without validating the rest.
pub fn record_id(record: &str) -> &str {
    record.split(FIELD_SEPARATOR).next().unwrap_or_default()
}

/// Parse a complex record: exactly four comma-separated fields.
pub fn parse_record(record: &str) -> CodecResult<BatchRecord> {
    let fields: Vec<&str> = record.split(FIELD_SEPARATOR).collect();
    if fields.len() != COMPLEX_FIELDS {
        return Err(CodecError::BatchFormat {
            id: AssetId::new(record_id(record)),
            reason: format!("expected {COMPLEX_FIELDS} fields, found {}", fields.len()),
        });
    }
    Ok(BatchRecord {
        id: AssetId::new(fields[0]),
        manufacturer: fields[1].to_string(),
        part_number: fields[2].to_string(),
        components: parse_component_list(fields[3]),
    })
}

/// Parse a simple record: `id,manufacturer,partNumber`.
///
/// A trailing component field is tolerated and ignored so that complex
/// payloads can be replayed as simple ones.
pub fn parse_simple_record(record: &str) -> CodecResult<BatchRecord> {
    let fields: Vec<&str> = record.split(FIELD_SEPARATOR).collect();
    if !(3..=COMPLEX_FIELDS).contains(&fields.len()) {
        return Err(CodecError::BatchFormat {
            id: AssetId::new(record_id(record)),
            reason: format!("expected 3 or 4 fields, found {}", fields.len()),
        });
    }
    Ok(BatchRecord {
        id: AssetId::new(fields[0]),
        manufacturer: fields[1].to_string(),
        part_number: fields[2].to_string(),
        components: Vec::new(),
    })
}

/// Parse a bracketed, dot-separated component list such as `[a.b.c]`.
///
/// Only the first `[` and the first `]` are stripped.
pub fn parse_component_list(field: &str) -> Vec<AssetId> {
    field
        .replacen('[', "", 1)
        .replacen(']', "", 1)
        .split(COMPONENT_SEPARATOR)
        .filter(|token| !token.is_empty())
        .map(AssetId::from)
        .collect()
}

/// Split a comma-separated id list as-is. Empty tokens are kept.
pub fn split_id_list(csv: &str) -> impl Iterator<Item = &str> {
    csv.split(FIELD_SEPARATOR)
}

/// Parse a comma-separated id list, dropping empty tokens.
pub fn parse_id_list(csv: &str) -> Vec<AssetId> {
    csv.split(FIELD_SEPARATOR)
        .filter(|token| !token.is_empty())
        .map(AssetId::from)
        .collect()
}
