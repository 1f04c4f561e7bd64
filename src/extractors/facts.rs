// src/extractors/facts.rs
use serde_json::Value;

use crate::extractors::sanitize::sanitize;
use crate::extractors::structured::scalar_text;
use crate::extractors::{ParsedDocument, RecordExtractor};
use crate::records::{FactRecord, Record};

/// Fact payloads: one `{"id", "text"}` object per document, or an array of them.
pub struct FactExtractor;

fn fact_from(entry: &Value) -> Record {
    let id = entry.get("id").and_then(scalar_text).unwrap_or_default();
    let text = entry
        .get("text")
        .and_then(Value::as_str)
        .map(sanitize)
        .unwrap_or_default();
    Record::Fact(FactRecord { id: id.trim().to_string(), text })
}

impl RecordExtractor for FactExtractor {
    fn candidates(&self, document: &ParsedDocument) -> Vec<Record> {
        match document {
            ParsedDocument::Json(Value::Array(entries)) => entries.iter().map(fact_from).collect(),
            ParsedDocument::Json(entry @ Value::Object(_)) => vec![fact_from(entry)],
            _ => Vec::new(),
        }
    }
}
