// src/records/mod.rs
pub mod dedup;

use serde::Serialize;

pub use dedup::{dedupe, KeySet, NormalizedKey};

/// One source unit (a saved page, a trivia file, a fact payload) as read from disk.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl RawDocument {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self { name: name.into(), bytes: bytes.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRecord {
    pub quote_text: String,
    pub author: String,
    pub book_name: String,
    pub book_link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassageRecord {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriviaRecord {
    pub category: String,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRecord {
    pub name: String,
    pub quote_count: u32,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactRecord {
    pub id: String,
    pub text: String,
}

/// A candidate produced by one of the extractors.
///
/// Serialized untagged so each output file is a plain array of the persisted shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Quote(QuoteRecord),
    Passage(PassageRecord),
    Trivia(TriviaRecord),
    Author(AuthorRecord),
    Fact(FactRecord),
}

impl Record {
    /// The field duplicates are judged on.
    pub fn identifying_text(&self) -> &str {
        match self {
            Record::Quote(q) => &q.quote_text,
            Record::Passage(p) => &p.text,
            Record::Trivia(t) => &t.question,
            Record::Author(a) => &a.name,
            Record::Fact(f) => &f.text,
        }
    }

    pub fn key(&self) -> NormalizedKey {
        NormalizedKey::from_text(self.identifying_text())
    }

    /// Every mandatory field is non-empty. `quote_count` is never mandatory.
    pub fn is_complete(&self) -> bool {
        match self {
            Record::Quote(q) => all_present(&[&q.quote_text, &q.author, &q.book_name, &q.book_link]),
            Record::Passage(p) => all_present(&[&p.text]),
            Record::Trivia(t) => all_present(&[&t.category, &t.question, &t.answer]),
            Record::Author(a) => all_present(&[&a.name, &a.link]),
            Record::Fact(f) => all_present(&[&f.id, &f.text]),
        }
    }
}

fn all_present(fields: &[&String]) -> bool {
    fields.iter().all(|f| !f.is_empty())
}

/// Ordered records with pairwise distinct keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    records: Vec<Record>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends records that already passed `dedupe` against this set's keys.
    pub(crate) fn extend_unique(&mut self, records: Vec<Record>) {
        self.records.extend(records);
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(text: &str, author: &str) -> Record {
        Record::Quote(QuoteRecord {
            quote_text: text.to_string(),
            author: author.to_string(),
            book_name: "Book".to_string(),
            book_link: "https://1000kitap.com/kitap/book--1".to_string(),
        })
    }

    #[test]
    fn test_quote_missing_author_is_incomplete() {
        assert!(quote("Some text", "Someone").is_complete());
        assert!(!quote("Some text", "").is_complete());
    }

    #[test]
    fn test_author_with_zero_count_is_complete() {
        let author = Record::Author(AuthorRecord {
            name: "Cervantes".to_string(),
            quote_count: 0,
            link: "https://fraseslibros.com/cervantes".to_string(),
        });
        assert!(author.is_complete());
    }

    #[test]
    fn test_serializes_persisted_field_names() {
        let json = serde_json::to_value(quote("Hi", "Me")).unwrap();
        assert_eq!(json["quoteText"], "Hi");
        assert_eq!(json["bookLink"], "https://1000kitap.com/kitap/book--1");

        let author = Record::Author(AuthorRecord {
            name: "Lope".to_string(),
            quote_count: 12,
            link: "https://fraseslibros.com/lope".to_string(),
        });
        let json = serde_json::to_value(author).unwrap();
        assert_eq!(json["quoteCount"], 12);
    }

    #[test]
    fn test_fact_serializes_as_its_own_shape() {
        let fact = Record::Fact(FactRecord { id: "7".to_string(), text: "Bees dance".to_string() });
        let json = serde_json::to_value(&fact).unwrap();
        assert_eq!(json, serde_json::json!({ "id": "7", "text": "Bees dance" }));
    }

    #[test]
    fn test_key_uses_identifying_field() {
        let trivia = Record::Trivia(TriviaRecord {
            category: "General".to_string(),
            question: "What  is 2+2?".to_string(),
            answer: "4".to_string(),
        });
        assert_eq!(trivia.key(), NormalizedKey::from_text("what is 2+2?"));
    }
}
