// src/extractors/structured.rs
//
// Fallback tier: quotes embedded as JSON inside a <script> block of the page.

use serde_json::Value;

use crate::extractors::sanitize::sanitize;
use crate::records::{QuoteRecord, Record};
use crate::utils::error::ExtractError;

const SCRIPT_CLOSE: &str = "</script>";
const POSTS_PATH: &[&str] = &["props", "pageProps", "response", "_sonuc", "gonderiler"];
const KIND_FIELD: &str = "turu";
const QUOTE_KIND: &str = "sozler";

/// The text between the first `>` after `marker` and the next closing script tag.
pub fn embedded_payload<'a>(raw: &'a str, marker: &str) -> Option<&'a str> {
    let after_marker = &raw[raw.find(marker)? + marker.len()..];
    let open = after_marker.find('>')? + 1;
    let body = &after_marker[open..];
    let close = body.find(SCRIPT_CLOSE)?;
    Some(&body[..close])
}

/// Descends nested objects; `None` as soon as a key is absent or a step is not an object.
pub fn lookup<'v>(value: &'v Value, path: &[&str]) -> Option<&'v Value> {
    path.iter().try_fold(value, |current, key| current.as_object()?.get(*key))
}

/// A string, or a list of string fragments joined in order (non-string fragments skipped).
pub fn text_or_fragments(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(parts) => Some(parts.iter().filter_map(Value::as_str).collect()),
        _ => None,
    }
}

/// Identifiers show up both as strings and as bare numbers.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Reads attributed quotes from the page's embedded data payload.
#[derive(Debug, Clone)]
pub struct QuotePayloadLocator {
    marker: String,
    site: String,
}

impl QuotePayloadLocator {
    pub fn new(marker: &str, site: &str) -> Self {
        Self { marker: marker.to_string(), site: site.to_string() }
    }

    /// Quotes found in the payload. A page without a payload yields none; a
    /// payload that is not valid JSON is `MalformedStructuredData`.
    pub fn locate(&self, raw: &str) -> Result<Vec<Record>, ExtractError> {
        let Some(payload) = embedded_payload(raw, &self.marker) else {
            tracing::debug!("No embedded payload marker '{}' in document", self.marker);
            return Ok(Vec::new());
        };

        let data: Value = serde_json::from_str(payload)
            .map_err(|e| ExtractError::MalformedStructuredData(format!("embedded payload: {}", e)))?;

        let Some(posts) = lookup(&data, POSTS_PATH).and_then(Value::as_array) else {
            tracing::debug!("Embedded payload has no post list at {}", POSTS_PATH.join("."));
            return Ok(Vec::new());
        };

        let quotes = posts
            .iter()
            .filter(|post| post.get(KIND_FIELD).and_then(Value::as_str) == Some(QUOTE_KIND))
            .filter_map(|post| {
                let quote = self.post_to_quote(post);
                if quote.is_none() {
                    tracing::debug!("Skipping quote post with missing or mistyped fields");
                }
                quote
            })
            .filter(Record::is_complete)
            .collect();

        Ok(quotes)
    }

    fn post_to_quote(&self, post: &Value) -> Option<Record> {
        let alt = lookup(post, &["alt"])?;
        let text = text_or_fragments(lookup(alt, &["sozler", "sozParse", "parse"])?)?;
        let book = lookup(alt, &["kitaplar"])?;
        let book_name = lookup(book, &["adi"])?.as_str()?;
        let book_id = scalar_text(lookup(book, &["id"])?)?;
        let book_slug = lookup(book, &["seo_adi"])?.as_str()?;
        let author = lookup(alt, &["yazarlar", "adi"])?.as_str()?;

        Some(Record::Quote(QuoteRecord {
            quote_text: sanitize(&text),
            author: sanitize(author),
            book_name: sanitize(book_name),
            book_link: format!("{}/kitap/{}--{}", self.site, book_slug, book_id),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const MARKER: &str = r#"id="__NEXT_DATA__""#;
    const SITE: &str = "https://1000kitap.com";

    fn page_with(payload: &Value) -> String {
        format!(
            r#"<html><body><script id="__NEXT_DATA__" type="application/json">{}</script></body></html>"#,
            payload
        )
    }

    fn post(kind: &str, parse: Value) -> Value {
        json!({
            "turu": kind,
            "alt": {
                "sozler": { "sozParse": { "parse": parse } },
                "kitaplar": { "adi": "Tutunamayanlar", "id": "1234", "seo_adi": "tutunamayanlar" },
                "yazarlar": { "adi": "Oğuz Atay" }
            }
        })
    }

    fn wrap(posts: Vec<Value>) -> Value {
        json!({ "props": { "pageProps": { "response": { "_sonuc": { "gonderiler": posts } } } } })
    }

    #[test]
    fn test_extracts_string_and_fragment_quotes() {
        let data = wrap(vec![
            post("sozler", json!("\u{201C}Tek parça\u{201D}")),
            post("sozler", json!(["İki ", "parça", 7])),
            post("incelemeler", json!("not a quote")),
        ]);
        let quotes = QuotePayloadLocator::new(MARKER, SITE).locate(&page_with(&data)).unwrap();
        assert_eq!(quotes.len(), 2);
        match &quotes[1] {
            Record::Quote(q) => {
                assert_eq!(q.quote_text, "İki parça");
                assert_eq!(q.author, "Oğuz Atay");
                assert_eq!(q.book_link, "https://1000kitap.com/kitap/tutunamayanlar--1234");
            }
            other => panic!("unexpected record {:?}", other),
        }
        assert_eq!(quotes[0].identifying_text(), "Tek parça");
    }

    #[test]
    fn test_missing_key_skips_only_that_post() {
        let mut broken = post("sozler", json!("Yazarsız söz"));
        broken["alt"]["yazarlar"] = json!("not an object");
        let data = wrap(vec![broken, post("sozler", json!("Sağlam söz"))]);
        let quotes = QuotePayloadLocator::new(MARKER, SITE).locate(&page_with(&data)).unwrap();
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].identifying_text(), "Sağlam söz");
    }

    #[test]
    fn test_numeric_book_id_is_accepted() {
        let mut p = post("sozler", json!("Sayı kimlik"));
        p["alt"]["kitaplar"]["id"] = json!(99);
        let quotes = QuotePayloadLocator::new(MARKER, SITE).locate(&page_with(&wrap(vec![p]))).unwrap();
        assert!(matches!(&quotes[0], Record::Quote(q) if q.book_link.ends_with("--99")));
    }

    #[test]
    fn test_no_marker_or_no_path_yields_nothing() {
        let locator = QuotePayloadLocator::new(MARKER, SITE);
        assert!(locator.locate("<html><body>plain</body></html>").unwrap().is_empty());
        assert!(locator.locate(&page_with(&json!({ "props": {} }))).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let page = r#"<script id="__NEXT_DATA__">{ not json </script>"#;
        let err = QuotePayloadLocator::new(MARKER, SITE).locate(page).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedStructuredData(_)));
    }

    #[test]
    fn test_lookup_stops_at_non_object() {
        let value = json!({ "a": { "b": [1, 2] } });
        assert!(lookup(&value, &["a", "b"]).is_some());
        assert!(lookup(&value, &["a", "b", "c"]).is_none());
        assert!(lookup(&value, &["x"]).is_none());
    }
}
