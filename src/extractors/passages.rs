// src/extractors/passages.rs
use crate::config::HarvestConfig;
use crate::extractors::sanitize::sanitize;
use crate::extractors::walker::{find_all, text_of, ElementMatcher};
use crate::extractors::{ParsedDocument, RecordExtractor};
use crate::records::{PassageRecord, Record};

/// Free-standing passages: any span carrying the passage class token, minus
/// short snippets and the menu labels that share the class.
pub struct PassageExtractor {
    span: ElementMatcher,
    config: HarvestConfig,
}

impl PassageExtractor {
    pub fn new(config: &HarvestConfig) -> Self {
        Self {
            span: ElementMatcher::tag("span").class_contains(&config.passage_class_token),
            config: config.clone(),
        }
    }

    fn accepts(&self, text: &str) -> bool {
        text.chars().count() > self.config.min_passage_chars && !self.config.is_boilerplate(text)
    }
}

impl RecordExtractor for PassageExtractor {
    fn candidates(&self, document: &ParsedDocument) -> Vec<Record> {
        let ParsedDocument::Markup(html) = document else {
            return Vec::new();
        };
        find_all(html, &self.span)
            .map(|span| sanitize(&text_of(span)))
            .filter(|text| {
                let keep = self.accepts(text);
                if !keep && !text.is_empty() {
                    tracing::debug!("Rejecting passage candidate: '{}'", text);
                }
                keep
            })
            .map(|text| Record::Passage(PassageRecord { text }))
            .collect()
    }
}
