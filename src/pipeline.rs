// src/pipeline.rs
//
// Drives one record kind over a batch: parse, extract (markup first, embedded
// data only when markup found nothing), dedupe against everything admitted so
// far, append. A bad document costs only itself.

use crate::config::HarvestConfig;
use crate::extractors::{RecordExtractor, RecordKind};
use crate::records::{dedupe, KeySet, RawDocument, Record, ResultSet};
use crate::utils::error::ExtractError;

/// Which extraction tier produced a document's candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Primary,
    StructuredData,
    /// Neither tier found anything (or the document was skipped).
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DocumentOutcome {
    pub document: String,
    pub tier: Tier,
    pub candidates: usize,
    pub admitted: usize,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct DocumentFailure {
    pub document: String,
    pub reason: String,
}

impl DocumentFailure {
    pub fn new(document: &str, error: &impl std::fmt::Display) -> Self {
        Self { document: document.to_string(), reason: error.to_string() }
    }
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub records: ResultSet,
    pub outcomes: Vec<DocumentOutcome>,
    pub failures: Vec<DocumentFailure>,
}

pub struct Pipeline {
    kind: RecordKind,
    extractor: Box<dyn RecordExtractor>,
}

impl Pipeline {
    pub fn new(kind: RecordKind, config: &HarvestConfig) -> Self {
        Self { kind, extractor: kind.extractor(config) }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Complete candidates for one document and the tier they came from.
    pub fn extract_document(&self, document: &RawDocument) -> Result<(Tier, Vec<Record>), ExtractError> {
        let text = std::str::from_utf8(&document.bytes).map_err(|e| ExtractError::DocumentParse {
            document: document.name.clone(),
            reason: format!("invalid UTF-8: {}", e),
        })?;
        let parsed = self.kind.parse(&document.name, text)?;

        let primary = self.extractor.extract(&parsed);
        if !primary.is_empty() {
            return Ok((Tier::Primary, primary));
        }

        let fallback = self.extractor.fallback(text)?;
        if fallback.is_empty() {
            Ok((Tier::Empty, fallback))
        } else {
            Ok((Tier::StructuredData, fallback))
        }
    }

    /// Processes `documents` in order. Output order, and which duplicate
    /// survives, depend only on that order.
    pub fn run(&self, documents: &[RawDocument]) -> BatchReport {
        let mut report = BatchReport::default();
        let mut keys = KeySet::new();

        for document in documents {
            let (tier, candidates) = match self.extract_document(document) {
                Ok(found) => found,
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", document.name, e);
                    report.failures.push(DocumentFailure::new(&document.name, &e));
                    report.outcomes.push(DocumentOutcome {
                        document: document.name.clone(),
                        tier: Tier::Empty,
                        candidates: 0,
                        admitted: 0,
                    });
                    continue;
                }
            };

            let found = candidates.len();
            let (unique, updated) = dedupe(candidates, keys);
            keys = updated;

            tracing::info!(
                "File: {} - Found {} {} ({:?}), {} new",
                document.name,
                found,
                self.kind.name(),
                tier,
                unique.len()
            );
            report.outcomes.push(DocumentOutcome {
                document: document.name.clone(),
                tier,
                candidates: found,
                admitted: unique.len(),
            });
            report.records.extend_unique(unique);
        }

        tracing::info!(
            "Batch finished: {} unique {} from {} documents ({} skipped)",
            report.records.len(),
            self.kind.name(),
            documents.len(),
            report.failures.len()
        );
        report
    }
}
