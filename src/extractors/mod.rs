// src/extractors/mod.rs
pub mod authors;
pub mod facts;
pub mod passages;
pub mod quotes;
pub mod sanitize;
pub mod structured;
pub mod trivia;
pub mod walker;

use scraper::Html;
use serde_json::Value;

use crate::config::HarvestConfig;
use crate::records::Record;
use crate::utils::error::ExtractError;

pub use authors::AuthorExtractor;
pub use facts::FactExtractor;
pub use passages::PassageExtractor;
pub use quotes::QuoteExtractor;
pub use sanitize::sanitize;
pub use trivia::TriviaExtractor;

/// Which tool's records a batch is harvesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RecordKind {
    /// Attributed quotes (text, author, book) from quote pages
    Quotes,
    /// Unattributed passages from a single book's quote pages
    Passages,
    /// Author listings with quote counts
    Authors,
    /// `{category},{question},{answer}` lines
    Trivia,
    /// `{id, text}` JSON payloads
    Facts,
}

impl RecordKind {
    pub fn name(&self) -> &'static str {
        match self {
            RecordKind::Quotes => "quotes",
            RecordKind::Passages => "passages",
            RecordKind::Authors => "authors",
            RecordKind::Trivia => "trivia",
            RecordKind::Facts => "facts",
        }
    }

    /// Parses a document's text into the shape this kind's extractor reads.
    pub fn parse(&self, document: &str, text: &str) -> Result<ParsedDocument, ExtractError> {
        match self {
            RecordKind::Quotes | RecordKind::Passages | RecordKind::Authors => {
                Ok(ParsedDocument::Markup(Html::parse_document(text)))
            }
            RecordKind::Trivia => {
                Ok(ParsedDocument::Lines(text.trim_start_matches('\u{FEFF}').to_string()))
            }
            RecordKind::Facts => serde_json::from_str(text)
                .map(ParsedDocument::Json)
                .map_err(|e| ExtractError::DocumentParse {
                    document: document.to_string(),
                    reason: format!("invalid JSON: {}", e),
                }),
        }
    }

    pub fn extractor(&self, config: &HarvestConfig) -> Box<dyn RecordExtractor> {
        match self {
            RecordKind::Quotes => Box::new(QuoteExtractor::new(config)),
            RecordKind::Passages => Box::new(PassageExtractor::new(config)),
            RecordKind::Authors => Box::new(AuthorExtractor::new(config)),
            RecordKind::Trivia => Box::new(TriviaExtractor),
            RecordKind::Facts => Box::new(FactExtractor),
        }
    }
}

/// A document after the collaborator parse step.
pub enum ParsedDocument {
    Markup(Html),
    Lines(String),
    Json(Value),
}

/// One extraction strategy per record kind.
///
/// `candidates` finds every fragment and builds its record, leaving unresolved
/// fields empty; `extract` then keeps only complete records. Implementors
/// return nothing for a document variant they do not read.
pub trait RecordExtractor {
    fn candidates(&self, document: &ParsedDocument) -> Vec<Record>;

    fn extract(&self, document: &ParsedDocument) -> Vec<Record> {
        self.candidates(document)
            .into_iter()
            .filter(Record::is_complete)
            .collect()
    }

    /// Second tier, consulted only when `extract` found nothing in the document.
    fn fallback(&self, _raw: &str) -> Result<Vec<Record>, ExtractError> {
        Ok(Vec::new())
    }
}
