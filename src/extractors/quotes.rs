// src/extractors/quotes.rs
//
// Attributed quotes: a quote span whose parent also holds the book and author links.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::ElementRef;

use crate::config::HarvestConfig;
use crate::extractors::sanitize::sanitize;
use crate::extractors::structured::QuotePayloadLocator;
use crate::extractors::walker::{find_all, text_of, ElementMatcher};
use crate::extractors::{ParsedDocument, RecordExtractor};
use crate::records::{QuoteRecord, Record};
use crate::utils::error::ExtractError;

// --- Link Patterns (Lazy Static) ---
// Book pages: /kitap/<slug>--<numeric id>
static BOOK_HREF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^/kitap/([^/]+)--(\d+)").expect("Failed to compile BOOK_HREF_RE")
});

// Author pages: /yazar/<slug>
static AUTHOR_HREF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^/yazar/([^/]+)").expect("Failed to compile AUTHOR_HREF_RE")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkRole {
    Book,
    Author,
}

pub fn classify_link(href: &str) -> Option<LinkRole> {
    if BOOK_HREF_RE.is_match(href) {
        Some(LinkRole::Book)
    } else if AUTHOR_HREF_RE.is_match(href) {
        Some(LinkRole::Author)
    } else {
        None
    }
}

/// What the links next to a quote span say about it. Text is still raw here.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Attribution {
    pub author: Option<String>,
    pub book_name: Option<String>,
    pub book_href: Option<String>,
}

/// Looks at the `<a>` children of the fragment's parent. The first link per
/// role wins; later links with the same role are ignored.
pub fn scan_sibling_links(fragment: ElementRef<'_>) -> Attribution {
    let mut attribution = Attribution::default();
    let Some(parent) = fragment.parent() else {
        return attribution;
    };

    for link in parent.children().filter_map(ElementRef::wrap) {
        if link.value().name() != "a" {
            continue;
        }
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        match classify_link(href) {
            Some(LinkRole::Book) if attribution.book_href.is_none() => {
                attribution.book_name = Some(text_of(link));
                attribution.book_href = Some(href.to_string());
            }
            Some(LinkRole::Author) if attribution.author.is_none() => {
                attribution.author = Some(text_of(link));
            }
            _ => {}
        }
    }
    attribution
}

pub struct QuoteExtractor {
    span: ElementMatcher,
    site: String,
    payload: QuotePayloadLocator,
}

impl QuoteExtractor {
    pub fn new(config: &HarvestConfig) -> Self {
        Self {
            span: ElementMatcher::tag("span").attr_eq("class", &config.quote_class),
            site: config.quote_site.clone(),
            payload: QuotePayloadLocator::new(&config.payload_marker, &config.quote_site),
        }
    }

    fn build(&self, span: ElementRef<'_>) -> Record {
        let attribution = scan_sibling_links(span);
        Record::Quote(QuoteRecord {
            quote_text: sanitize(&text_of(span)),
            author: attribution.author.as_deref().map(sanitize).unwrap_or_default(),
            book_name: attribution.book_name.as_deref().map(sanitize).unwrap_or_default(),
            book_link: attribution
                .book_href
                .map(|href| format!("{}{}", self.site, href))
                .unwrap_or_default(),
        })
    }
}

impl RecordExtractor for QuoteExtractor {
    fn candidates(&self, document: &ParsedDocument) -> Vec<Record> {
        let ParsedDocument::Markup(html) = document else {
            return Vec::new();
        };
        find_all(html, &self.span).map(|span| self.build(span)).collect()
    }

    fn fallback(&self, raw: &str) -> Result<Vec<Record>, ExtractError> {
        self.payload.locate(raw)
    }
}
