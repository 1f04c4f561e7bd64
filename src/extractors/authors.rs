// src/extractors/authors.rs
//
// Author listings: a <div> whose own <a> child links to the author page, with
// the author's quote count somewhere in the div's text as "(123)".

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::ElementRef;

use crate::config::HarvestConfig;
use crate::extractors::sanitize::sanitize;
use crate::extractors::walker::{find_all, text_of, ElementMatcher};
use crate::extractors::{ParsedDocument, RecordExtractor};
use crate::records::{AuthorRecord, Record};

static QUOTE_COUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\((\d+)\)").expect("Failed to compile QUOTE_COUNT_RE")
});

// Contact links ("telf") sit next to author links in the same container
const CONTACT_HREF_TOKEN: &str = "telf";

/// First parenthesized number in `text`; 0 when absent or out of range.
pub fn quote_count(text: &str) -> u32 {
    QUOTE_COUNT_RE
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0)
}

/// Makes a listing href absolute against `site`.
pub fn absolute_link(site: &str, href: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else if href.starts_with('/') {
        format!("{}{}", site, href)
    } else {
        format!("{}/{}", site, href)
    }
}

pub struct AuthorExtractor {
    container: ElementMatcher,
    link: ElementMatcher,
    site: String,
    min_name_chars: usize,
}

impl AuthorExtractor {
    pub fn new(config: &HarvestConfig) -> Self {
        Self {
            container: ElementMatcher::tag("div"),
            link: ElementMatcher::tag("a").attr_non_empty("href"),
            site: config.author_site.clone(),
            min_name_chars: config.min_author_chars,
        }
    }

    /// The first direct `<a>` child that is an author link, if any.
    fn author_link<'a>(&self, container: ElementRef<'a>) -> Option<(ElementRef<'a>, &'a str)> {
        container
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|child| self.link.matches(*child))
            .find_map(|child| {
                let href = child.value().attr("href")?;
                (!href.contains(CONTACT_HREF_TOKEN)).then_some((child, href))
            })
    }

    fn plausible_name(&self, name: &str) -> bool {
        name.chars().count() >= self.min_name_chars && name.chars().any(char::is_alphabetic)
    }

    fn build(&self, container: ElementRef<'_>) -> Option<Record> {
        let (link, href) = self.author_link(container)?;
        let name = sanitize(&text_of(link));
        if !self.plausible_name(&name) {
            if !name.is_empty() {
                tracing::debug!("Rejecting author name '{}'", name);
            }
            return None;
        }
        Some(Record::Author(AuthorRecord {
            name,
            quote_count: quote_count(&text_of(container)),
            link: absolute_link(&self.site, href),
        }))
    }
}

impl RecordExtractor for AuthorExtractor {
    fn candidates(&self, document: &ParsedDocument) -> Vec<Record> {
        let ParsedDocument::Markup(html) = document else {
            return Vec::new();
        };
        find_all(html, &self.container)
            .filter_map(|div| self.build(div))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn extract(html: &str) -> Vec<Record> {
        let doc = ParsedDocument::Markup(Html::parse_document(html));
        AuthorExtractor::new(&HarvestConfig::default()).extract(&doc)
    }

    fn author(name: &str, count: u32, link: &str) -> Record {
        Record::Author(AuthorRecord {
            name: name.to_string(),
            quote_count: count,
            link: link.to_string(),
        })
    }

    #[test]
    fn test_listing_with_counts_and_links() {
        let records = extract(
            r#"<div class="autores">
                 <div><a href="/miguel-de-cervantes">Miguel de Cervantes</a> <span>(128)</span></div>
                 <div><a href="telf:555">Llamar</a><a href="gabriela-mistral">Gabriela Mistral</a></div>
                 <div><a href="https://otro.example/neruda">Pablo Neruda</a> (sin número)</div>
               </div>"#,
        );
        assert_eq!(
            records,
            vec![
                author("Miguel de Cervantes", 128, "https://fraseslibros.com/miguel-de-cervantes"),
                author("Gabriela Mistral", 0, "https://fraseslibros.com/gabriela-mistral"),
                author("Pablo Neruda", 0, "https://otro.example/neruda"),
            ]
        );
    }

    #[test]
    fn test_rejects_short_or_letterless_names() {
        let records = extract(
            r#"<div><a href="/a">Al</a></div>
               <div><a href="/b">123</a></div>
               <div><a href="/c">Rubén Darío</a></div>"#,
        );
        assert_eq!(records, vec![author("Rubén Darío", 0, "https://fraseslibros.com/c")]);
    }

    #[test]
    fn test_only_direct_link_children_count() {
        // The outer div has no <a> child of its own; only the inner one yields a record
        let records = extract(r#"<div><p><a href="/x">Nested Name</a></p></div>"#);
        assert!(records.is_empty());
    }

    #[test]
    fn test_quote_count_defaults_to_zero() {
        assert_eq!(quote_count("Autor (42) frases"), 42);
        assert_eq!(quote_count("Autor (muchas)"), 0);
        assert_eq!(quote_count("(99999999999999)"), 0);
    }
}
