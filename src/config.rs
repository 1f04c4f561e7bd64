// src/config.rs

// --- Defaults ---
pub const DEFAULT_QUOTE_SITE: &str = "https://1000kitap.com";
pub const DEFAULT_AUTHOR_SITE: &str = "https://fraseslibros.com";
pub const DEFAULT_QUOTE_CLASS: &str = "text text text-15";
pub const DEFAULT_PASSAGE_CLASS_TOKEN: &str = "text-15";
pub const DEFAULT_PAYLOAD_MARKER: &str = r#"id="__NEXT_DATA__""#;
// Passages must be strictly longer than this many characters
pub const DEFAULT_MIN_PASSAGE_CHARS: usize = 20;
pub const DEFAULT_MIN_AUTHOR_CHARS: usize = 3;

// Menu labels that share the passage span class on listing pages
const DEFAULT_BOILERPLATE: &[&str] = &[
    "genel bakış",
    "incelemeler",
    "alıntılar",
    "benzer kitaplar",
    "devamını oku",
    "tümünü göster",
];

/// Tunables shared by every extractor.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    /// Base URL that relative book links on quote pages resolve against.
    pub quote_site: String,
    /// Base URL that relative author links on listing pages resolve against.
    pub author_site: String,
    /// Exact `class` attribute of an attributed quote span.
    pub quote_class: String,
    /// Class token identifying a free-standing passage span.
    pub passage_class_token: String,
    /// Marker locating the embedded JSON payload in a raw page.
    pub payload_marker: String,
    pub min_passage_chars: usize,
    pub min_author_chars: usize,
    /// Lower-cased phrases that are never passages.
    pub boilerplate: Vec<String>,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            quote_site: DEFAULT_QUOTE_SITE.to_string(),
            author_site: DEFAULT_AUTHOR_SITE.to_string(),
            quote_class: DEFAULT_QUOTE_CLASS.to_string(),
            passage_class_token: DEFAULT_PASSAGE_CLASS_TOKEN.to_string(),
            payload_marker: DEFAULT_PAYLOAD_MARKER.to_string(),
            min_passage_chars: DEFAULT_MIN_PASSAGE_CHARS,
            min_author_chars: DEFAULT_MIN_AUTHOR_CHARS,
            boilerplate: DEFAULT_BOILERPLATE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl HarvestConfig {
    /// Overrides the site bases, trimming any trailing slash so hrefs can be appended as-is.
    pub fn with_sites(mut self, quote_site: Option<String>, author_site: Option<String>) -> Self {
        if let Some(site) = quote_site {
            self.quote_site = site.trim_end_matches('/').to_string();
        }
        if let Some(site) = author_site {
            self.author_site = site.trim_end_matches('/').to_string();
        }
        self
    }

    pub fn with_min_passage_chars(mut self, min: Option<usize>) -> Self {
        if let Some(min) = min {
            self.min_passage_chars = min;
        }
        self
    }

    /// True when `text` (already sanitized) is a known menu label.
    pub fn is_boilerplate(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.boilerplate.iter().any(|phrase| *phrase == lowered)
    }
}
