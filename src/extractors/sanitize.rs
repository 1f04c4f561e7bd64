// src/extractors/sanitize.rs
//
// Storage-safe text: single line, no markup, no characters that break naive
// SQL or JSON embedding.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;

// <br> carries a word break that plain tag stripping would lose
static BREAK_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<br\s*/?>").expect("Failed to compile BREAK_TAG_RE")
});

// Tags left over after entity decoding (e.g. from "&lt;b&gt;"), including one cut off at the end
static TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<[A-Za-z/!?][^>]*(?:>|$)").expect("Failed to compile TAG_RE")
});

// Each cleaning pass only shortens or keeps the text, so this is never reached in practice
const MAX_PASSES: usize = 16;

fn is_quote_mark(c: char) -> bool {
    matches!(
        c,
        '"' | '\'' | '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201C}' | '\u{201D}' | '\u{201E}'
            | '\u{00AB}' | '\u{00BB}' | '\u{2039}' | '\u{203A}'
    )
}

// C0 controls and DEL; C1 controls are left alone everywhere
fn is_stripped_control(c: char) -> bool {
    matches!(c, '\u{00}'..='\u{1F}' | '\u{7F}')
}

/// Removes tags and decodes one level of entities through the HTML parser.
fn strip_markup(s: &str) -> String {
    let with_breaks = BREAK_TAG_RE.replace_all(s, " ");
    let decoded = if with_breaks.contains('<') || with_breaks.contains('&') {
        let fragment = Html::parse_fragment(&with_breaks);
        fragment.root_element().text().collect::<String>()
    } else {
        with_breaks.into_owned()
    };
    TAG_RE.replace_all(&decoded, "").into_owned()
}

fn clean_pass(s: &str) -> String {
    let text = strip_markup(s);

    let text = text.trim_matches(|c: char| {
        is_quote_mark(c) || c.is_whitespace() || is_stripped_control(c) || c == '\\'
    });

    let text: String = text
        .chars()
        .filter(|c| *c != '\\' && *c != '"')
        .map(|c| if matches!(c, '\n' | '\r' | '\t') { ' ' } else { c })
        .filter(|c| !is_stripped_control(*c))
        .collect();

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Produces storage-safe text. Total: every input maps to some (possibly empty) output.
///
/// One cleaning pass, in order:
/// 1. strip tags, decode entities
/// 2. trim surrounding quotation marks (together with any whitespace, control
///    characters or backslashes around them)
/// 3. delete every backslash and double quote
/// 4. newline, carriage return and tab become a space
/// 5. delete remaining C0 controls and DEL
/// 6. collapse whitespace runs, trim
///
/// Passes repeat until the text stops changing. Deleting a quote or control
/// character can join `<` to a tag name, and `&amp;amp;` needs two decodes, so
/// the result is only tag-free and stable once a pass is a no-op.
pub fn sanitize(s: &str) -> String {
    let mut current = clean_pass(s);
    for _ in 1..MAX_PASSES {
        let next = clean_pass(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_quotes_and_flattens_lines() {
        let input = "  \"He said \\\"hi\\\"\n\tOK\"  ";
        assert_eq!(sanitize(input), "He said hi OK");
    }

    #[test]
    fn test_strips_tags_and_decodes_entities() {
        assert_eq!(sanitize("<p>Fish &amp; <b>chips</b></p>"), "Fish & chips");
        assert_eq!(sanitize("Hello<br/>World"), "Hello World");
        assert_eq!(sanitize("caf&eacute;&nbsp;noir"), "café noir");
    }

    #[test]
    fn test_trims_curly_quotes_and_guillemets() {
        assert_eq!(sanitize("\u{201C}Bir gün\u{201D}"), "Bir gün");
        assert_eq!(sanitize("« Sí, señor »"), "Sí, señor");
        assert_eq!(sanitize("'Tis the season'"), "Tis the season");
    }

    #[test]
    fn test_inner_apostrophes_survive() {
        assert_eq!(sanitize("Don't panic"), "Don't panic");
    }

    #[test]
    fn test_deletes_control_characters() {
        assert_eq!(sanitize("a\u{0007}b\u{007F}c"), "abc");
    }

    #[test]
    fn test_empty_and_blank_inputs() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize(" \n\t \"\" "), "");
        assert_eq!(sanitize("<span></span>"), "");
    }

    #[test]
    fn test_less_than_in_prose_is_kept() {
        assert_eq!(sanitize("1 < 2 and 3 > 2"), "1 < 2 and 3 > 2");
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let samples = [
            "  \"He said \\\"hi\\\"\n\tOK\"  ",
            "\u{201C} \u{2018}nested\u{2019} \u{201D}",
            "<div>Line one<br>line two</div>",
            "x\u{2018}\\",
            "Tom &amp; Jerry",
            "plain text",
            "a <\"b>bold</b> c",
            "a <\u{1}script>x c",
            "Fish &amp;amp; chips",
        ];
        for sample in samples {
            let once = sanitize(sample);
            assert_eq!(sanitize(&once), once, "not idempotent for {:?}", sample);
            assert!(!TAG_RE.is_match(&once), "tag left in {:?}", once);
        }
    }

    #[test]
    fn test_deleted_characters_cannot_reassemble_a_tag() {
        assert_eq!(sanitize("a <\"b>bold</b> c"), "a bold c");
        assert_eq!(sanitize("a <\\i>x</i> c"), "a x c");
    }

    #[test]
    fn test_nested_entities_decode_fully() {
        assert_eq!(sanitize("Fish &amp;amp; chips"), "Fish & chips");
        assert_eq!(sanitize("&amp;lt;b&amp;gt;bold"), "bold");
    }

    #[test]
    fn test_c1_controls_kept_at_edges_and_inside() {
        assert_eq!(sanitize("\u{80}mid\u{9B}dle\u{80}"), "\u{80}mid\u{9B}dle\u{80}");
    }
}
