// src/extractors/trivia.rs
use crate::extractors::sanitize::sanitize;
use crate::extractors::{ParsedDocument, RecordExtractor};
use crate::records::{Record, TriviaRecord};

/// Splits on commas outside braces: `{Math, Basic},{1+1?},{2}` has three fields.
pub fn split_braced_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut depth: usize = 0;

    for c in line.chars() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                fields.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    if !current.is_empty() {
        fields.push(current);
    }
    fields
}

fn clean_field(field: &str) -> String {
    sanitize(&field.replace(['{', '}'], ""))
}

/// One trivia triple per line; lines with fewer than three fields are skipped.
pub struct TriviaExtractor;

impl TriviaExtractor {
    fn parse_line(line_number: usize, line: &str) -> Option<Record> {
        let fields = split_braced_fields(line);
        if fields.len() < 3 {
            tracing::debug!("Skipping line {}: not enough columns ({})", line_number, fields.len());
            return None;
        }
        Some(Record::Trivia(TriviaRecord {
            category: clean_field(&fields[0]),
            question: clean_field(&fields[1]),
            answer: clean_field(&fields[2]),
        }))
    }
}

impl RecordExtractor for TriviaExtractor {
    fn candidates(&self, document: &ParsedDocument) -> Vec<Record> {
        let ParsedDocument::Lines(text) = document else {
            return Vec::new();
        };
        text.lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty())
            .filter_map(|(line_number, line)| Self::parse_line(line_number, line))
            .collect()
    }
}
