// src/records/dedup.rs
use std::collections::HashSet;

use super::Record;

/// Case-folded, whitespace-collapsed projection of a record's identifying text.
/// Only ever compared, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedKey(String);

impl NormalizedKey {
    pub fn from_text(text: &str) -> Self {
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        Self(collapsed.to_lowercase())
    }
}

/// Keys admitted so far. Owned by whoever drives a batch and threaded through `dedupe`.
#[derive(Debug, Clone, Default)]
pub struct KeySet {
    seen: HashSet<NormalizedKey>,
}

impl KeySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &NormalizedKey) -> bool {
        self.seen.contains(key)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Keeps the first candidate per key, checked against both earlier candidates
/// in this call and every key in `keys`. Survivors keep their input order.
pub fn dedupe(candidates: Vec<Record>, mut keys: KeySet) -> (Vec<Record>, KeySet) {
    let mut unique = Vec::with_capacity(candidates.len());
    for record in candidates {
        // HashSet::insert is false when the key was already admitted
        if keys.seen.insert(record.key()) {
            unique.push(record);
        } else {
            tracing::debug!("Dropping duplicate: '{}'", record.identifying_text());
        }
    }
    (unique, keys)
}
