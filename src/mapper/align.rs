//! Positional pairing of source and target snippets.

use super::extract::extract_snippets;
use std::collections::HashMap;
use tracing::debug;

/// Source snippet -> target snippet.
///
/// Iteration follows first-insertion order; inserting an existing source
/// replaces its target but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationMap {
    entries: Vec<(String, String)>,
    positions: HashMap<String, usize>,
}

impl TranslationMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: impl Into<String>, target: impl Into<String>) {
        let source = source.into();
        let target = target.into();
        match self.positions.get(&source) {
            Some(&index) => self.entries[index].1 = target,
            None => {
                self.positions.insert(source.clone(), self.entries.len());
                self.entries.push((source, target));
            }
        }
    }

    pub fn get(&self, source: &str) -> Option<&str> {
        self.positions
            .get(source)
            .map(|&index| self.entries[index].1.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(s, t)| (s.as_str(), t.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>, T: Into<String>> FromIterator<(S, T)> for TranslationMap {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (source, target) in iter {
            map.insert(source, target);
        }
        map
    }
}

/// Snippet counts on both sides of an alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignmentReport {
    pub source_count: usize,
    pub target_count: usize,
    /// Number of positional pairs (the shorter of the two counts)
    pub pairs: usize,
}

impl AlignmentReport {
    /// True when one side had snippets the other could not pair with.
    pub fn is_truncated(&self) -> bool {
        self.source_count != self.target_count
    }
}

/// Zip `source` and `target` by index, stopping at the shorter sequence.
///
/// Duplicate source snippets keep the last pairing. Either side being empty
/// yields an empty map: no translation available.
pub fn align_snippets(source: &[String], target: &[String]) -> (TranslationMap, AlignmentReport) {
    let report = AlignmentReport {
        source_count: source.len(),
        target_count: target.len(),
        pairs: source.len().min(target.len()),
    };

    if source.is_empty() || target.is_empty() {
        return (TranslationMap::new(), report);
    }

    let map = source
        .iter()
        .zip(target)
        .map(|(s, t)| (s.as_str(), t.as_str()))
        .collect();
    (map, report)
}

/// Extract snippets from both bodies and pair them positionally.
pub fn build_translation_map(source_body: &str, target_body: &str) -> TranslationMap {
    let source = extract_snippets(source_body);
    let target = extract_snippets(target_body);
    let (map, report) = align_snippets(&source, &target);

    if report.is_truncated() {
        debug!(
            "Snippet count mismatch: {} source vs {} target, pairing the first {}",
            report.source_count, report.target_count, report.pairs
        );
    }
    map
}
