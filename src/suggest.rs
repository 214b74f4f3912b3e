//! URL correction suggestions from matching page titles.
//!
//! When a file's path-derived key is missing from the translation table, the
//! page can often still be found by its English title. Suggestions are printed
//! for a human to review and paste into the URL corrections file; nothing here
//! writes application data.

use crate::frontmatter::Document;
use crate::i18n::Language;
use crate::table::TranslationTable;
use crate::url_key::url_key_from_path;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Normalized English title -> canonical URL key.
#[derive(Debug, Clone, Default)]
pub struct TitleIndex {
    by_title: HashMap<String, String>,
    duplicates: Vec<(String, String)>,
}

impl TitleIndex {
    /// Index the table's English titles. The first key seen (in table
    /// document order) keeps a title; later keys with the same title are recorded as
    /// duplicates and logged.
    pub fn build(table: &TranslationTable) -> Self {
        let canonical = Language::canonical();
        let mut index = Self::default();

        for (url_key, record) in table.iter() {
            let Some(title) = record.title.get(canonical.code()) else {
                continue;
            };
            let normalized = normalize_title(title);
            if index.by_title.contains_key(&normalized) {
                warn!("Duplicate title in table: '{}' (URL: {})", title, url_key);
                index.duplicates.push((title.to_string(), url_key.to_string()));
            } else {
                index.by_title.insert(normalized, url_key.to_string());
            }
        }

        index
    }

    pub fn lookup(&self, title: &str) -> Option<&str> {
        self.by_title.get(&normalize_title(title)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_title.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_title.is_empty()
    }

    /// (title, url key) pairs that lost to an earlier key with the same title.
    pub fn duplicates(&self) -> &[(String, String)] {
        &self.duplicates
    }
}

/// Outcome of matching source files against a [`TitleIndex`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suggestions {
    /// File-derived key -> canonical key, only where the two differ
    pub corrections: BTreeMap<String, String>,
    /// Files whose title was found in the index
    pub found: usize,
    /// Files without a title, without a match, or that could not be read
    pub not_found: usize,
}

pub fn suggest_corrections(source_dir: &Path, files: &[PathBuf], index: &TitleIndex) -> Suggestions {
    let mut suggestions = Suggestions::default();

    for path in files {
        let document = match Document::load(path) {
            Ok(document) => document,
            Err(e) => {
                debug!("Unreadable '{}': {}", path.display(), e);
                suggestions.not_found += 1;
                continue;
            }
        };

        let Some(canonical_key) = document.title().and_then(|title| index.lookup(title)) else {
            suggestions.not_found += 1;
            continue;
        };
        suggestions.found += 1;

        match url_key_from_path(path, source_dir) {
            Ok(file_key) if file_key != canonical_key => {
                suggestions
                    .corrections
                    .insert(file_key, canonical_key.to_string());
            }
            Ok(_) => {}
            Err(e) => warn!("{}", e),
        }
    }

    suggestions
}

/// The corrections as a sorted JSON object literal, in the format read by
/// the URL corrections file.
pub fn render_mapping_literal(corrections: &BTreeMap<String, String>) -> String {
    let mut out = String::from("{\n");
    let count = corrections.len();
    for (i, (file_key, canonical_key)) in corrections.iter().enumerate() {
        let separator = if i + 1 < count { "," } else { "" };
        out.push_str(&format!(
            "    {}: {}{}\n",
            serde_json::Value::from(file_key.as_str()),
            serde_json::Value::from(canonical_key.as_str()),
            separator
        ));
    }
    out.push('}');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{LocalizedText, PageRecord};
    use tempfile::TempDir;

    fn table(entries: &[(&str, &str)]) -> TranslationTable {
        let mut table = TranslationTable::new();
        for (key, title) in entries {
            table.insert(
                *key,
                PageRecord {
                    title: LocalizedText::from([("en", *title)]),
                    content: LocalizedText::default(),
                },
            );
        }
        table
    }

    // ==================== Index Tests ====================

    #[test]
    fn test_index_normalizes_titles() {
        let index = TitleIndex::build(&table(&[("/a", "  Getting Started ")]));
        assert_eq!(index.lookup("getting started"), Some("/a"));
        assert_eq!(index.lookup("GETTING STARTED"), Some("/a"));
    }

    #[test]
    fn test_index_first_seen_wins() {
        let index = TitleIndex::build(&table(&[("/zeta", "Overview"), ("/alpha", "overview")]));

        assert_eq!(index.lookup("Overview"), Some("/zeta"));
        assert_eq!(index.len(), 1);
        assert_eq!(index.duplicates(), &[("overview".to_string(), "/alpha".to_string())]);
    }

    #[test]
    fn test_index_follows_table_file_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("table.json");
        std::fs::write(
            &path,
            r#"{"/zeta": {"title": {"en": "Overview"}}, "/alpha": {"title": {"en": "overview"}}}"#,
        )
        .unwrap();

        let index = TitleIndex::build(&TranslationTable::load(&path).unwrap());
        assert_eq!(index.lookup("Overview"), Some("/zeta"));
    }

    #[test]
    fn test_index_skips_pages_without_english_title() {
        let mut t = TranslationTable::new();
        t.insert("/x", PageRecord::default());
        assert!(TitleIndex::build(&t).is_empty());
    }

    // ==================== Suggestion Tests ====================

    #[test]
    fn test_suggest_corrections() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("guides")).unwrap();
        std::fs::write(root.join("guides/start.mdx"), "---\ntitle: Getting Started\n---\nx").unwrap();
        std::fs::write(root.join("same.mdx"), "---\ntitle: Same Place\n---\nx").unwrap();
        std::fs::write(root.join("untitled.mdx"), "no header").unwrap();
        std::fs::write(root.join("unknown.mdx"), "---\ntitle: Nowhere\n---\nx").unwrap();
        std::fs::write(root.join("broken.mdx"), "---\ntitle: [oops\n---\nx").unwrap();

        let index = TitleIndex::build(&table(&[
            ("/get-started", "Getting Started"),
            ("/same", "Same Place"),
        ]));
        let files = crate::docs::english_sources(root);
        let result = suggest_corrections(root, &files, &index);

        assert_eq!(result.found, 2);
        assert_eq!(result.not_found, 3);
        assert_eq!(
            result.corrections,
            BTreeMap::from([("/guides/start".to_string(), "/get-started".to_string())])
        );
    }

    // ==================== Rendering Tests ====================

    #[test]
    fn test_render_mapping_literal() {
        let corrections = BTreeMap::from([
            ("/b".to_string(), "/y".to_string()),
            ("/a".to_string(), "/x".to_string()),
        ]);
        let literal = render_mapping_literal(&corrections);

        assert_eq!(literal, "{\n    \"/a\": \"/x\",\n    \"/b\": \"/y\"\n}");
        let parsed: BTreeMap<String, String> = serde_json::from_str(&literal).unwrap();
        assert_eq!(parsed, corrections);
    }

    #[test]
    fn test_render_empty_mapping() {
        assert_eq!(render_mapping_literal(&BTreeMap::new()), "{\n}");
    }
}
