//! Structural comparison between English pages and their translations.
//!
//! Counts a few structural markers in each body and flags translations whose
//! shape diverges from the English source. Diagnostic only: nothing is
//! rewritten.

use crate::docs::english_sources;
use crate::frontmatter::Document;
use crate::i18n::Language;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, warn};

static HEADING_REGEX: OnceLock<Regex> = OnceLock::new();
static TABLE_REGEX: OnceLock<Regex> = OnceLock::new();
static LIST_ITEM_REGEX: OnceLock<Regex> = OnceLock::new();

/// Marker counts for one document body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StructureCounts {
    pub headings: usize,
    pub tables: usize,
    /// Fence markers divided by two
    pub code_blocks: usize,
    pub list_items: usize,
}

impl StructureCounts {
    pub fn analyze(body: &str) -> Self {
        let headings = HEADING_REGEX.get_or_init(|| Regex::new(r"(?m)^#+\s").unwrap());
        let tables = TABLE_REGEX.get_or_init(|| Regex::new(r"(?i)<table").unwrap());
        let list_items = LIST_ITEM_REGEX.get_or_init(|| Regex::new(r"(?m)^\s*[*\-]\s").unwrap());

        Self {
            headings: headings.find_iter(body).count(),
            tables: tables.find_iter(body).count(),
            code_blocks: body.matches("```").count() / 2,
            list_items: list_items.find_iter(body).count(),
        }
    }

    pub fn total(&self) -> usize {
        self.headings + self.tables + self.code_blocks + self.list_items
    }

    /// Whether `translated` diverges from `self` (the English source):
    /// table or code-block counts differ, or the translation has fewer than
    /// half the source's headings or list items.
    pub fn is_inconsistent_with(&self, translated: &StructureCounts) -> bool {
        self.tables != translated.tables
            || self.code_blocks != translated.code_blocks
            || translated.headings * 2 < self.headings
            || translated.list_items * 2 < self.list_items
    }
}

impl fmt::Display for StructureCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "headings={} tables={} code_blocks={} list_items={}",
            self.headings, self.tables, self.code_blocks, self.list_items
        )
    }
}

/// A translation whose structure diverges from its English source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureIssue {
    pub translated_path: PathBuf,
    pub language: Language,
    pub english: StructureCounts,
    pub translated: StructureCounts,
}

/// Compare every English page under `source_dir` with each existing
/// translation. Pages with no structural markers at all are skipped.
pub fn check_tree(source_dir: &Path) -> Vec<StructureIssue> {
    let mut issues = Vec::new();

    for english_path in english_sources(source_dir) {
        let english = match Document::load(&english_path) {
            Ok(document) => StructureCounts::analyze(&document.content),
            Err(e) => {
                warn!("Error processing '{}': {}", english_path.display(), e);
                continue;
            }
        };
        if english.total() == 0 {
            continue;
        }

        let Ok(relative) = english_path.strip_prefix(source_dir) else {
            continue;
        };

        for language in Language::targets() {
            let translated_path = source_dir.join(language.output_dir()).join(relative);
            if !translated_path.exists() {
                continue;
            }

            let translated = match Document::load(&translated_path) {
                Ok(document) => StructureCounts::analyze(&document.content),
                Err(e) => {
                    warn!("Error processing '{}': {}", translated_path.display(), e);
                    continue;
                }
            };

            if english.is_inconsistent_with(&translated) {
                issues.push(StructureIssue {
                    translated_path,
                    language,
                    english,
                    translated,
                });
            } else {
                debug!("Structure matches: {}", translated_path.display());
            }
        }
    }

    issues
}

/// Console report for the issues found by [`check_tree`].
pub fn render_report(issues: &[StructureIssue]) -> String {
    if issues.is_empty() {
        return "--- ✅ No significant structural inconsistencies found ---\n".to_string();
    }

    let mut out = String::from("--- Structural Inconsistency Report ---\n");
    for issue in issues {
        out.push_str(&format!(
            "\n[PROBLEM] Structural mismatch in: {}\n  - EN: {}\n  - {}: {}\n",
            issue.translated_path.display(),
            issue.english,
            issue.language.output_dir().to_uppercase(),
            issue.translated
        ));
    }
    out.push_str("\n--- End of Report ---\n");
    out
}
