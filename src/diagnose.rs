//! Side-by-side listing of file-derived URL keys and translation-table keys.

use crate::table::TranslationTable;
use crate::url_key::url_key_from_path;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Sorted key sets for both sides of the mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlDiagnosis {
    pub generated: Vec<String>,
    pub available: Vec<String>,
}

impl UrlDiagnosis {
    pub fn new(source_dir: &Path, files: &[PathBuf], table: &TranslationTable) -> Self {
        let mut generated: Vec<String> = files
            .iter()
            .filter_map(|path| match url_key_from_path(path, source_dir) {
                Ok(key) => Some(key),
                Err(e) => {
                    warn!("{}", e);
                    None
                }
            })
            .collect();
        generated.sort();

        let mut available: Vec<String> = table.urls().map(str::to_string).collect();
        available.sort();

        Self {
            generated,
            available,
        }
    }

    /// Keys derived from files that the table does not know.
    pub fn missing_from_table(&self) -> Vec<&str> {
        let available: BTreeSet<&str> = self.available.iter().map(String::as_str).collect();
        self.generated
            .iter()
            .map(String::as_str)
            .filter(|key| !available.contains(key))
            .collect()
    }

    /// Table keys with no matching file.
    pub fn missing_from_files(&self) -> Vec<&str> {
        let generated: BTreeSet<&str> = self.generated.iter().map(String::as_str).collect();
        self.available
            .iter()
            .map(String::as_str)
            .filter(|key| !generated.contains(key))
            .collect()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str("--- URLs generated from .mdx files ---\n");
        out.push_str(&format!("(Total: {})\n\n", self.generated.len()));
        for url in &self.generated {
            out.push_str(url);
            out.push('\n');
        }

        out.push_str(&format!("\n{}\n\n", "=".repeat(60)));

        out.push_str("--- URLs available in the translation table ---\n");
        out.push_str(&format!("(Total: {})\n\n", self.available.len()));
        for url in &self.available {
            out.push_str(url);
            out.push('\n');
        }

        let missing_from_table = self.missing_from_table();
        out.push_str(&format!(
            "\n--- File URLs with no table entry ({}) ---\n",
            missing_from_table.len()
        ));
        for url in missing_from_table {
            out.push_str(url);
            out.push('\n');
        }

        let missing_from_files = self.missing_from_files();
        out.push_str(&format!(
            "\n--- Table URLs with no file ({}) ---\n",
            missing_from_files.len()
        ));
        for url in missing_from_files {
            out.push_str(url);
            out.push('\n');
        }

        out.push_str("\n--- End of diagnosis ---\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::PageRecord;

    fn diagnosis() -> UrlDiagnosis {
        let mut table = TranslationTable::new();
        table.insert("/guides", PageRecord::default());
        table.insert("/guides/old-intro", PageRecord::default());
        table.insert("/", PageRecord::default());

        let files = vec![
            PathBuf::from("docs/guides/intro.mdx"),
            PathBuf::from("docs/index.mdx"),
            PathBuf::from("docs/guides/index.mdx"),
        ];
        UrlDiagnosis::new(Path::new("docs"), &files, &table)
    }

    #[test]
    fn test_keys_are_sorted() {
        let d = diagnosis();
        assert_eq!(d.generated, vec!["/", "/guides", "/guides/intro"]);
        assert_eq!(d.available, vec!["/", "/guides", "/guides/old-intro"]);
    }

    #[test]
    fn test_differences() {
        let d = diagnosis();
        assert_eq!(d.missing_from_table(), vec!["/guides/intro"]);
        assert_eq!(d.missing_from_files(), vec!["/guides/old-intro"]);
    }

    #[test]
    fn test_render_lists_totals() {
        let report = diagnosis().render();
        assert!(report.contains("(Total: 3)"));
        assert!(report.contains("File URLs with no table entry (1)"));
        assert!(report.contains("/guides/old-intro\n"));
    }

    #[test]
    fn test_files_outside_root_are_skipped() {
        let d = UrlDiagnosis::new(
            Path::new("docs"),
            &[PathBuf::from("elsewhere/page.mdx")],
            &TranslationTable::new(),
        );
        assert!(d.generated.is_empty());
    }
}
