//! Hybrid translation of English MDX pages into per-language copies.
//!
//! For each English page with an entry in the translation table, and for each
//! target language, the English source is copied, its body rewritten snippet
//! by snippet from the table's English/translated bodies, its title fields
//! replaced, and the result written under the language's directory.

use crate::error::DocsError;
use crate::frontmatter::Document;
use crate::i18n::Language;
use crate::mapper::{apply_translations, build_translation_map};
use crate::metrics::RunMetrics;
use crate::table::{PageRecord, TranslationTable};
use crate::url_key::{url_key_from_path, UrlCorrectionMap};
use serde_norway::{Mapping, Value};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Header fields that mirror the title, updated only when already present.
const MIRRORED_TITLE_FIELDS: [&str; 3] = ["sidebarTitle", "og:title", "twitter:title"];

/// Set `title`, and overwrite any mirrored title field the header already has.
pub fn apply_title(metadata: &mut Mapping, title: &str) {
    metadata.insert(Value::from("title"), Value::from(title));
    for field in MIRRORED_TITLE_FIELDS {
        if metadata.contains_key(field) {
            metadata.insert(Value::from(field), Value::from(title));
        }
    }
}

/// Build the `language` copy of `english`.
///
/// Returns `None` when the table has neither a translated body nor a
/// translated title for the language. The body is only rewritten when both
/// the English and the translated body are present.
pub fn translate_document(
    english: &Document,
    record: &PageRecord,
    language: Language,
) -> Option<Document> {
    let canonical = Language::canonical();
    let english_body = record.content.get(canonical.code());
    let translated_body = record.content.get(language.code());
    let translated_title = record.title.get(language.code());

    if translated_body.is_none() && translated_title.is_none() {
        return None;
    }

    let mut document = english.clone();

    if let (Some(english_body), Some(translated_body)) = (english_body, translated_body) {
        let map = build_translation_map(english_body, translated_body);
        document.content = apply_translations(&document.content, &map);
    }

    if let Some(title) = translated_title {
        apply_title(&mut document.metadata, title);
    }

    Some(document)
}

/// Where the `language` copy of `english_path` lives.
pub fn translated_path(
    source_dir: &Path,
    english_path: &Path,
    language: Language,
) -> Result<PathBuf, DocsError> {
    let relative = english_path
        .strip_prefix(source_dir)
        .map_err(|_| DocsError::InvalidPath {
            path: english_path.to_path_buf(),
            root: source_dir.to_path_buf(),
        })?;
    Ok(source_dir.join(language.output_dir()).join(relative))
}

/// Translate every file in `files` (English sources under `source_dir`).
///
/// Per-file problems are logged and counted; the run always completes.
pub fn run(
    source_dir: &Path,
    files: &[PathBuf],
    table: &TranslationTable,
    corrections: &UrlCorrectionMap,
) -> RunMetrics {
    let mut metrics = RunMetrics::new();

    for english_path in files {
        let url_key = match url_key_from_path(english_path, source_dir) {
            Ok(key) => key,
            Err(e) => {
                warn!("Skipping '{}': {}", english_path.display(), e);
                metrics.record_failure();
                continue;
            }
        };

        let canonical_key = corrections.resolve(&url_key);
        let Some(record) = table.get(canonical_key) else {
            metrics.record_no_entry();
            continue;
        };

        info!(
            "Processing '{}' (URL: {})",
            english_path.display(),
            canonical_key
        );

        let english = match Document::load(english_path) {
            Ok(document) => document,
            Err(e) => {
                warn!("  ✗ Failed to read '{}': {}", english_path.display(), e);
                metrics.record_failure();
                continue;
            }
        };
        metrics.record_processed();

        for language in Language::targets() {
            let Some(document) = translate_document(&english, record, language) else {
                info!(
                    "  ⏭ Skipping language '{}' (no translation data)",
                    language.code()
                );
                metrics.record_language_skipped();
                continue;
            };

            let written = translated_path(source_dir, english_path, language)
                .and_then(|path| document.save(&path).map(|()| path));
            match written {
                Ok(path) => {
                    info!("  ✓ Saved to '{}'", path.display());
                    metrics.record_written();
                }
                Err(e) => {
                    warn!(
                        "  ✗ Failed to write {} copy of '{}': {}",
                        language.name(),
                        english_path.display(),
                        e
                    );
                    metrics.record_failure();
                }
            }
        }
    }

    metrics
}
