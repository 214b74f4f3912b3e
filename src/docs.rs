//! Source file discovery under the docs root.

use crate::i18n::LanguageRegistry;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Every `.mdx` file under `root` that belongs to the English tree.
///
/// Paths passing through a translated-language directory (`fr-ca`, `ja-jp`)
/// are skipped so the scripts never treat their own output as input.
pub fn english_sources(root: &Path) -> Vec<PathBuf> {
    let translated = LanguageRegistry::get().translated_dirs();

    walk(root, &["mdx"])
        .into_iter()
        .filter(|path| {
            !path
                .strip_prefix(root)
                .unwrap_or(path)
                .components()
                .any(|c| translated.iter().any(|dir| c.as_os_str() == *dir))
        })
        .collect()
}

/// Every `.md` / `.mdx` file under `root`, translated trees included.
pub fn markdown_files(root: &Path) -> Vec<PathBuf> {
    walk(root, &["md", "mdx"])
}

fn walk(root: &Path, extensions: &[&str]) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry under '{}': {}", root.display(), e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| extensions.contains(&ext))
        })
        .collect();

    files.sort();
    files
}
