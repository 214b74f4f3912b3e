//! Canonical URL keys for docs pages.
//!
//! A page's key is its path relative to the docs root, without extension,
//! with `/` separators and a leading `/`. An `index` page takes its parent
//! directory's key.

use crate::error::DocsError;
use std::collections::BTreeMap;
use std::path::{Component, Path};
use tracing::{info, warn};

/// Derive the canonical URL key for `path` under `root`.
///
/// `docs/guides/intro.mdx` -> `/guides/intro`, `docs/guides/index.mdx` ->
/// `/guides`, `docs/index.mdx` -> `/`.
pub fn url_key_from_path(path: &Path, root: &Path) -> Result<String, DocsError> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| DocsError::InvalidPath {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
        })?
        .with_extension("");

    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => segments.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            _ => {
                return Err(DocsError::InvalidPath {
                    path: path.to_path_buf(),
                    root: root.to_path_buf(),
                })
            }
        }
    }

    if segments.last().is_some_and(|leaf| leaf == "index") {
        segments.pop();
    }

    Ok(format!("/{}", segments.join("/")))
}

/// Manual overrides from a file-derived key to the key used by the
/// translation table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlCorrectionMap {
    corrections: BTreeMap<String, String>,
}

impl UrlCorrectionMap {
    pub fn new(corrections: BTreeMap<String, String>) -> Self {
        Self { corrections }
    }

    /// Load corrections from a JSON object. A missing file is not an error:
    /// the scripts run with an empty map and say so.
    pub fn load(path: &Path) -> Result<Self, DocsError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(
                    "URL corrections file '{}' not found, using an empty correction map",
                    path.display()
                );
                return Ok(Self::default());
            }
            Err(e) => return Err(DocsError::io(path, e)),
        };

        let corrections: BTreeMap<String, String> = serde_json::from_str(&raw)?;
        info!(
            "Loaded {} URL corrections from '{}'",
            corrections.len(),
            path.display()
        );
        Ok(Self { corrections })
    }

    /// The canonical key for `key`: the override if one exists, else `key`.
    pub fn resolve<'a>(&'a self, key: &'a str) -> &'a str {
        self.corrections.get(key).map(String::as_str).unwrap_or(key)
    }

    pub fn len(&self) -> usize {
        self.corrections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corrections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    // ==================== Key Derivation Tests ====================

    #[test]
    fn test_plain_page() {
        let key = url_key_from_path(Path::new("docs/guides/intro.mdx"), Path::new("docs"));
        assert_eq!(key.unwrap(), "/guides/intro");
    }

    #[test]
    fn test_index_collapses_to_parent() {
        let key = url_key_from_path(Path::new("docs/guides/index.mdx"), Path::new("docs"));
        assert_eq!(key.unwrap(), "/guides");
    }

    #[test]
    fn test_root_index_is_slash() {
        let key = url_key_from_path(Path::new("docs/index.mdx"), Path::new("docs"));
        assert_eq!(key.unwrap(), "/");
    }

    #[test]
    fn test_index_prefix_is_not_collapsed() {
        let key = url_key_from_path(Path::new("docs/a/indexing.mdx"), Path::new("docs"));
        assert_eq!(key.unwrap(), "/a/indexing");
    }

    #[test]
    fn test_path_outside_root_is_invalid() {
        let err = url_key_from_path(Path::new("other/page.mdx"), Path::new("docs")).unwrap_err();
        assert!(matches!(err, DocsError::InvalidPath { .. }));
    }

    // ==================== Correction Map Tests ====================

    #[test]
    fn test_resolve_with_and_without_override() {
        let map = UrlCorrectionMap::new(BTreeMap::from([(
            "/old/path".to_string(),
            "/new/path".to_string(),
        )]));

        assert_eq!(map.resolve("/old/path"), "/new/path");
        assert_eq!(map.resolve("/untouched"), "/untouched");
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let map = UrlCorrectionMap::load(&dir.path().join("missing.json")).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_load_json_object() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("corrections.json");
        std::fs::write(&path, r#"{"/a": "/b", "/c": "/d"}"#).unwrap();

        let map = UrlCorrectionMap::load(&path).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.resolve("/c"), "/d");
    }

    #[test]
    fn test_load_invalid_json_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("corrections.json");
        std::fs::write(&path, "[1, 2").unwrap();

        assert!(matches!(
            UrlCorrectionMap::load(&path),
            Err(DocsError::Json(_))
        ));
    }

    // ==================== Properties ====================

    proptest! {
        #[test]
        fn prop_key_is_rooted_and_separator_free(
            segments in proptest::collection::vec("[a-z0-9_-]{1,8}", 1..5)
        ) {
            let root = PathBuf::from("docs");
            let mut path = root.clone();
            for segment in &segments {
                path.push(segment);
            }
            path.set_extension("mdx");

            let key = url_key_from_path(&path, &root).unwrap();
            prop_assert!(key.starts_with('/'));
            prop_assert!(!key.contains('\\'));
            prop_assert!(!key.contains("//"));
            prop_assert_eq!(url_key_from_path(&path, &root).unwrap(), key);
        }

        #[test]
        fn prop_index_leaf_collapses_to_parent(
            segments in proptest::collection::vec("[a-z]{1,8}", 0..4)
        ) {
            let root = PathBuf::from("docs");
            let mut dir = root.clone();
            for segment in &segments {
                dir.push(segment);
            }

            let key = url_key_from_path(&dir.join("index.mdx"), &root).unwrap();
            prop_assert_eq!(key, format!("/{}", segments.join("/")));
        }
    }
}
