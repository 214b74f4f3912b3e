//! The translation table: canonical URL key -> per-language title and body.

use crate::error::DocsError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// Text keyed by language code. Absent, `null` and empty values all read as
/// "no text for this language".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(BTreeMap<String, Option<String>>);

impl LocalizedText {
    pub fn get(&self, lang: &str) -> Option<&str> {
        self.0
            .get(lang)
            .and_then(Option::as_deref)
            .filter(|text| !text.is_empty())
    }

    pub fn insert(&mut self, lang: impl Into<String>, text: impl Into<String>) {
        self.0.insert(lang.into(), Some(text.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|v| v.as_deref().map_or(true, str::is_empty))
    }
}

impl<const N: usize> From<[(&str, &str); N]> for LocalizedText {
    fn from(pairs: [(&str, &str); N]) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(lang, text)| (lang.to_string(), Some(text.to_string())))
                .collect(),
        )
    }
}

/// One page's translations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    #[serde(default)]
    pub title: LocalizedText,
    #[serde(default)]
    pub content: LocalizedText,
}

/// Every page's translations, keyed by canonical URL key, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationTable {
    pages: IndexMap<String, PageRecord>,
}

impl TranslationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self, DocsError> {
        let raw = std::fs::read_to_string(path).map_err(|e| DocsError::io(path, e))?;
        let table: Self = serde_json::from_str(&raw)?;
        info!(
            "Loaded translation table '{}' with {} pages",
            path.display(),
            table.len()
        );
        Ok(table)
    }

    pub fn save(&self, path: &Path) -> Result<(), DocsError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| DocsError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| DocsError::io(path, e))
    }

    pub fn get(&self, url_key: &str) -> Option<&PageRecord> {
        self.pages.get(url_key)
    }

    pub fn insert(&mut self, url_key: impl Into<String>, record: PageRecord) {
        self.pages.insert(url_key.into(), record);
    }

    /// Keys in the order they were loaded or inserted.
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PageRecord)> {
        self.pages.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
