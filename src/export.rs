//! Translation table built from a large content entity export.
//!
//! The export is a JSON array of entries shaped like
//! `{"sys": {"id", "contentType": {"sys": {"id"}}}, "fields": {name: {locale: value}}}`.
//! It is streamed one entry at a time into an [`EntryIndex`], so the raw
//! array is never held in memory alongside the index.

use crate::error::DocsError;
use crate::i18n::LanguageRegistry;
use crate::table::{PageRecord, TranslationTable};
use indexmap::IndexMap;
use serde::de::{Deserializer as _, SeqAccess, Visitor};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Deserialize)]
struct RawLink {
    sys: RawLinkSys,
}

#[derive(Debug, Deserialize)]
struct RawLinkSys {
    id: String,
}

#[derive(Debug, Deserialize)]
struct RawSys {
    id: String,
    #[serde(rename = "contentType")]
    content_type: Option<RawLink>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    sys: RawSys,
    #[serde(default)]
    fields: Map<String, Value>,
}

/// One exported entry with its localized fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: String,
    pub content_type: String,
    pub fields: Map<String, Value>,
}

impl From<RawEntry> for Entry {
    fn from(raw: RawEntry) -> Self {
        Self {
            id: raw.sys.id,
            content_type: raw
                .sys
                .content_type
                .map(|link| link.sys.id)
                .unwrap_or_default(),
            fields: raw.fields,
        }
    }
}

impl Entry {
    fn localized(&self, name: &str, locale: &str) -> Option<&Value> {
        self.fields.get(name)?.get(locale)
    }

    /// Non-empty string value of `name` in exactly `locale`.
    pub fn text(&self, name: &str, locale: &str) -> Option<&str> {
        self.localized(name, locale)
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
    }

    /// String value of `name` in `locale`, falling back to `canonical`.
    pub fn field_text(&self, name: &str, locale: &str, canonical: &str) -> Option<&str> {
        self.text(name, locale).or_else(|| self.text(name, canonical))
    }

    /// Target id of a `{"sys": {"id": ...}}` link field.
    pub fn link_id(&self, name: &str, locale: &str) -> Option<&str> {
        self.localized(name, locale)?
            .get("sys")?
            .get("id")?
            .as_str()
    }
}

/// Exported entries by id, in export order.
#[derive(Debug, Default)]
pub struct EntryIndex {
    entries: IndexMap<String, Entry>,
}

struct IndexVisitor;

impl<'de> Visitor<'de> for IndexVisitor {
    type Value = EntryIndex;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an array of exported entries")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut index = EntryIndex::default();
        while let Some(raw) = seq.next_element::<RawEntry>()? {
            index.insert(raw.into());
        }
        Ok(index)
    }
}

impl EntryIndex {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DocsError> {
        let mut de = serde_json::Deserializer::from_reader(reader);
        let index = (&mut de).deserialize_seq(IndexVisitor)?;
        de.end()?;
        Ok(index)
    }

    pub fn load(path: &Path) -> Result<Self, DocsError> {
        let file = File::open(path).map_err(|e| DocsError::io(path, e))?;
        let index = Self::from_reader(BufReader::new(file))?;
        info!("Indexed {} entries from '{}'", index.len(), path.display());
        Ok(index)
    }

    /// Later duplicates replace earlier ones but keep the first position.
    pub fn insert(&mut self, entry: Entry) {
        if let Some(previous) = self.entries.insert(entry.id.clone(), entry) {
            debug!("Duplicate entry id '{}' in export", previous.id);
        }
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.get(id)
    }

    /// Entries of one content type, in export order.
    pub fn of_type(&self, content_type: &str) -> Vec<&Entry> {
        self.entries
            .values()
            .filter(|entry| entry.content_type == content_type)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolves entry ids to URL keys by walking the parent chain.
///
/// Resolved paths are cached for the lifetime of the resolver, so each
/// ancestor is visited once per run.
pub struct PathResolver<'a> {
    index: &'a EntryIndex,
    slug_field: &'a str,
    parent_field: &'a str,
    locale: &'a str,
    canonical: &'static str,
    cache: HashMap<String, String>,
}

impl<'a> PathResolver<'a> {
    pub fn new(index: &'a EntryIndex, options: &'a ExportOptions) -> Self {
        Self {
            index,
            slug_field: &options.slug_field,
            parent_field: &options.parent_field,
            locale: &options.path_locale,
            canonical: LanguageRegistry::get().canonical().locale,
            cache: HashMap::new(),
        }
    }

    pub fn resolve(&mut self, id: &str) -> Result<String, DocsError> {
        let mut visiting = HashSet::new();
        self.resolve_inner(id, &mut visiting)
    }

    fn resolve_inner(
        &mut self,
        id: &str,
        visiting: &mut HashSet<String>,
    ) -> Result<String, DocsError> {
        if let Some(path) = self.cache.get(id) {
            return Ok(path.clone());
        }
        if !visiting.insert(id.to_string()) {
            return Err(DocsError::CyclicParent(id.to_string()));
        }

        let index = self.index;
        let entry = index
            .get(id)
            .ok_or_else(|| DocsError::UnknownEntry(id.to_string()))?;

        let slug = entry
            .field_text(self.slug_field, self.locale, self.canonical)
            .unwrap_or("")
            .trim_matches('/');
        let parent_id = entry
            .link_id(self.parent_field, self.locale)
            .or_else(|| entry.link_id(self.parent_field, self.canonical));
        let parent_path = match parent_id {
            Some(parent_id) => self.resolve_inner(parent_id, visiting)?,
            None => String::new(),
        };

        let path = match (parent_path.trim_end_matches('/'), slug) {
            ("", "") => "/".to_string(),
            (parent, "") => parent.to_string(),
            (parent, slug) => format!("{}/{}", parent, slug),
        };

        self.cache.insert(id.to_string(), path.clone());
        Ok(path)
    }
}

/// Field names used to build the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub content_type: String,
    pub slug_field: String,
    pub parent_field: String,
    pub title_field: String,
    pub content_field: String,
    /// Locale whose slugs and parent links build URL keys. Fields missing in
    /// it are read from the canonical locale.
    pub path_locale: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            content_type: "page".to_string(),
            slug_field: "slug".to_string(),
            parent_field: "parent".to_string(),
            title_field: "title".to_string(),
            content_field: "content".to_string(),
            path_locale: LanguageRegistry::get().canonical().locale.to_string(),
        }
    }
}

/// One table record per entry of the configured content type. Entries whose
/// path cannot be resolved are logged and left out.
pub fn build_table(index: &EntryIndex, options: &ExportOptions) -> TranslationTable {
    let languages = LanguageRegistry::get().list_all();
    let mut resolver = PathResolver::new(index, options);
    let mut table = TranslationTable::new();
    let mut skipped = 0;

    for entry in index.of_type(&options.content_type) {
        let url_key = match resolver.resolve(&entry.id) {
            Ok(key) => key,
            Err(e) => {
                warn!("Skipping entry '{}': {}", entry.id, e);
                skipped += 1;
                continue;
            }
        };

        let mut record = PageRecord::default();
        for lang in &languages {
            if let Some(title) = entry.text(&options.title_field, lang.locale) {
                record.title.insert(lang.code, title);
            }
            if let Some(content) = entry.text(&options.content_field, lang.locale) {
                record.content.insert(lang.code, content);
            }
        }

        if table.get(&url_key).is_some() {
            warn!("Entry '{}' resolves to duplicate key {}", entry.id, url_key);
        }
        table.insert(url_key, record);
    }

    info!(
        "Built translation table: {} pages, {} skipped",
        table.len(),
        skipped
    );
    table
}
