//! Language registry: Single source of truth for the site's languages.
//!
//! Each entry ties together the short code used as a key in the translation
//! table, the locale used by the content export, and the directory (under the
//! docs root) where translated copies of English pages are written.

use std::sync::OnceLock;

/// Configuration for a site language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// Short language code used in the translation table (e.g., "en", "fr")
    pub code: &'static str,

    /// English name of the language (e.g., "French")
    pub name: &'static str,

    /// Locale code used by the content export (e.g., "fr-CA")
    pub locale: &'static str,

    /// Directory under the docs root holding this language's pages.
    /// Empty for the canonical language, whose pages live at the root.
    pub output_dir: &'static str,

    /// Whether this is the canonical/source language (only one should be true)
    pub is_canonical: bool,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Languages that English pages are translated into, in registry order.
    pub fn targets(&self) -> Vec<&LanguageConfig> {
        self.languages
            .iter()
            .filter(|lang| !lang.is_canonical)
            .collect()
    }

    /// All languages (canonical first).
    pub fn list_all(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }

    /// The canonical language configuration.
    ///
    /// # Panics
    /// Panics if the registry does not define exactly one canonical language.
    pub fn canonical(&self) -> &LanguageConfig {
        let canonical_langs: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_canonical)
            .collect();

        match canonical_langs.as_slice() {
            [single] => single,
            [] => panic!("No canonical language found in registry"),
            _ => panic!("Multiple canonical languages found in registry"),
        }
    }

    /// Directory names that hold translated pages. English source scans skip
    /// any path passing through one of these.
    pub fn translated_dirs(&self) -> Vec<&'static str> {
        self.targets().iter().map(|lang| lang.output_dir).collect()
    }
}

fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "en",
            name: "English",
            locale: "en-US",
            output_dir: "",
            is_canonical: true,
        },
        LanguageConfig {
            code: "fr",
            name: "French",
            locale: "fr-CA",
            output_dir: "fr-ca",
            is_canonical: false,
        },
        LanguageConfig {
            code: "ja",
            name: "Japanese",
            locale: "ja-JP",
            output_dir: "ja-jp",
            is_canonical: false,
        },
    ]
}
