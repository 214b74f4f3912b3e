//! Language type: validated handle onto a registry entry.

use crate::i18n::{LanguageConfig, LanguageRegistry};

/// A language known to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    code: &'static str,
}

impl Language {
    pub const ENGLISH: Language = Language { code: "en" };
    pub const FRENCH: Language = Language { code: "fr" };
    pub const JAPANESE: Language = Language { code: "ja" };

    /// The canonical (source) language.
    pub fn canonical() -> Language {
        Language {
            code: LanguageRegistry::get().canonical().code,
        }
    }

    /// Every translation target, in registry order.
    pub fn targets() -> Vec<Language> {
        LanguageRegistry::get()
            .targets()
            .into_iter()
            .map(|config| Language { code: config.code })
            .collect()
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Full configuration from the registry.
    ///
    /// # Panics
    /// Panics if the code is not in the registry, which cannot happen for a
    /// Language built from the registry or the constants.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Directory under the docs root for this language's pages.
    pub fn output_dir(&self) -> &'static str {
        self.config().output_dir
    }
}
