use std::path::PathBuf;

/// Filesystem locations shared by the maintenance scripts.
///
/// Every value has a default so the scripts can run from a checkout with no
/// environment set; a `.env` file is loaded by each binary before this is read.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the English MDX sources (translated dirs live below it)
    pub source_dir: PathBuf,

    /// JSON translation table: URL key -> { title, content } per language
    pub translations_file: PathBuf,

    /// Optional JSON map of file-derived URL key -> canonical URL key
    pub url_corrections_file: PathBuf,

    /// Large content export (JSON array of entries)
    pub entity_export_file: PathBuf,

    /// Where downloaded images are stored
    pub images_dir: PathBuf,

    /// CSV output of the tooltip extractor
    pub tooltips_output: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            source_dir: env_path("DOCS_SOURCE_DIR", "docs"),
            translations_file: env_path("TRANSLATIONS_FILE", "page_translations.json"),
            url_corrections_file: env_path("URL_CORRECTIONS_FILE", "url_corrections.json"),
            entity_export_file: env_path("ENTITY_EXPORT_FILE", "contentful_export.json"),
            images_dir: env_path("IMAGES_DIR", "images"),
            tooltips_output: env_path("TOOLTIPS_OUTPUT", "tooltips_export.csv"),
        }
    }
}

fn env_path(key: &str, default: &str) -> PathBuf {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
        .into()
}
