//! Build the translation table from a large content entity export
//!
//! Usage:
//!   cargo run --bin export-table
//!
//! Optional environment variables:
//! - ENTITY_EXPORT_FILE (defaults to contentful_export.json)
//! - TRANSLATIONS_FILE (defaults to page_translations.json, overwritten)

use anyhow::{Context, Result};
use mdx_docs_tools::config::Config;
use mdx_docs_tools::export::{build_table, EntryIndex, ExportOptions};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("export_table=info".parse()?)
                .add_directive("mdx_docs_tools=info".parse()?),
        )
        .init();

    let config = Config::from_env();
    let export_path = &config.entity_export_file;

    info!("Streaming entity export '{}'", export_path.display());
    let index = match EntryIndex::load(export_path) {
        Ok(index) => index,
        Err(e) if e.is_not_found() => {
            error!("Entity export not found at '{}'", export_path.display());
            return Ok(());
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to read entity export '{}'", export_path.display()))
        }
    };

    let table = build_table(&index, &ExportOptions::default());
    table
        .save(&config.translations_file)
        .with_context(|| {
            format!(
                "Failed to write translation table '{}'",
                config.translations_file.display()
            )
        })?;

    info!(
        "Wrote {} pages to '{}'",
        table.len(),
        config.translations_file.display()
    );
    Ok(())
}
