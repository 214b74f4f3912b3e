//! Suggest URL corrections by matching each English page's title against the
//! English titles in the translation table
//!
//! Usage:
//!   cargo run --bin suggest-mapping > suggestions.json
//!
//! The printed object uses the URL corrections file format, so it can be
//! reviewed and merged into URL_CORRECTIONS_FILE.

use anyhow::{Context, Result};
use mdx_docs_tools::config::Config;
use mdx_docs_tools::docs::english_sources;
use mdx_docs_tools::suggest::{render_mapping_literal, suggest_corrections, TitleIndex};
use mdx_docs_tools::table::TranslationTable;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("suggest_mapping=info".parse()?)
                .add_directive("mdx_docs_tools=info".parse()?),
        )
        .init();

    let config = Config::from_env();

    let table = match TranslationTable::load(&config.translations_file) {
        Ok(table) => table,
        Err(e) if e.is_not_found() => {
            error!(
                "Translation table not found at '{}'",
                config.translations_file.display()
            );
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to load translation table"),
    };

    let index = TitleIndex::build(&table);
    info!("Indexed {} English titles", index.len());

    let files = english_sources(&config.source_dir);
    let suggestions = suggest_corrections(&config.source_dir, &files, &index);

    info!(
        "Titles matched: {}, not matched: {}, corrections suggested: {}",
        suggestions.found,
        suggestions.not_found,
        suggestions.corrections.len()
    );
    println!("{}", render_mapping_literal(&suggestions.corrections));
    Ok(())
}
