//! Print the URL keys derived from the English sources next to the keys in
//! the translation table, to spot pages the two disagree on.
//!
//! Usage:
//!   cargo run --bin diagnose-urls

use anyhow::{Context, Result};
use mdx_docs_tools::config::Config;
use mdx_docs_tools::diagnose::UrlDiagnosis;
use mdx_docs_tools::docs::english_sources;
use mdx_docs_tools::table::TranslationTable;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("diagnose_urls=info".parse()?)
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

    if !config.source_dir.is_dir() {
        error!(
            "Source directory not found: '{}'",
            config.source_dir.display()
        );
        return Ok(());
    }

    let files = english_sources(&config.source_dir);
    info!("Comparing {} source files against {} table entries", files.len(), table.len());

    let diagnosis = UrlDiagnosis::new(&config.source_dir, &files, &table);
    println!("{}", diagnosis.render());
    Ok(())
}
