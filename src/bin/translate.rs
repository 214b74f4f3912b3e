//! Hybrid translation of English MDX pages into the translated trees
//!
//! Usage:
//!   cargo run --bin translate                                # every English page
//!   cargo run --bin translate -- --file docs/guides/a.mdx    # one page, for debugging
//!   cargo run --bin translate -- --table other.json          # alternate translation table
//!
//! Optional environment variables:
//! - DOCS_SOURCE_DIR (defaults to docs)
//! - TRANSLATIONS_FILE (defaults to page_translations.json)
//! - URL_CORRECTIONS_FILE (defaults to url_corrections.json, may be absent)

use anyhow::{Context, Result};
use clap::Parser;
use mdx_docs_tools::config::Config;
use mdx_docs_tools::docs::english_sources;
use mdx_docs_tools::table::TranslationTable;
use mdx_docs_tools::translate;
use mdx_docs_tools::url_key::UrlCorrectionMap;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(about = "Write translated copies of English MDX pages from the translation table")]
struct Args {
    /// Translate only this English source file
    #[arg(long)]
    file: Option<PathBuf>,

    /// Translation table to use instead of TRANSLATIONS_FILE
    #[arg(long)]
    table: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("translate=info".parse()?)
                .add_directive("mdx_docs_tools=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let config = Config::from_env();
    let table_path = args
        .table
        .unwrap_or_else(|| config.translations_file.clone());

    info!("Starting hybrid translation");

    let table = match TranslationTable::load(&table_path) {
        Ok(table) => table,
        Err(e) if e.is_not_found() => {
            error!("Translation table not found at '{}'", table_path.display());
            return Ok(());
        }
        Err(e) => {
            return Err(e).with_context(|| {
                format!("Failed to load translation table '{}'", table_path.display())
            })
        }
    };

    let corrections = UrlCorrectionMap::load(&config.url_corrections_file).with_context(|| {
        format!(
            "Failed to load URL corrections '{}'",
            config.url_corrections_file.display()
        )
    })?;

    let files = match args.file {
        Some(file) if !file.is_file() => {
            error!("File not found: '{}'", file.display());
            return Ok(());
        }
        Some(file) => {
            info!("Single-file mode: {}", file.display());
            vec![file]
        }
        None if !config.source_dir.is_dir() => {
            error!(
                "Source directory not found: '{}'",
                config.source_dir.display()
            );
            return Ok(());
        }
        None => english_sources(&config.source_dir),
    };
    info!("Found {} English source files", files.len());

    let metrics = translate::run(&config.source_dir, &files, &table, &corrections);

    info!("Translation run complete: {}", metrics.report());
    Ok(())
}
