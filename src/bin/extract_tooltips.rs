//! Export every `<Tooltip>` in the docs to a CSV for glossary review
//!
//! Usage:
//!   cargo run --bin extract-tooltips
//!
//! Optional environment variables:
//! - DOCS_SOURCE_DIR (defaults to docs)
//! - TOOLTIPS_OUTPUT (defaults to tooltips_export.csv)

use anyhow::{Context, Result};
use mdx_docs_tools::config::Config;
use mdx_docs_tools::tooltips::{extract_tooltips, write_csv};
use std::fs::File;
use std::io::BufWriter;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("extract_tooltips=info".parse()?)
                .add_directive("mdx_docs_tools=info".parse()?),
        )
        .init();

    let config = Config::from_env();
    if !config.source_dir.is_dir() {
        error!(
            "Source directory not found: '{}'",
            config.source_dir.display()
        );
        return Ok(());
    }

    let rows = extract_tooltips(&config.source_dir);

    let output = &config.tooltips_output;
    let file = File::create(output)
        .with_context(|| format!("Failed to create '{}'", output.display()))?;
    write_csv(&rows, BufWriter::new(file))
        .with_context(|| format!("Failed to write '{}'", output.display()))?;

    info!("Exported {} tooltips to '{}'", rows.len(), output.display());
    Ok(())
}
