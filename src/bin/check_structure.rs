//! Flag translated pages whose structure (headings, tables, code blocks,
//! list items) drifted from the English source
//!
//! Usage:
//!   cargo run --bin check-structure

use anyhow::Result;
use mdx_docs_tools::config::Config;
use mdx_docs_tools::structure::{check_tree, render_report};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("check_structure=info".parse()?)
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

    info!("Checking translated structure under '{}'", config.source_dir.display());
    let issues = check_tree(&config.source_dir);

    print!("{}", render_report(&issues));
    Ok(())
}
