//! Download the Contentful-hosted images referenced from the MDX sources
//!
//! Usage:
//!   cargo run --bin download-images
//!
//! Optional environment variables:
//! - DOCS_SOURCE_DIR (defaults to docs)
//! - IMAGES_DIR (defaults to images)

use anyhow::{Context, Result};
use mdx_docs_tools::config::Config;
use mdx_docs_tools::images::{download_all, find_image_urls};
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("download_images=info".parse()?)
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

    let urls = find_image_urls(&config.source_dir);
    if urls.is_empty() {
        info!("No Contentful image URLs found");
        return Ok(());
    }
    info!("Found {} unique image URLs", urls.len());

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .context("Failed to build HTTP client")?;

    let summary = download_all(&client, &urls, &config.images_dir).await;

    info!(
        "Download complete: {} total, {} downloaded, {} failed",
        summary.total, summary.downloaded, summary.failed
    );
    Ok(())
}
