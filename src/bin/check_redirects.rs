//! Check whether links reported as broken now redirect to a live page
//!
//! Usage:
//!   cargo run --bin check-redirects
//!   cargo run --bin check-redirects -- --broken-file broken.mdx --timeout 20 --output out/report
//!
//! Reads a broken-link report (a `.mdx` path line followed by `⎿ <link>`
//! lines) and writes `<output>_<timestamp>.json`, `<output>_<timestamp>.csv`
//! and `<output>_summary_<timestamp>.txt`. Ctrl-C stops the run early and
//! still writes the reports for the links checked so far.

use anyhow::{Context, Result};
use clap::Parser;
use mdx_docs_tools::redirects::{
    parse_broken_report, report_timestamp, write_reports, RedirectChecker,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(about = "Check for redirects on broken documentation links")]
struct Args {
    /// Base URL for the documentation site
    #[arg(long, default_value = "https://auth0.com")]
    base_url: String,

    /// Path to the broken-link report
    #[arg(long, default_value = "broken.mdx")]
    broken_file: PathBuf,

    /// Run without a visible browser (default)
    #[arg(long, overrides_with = "no_headless")]
    headless: bool,

    /// Run with a visible browser
    #[arg(long, overrides_with = "headless")]
    no_headless: bool,

    /// Timeout for page loads in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Output file prefix
    #[arg(long, default_value = "redirect_report")]
    output: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("check_redirects=info".parse()?)
                .add_directive("mdx_docs_tools=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let headless = args.headless || !args.no_headless;

    info!("Starting documentation redirect checker");
    info!("Base URL: {}", args.base_url);
    info!("Broken file: {}", args.broken_file.display());
    info!("Headless mode: {}", headless);

    let text = match std::fs::read_to_string(&args.broken_file) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            error!("Could not find file {}", args.broken_file.display());
            return Ok(());
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to read {}", args.broken_file.display()))
        }
    };

    let pages = parse_broken_report(&text);
    if pages.is_empty() {
        warn!("No data found in {}", args.broken_file.display());
        return Ok(());
    }
    info!("Found {} pages with broken links", pages.len());

    let checker = RedirectChecker::new(&args.base_url, Duration::from_secs(args.timeout))?;
    let mut results = Vec::new();

    let interrupted = tokio::select! {
        _ = checker.check_pages(&pages, &mut results) => false,
        _ = tokio::signal::ctrl_c() => true,
    };
    if interrupted {
        warn!(
            "Interrupted by user; writing reports for {} checked links",
            results.len()
        );
    }

    let paths = write_reports(&results, &args.output, &report_timestamp())?;
    info!("Reports generated:");
    info!("  JSON: {}", paths.json.display());
    info!("  CSV: {}", paths.csv.display());
    info!("  Summary: {}", paths.summary.display());

    if !interrupted {
        info!("Redirect checking complete!");
    }
    Ok(())
}
