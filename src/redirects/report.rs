//! Broken-link report parsing and redirect report output.

use super::{LinkCheck, LinkStatus};
use crate::csv::CsvWriter;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

/// Prefix marking a broken link under its page in the input report.
const LINK_MARKER: char = '⎿';

/// A page and the broken links reported on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenPage {
    pub mdx_file: String,
    pub broken_links: Vec<String>,
}

/// Parse a broken-link report. A line ending in `.mdx` starts a page and
/// `⎿`-prefixed lines below it are its links. Other lines are ignored, as
/// are pages without links.
pub fn parse_broken_report(text: &str) -> Vec<BrokenPage> {
    let mut pages = Vec::new();
    let mut current: Option<BrokenPage> = None;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if line.ends_with(".mdx") {
            pages.extend(current.take().filter(|p| !p.broken_links.is_empty()));
            current = Some(BrokenPage {
                mdx_file: line.to_string(),
                broken_links: Vec::new(),
            });
        } else if let Some(link) = line.strip_prefix(LINK_MARKER) {
            let link = link.trim();
            if link.is_empty() {
                continue;
            }
            if let Some(page) = current.as_mut() {
                page.broken_links.push(link.to_string());
            }
        }
    }
    pages.extend(current.filter(|p| !p.broken_links.is_empty()));

    pages
}

/// Live URL of a documentation page: `docs/a/b.mdx` -> `<base>/docs/a/b`.
pub fn page_url(base_url: &str, mdx_path: &str) -> String {
    let path = mdx_path.strip_suffix(".mdx").unwrap_or(mdx_path);
    let path = path.strip_prefix("docs/").unwrap_or(path);
    format!("{}/docs/{}", base_url.trim_end_matches('/'), path)
}

/// `%Y%m%d_%H%M%S` in local time, as used in report file names.
pub fn report_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Files written by [`write_reports`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub json: PathBuf,
    pub csv: PathBuf,
    pub summary: PathBuf,
}

pub fn write_reports(results: &[LinkCheck], prefix: &str, timestamp: &str) -> Result<ReportPaths> {
    let paths = ReportPaths {
        json: PathBuf::from(format!("{}_{}.json", prefix, timestamp)),
        csv: PathBuf::from(format!("{}_{}.csv", prefix, timestamp)),
        summary: PathBuf::from(format!("{}_summary_{}.txt", prefix, timestamp)),
    };

    let json = serde_json::to_string_pretty(results).context("Failed to serialize results")?;
    std::fs::write(&paths.json, json)
        .with_context(|| format!("Failed to write {}", paths.json.display()))?;

    let file = File::create(&paths.csv)
        .with_context(|| format!("Failed to create {}", paths.csv.display()))?;
    write_csv(results, BufWriter::new(file))
        .with_context(|| format!("Failed to write {}", paths.csv.display()))?;

    std::fs::write(&paths.summary, render_summary(results))
        .with_context(|| format!("Failed to write {}", paths.summary.display()))?;

    Ok(paths)
}

const CSV_HEADER: [&str; 6] = [
    "page_url",
    "original_link",
    "final_url",
    "redirect_detected",
    "status",
    "error",
];

pub fn write_csv<W: std::io::Write>(results: &[LinkCheck], out: W) -> std::io::Result<()> {
    let mut writer = CsvWriter::new(out);
    writer.write_record(&CSV_HEADER)?;
    for check in results {
        writer.write_record(&[
            check.page_url.as_str(),
            check.original_link.as_str(),
            check.final_url.as_deref().unwrap_or(""),
            if check.redirect_detected { "true" } else { "false" },
            check.status.as_str(),
            check.error.as_deref().unwrap_or(""),
        ])?;
    }
    writer.flush()
}

/// Status labels with their counts, in order of first appearance.
fn status_counts(results: &[LinkCheck]) -> Vec<(LinkStatus, usize)> {
    let mut counts: Vec<(LinkStatus, usize)> = Vec::new();
    for check in results {
        match counts.iter_mut().find(|(status, _)| *status == check.status) {
            Some((_, count)) => *count += 1,
            None => counts.push((check.status, 1)),
        }
    }
    counts
}

pub fn render_summary(results: &[LinkCheck]) -> String {
    let total = results.len();
    let redirects = results.iter().filter(|c| c.redirect_detected).count();
    let rate = if total == 0 {
        0.0
    } else {
        redirects as f64 / total as f64 * 100.0
    };

    let mut out = String::new();
    out.push_str("Documentation Redirect Report\n");
    out.push_str(&"=".repeat(40));
    out.push_str("\n\n");
    out.push_str(&format!("Total broken links checked: {}\n", total));
    out.push_str(&format!("Redirects found: {}\n", redirects));
    out.push_str(&format!("Success rate: {:.1}%\n\n", rate));

    out.push_str("Status Summary:\n");
    for (status, count) in status_counts(results) {
        out.push_str(&format!("  {}: {}\n", status, count));
    }

    out.push_str("\nRedirects Found:\n");
    out.push_str(&"-".repeat(20));
    out.push('\n');
    for check in results.iter().filter(|c| c.redirect_detected) {
        out.push_str(&format!(
            "Page: {}\n  {} -> {}\n\n",
            check.page_url,
            check.original_link,
            check.final_url.as_deref().unwrap_or("")
        ));
    }

    out
}
