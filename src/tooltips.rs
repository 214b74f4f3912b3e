//! `<Tooltip>` extraction into a spreadsheet for glossary review.

use crate::csv::CsvWriter;
use crate::docs::markdown_files;
use regex::Regex;
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;
use std::sync::OnceLock;
use tracing::warn;

static TOOLTIP_REGEX: OnceLock<Regex> = OnceLock::new();

fn tooltip_regex() -> &'static Regex {
    TOOLTIP_REGEX.get_or_init(|| {
        Regex::new(
            r#"(?s)<Tooltip\s+[^>]*tip=["']([^"']+)["'](?:\s+[^>]*href=["']([^"']+)["'])?[^>]*>(.*?)</Tooltip>"#,
        )
        .unwrap()
    })
}

pub const CSV_HEADER: [&str; 4] = ["Word", "Tooltip Tip", "Glossary Link", "File Name"];

/// Placeholder for tooltips without an `href`.
const NO_LINK: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TooltipRow {
    pub word: String,
    pub tip: String,
    pub glossary_link: String,
    pub file_name: String,
}

/// Tooltips in one file's text, in document order.
pub fn extract_from_text(content: &str, file_name: &str) -> Vec<TooltipRow> {
    tooltip_regex()
        .captures_iter(content)
        .map(|caps| TooltipRow {
            word: caps.get(3).map_or("", |m| m.as_str()).trim().to_string(),
            tip: caps.get(1).map_or("", |m| m.as_str()).trim().to_string(),
            glossary_link: caps
                .get(2)
                .map(|m| m.as_str().trim())
                .filter(|href| !href.is_empty())
                .unwrap_or(NO_LINK)
                .to_string(),
            file_name: file_name.to_string(),
        })
        .collect()
}

/// Tooltips in every `.md`/`.mdx` file under `root`; file names are relative
/// to `root`. Unreadable files are skipped with a warning.
pub fn extract_tooltips(root: &Path) -> Vec<TooltipRow> {
    let mut rows = Vec::new();

    for path in markdown_files(root) {
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };
        let relative = path.strip_prefix(root).unwrap_or(&path);
        rows.extend(extract_from_text(&content, &relative.to_string_lossy()));
    }

    rows
}

pub fn write_csv<W: Write>(rows: &[TooltipRow], out: W) -> io::Result<()> {
    let mut writer = CsvWriter::new(out);
    writer.write_record(&CSV_HEADER)?;
    for row in rows {
        writer.write_record(&[
            row.word.as_str(),
            row.tip.as_str(),
            row.glossary_link.as_str(),
            row.file_name.as_str(),
        ])?;
    }
    writer.flush()
}
