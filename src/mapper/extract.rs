//! Line-oriented snippet extraction from Markdown/MDX text.
//!
//! This is a pattern scan, not a parser. Alignment between an English and a
//! translated body depends on both yielding the same number of snippets in
//! the same order, so the pattern set below must stay stable.

use regex::Regex;
use std::sync::OnceLock;

static CODE_FENCE_REGEX: OnceLock<Regex> = OnceLock::new();
static BARE_URL_REGEX: OnceLock<Regex> = OnceLock::new();
static SNIPPET_REGEX: OnceLock<Regex> = OnceLock::new();

fn code_fence_regex() -> &'static Regex {
    CODE_FENCE_REGEX.get_or_init(|| Regex::new(r"(?s)```.*?```").unwrap())
}

fn bare_url_regex() -> &'static Regex {
    BARE_URL_REGEX.get_or_init(|| Regex::new(r"https?://[^\s)]+").unwrap())
}

/// One alternation, tried left to right at each position:
/// 1. heading text after `#`s
/// 2. list item text after `*` or `-`
/// 3. text between `>` and the next `<` on the same line
/// 4. a line of at least 10 characters not opening with `<`, a backtick,
///    whitespace, `-`, `|`, `[` or a digit
fn snippet_regex() -> &'static Regex {
    SNIPPET_REGEX.get_or_init(|| {
        Regex::new(concat!(
            r"(?m)",
            r"^#+\s+(.*)",
            r"|^\s*[*\-]\s+(.*)",
            r"|>\s*([^<\n]+?)\s*<",
            r"|^([^<`\s\-|\[\d].{9,})",
        ))
        .unwrap()
    })
}

/// Ordered translatable snippets of `markdown`.
///
/// Fenced code blocks and bare URLs are removed first. Each match contributes
/// its first participating group, trimmed; blank matches are dropped.
pub fn extract_snippets(markdown: &str) -> Vec<String> {
    if markdown.is_empty() {
        return Vec::new();
    }

    let without_code = code_fence_regex().replace_all(markdown, "");
    let without_urls = bare_url_regex().replace_all(&without_code, "");

    snippet_regex()
        .captures_iter(&without_urls)
        .filter_map(|caps| caps.iter().skip(1).flatten().next())
        .map(|m| m.as_str().trim())
        .filter(|snippet| !snippet.is_empty())
        .map(str::to_string)
        .collect()
}
