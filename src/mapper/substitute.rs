//! Longest-first, whitespace-bounded snippet substitution.

use super::align::TranslationMap;
use regex::Regex;
use std::cmp::Reverse;
use tracing::debug;

/// Replace every whole occurrence of each mapped source snippet in `body`.
///
/// Snippets are applied longest first (by character count; ties keep map
/// order) so a short snippet never rewrites part of a longer one before the
/// longer one is handled. An occurrence counts only when the characters on
/// both sides are whitespace or a text edge. Best effort: repeated or nested
/// text may still be rewritten in places the author did not intend.
pub fn apply_translations(body: &str, map: &TranslationMap) -> String {
    let mut entries: Vec<(&str, &str)> = map
        .iter()
        .filter(|(source, _)| !source.is_empty())
        .collect();
    entries.sort_by_key(|(source, _)| Reverse(source.chars().count()));

    entries
        .into_iter()
        .fold(body.to_string(), |text, (source, target)| {
            replace_whole(&text, source, target)
        })
}

fn replace_whole(text: &str, source: &str, target: &str) -> String {
    match Regex::new(&regex::escape(source)) {
        Ok(pattern) => replace_bounded(text, &pattern, target),
        Err(e) => {
            debug!("Falling back to literal replacement for {:?}: {}", source, e);
            text.replace(source, target)
        }
    }
}

fn replace_bounded(text: &str, pattern: &Regex, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut pos = 0;

    while let Some(m) = pattern.find_at(text, pos) {
        if is_bounded(text, m.start(), m.end()) {
            out.push_str(&text[copied..m.start()]);
            out.push_str(replacement);
            copied = m.end();
            pos = m.end();
        } else {
            // Try again one character further; the next occurrence may overlap.
            pos = m.start() + text[m.start()..].chars().next().map_or(1, char::len_utf8);
        }
    }

    out.push_str(&text[copied..]);
    out
}

fn is_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    before.map_or(true, char::is_whitespace) && after.map_or(true, char::is_whitespace)
}
