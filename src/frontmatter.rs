//! MDX documents: a YAML front-matter header followed by a body.

use crate::error::DocsError;
use regex::Regex;
use serde_norway::{Mapping, Value};
use std::path::Path;
use std::sync::OnceLock;

static BOUNDARY_REGEX: OnceLock<Regex> = OnceLock::new();

fn boundary_regex() -> &'static Regex {
    BOUNDARY_REGEX.get_or_init(|| Regex::new(r"(?m)^-{3,}\s*$").unwrap())
}

/// A parsed document. The header keeps its key order across a rewrite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub metadata: Mapping,
    pub content: String,
}

impl Document {
    pub fn new(metadata: Mapping, content: impl Into<String>) -> Self {
        Self {
            metadata,
            content: content.into(),
        }
    }

    /// Split `text` into header and body.
    ///
    /// Text that does not open with a `---` line, or has no closing boundary,
    /// is all body. A header that is valid YAML but not a mapping is dropped.
    pub fn parse(text: &str) -> Result<Self, DocsError> {
        let text = text.trim();
        let boundary = boundary_regex();

        let opens_with_boundary = boundary.find(text).is_some_and(|m| m.start() == 0);
        if !opens_with_boundary {
            return Ok(Self::new(Mapping::new(), text));
        }

        let parts: Vec<&str> = boundary.splitn(text, 3).collect();
        let [_, header, body] = parts.as_slice() else {
            return Ok(Self::new(Mapping::new(), text));
        };

        let metadata = match serde_norway::from_str::<Value>(header)
            .map_err(|e| DocsError::FrontMatter(e.to_string()))?
        {
            Value::Mapping(mapping) => mapping,
            _ => Mapping::new(),
        };

        Ok(Self::new(metadata, body.trim()))
    }

    pub fn load(path: &Path) -> Result<Self, DocsError> {
        let raw = std::fs::read_to_string(path).map_err(|e| DocsError::io(path, e))?;
        Self::parse(&raw)
    }

    /// Serialize back to `---` / header / `---` / blank line / body.
    pub fn render(&self) -> Result<String, DocsError> {
        if self.metadata.is_empty() {
            return Ok(self.content.clone());
        }

        let header = serde_norway::to_string(&self.metadata)?;
        Ok(format!("---\n{}\n---\n\n{}", header.trim_end(), self.content))
    }

    /// Write the rendered document, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), DocsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DocsError::io(parent, e))?;
        }
        let rendered = self.render()?;
        std::fs::write(path, rendered).map_err(|e| DocsError::io(path, e))
    }

    /// The `title` header field, when it is a string.
    pub fn title(&self) -> Option<&str> {
        self.metadata.get("title").and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_header_and_body() {
        let doc = Document::parse("---\ntitle: Hello\nsidebarTitle: Hi\n---\n\n# Body\n").unwrap();

        assert_eq!(doc.title(), Some("Hello"));
        assert_eq!(
            doc.metadata.get("sidebarTitle").and_then(Value::as_str),
            Some("Hi")
        );
        assert_eq!(doc.content, "# Body");
    }

    #[test]
    fn test_parse_without_header() {
        let doc = Document::parse("\n# Just a body\n\nText.\n").unwrap();

        assert!(doc.metadata.is_empty());
        assert_eq!(doc.content, "# Just a body\n\nText.");
    }

    #[test]
    fn test_parse_unterminated_header_is_body() {
        let doc = Document::parse("---\ntitle: x\n").unwrap();
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.content, "---\ntitle: x");
    }

    #[test]
    fn test_parse_keeps_horizontal_rules_in_body() {
        let doc = Document::parse("---\ntitle: T\n---\nabove\n\n---\n\nbelow").unwrap();
        assert_eq!(doc.content, "above\n\n---\n\nbelow");
    }

    #[test]
    fn test_parse_non_mapping_header_is_dropped() {
        let doc = Document::parse("---\n- a\n- b\n---\nbody").unwrap();
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.content, "body");
    }

    #[test]
    fn test_parse_invalid_yaml_errors() {
        let err = Document::parse("---\ntitle: [unclosed\n---\nbody").unwrap_err();
        assert!(matches!(err, DocsError::FrontMatter(_)));
    }

    #[test]
    fn test_render_preserves_key_order() {
        let doc = Document::parse("---\nzeta: 1\ntitle: T\nalpha: a\n---\nbody").unwrap();
        let rendered = doc.render().unwrap();

        let zeta = rendered.find("zeta").unwrap();
        let title = rendered.find("title").unwrap();
        let alpha = rendered.find("alpha").unwrap();
        assert!(zeta < title && title < alpha);
        assert!(rendered.starts_with("---\n"));
        assert!(rendered.ends_with("---\n\nbody"));
    }

    #[test]
    fn test_render_without_metadata_is_body() {
        let doc = Document::new(Mapping::new(), "plain");
        assert_eq!(doc.render().unwrap(), "plain");
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/dir/page.mdx");

        let original = Document::parse("---\ntitle: Saved\n---\n\nSome body text.").unwrap();
        original.save(&path).unwrap();

        let loaded = Document::load(&path).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Document::load(&dir.path().join("missing.mdx")).unwrap_err();
        assert!(err.is_not_found());
    }
}
