use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the document and translation-table primitives.
///
/// Binaries wrap these in `anyhow` with extra context; library callers can
/// match on the variant to decide whether an item should be skipped.
#[derive(Debug, Error)]
pub enum DocsError {
    #[error("path '{path}' is not under root '{root}'")]
    InvalidPath { path: PathBuf, root: PathBuf },
    #[error("invalid front-matter: {0}")]
    FrontMatter(String),
    #[error("entry '{0}' has a cyclic parent chain")]
    CyclicParent(String),
    #[error("entry '{0}' is not present in the export")]
    UnknownEntry(String),
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Yaml(#[from] serde_norway::Error),
}

impl DocsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the underlying cause is a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}
