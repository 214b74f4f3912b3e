//! Maintenance tooling for a multilingual MDX documentation site.
//!
//! The library holds the document, translation-table and link-checking
//! primitives; each script under `src/bin` is a thin batch job over them.

pub mod config;
pub mod csv;
pub mod diagnose;
pub mod docs;
pub mod error;
pub mod export;
pub mod frontmatter;
pub mod i18n;
pub mod images;
pub mod mapper;
pub mod metrics;
pub mod redirects;
pub mod retry;
pub mod structure;
pub mod suggest;
pub mod table;
pub mod translate;
pub mod tooltips;
pub mod url_key;

pub use error::DocsError;
