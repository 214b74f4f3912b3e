//! Site languages.
//!
//! - `registry`: the static list of languages and their directories/locales
//! - `language`: copyable `Language` handle validated against the registry

mod language;
mod registry;

pub use language::Language;
pub use registry::{LanguageConfig, LanguageRegistry};
