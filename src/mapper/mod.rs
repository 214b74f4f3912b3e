//! Heuristic snippet translation mapper.
//!
//! English and translated bodies from the translation table are reduced to
//! ordered snippet lists (`extract`), paired by position (`align`), and the
//! pairs are applied to the English MDX source (`substitute`).
//!
//! ```rust,ignore
//! let map = build_translation_map(english_body, french_body);
//! let translated = apply_translations(&source_mdx, &map);
//! ```

mod align;
mod extract;
mod substitute;

pub use align::{align_snippets, build_translation_map, AlignmentReport, TranslationMap};
pub use extract::extract_snippets;
pub use substitute::apply_translations;
