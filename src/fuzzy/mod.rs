//! Fuzzy key search, used only when fuzzy matching is switched on.

pub mod distance;
pub mod symspell;

pub use distance::{fuzzy_allowed, levenshtein};
pub use symspell::SymSpell;
