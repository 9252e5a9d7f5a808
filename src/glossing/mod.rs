//! Sentence-level Swedish → STS glossing.

pub mod confidence;
pub mod engine;
pub mod lemmatizer;

pub use confidence::confidence;
pub use engine::{split_sentences, GlossingEngine, NEGATION_GLOSS};
pub use lemmatizer::Lemmatizer;
