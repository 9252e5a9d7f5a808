pub mod cache;
pub mod engine;
pub mod lexicon;
pub mod normalizer;
pub mod phrase;
pub mod resolver;
pub mod segmenter;
pub mod types;
