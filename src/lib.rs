// src/lib.rs

pub mod config;
pub mod core;
pub mod errors;
pub mod fallback;
pub mod fuzzy;
pub mod glossing;
pub mod learning;
pub mod loader;

pub use crate::config::{PipelineConfig, WordFilters};
pub use crate::core::engine::{GlossSource, SignPipeline, Translation};
pub use crate::core::lexicon::LexiconRepository;
pub use crate::core::types::{Candidate, IdiomPhrase, Method, Sign, WordMapEntry};
pub use crate::errors::{GlosaError, Result};
pub use crate::learning::PreferenceStore;
