//! Pipeline settings and the fixed word-class sets used by the glossing engine.

use crate::errors::{GlosaError, Result};
use serde::Deserialize;
use std::collections::HashSet;

/// Tunables for resolution and glossing. Every field has a default, so a
/// partial JSON document is enough.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Upper bound of the single-token candidate cache.
    pub cache_capacity: usize,
    /// Longest multi-word window tried by the phrase matcher.
    pub max_phrase_words: usize,
    /// Fuzzy matching is off unless explicitly enabled.
    pub enable_fuzzy: bool,
    pub fuzzy_min_length: usize,
    pub fuzzy_max_distance: usize,
    /// Gates every external AI strategy.
    pub ai_enabled: bool,
    /// Offline glosses scoring above this are trusted without AI.
    pub confidence_threshold: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            cache_capacity: crate::core::cache::DEFAULT_CACHE_CAPACITY,
            max_phrase_words: 4,
            enable_fuzzy: false,
            fuzzy_min_length: 4,
            fuzzy_max_distance: 2,
            ai_enabled: false,
            confidence_threshold: 0.6,
        }
    }
}

impl PipelineConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cache_capacity == 0 {
            return Err(GlosaError::invalid_argument(
                "cache_capacity",
                "must be at least 1",
            ));
        }
        if self.max_phrase_words < 2 {
            return Err(GlosaError::invalid_argument(
                "max_phrase_words",
                "a phrase has at least 2 words",
            ));
        }
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(GlosaError::invalid_argument(
                "confidence_threshold",
                "must be within [0, 1]",
            ));
        }
        Ok(())
    }
}

const STOPWORDS: &[&str] = &[
    "att", "och", "en", "ett", "den", "det", "som", "på", "i", "av", "till", "för", "med", "om",
    "från", "är",
];
const TIME_WORDS: &[&str] = &[
    "igår", "idag", "imorgon", "ikväll", "imorse", "morgon", "morse", "kväll", "nu", "snart",
    "sedan", "förut", "ofta", "ibland",
];
const NEGATION_WORDS: &[&str] = &["inte", "ej", "aldrig", "ingen", "inget", "inga"];
const QUESTION_WORDS: &[&str] = &["vad", "vem", "var", "när", "varför", "hur"];
/// "i" survives stopword filtering only in front of these words.
const KEEP_I_WITH: &[&str] = &["morgon", "imorgon", "morse", "kväll"];

fn to_set<S: AsRef<str>>(words: &[S]) -> HashSet<String> {
    words.iter().map(|w| w.as_ref().to_lowercase()).collect()
}

/// Word classes that drive STS glossing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordFilters {
    pub stopwords: HashSet<String>,
    pub time_words: HashSet<String>,
    pub negation_words: HashSet<String>,
    pub question_words: HashSet<String>,
    pub keep_i_with: HashSet<String>,
}

impl Default for WordFilters {
    fn default() -> Self {
        Self {
            stopwords: to_set(STOPWORDS),
            time_words: to_set(TIME_WORDS),
            negation_words: to_set(NEGATION_WORDS),
            question_words: to_set(QUESTION_WORDS),
            keep_i_with: to_set(KEEP_I_WITH),
        }
    }
}

// Mirrors the `word-filters.json` document.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FilterDocument {
    filter_rules: Option<FilterRules>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct FilterRules {
    ignore_words: IgnoreWords,
    context_words: ContextWords,
    priority_words: PriorityWords,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct IgnoreWords {
    stopwords: Vec<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct ContextWords {
    time_words: Vec<String>,
    negation_words: Vec<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct PriorityWords {
    categories: Categories,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct Categories {
    question_words: Vec<String>,
}

impl WordFilters {
    /// Reads a `{"filterRules": {...}}` document. Entries are lowercased;
    /// empty lists are accepted with a warning, a missing `filterRules` is not.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let doc: FilterDocument = serde_json::from_str(json)?;
        let rules = doc.filter_rules.ok_or_else(|| {
            GlosaError::invalid_format("word filters", "missing the `filterRules` section")
        })?;
        let filters = Self {
            stopwords: to_set(&rules.ignore_words.stopwords),
            time_words: to_set(&rules.context_words.time_words),
            negation_words: to_set(&rules.context_words.negation_words),
            question_words: to_set(&rules.priority_words.categories.question_words),
            keep_i_with: to_set(KEEP_I_WITH),
        };
        for (name, set) in [
            ("stopwords", &filters.stopwords),
            ("time words", &filters.time_words),
            ("negation words", &filters.negation_words),
            ("question words", &filters.question_words),
        ] {
            if set.is_empty() {
                tracing::warn!("word filter list '{}' is empty", name);
            }
        }
        Ok(filters)
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    pub fn is_time_word(&self, word: &str) -> bool {
        self.time_words.contains(word)
    }

    pub fn is_negation(&self, word: &str) -> bool {
        self.negation_words.contains(word)
    }

    pub fn is_question_word(&self, word: &str) -> bool {
        self.question_words.contains(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cache_capacity, 500);
        assert!(!config.enable_fuzzy);
    }

    #[test]
    fn test_partial_config_json() {
        let config = PipelineConfig::from_json_str(r#"{"enable_fuzzy": true}"#).unwrap();
        assert!(config.enable_fuzzy);
        assert_eq!(config.max_phrase_words, 4);
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let err = PipelineConfig::from_json_str(r#"{"cache_capacity": 0}"#).unwrap_err();
        assert!(matches!(err, GlosaError::InvalidArgument(_)));
    }

    #[test]
    fn test_word_filters_from_document() {
        let json = r#"{
            "filterRules": {
                "ignoreWords": { "stopwords": ["Och", "att"] },
                "contextWords": { "timeWords": ["IGÅR"], "negationWords": ["inte"] },
                "priorityWords": { "categories": { "questionWords": ["vad"] } }
            }
        }"#;
        let filters = WordFilters::from_json_str(json).unwrap();
        assert!(filters.is_stopword("och"));
        assert!(filters.is_time_word("igår"));
        assert!(filters.is_negation("inte"));
        assert!(filters.is_question_word("vad"));
        assert!(filters.keep_i_with.contains("kväll"));
    }

    #[test]
    fn test_word_filters_missing_lists_are_empty() {
        let filters = WordFilters::from_json_str(r#"{"filterRules": {}}"#).unwrap();
        assert!(filters.stopwords.is_empty());
    }

    #[test]
    fn test_word_filters_require_filter_rules() {
        let err = WordFilters::from_json_str(r#"{"stopwords": ["och"]}"#).unwrap_err();
        assert!(matches!(err, GlosaError::InvalidFormat(_)));
        assert!(matches!(
            WordFilters::from_json_str("{").unwrap_err(),
            GlosaError::Json(_)
        ));
    }
}
