// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque catalog entry for one STS video sign.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sign {
    /// Zero-padded numeric identifier, e.g. "00042".
    pub id: String,
    /// Citation form used for display and video lookup.
    pub word: String,
}

impl Sign {
    pub fn new(id: impl Into<String>, word: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            word: word.into(),
        }
    }
}

/// A multi-word Swedish expression with its own dedicated sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdiomPhrase {
    pub phrase: String,
    pub id: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

impl IdiomPhrase {
    pub fn word_count(&self) -> usize {
        self.phrase.split_whitespace().count()
    }
}

/// Which strategy produced a resolution. Rendered as the rationale string;
/// callers must not branch on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    Exact,
    Inflection { form: String, lemma: String },
    /// The lemma is known but has no sign yet.
    InflectionWithoutSign { form: String, lemma: String },
    GlossVariant { variant: String, base: String },
    Alias { alias: String, target: String },
    Suffix { suffix: String },
    Compound,
    Fuzzy { key: String, distance: usize },
    Phrase { key: String },
    Genuine { phrase: String },
    Fallback(String),
    NoMatch,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Exact => write!(f, "Exact match"),
            Method::Inflection { form, lemma } => write!(f, "Lemma (inflections) {form}→{lemma}"),
            Method::InflectionWithoutSign { form, lemma } => {
                write!(f, "Lemma (inflections, no sign) {form}→{lemma}")
            }
            Method::GlossVariant { variant, base } => write!(f, "Gloss variant {variant}→{base}"),
            Method::Alias { alias, target } => write!(f, "Alias ({alias}→{target})"),
            Method::Suffix { suffix } => write!(f, "Suffix stripped (-{suffix})"),
            Method::Compound => write!(f, "Compound word"),
            Method::Fuzzy { key, distance } => write!(f, "Fuzzy ({key}, distance {distance})"),
            Method::Phrase { key } => write!(f, "Phrase match ({key})"),
            Method::Genuine { phrase } => write!(f, "Genuine sign: {phrase}"),
            Method::Fallback(inner) => write!(f, "AI fallback: {inner}"),
            Method::NoMatch => write!(f, "No match"),
        }
    }
}

/// The resolver's proposed answer for one token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// `None` when a lemma is known but has no sign.
    pub signs: Option<Vec<Sign>>,
    /// The resolved lemma or lookup key. Never empty.
    pub base: String,
    pub method: Method,
    pub is_compound: bool,
    /// Left and right halves when `is_compound` is set.
    #[serde(default)]
    pub parts: Vec<String>,
}

impl Candidate {
    pub(crate) fn found(signs: Vec<Sign>, base: impl Into<String>, method: Method) -> Self {
        Self {
            signs: Some(signs),
            base: base.into(),
            method,
            is_compound: false,
            parts: Vec::new(),
        }
    }
}

/// One unit of pipeline output: a word, a matched phrase, or a delimiter run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordMapEntry {
    pub original: String,
    pub base: String,
    pub is_word: bool,
    pub signs: Option<Vec<Sign>>,
    pub is_compound: bool,
    pub rationale: Option<String>,
    pub is_genuine: bool,
    pub genuine_id: Option<String>,
}

impl WordMapEntry {
    pub fn delimiter(text: &str) -> Self {
        Self {
            original: text.to_string(),
            base: text.to_string(),
            is_word: false,
            signs: None,
            is_compound: false,
            rationale: None,
            is_genuine: false,
            genuine_id: None,
        }
    }

    pub fn from_candidate(original: &str, candidate: Candidate) -> Self {
        Self {
            original: original.to_string(),
            base: candidate.base,
            is_word: true,
            signs: candidate.signs,
            is_compound: candidate.is_compound,
            rationale: Some(candidate.method.to_string()),
            is_genuine: false,
            genuine_id: None,
        }
    }

    pub fn unresolved(original: &str, base: String) -> Self {
        Self {
            original: original.to_string(),
            base,
            is_word: true,
            signs: None,
            is_compound: false,
            rationale: Some(Method::NoMatch.to_string()),
            is_genuine: false,
            genuine_id: None,
        }
    }
}

/// A word inside the glossing engine, remembering whether a comma followed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlossToken {
    pub word: String,
    pub has_comma_after: bool,
}

impl GlossToken {
    pub fn new(word: impl Into<String>, has_comma_after: bool) -> Self {
        Self {
            word: word.into(),
            has_comma_after,
        }
    }
}
