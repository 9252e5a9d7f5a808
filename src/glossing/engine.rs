//! Offline Swedish → STS gloss transcription.
//!
//! Each sentence is handled on its own:
//!   1. Detect a question before punctuation is stripped.
//!   2. Tokenize, remembering which words a comma followed.
//!   3. Drop stopwords and negation words, moving their commas forward.
//!   4. Lemmatize and uppercase the survivors.
//!   5. Reorder: time words first, then content, then `INTE` if negated.
//!   6. Append `?` or `.`.

use crate::config::WordFilters;
use crate::core::lexicon::LexiconRepository;
use crate::core::types::GlossToken;
use crate::glossing::confidence;
use crate::glossing::lemmatizer::Lemmatizer;
use regex::Regex;
use std::sync::OnceLock;

/// The gloss appended once when a sentence is negated.
pub const NEGATION_GLOSS: &str = "INTE";
/// The only stopword that can survive, and only before a time word.
const PREPOSITION_I: &str = "i";

fn sentence_pattern() -> &'static Regex {
    static SENTENCE: OnceLock<Regex> = OnceLock::new();
    SENTENCE.get_or_init(|| Regex::new(r"[^.!?]*[.!?]+").expect("valid sentence pattern"))
}

/// Splits text into sentences, each keeping its terminator. Trailing text
/// without a terminator forms a final sentence.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut last = 0;
    for m in sentence_pattern().find_iter(text) {
        sentences.push(m.as_str().trim());
        last = m.end();
    }
    sentences.push(text[last..].trim());
    sentences.retain(|s| !s.is_empty());
    sentences
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
    Time,
    Main,
}

#[derive(Debug, Clone, Default)]
pub struct GlossingEngine {
    filters: WordFilters,
    lemmatizer: Lemmatizer,
}

impl GlossingEngine {
    pub fn new(filters: WordFilters) -> Self {
        Self {
            filters,
            lemmatizer: Lemmatizer::new(),
        }
    }

    pub fn filters(&self) -> &WordFilters {
        &self.filters
    }

    pub fn lemmatizer_mut(&mut self) -> &mut Lemmatizer {
        &mut self.lemmatizer
    }

    /// Transcribes `text` into STS gloss order. Empty or whitespace-only
    /// input yields an empty string.
    pub fn gloss_offline(&self, text: &str, lexicon: &LexiconRepository) -> String {
        if text.trim().is_empty() {
            return String::new();
        }
        split_sentences(text)
            .into_iter()
            .map(|sentence| self.gloss_sentence(sentence, lexicon))
            .filter(|gloss| !gloss.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn lemmatize(&self, word: &str, lexicon: &LexiconRepository) -> String {
        self.lemmatizer.lemmatize(word, lexicon)
    }

    pub fn confidence(&self, text: &str, lexicon: &LexiconRepository) -> f64 {
        confidence::confidence(text, &self.filters, lexicon)
    }

    /// A sentence is a question if it contains `?` or opens with a wh-word.
    pub fn is_question(&self, sentence: &str) -> bool {
        if sentence.contains('?') {
            return true;
        }
        sentence
            .split_whitespace()
            .next()
            .map(clean_word)
            .is_some_and(|first| self.filters.is_question_word(&first))
    }

    fn gloss_sentence(&self, sentence: &str, lexicon: &LexiconRepository) -> String {
        let is_question = self.is_question(sentence);
        let tokens = tokenize_with_punctuation(sentence);
        let has_negation = tokens.iter().any(|t| self.filters.is_negation(&t.word));

        let mut glosses = self.reorder(&tokens, lexicon);
        if has_negation {
            glosses.push(GlossToken::new(NEGATION_GLOSS, false));
        }
        if glosses.is_empty() {
            return String::new();
        }

        let words: Vec<String> = glosses
            .into_iter()
            .map(|t| {
                if t.has_comma_after {
                    format!("{},", t.word)
                } else {
                    t.word
                }
            })
            .collect();
        format!("{}{}", words.join(" "), if is_question { "?" } else { "." })
    }

    /// Filters, lemmatizes and orders the content words of one sentence.
    /// The returned list never ends in a comma.
    fn reorder(&self, tokens: &[GlossToken], lexicon: &LexiconRepository) -> Vec<GlossToken> {
        let mut time: Vec<GlossToken> = Vec::new();
        let mut main: Vec<GlossToken> = Vec::new();
        let mut last_bucket: Option<Bucket> = None;
        let mut pending_comma = false;

        for (i, token) in tokens.iter().enumerate() {
            let word = token.word.as_str();
            let next_time_context = word == PREPOSITION_I
                && self
                    .next_surviving(&tokens[i + 1..])
                    .is_some_and(|next| self.filters.keep_i_with.contains(next));

            if !next_time_context && self.is_dropped(word) {
                if token.has_comma_after {
                    let target = match last_bucket {
                        Some(Bucket::Time) => time.last_mut(),
                        Some(Bucket::Main) => main.last_mut(),
                        None => None,
                    };
                    match target {
                        Some(previous) => previous.has_comma_after = true,
                        None => pending_comma = true,
                    }
                }
                continue;
            }

            let is_time_word = self.filters.is_time_word(word);
            // Time words are already glosses; the suffix rules would cut "igår".
            let lemma = if is_time_word {
                word.to_uppercase()
            } else {
                self.lemmatizer.lemmatize(word, lexicon)
            };
            if lemma.is_empty() {
                continue;
            }

            let bucket = if is_time_word {
                Bucket::Time
            } else if next_time_context {
                // "i" travels with the time word it introduces.
                match self.next_surviving(&tokens[i + 1..]) {
                    Some(next) if self.filters.is_time_word(next) => Bucket::Time,
                    _ => Bucket::Main,
                }
            } else {
                Bucket::Main
            };

            let gloss = GlossToken::new(lemma, token.has_comma_after || pending_comma);
            pending_comma = false;
            match bucket {
                Bucket::Time => time.push(gloss),
                Bucket::Main => main.push(gloss),
            }
            last_bucket = Some(bucket);
        }

        time.extend(main);
        if let Some(last) = time.last_mut() {
            last.has_comma_after = false;
        }
        time
    }

    fn is_dropped(&self, word: &str) -> bool {
        self.filters.is_stopword(word) || self.filters.is_negation(word)
    }

    fn next_surviving<'t>(&self, rest: &'t [GlossToken]) -> Option<&'t str> {
        rest.iter()
            .map(|t| t.word.as_str())
            .find(|w| *w != PREPOSITION_I && !self.is_dropped(w))
    }
}

fn clean_word(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '.' | ',' | '!' | '?' | ';' | ':'))
        .collect::<String>()
        .to_lowercase()
}

/// Whitespace tokenization that records a comma on the word it follows.
fn tokenize_with_punctuation(text: &str) -> Vec<GlossToken> {
    text.split_whitespace()
        .filter_map(|raw| {
            let word = clean_word(raw);
            (!word.is_empty()).then(|| GlossToken::new(word, raw.contains(',')))
        })
        .collect()
}
