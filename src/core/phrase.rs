//! Multi-word phrase detection.
//!
//! Two entry points share the longest-first rule:
//!   1. `find_matches` scans raw text for idiom phrases and reports byte spans.
//!   2. `match_at` walks a token stream and greedily consumes the longest
//!      window (max words down to 2) that is an idiom or a lexicon key.

use crate::core::lexicon::LexiconRepository;
use crate::core::normalizer::{normalize_for_lookup, Token};
use crate::core::types::{IdiomPhrase, Sign};

/// An idiom found in raw text. `start..end` are byte offsets into the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseMatch {
    /// The matched slice as written in the text.
    pub phrase: String,
    pub start: usize,
    pub end: usize,
    pub id: String,
    pub synonyms: Vec<String>,
}

/// What a token window resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhraseKind<'l> {
    Genuine(&'l IdiomPhrase),
    Lexicon(&'l [Sign]),
}

/// A window of tokens consumed as one phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseHit<'l> {
    /// Original text of the window, delimiters included.
    pub original: String,
    pub key: String,
    /// Number of tokens consumed, words and delimiters.
    pub consumed: usize,
    pub kind: PhraseKind<'l>,
}

pub struct PhraseMatcher {
    max_words: usize,
}

impl PhraseMatcher {
    pub fn new(max_words: usize) -> Self {
        Self {
            max_words: max_words.max(2),
        }
    }

    /// Finds every non-overlapping idiom occurrence in `text`.
    ///
    /// `idioms` must be sorted longest-first; a span accepted earlier wins over
    /// any later, shorter phrase that overlaps it.
    pub fn find_matches(&self, text: &str, idioms: &[IdiomPhrase]) -> Vec<PhraseMatch> {
        if text.is_empty() {
            return Vec::new();
        }
        let (lower, origin) = lowercase_with_offsets(text);
        let to_original = |i: usize| if i == lower.len() { text.len() } else { origin[i] };

        let mut matches = Vec::new();
        let mut used: Vec<(usize, usize)> = Vec::new();

        for idiom in idioms {
            let phrase = idiom.phrase.to_lowercase();
            if phrase.is_empty() {
                continue;
            }
            let mut from = 0;
            while let Some(pos) = lower[from..].find(&phrase) {
                let lower_start = from + pos;
                let lower_end = lower_start + phrase.len();
                from = lower_end;

                let start = to_original(lower_start);
                let end = to_original(lower_end);
                let overlaps = used.iter().any(|&(s, e)| !(end <= s || start >= e));
                if is_whole_phrase(text, start, end) && !overlaps {
                    matches.push(PhraseMatch {
                        phrase: text[start..end].to_string(),
                        start,
                        end,
                        id: idiom.id.clone(),
                        synonyms: idiom.synonyms.clone(),
                    });
                    used.push((start, end));
                }
            }
        }

        matches.sort_by_key(|m| m.start);
        matches
    }

    /// Tries to consume a phrase starting at word token `tokens[i]`.
    ///
    /// Words inside a phrase must be separated by whitespace only; idioms are
    /// checked before plain lexicon keys for each window length.
    pub fn match_at<'l>(
        &self,
        tokens: &[Token<'_>],
        i: usize,
        lexicon: &'l LexiconRepository,
    ) -> Option<PhraseHit<'l>> {
        for words in (2..=self.max_words).rev() {
            let consumed = words * 2 - 1;
            let Some(window) = tokens.get(i..i + consumed) else {
                continue;
            };
            let aligned = window.iter().enumerate().all(|(j, token)| {
                if j % 2 == 0 {
                    token.is_word()
                } else {
                    token.is_blank()
                }
            });
            if !aligned {
                continue;
            }

            let key = normalize_for_lookup(
                &window
                    .iter()
                    .step_by(2)
                    .map(|t| t.text)
                    .collect::<Vec<_>>()
                    .join(" "),
            );
            let original: String = window.iter().map(|t| t.text).collect();

            if let Some(idiom) = lexicon.idiom(&key) {
                return Some(PhraseHit {
                    original,
                    key,
                    consumed,
                    kind: PhraseKind::Genuine(idiom),
                });
            }
            if let Some(signs) = lexicon.signs_for_key(&key) {
                return Some(PhraseHit {
                    original,
                    key,
                    consumed,
                    kind: PhraseKind::Lexicon(signs),
                });
            }
        }
        None
    }
}

/// The characters right before and after the span must not be alphanumeric.
fn is_whole_phrase(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}

/// Lowercases `text` and records, for every byte of the result, the byte
/// offset of the source character it came from.
fn lowercase_with_offsets(text: &str) -> (String, Vec<usize>) {
    let mut lower = String::with_capacity(text.len());
    let mut origin = Vec::with_capacity(text.len());
    for (offset, c) in text.char_indices() {
        for lc in c.to_lowercase() {
            lower.push(lc);
            origin.extend(std::iter::repeat(offset).take(lc.len_utf8()));
        }
    }
    (lower, origin)
}
