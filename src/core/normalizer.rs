// src/core/normalizer.rs
use regex::Regex;
use std::sync::OnceLock;

/// Whitespace and punctuation runs separating words in running text.
fn delimiter_run() -> &'static Regex {
    static DELIMITER: OnceLock<Regex> = OnceLock::new();
    DELIMITER.get_or_init(|| Regex::new(r#"[\s.,!?;:"()]+"#).expect("valid delimiter pattern"))
}

/// Tokens the resolver treats as punctuation rather than words.
fn punctuation_only() -> &'static Regex {
    static PUNCT: OnceLock<Regex> = OnceLock::new();
    PUNCT.get_or_init(|| Regex::new(r#"^[\s,."!?;:+\-–—()]+$"#).expect("valid punctuation pattern"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Delimiter,
}

/// A slice of the input text. Concatenating every token's `text` gives back
/// the input unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub kind: TokenKind,
}

impl Token<'_> {
    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }

    /// True when the delimiter consists of whitespace only.
    pub fn is_blank(&self) -> bool {
        self.kind == TokenKind::Delimiter && self.text.chars().all(char::is_whitespace)
    }
}

/// Lowercases and trims a token for lookup. Diacritics are kept: å, ä and ö
/// are distinct letters in Swedish.
pub fn normalize_for_lookup(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Returns true for tokens made only of whitespace and punctuation.
pub fn is_punctuation(s: &str) -> bool {
    punctuation_only().is_match(s)
}

/// Splits `text` into alternating word and delimiter tokens.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut last = 0;
    for m in delimiter_run().find_iter(text) {
        if m.start() > last {
            tokens.push(Token {
                text: &text[last..m.start()],
                kind: TokenKind::Word,
            });
        }
        tokens.push(Token {
            text: m.as_str(),
            kind: TokenKind::Delimiter,
        });
        last = m.end();
    }
    if last < text.len() {
        tokens.push(Token {
            text: &text[last..],
            kind: TokenKind::Word,
        });
    }
    tokens
}
