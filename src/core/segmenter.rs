// src/core/segmenter.rs
use crate::core::types::WordMapEntry;

const SENTENCE_ENDERS: &[&str] = &[".", "!", "?", "...", "–", "—"];

/// Splits a flat token list into sentences.
///
/// A delimiter containing a line break closes the current sentence and is
/// dropped. An entry ending in a terminator closes the sentence and is kept.
/// Sentences without any word entry are discarded.
pub fn split_into_sentences(entries: &[WordMapEntry]) -> Vec<Vec<WordMapEntry>> {
    let mut sentences = Vec::new();
    let mut current: Vec<WordMapEntry> = Vec::new();

    let mut flush = |current: &mut Vec<WordMapEntry>| {
        if current.iter().any(|e| e.is_word) {
            sentences.push(std::mem::take(current));
        } else {
            current.clear();
        }
    };

    for entry in entries {
        let trimmed = entry.original.trim();
        if !entry.is_word && trimmed.is_empty() && entry.original.contains('\n') {
            flush(&mut current);
            continue;
        }

        current.push(entry.clone());

        let ends_sentence = !entry.is_word
            && SENTENCE_ENDERS
                .iter()
                .any(|ender| trimmed.ends_with(ender));
        if ends_sentence {
            flush(&mut current);
        }
    }
    flush(&mut current);

    sentences
}
