// src/glossing/confidence.rs
use crate::config::WordFilters;
use crate::core::lexicon::LexiconRepository;

/// Score returned for texts too short to judge.
pub const SHORT_TEXT_CONFIDENCE: f64 = 0.3;
const MIN_TEXT_CHARS: usize = 5;
const KNOWN_WORD_BOOST: f64 = 1.5;

/// Estimates, in `[0, 1]`, whether the offline glossing engine can be trusted
/// for `text`.
///
/// The score is the share of words found in the inflection, stopword or
/// time-word tables, scaled by 1.5 and clamped to 1.
pub fn confidence(text: &str, filters: &WordFilters, lexicon: &LexiconRepository) -> f64 {
    if text.chars().count() < MIN_TEXT_CHARS {
        return SHORT_TEXT_CONFIDENCE;
    }

    let lower = text.to_lowercase();
    let words: Vec<&str> = lower
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() {
        return 0.0;
    }

    let known = words
        .iter()
        .filter(|w| {
            lexicon.has_inflection(w) || filters.is_stopword(w) || filters.is_time_word(w)
        })
        .count();

    (known as f64 / words.len() as f64 * KNOWN_WORD_BOOST).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_has_fixed_low_score() {
        let score = confidence("hej", &WordFilters::default(), &LexiconRepository::new());
        assert!((score - SHORT_TEXT_CONFIDENCE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_words_score_zero() {
        let score = confidence("qwerty asdfgh", &WordFilters::default(), &LexiconRepository::new());
        assert!(score.abs() < f64::EPSILON);
    }

    #[test]
    fn test_score_is_boosted_and_clamped() {
        let mut lex = LexiconRepository::new();
        lex.insert_inflection("åkte", "åka");
        let filters = WordFilters::default();
        // igår (time) + åkte (inflection) of 4 words: 0.5 * 1.5 = 0.75
        let score = confidence("Igår åkte Anna hem.", &filters, &lex);
        assert!((score - 0.75).abs() < 1e-9);
        // every word known: clamped to 1
        let score = confidence("igår och idag", &filters, &lex);
        assert!((score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_whitespace_only_scores_zero() {
        let score = confidence("      ", &WordFilters::default(), &LexiconRepository::new());
        assert!(score.abs() < f64::EPSILON);
    }
}
