// src/glossing/lemmatizer.rs
use crate::core::lexicon::LexiconRepository;
use std::collections::HashSet;

/// Forms that are already base forms (mostly perfect participles) and must
/// never be cut by the suffix heuristics.
const IRREGULAR_FORMS: &[&str] = &[
    "sett", "gjort", "varit", "kommit", "tagit", "läst", "skrivit", "ätit", "druckit", "sovit",
    "stått", "satt", "legat", "gett", "kunnat", "velat", "måttat", "borrat", "sortat", "tappat",
    "brutit", "kassat", "sparkat", "frågat", "svar", "levt",
];

/// Reduces Swedish surface forms to an uppercase gloss lemma.
///
/// Order: irregular whitelist, inflection table, alias table, then suffix
/// heuristics for present-tense verbs and neuter adjectives.
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    whitelist: HashSet<String>,
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self {
            whitelist: IRREGULAR_FORMS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl Lemmatizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extends the whitelist with additional already-base forms.
    pub fn protect<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.whitelist
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
    }

    pub fn lemmatize(&self, word: &str, lexicon: &LexiconRepository) -> String {
        let lower = word.to_lowercase();

        if self.whitelist.contains(&lower) {
            return lower.to_uppercase();
        }
        if let Some(lemma) = lexicon.lemma_for(&lower) {
            return lemma.to_uppercase();
        }
        if let Some(target) = lexicon.alias_target(&lower) {
            return target.to_uppercase();
        }

        strip_inflection(&lower).to_uppercase()
    }
}

/// Heuristic rules, first match wins:
/// - `-ar` (group 1 present): "gillar" → "gilla"
/// - `-er` (group 2/3 present): "tänker" → "tänka"
/// - bare `-r`, not `-ar`/`-er`/`-or` (strong verbs): "förstår" → "förstå"
/// - `-t` except `-nt`/`-tt` (neuter adjectives): "stort" → "stor"
fn strip_inflection(lower: &str) -> String {
    let len = lower.chars().count();
    let drop_last = |s: &str| {
        let mut out = s.to_string();
        out.pop();
        out
    };

    if lower.ends_with("ar") && len > 3 {
        drop_last(lower)
    } else if lower.ends_with("er") && len > 3 {
        let stem = drop_last(&drop_last(lower));
        format!("{stem}a")
    } else if lower.ends_with('r')
        && len > 2
        && !lower.ends_with("ar")
        && !lower.ends_with("er")
        && !lower.ends_with("or")
    {
        drop_last(lower)
    } else if lower.ends_with('t') && len > 2 && !lower.ends_with("nt") && !lower.ends_with("tt")
    {
        drop_last(lower)
    } else {
        lower.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lemma(word: &str) -> String {
        Lemmatizer::new().lemmatize(word, &LexiconRepository::new())
    }

    #[test]
    fn test_whitelist_is_untouched() {
        assert_eq!(lemma("sett"), "SETT");
        assert_eq!(lemma("Gjort"), "GJORT");
        assert_eq!(lemma("svar"), "SVAR");
    }

    #[test]
    fn test_present_tense_rules() {
        assert_eq!(lemma("gillar"), "GILLA");
        assert_eq!(lemma("tänker"), "TÄNKA");
        assert_eq!(lemma("förstår"), "FÖRSTÅ");
        assert_eq!(lemma("går"), "GÅ");
    }

    #[test]
    fn test_short_and_excluded_endings() {
        assert_eq!(lemma("bar"), "BAR");
        assert_eq!(lemma("ber"), "BER");
        assert_eq!(lemma("kor"), "KOR");
        assert_eq!(lemma("stort"), "STOR");
        assert_eq!(lemma("kant"), "KANT");
        assert_eq!(lemma("hus"), "HUS");
    }

    #[test]
    fn test_tables_take_precedence_over_heuristics() {
        let mut lex = LexiconRepository::new();
        lex.insert_inflection("åkte", "åka");
        lex.insert_alias("tv", "television");
        let lemmatizer = Lemmatizer::new();
        assert_eq!(lemmatizer.lemmatize("åkte", &lex), "ÅKA");
        assert_eq!(lemmatizer.lemmatize("TV", &lex), "TELEVISION");
    }

    #[test]
    fn test_whitelist_beats_inflection_table() {
        let mut lex = LexiconRepository::new();
        lex.insert_inflection("sett", "se");
        assert_eq!(Lemmatizer::new().lemmatize("sett", &lex), "SETT");
    }

    #[test]
    fn test_protect_extends_whitelist() {
        let mut lemmatizer = Lemmatizer::new();
        lemmatizer.protect(["Hemmet"]);
        assert_eq!(
            lemmatizer.lemmatize("hemmet", &LexiconRepository::new()),
            "HEMMET"
        );
    }
}
