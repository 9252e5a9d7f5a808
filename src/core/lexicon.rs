// src/core/lexicon.rs
use crate::core::normalizer::normalize_for_lookup;
use crate::core::types::{IdiomPhrase, Sign};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Read-only lookup tables supplied by the host application.
///
/// Tables are filled once at startup and later only appended to or replaced.
/// All keys are stored normalized.
#[derive(Debug, Clone, Default)]
pub struct LexiconRepository {
    /// Signs the user defined or taught the app. Checked before `lexicon`.
    user_signs: HashMap<String, Vec<Sign>>,
    lexicon: HashMap<String, Vec<Sign>>,
    inflections: HashMap<String, String>,
    gloss_variants: HashMap<String, String>,
    aliases: HashMap<String, String>,
    /// Sorted by descending word count, then descending length.
    idioms: Vec<IdiomPhrase>,
    idiom_index: HashMap<String, usize>,
}

/// Longer phrases must be tried before their sub-phrases.
fn idiom_order(a: &IdiomPhrase, b: &IdiomPhrase) -> Ordering {
    b.word_count()
        .cmp(&a.word_count())
        .then_with(|| b.phrase.chars().count().cmp(&a.phrase.chars().count()))
}

fn insert_mapping(table: &mut HashMap<String, String>, from: &str, to: &str) -> bool {
    let from = normalize_for_lookup(from);
    let to = normalize_for_lookup(to);
    if from.is_empty() || to.is_empty() {
        return false;
    }
    table.insert(from, to);
    true
}

impl LexiconRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sign under `key`, keeping catalog insertion order.
    ///
    /// Returns false, storing nothing, when the key normalizes to empty.
    pub fn insert_sign(&mut self, key: &str, sign: Sign) -> bool {
        let key = normalize_for_lookup(key);
        if key.is_empty() {
            return false;
        }
        self.lexicon.entry(key).or_default().push(sign);
        true
    }

    pub fn insert_user_sign(&mut self, key: &str, sign: Sign) -> bool {
        let key = normalize_for_lookup(key);
        if key.is_empty() {
            return false;
        }
        self.user_signs.entry(key).or_default().push(sign);
        true
    }

    /// Maps a surface form to its lemma. Rows with an empty side are dropped.
    pub fn insert_inflection(&mut self, form: &str, lemma: &str) -> bool {
        insert_mapping(&mut self.inflections, form, lemma)
    }

    pub fn insert_gloss_variant(&mut self, variant: &str, base: &str) -> bool {
        insert_mapping(&mut self.gloss_variants, variant, base)
    }

    pub fn insert_alias(&mut self, alias: &str, target: &str) -> bool {
        insert_mapping(&mut self.aliases, alias, target)
    }

    /// Adds idiom phrases and restores the longest-first order.
    pub fn add_idioms<I>(&mut self, idioms: I)
    where
        I: IntoIterator<Item = IdiomPhrase>,
    {
        for mut idiom in idioms {
            idiom.phrase = normalize_for_lookup(&idiom.phrase);
            if idiom.phrase.is_empty() {
                continue;
            }
            self.idioms.retain(|existing| existing.phrase != idiom.phrase);
            self.idioms.push(idiom);
        }
        self.idioms.sort_by(idiom_order);
        self.idiom_index = self
            .idioms
            .iter()
            .enumerate()
            .map(|(i, idiom)| (idiom.phrase.clone(), i))
            .collect();
        debug_assert!(self.idioms_sorted());
    }

    /// Signs for an exact key: user signs first, then the standard lexicon.
    pub fn signs_for_key(&self, key: &str) -> Option<&[Sign]> {
        let k = normalize_for_lookup(key);
        self.user_signs
            .get(&k)
            .or_else(|| self.lexicon.get(&k))
            .map(Vec::as_slice)
    }

    pub fn lemma_for(&self, form: &str) -> Option<&str> {
        self.inflections.get(form).map(String::as_str)
    }

    pub fn has_inflection(&self, form: &str) -> bool {
        self.inflections.contains_key(form)
    }

    pub fn gloss_base_for(&self, variant: &str) -> Option<&str> {
        self.gloss_variants.get(variant).map(String::as_str)
    }

    pub fn alias_target(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    pub fn idioms(&self) -> &[IdiomPhrase] {
        &self.idioms
    }

    /// Finds the idiom whose phrase equals `phrase` (case-insensitive).
    pub fn idiom(&self, phrase: &str) -> Option<&IdiomPhrase> {
        let key = normalize_for_lookup(phrase);
        self.idiom_index.get(&key).map(|&i| &self.idioms[i])
    }

    /// Every key that resolves through the exact stage.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.user_signs
            .keys()
            .chain(self.lexicon.keys().filter(|k| !self.user_signs.contains_key(*k)))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lexicon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexicon.is_empty() && self.user_signs.is_empty()
    }

    fn idioms_sorted(&self) -> bool {
        self.idioms
            .windows(2)
            .all(|w| idiom_order(&w[0], &w[1]) != Ordering::Greater)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idiom(phrase: &str, id: &str) -> IdiomPhrase {
        IdiomPhrase {
            phrase: phrase.to_string(),
            id: id.to_string(),
            synonyms: vec![],
        }
    }

    #[test]
    fn test_user_signs_shadow_lexicon() {
        let mut lex = LexiconRepository::new();
        lex.insert_sign("det", Sign::new("00001", "den"));
        lex.insert_user_sign("det", Sign::new("00002", "det"));
        let signs = lex.signs_for_key("Det").unwrap();
        assert_eq!(signs, &[Sign::new("00002", "det")]);
        assert_eq!(lex.keys().count(), 1);
    }

    #[test]
    fn test_insert_sign_preserves_catalog_order() {
        let mut lex = LexiconRepository::new();
        lex.insert_sign("bil", Sign::new("00010", "bil"));
        lex.insert_sign("bil", Sign::new("00011", "bil"));
        let ids: Vec<&str> = lex
            .signs_for_key("bil")
            .unwrap()
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(ids, vec!["00010", "00011"]);
    }

    #[test]
    fn test_idioms_sorted_longest_first() {
        let mut lex = LexiconRepository::new();
        lex.add_idioms(vec![
            idiom("ha koll", "1"),
            idiom("ha koll på läget", "2"),
            idiom("hålla koll", "3"),
            idiom("ta det lugnt", "4"),
        ]);
        let phrases: Vec<&str> = lex.idioms().iter().map(|i| i.phrase.as_str()).collect();
        assert_eq!(
            phrases,
            vec!["ha koll på läget", "ta det lugnt", "hålla koll", "ha koll"]
        );
        assert_eq!(lex.idiom("Ha Koll").map(|i| i.id.as_str()), Some("1"));
    }

    #[test]
    fn test_add_idioms_replaces_duplicates() {
        let mut lex = LexiconRepository::new();
        lex.add_idioms(vec![idiom("ha koll", "1")]);
        lex.add_idioms(vec![idiom("ha koll", "9")]);
        assert_eq!(lex.idioms().len(), 1);
        assert_eq!(lex.idiom("ha koll").unwrap().id, "9");
    }

    #[test]
    fn test_empty_mappings_are_rejected() {
        let mut lex = LexiconRepository::new();
        assert!(!lex.insert_inflection("hundar", " "));
        assert!(!lex.insert_gloss_variant("", "gå"));
        assert!(!lex.insert_alias("tv", ""));
        assert!(!lex.insert_sign("  ", Sign::new("1", "x")));
        assert!(lex.lemma_for("hundar").is_none());
        assert!(lex.alias_target("tv").is_none());
        assert!(lex.insert_inflection("Hundar", "Hund"));
        assert_eq!(lex.lemma_for("hundar"), Some("hund"));
    }
}
