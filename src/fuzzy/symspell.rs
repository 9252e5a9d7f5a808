// File: src/fuzzy/symspell.rs
use std::collections::{HashMap, HashSet};

/// Index into the SymSpell word list.
pub type KeyId = usize;

/// Fuzzy candidate search over lexicon keys using the Symmetric Delete
/// (SymSpell) algorithm. Deletes are pre-computed per key, so a lookup costs
/// O(k^2) in the input length and is independent of lexicon size.
///
/// Deletes are generated per `char`, so å/ä/ö are removed as whole letters.
#[derive(Debug, Clone, Default)]
pub struct SymSpell {
    /// Maps a delete variant (e.g. "skla") to the keys it could come from.
    deletes: HashMap<String, HashSet<KeyId>>,
    words: Vec<String>,
    word_ids: HashMap<String, KeyId>,
    max_edit_distance: usize,
}

impl SymSpell {
    pub fn new(max_edit_distance: usize) -> Self {
        Self {
            deletes: HashMap::new(),
            words: Vec::new(),
            word_ids: HashMap::new(),
            max_edit_distance,
        }
    }

    /// Builds an index over every key.
    pub fn from_keys<'a, I>(keys: I, max_edit_distance: usize) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut index = Self::new(max_edit_distance);
        for key in keys {
            index.add_word(key);
        }
        index
    }

    /// Adds a key with all of its delete variants. Re-adding a key is a no-op.
    pub fn add_word(&mut self, word: &str) {
        if word.is_empty() || self.word_ids.contains_key(word) {
            return;
        }
        let id = self.words.len();
        self.words.push(word.to_string());
        self.word_ids.insert(word.to_string(), id);
        for edit in self.generate_edits(word) {
            self.deletes.entry(edit).or_default().insert(id);
        }
    }

    /// Returns the keys that share a delete variant with `input`.
    ///
    /// This is a superset of the keys within `max_edit_distance`; callers
    /// verify with a real edit distance.
    pub fn lookup(&self, input: &str) -> Vec<&str> {
        let mut candidates: HashSet<KeyId> = HashSet::new();
        for edit in self.generate_edits(input) {
            if let Some(ids) = self.deletes.get(&edit) {
                candidates.extend(ids.iter().copied());
            }
        }
        let mut found: Vec<&str> = candidates
            .into_iter()
            .map(|id| self.words[id].as_str())
            .collect();
        found.sort_unstable();
        found
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// All unique variants within `max_edit_distance` deletes, including the
    /// word itself.
    fn generate_edits(&self, word: &str) -> HashSet<String> {
        let mut edits = HashSet::new();
        edits.insert(word.to_string());

        let mut current_edits = edits.clone();

        for _ in 0..self.max_edit_distance {
            let mut next_edits = HashSet::new();
            for edit in &current_edits {
                let chars: Vec<char> = edit.chars().collect();
                for i in 0..chars.len() {
                    let deleted_variant: String = chars
                        .iter()
                        .enumerate()
                        .filter(|&(j, _)| j != i)
                        .map(|(_, c)| *c)
                        .collect();
                    next_edits.insert(deleted_variant);
                }
            }
            edits.extend(next_edits.iter().cloned());
            current_edits = next_edits;
        }

        edits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_finds_single_edit() {
        let index = SymSpell::from_keys(["skola", "skog", "bil"], 1);
        let found = index.lookup("skolla");
        assert!(found.contains(&"skola"));
        assert!(!found.contains(&"bil"));
    }

    #[test]
    fn test_lookup_exact() {
        let index = SymSpell::from_keys(["hund"], 2);
        assert_eq!(index.lookup("hund"), vec!["hund"]);
    }

    #[test]
    fn test_deletes_are_char_based() {
        let index = SymSpell::from_keys(["köra"], 1);
        assert_eq!(index.lookup("kra"), vec!["köra"]);
        assert_eq!(index.lookup("körra"), vec!["köra"]);
    }

    #[test]
    fn test_add_word_is_idempotent() {
        let mut index = SymSpell::new(1);
        index.add_word("bil");
        index.add_word("bil");
        assert_eq!(index.len(), 1);
    }
}
