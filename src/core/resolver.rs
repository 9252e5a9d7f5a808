//! Single-token resolution.
//!
//! Strategies run in a fixed priority order and the first success wins:
//! exact → inflection lemma → gloss variant → alias → suffix stripping →
//! compound split → fuzzy (off by default). Every outcome, including "no
//! match", is cached under the normalized token.

use crate::config::PipelineConfig;
use crate::core::cache::{CacheStats, CandidateCache};
use crate::core::lexicon::LexiconRepository;
use crate::core::normalizer::{is_punctuation, normalize_for_lookup};
use crate::core::types::{Candidate, Method};
use crate::fuzzy::{fuzzy_allowed, levenshtein, SymSpell};
use crate::learning::PreferenceStore;
use tracing::debug;

/// Swedish suffixes tried by the suffix stage, before sorting.
///
/// The one- and two-letter entries strip aggressively (e.g. a final -s that
/// is not a genitive); they are kept as a known precision/recall tradeoff.
const SUFFIXES: &[&str] = &[
    "ningen", "andet", "elsen", "ande", "ende", "arna", "erna", "orna", "aste", "are", "ers",
    "ens", "else", "het", "ade", "ar", "er", "or", "en", "et", "na", "t", "n", "s", "a", "as",
    "es", "ad", "at", "dd",
];

/// A stripped root shorter than this is never looked up.
const MIN_ROOT_LENGTH: usize = 2;
/// Both halves of a compound must be at least this long.
const MIN_COMPOUND_PART: usize = 2;

pub struct TokenResolver {
    cache: CandidateCache,
    suffixes: Vec<&'static str>,
    fuzzy: Option<FuzzySettings>,
}

struct FuzzySettings {
    index: SymSpell,
    min_length: usize,
    max_distance: usize,
}

impl TokenResolver {
    pub fn new(config: &PipelineConfig, lexicon: &LexiconRepository) -> Self {
        let mut suffixes: Vec<&'static str> = SUFFIXES.to_vec();
        suffixes.dedup();
        // Stable, so equal-length suffixes keep list order.
        suffixes.sort_by_key(|s| std::cmp::Reverse(s.chars().count()));

        let fuzzy = config.enable_fuzzy.then(|| FuzzySettings {
            index: SymSpell::from_keys(lexicon.keys(), config.fuzzy_max_distance),
            min_length: config.fuzzy_min_length,
            max_distance: config.fuzzy_max_distance,
        });

        Self {
            cache: CandidateCache::new(config.cache_capacity),
            suffixes,
            fuzzy,
        }
    }

    /// Resolves one raw token.
    ///
    /// Returns `None` for punctuation, empty input, and tokens no strategy
    /// could resolve. A cache hit skips the strategy chain entirely.
    pub fn resolve(
        &self,
        token_raw: &str,
        lexicon: &LexiconRepository,
        prefs: &PreferenceStore,
    ) -> Option<Candidate> {
        let token = normalize_for_lookup(token_raw);
        if token.is_empty() || is_punctuation(token_raw) {
            return None;
        }

        if let Some(cached) = self.cache.get(&token) {
            return cached;
        }

        let result = self.run_strategies(&token, lexicon, prefs);
        match &result {
            Some(candidate) => debug!("resolved '{}' via {}", token, candidate.method),
            None => debug!("no local candidate for '{}'", token),
        }
        self.cache.insert(token, result.clone());
        result
    }

    fn run_strategies(
        &self,
        token: &str,
        lexicon: &LexiconRepository,
        prefs: &PreferenceStore,
    ) -> Option<Candidate> {
        self.exact(token, lexicon, prefs)
            .or_else(|| self.inflection(token, lexicon, prefs))
            .or_else(|| self.gloss_variant(token, lexicon, prefs))
            .or_else(|| self.alias(token, lexicon, prefs))
            .or_else(|| self.suffix(token, lexicon, prefs))
            .or_else(|| self.compound(token, lexicon, prefs))
            .or_else(|| self.fuzzy(token, lexicon, prefs))
    }

    /// Looks up `key` and ranks its signs with the learned preferences.
    fn lookup(
        &self,
        key: &str,
        method: Method,
        lexicon: &LexiconRepository,
        prefs: &PreferenceStore,
    ) -> Option<Candidate> {
        lexicon
            .signs_for_key(key)
            .map(|signs| Candidate::found(prefs.rank(signs, key), key, method))
    }

    fn exact(
        &self,
        token: &str,
        lexicon: &LexiconRepository,
        prefs: &PreferenceStore,
    ) -> Option<Candidate> {
        self.lookup(token, Method::Exact, lexicon, prefs)
    }

    fn inflection(
        &self,
        token: &str,
        lexicon: &LexiconRepository,
        prefs: &PreferenceStore,
    ) -> Option<Candidate> {
        let lemma = lexicon.lemma_for(token)?;
        let method = Method::Inflection {
            form: token.to_string(),
            lemma: lemma.to_string(),
        };
        // A known lemma without a sign still wins, so the compound stage
        // never splits a genuinely inflected word.
        self.lookup(lemma, method, lexicon, prefs)
            .or_else(|| {
                Some(Candidate {
                    signs: None,
                    base: lemma.to_string(),
                    method: Method::InflectionWithoutSign {
                        form: token.to_string(),
                        lemma: lemma.to_string(),
                    },
                    is_compound: false,
                    parts: Vec::new(),
                })
            })
    }

    fn gloss_variant(
        &self,
        token: &str,
        lexicon: &LexiconRepository,
        prefs: &PreferenceStore,
    ) -> Option<Candidate> {
        let base = lexicon.gloss_base_for(token)?;
        let method = Method::GlossVariant {
            variant: token.to_string(),
            base: base.to_string(),
        };
        self.lookup(base, method, lexicon, prefs)
    }

    fn alias(
        &self,
        token: &str,
        lexicon: &LexiconRepository,
        prefs: &PreferenceStore,
    ) -> Option<Candidate> {
        let target = lexicon.alias_target(token)?;
        let method = Method::Alias {
            alias: token.to_string(),
            target: target.to_string(),
        };
        self.lookup(target, method, lexicon, prefs)
    }

    fn suffix(
        &self,
        token: &str,
        lexicon: &LexiconRepository,
        prefs: &PreferenceStore,
    ) -> Option<Candidate> {
        let token_len = token.chars().count();
        self.suffixes.iter().find_map(|suffix| {
            let root = token.strip_suffix(suffix)?;
            if token_len - suffix.chars().count() < MIN_ROOT_LENGTH {
                return None;
            }
            let method = Method::Suffix {
                suffix: suffix.to_string(),
            };
            self.lookup(root, method, lexicon, prefs)
        })
    }

    fn compound(
        &self,
        token: &str,
        lexicon: &LexiconRepository,
        prefs: &PreferenceStore,
    ) -> Option<Candidate> {
        if lexicon.has_inflection(token) {
            return None;
        }
        let boundaries: Vec<usize> = token.char_indices().map(|(i, _)| i).collect();
        let len = boundaries.len();
        if len < MIN_COMPOUND_PART * 2 {
            return None;
        }
        // Longest left part first.
        for split in (MIN_COMPOUND_PART..=len - MIN_COMPOUND_PART).rev() {
            let (left, right) = token.split_at(boundaries[split]);
            let (Some(left_signs), Some(right_signs)) =
                (lexicon.signs_for_key(left), lexicon.signs_for_key(right))
            else {
                continue;
            };
            let mut signs = prefs.rank(left_signs, left);
            signs.extend(prefs.rank(right_signs, right));
            return Some(Candidate {
                signs: Some(signs),
                base: format!("{left}+{right}"),
                method: Method::Compound,
                is_compound: true,
                parts: vec![left.to_string(), right.to_string()],
            });
        }
        None
    }

    fn fuzzy(
        &self,
        token: &str,
        lexicon: &LexiconRepository,
        prefs: &PreferenceStore,
    ) -> Option<Candidate> {
        let settings = self.fuzzy.as_ref()?;
        if token.chars().count() < settings.min_length {
            return None;
        }
        let (key, distance) = settings
            .index
            .lookup(token)
            .into_iter()
            .map(|key| (key, levenshtein(key, token)))
            .filter(|&(key, distance)| {
                distance <= settings.max_distance && fuzzy_allowed(key, token, distance)
            })
            .min_by(|a, b| {
                a.1.cmp(&b.1)
                    .then_with(|| a.0.chars().count().cmp(&b.0.chars().count()))
                    .then_with(|| a.0.cmp(b.0))
            })?;
        let method = Method::Fuzzy {
            key: key.to_string(),
            distance,
        };
        self.lookup(key, method, lexicon, prefs)
    }

    /// Rebuilds the fuzzy index after the lexicon changed.
    pub fn rebuild_index(&mut self, lexicon: &LexiconRepository) {
        if let Some(settings) = self.fuzzy.as_mut() {
            settings.index = SymSpell::from_keys(lexicon.keys(), settings.max_distance);
        }
    }

    /// Drops every cached resolution.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn is_cached(&self, token: &str) -> bool {
        self.cache.contains(&normalize_for_lookup(token))
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
