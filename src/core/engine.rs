use crate::config::{PipelineConfig, WordFilters};
use crate::core::cache::CacheStats;
use crate::core::lexicon::LexiconRepository;
use crate::core::normalizer::{is_punctuation, normalize_for_lookup, tokenize};
use crate::core::phrase::{PhraseHit, PhraseKind, PhraseMatch, PhraseMatcher};
use crate::core::resolver::TokenResolver;
use crate::core::segmenter::split_into_sentences;
use crate::core::types::{Candidate, Method, Sign, WordMapEntry};
use crate::errors::Result;
use crate::fallback::{FallbackStrategy, TranslationFallback};
use crate::glossing::GlossingEngine;
use crate::learning::PreferenceStore;
use tracing::{info, warn};

/// Where a translated gloss came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlossSource {
    Offline,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub gloss: String,
    pub source: GlossSource,
    /// Offline confidence that decided the source.
    pub confidence: f64,
}

// The pipeline is composed of the lexicon, the learned preferences and the
// resolution/glossing engines. The host owns it and feeds it feedback.
pub struct SignPipeline {
    lexicon: LexiconRepository,
    preferences: PreferenceStore,
    resolver: TokenResolver,
    glossing: GlossingEngine,
    phrases: PhraseMatcher,
    config: PipelineConfig,
    fallback: Option<Box<dyn FallbackStrategy>>,
    translator: Option<Box<dyn TranslationFallback>>,
}

impl SignPipeline {
    pub fn new(lexicon: LexiconRepository, config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let resolver = TokenResolver::new(&config, &lexicon);
        info!(
            "sign pipeline ready: {} lexicon keys, {} idioms",
            lexicon.len(),
            lexicon.idioms().len()
        );
        Ok(Self {
            resolver,
            phrases: PhraseMatcher::new(config.max_phrase_words),
            glossing: GlossingEngine::default(),
            preferences: PreferenceStore::new(),
            lexicon,
            config,
            fallback: None,
            translator: None,
        })
    }

    pub fn with_filters(mut self, filters: WordFilters) -> Self {
        self.glossing = GlossingEngine::new(filters);
        self
    }

    /// Installs previously learned preferences.
    pub fn with_preferences(mut self, preferences: PreferenceStore) -> Self {
        self.preferences = preferences;
        self.resolver.clear_cache();
        self
    }

    pub fn with_fallback(mut self, fallback: Box<dyn FallbackStrategy>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn with_translation_fallback(mut self, translator: Box<dyn TranslationFallback>) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn set_ai_enabled(&mut self, enabled: bool) {
        self.config.ai_enabled = enabled;
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn lexicon(&self) -> &LexiconRepository {
        &self.lexicon
    }

    pub fn preferences(&self) -> &PreferenceStore {
        &self.preferences
    }

    pub fn glossing(&self) -> &GlossingEngine {
        &self.glossing
    }

    /// Resolves one token through the cached strategy chain.
    pub fn resolve(&self, token: &str) -> Option<Candidate> {
        self.resolver.resolve(token, &self.lexicon, &self.preferences)
    }

    /// Maps free text to one entry per word, phrase, or delimiter run.
    ///
    /// Delimiters are kept verbatim, so joining every `original` gives back
    /// `text`.
    pub fn search(&self, text: &str) -> Vec<WordMapEntry> {
        let tokens = tokenize(text);
        let mut out = Vec::with_capacity(tokens.len());

        let mut i = 0;
        while i < tokens.len() {
            let token = tokens[i];

            if !token.is_word() || is_punctuation(token.text) {
                out.push(WordMapEntry::delimiter(token.text));
                i += 1;
                continue;
            }

            if let Some(hit) = self.phrases.match_at(&tokens, i, &self.lexicon) {
                i += hit.consumed;
                out.push(self.phrase_entry(hit));
                continue;
            }

            out.push(self.resolve_word(token.text, text));
            i += 1;
        }

        out
    }

    /// `search` followed by sentence segmentation.
    pub fn sentences(&self, text: &str) -> Vec<Vec<WordMapEntry>> {
        split_into_sentences(&self.search(text))
    }

    /// Idiom occurrences in raw text, with byte spans.
    pub fn find_phrases(&self, text: &str) -> Vec<PhraseMatch> {
        self.phrases.find_matches(text, self.lexicon.idioms())
    }

    pub fn gloss(&self, text: &str) -> String {
        self.glossing.gloss_offline(text, &self.lexicon)
    }

    pub fn confidence(&self, text: &str) -> f64 {
        self.glossing.confidence(text, &self.lexicon)
    }

    /// Glosses `text`, and feeds the gloss back through `search` so every
    /// gloss word is resolved to signs.
    pub fn gloss_signs(&self, text: &str) -> Vec<WordMapEntry> {
        let gloss = self.gloss(text);
        self.search(&gloss.to_lowercase())
    }

    /// Offline gloss when it is trusted, otherwise the translation fallback
    /// (AI mode only). Falls back to the offline gloss if the external
    /// strategy yields nothing.
    pub fn translate(&self, text: &str) -> Translation {
        let confidence = self.confidence(text);
        let offline = || Translation {
            gloss: self.gloss(text),
            source: GlossSource::Offline,
            confidence,
        };

        if confidence > self.config.confidence_threshold || !self.config.ai_enabled {
            return offline();
        }
        let Some(translator) = &self.translator else {
            return offline();
        };
        match translator.translate(text) {
            Ok(Some(gloss)) if !gloss.trim().is_empty() => Translation {
                gloss,
                source: GlossSource::Fallback,
                confidence,
            },
            Ok(_) => offline(),
            Err(e) => {
                warn!("translation fallback failed: {}", e);
                offline()
            }
        }
    }

    /// Adds `amount` to a sign's weight for `lookup_key`.
    ///
    /// Cached candidates carry ranked sign lists, so the cache is dropped.
    pub fn increment_weight(&mut self, lookup_key: &str, sign_id: &str, amount: i64) -> i64 {
        let weight = self
            .preferences
            .increment(&normalize_for_lookup(lookup_key), sign_id, amount);
        self.resolver.clear_cache();
        weight
    }

    pub fn vote(&mut self, lookup_key: &str, sign_id: &str) -> i64 {
        self.increment_weight(lookup_key, sign_id, crate::learning::VOTE_WEIGHT)
    }

    pub fn set_primary(&mut self, lookup_key: &str, sign_id: &str) -> i64 {
        self.increment_weight(lookup_key, sign_id, crate::learning::PRIMARY_WEIGHT)
    }

    pub fn clear_feedback(&mut self) {
        self.preferences.clear();
        self.resolver.clear_cache();
    }

    /// The only lexicon write path. Every cached resolution is invalidated.
    pub fn update_lexicon<F, R>(&mut self, update: F) -> R
    where
        F: FnOnce(&mut LexiconRepository) -> R,
    {
        let result = update(&mut self.lexicon);
        self.resolver.rebuild_index(&self.lexicon);
        self.resolver.clear_cache();
        info!("lexicon updated: {} keys", self.lexicon.len());
        result
    }

    /// Marks forms the lemmatizer must leave as they are.
    pub fn protect_forms<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.glossing.lemmatizer_mut().protect(words);
    }

    pub fn is_cached(&self, token: &str) -> bool {
        self.resolver.is_cached(token)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.resolver.cache_stats()
    }

    fn phrase_entry(&self, hit: PhraseHit<'_>) -> WordMapEntry {
        match hit.kind {
            PhraseKind::Genuine(idiom) => WordMapEntry {
                original: hit.original,
                base: hit.key,
                is_word: true,
                signs: Some(vec![Sign::new(idiom.id.clone(), idiom.phrase.clone())]),
                is_compound: false,
                rationale: Some(
                    Method::Genuine {
                        phrase: idiom.phrase.clone(),
                    }
                    .to_string(),
                ),
                is_genuine: true,
                genuine_id: Some(idiom.id.clone()),
            },
            PhraseKind::Lexicon(signs) => {
                let signs = self.preferences.rank(signs, &hit.key);
                let rationale = Method::Phrase {
                    key: hit.key.clone(),
                }
                .to_string();
                WordMapEntry {
                    original: hit.original,
                    base: hit.key,
                    is_word: true,
                    signs: Some(signs),
                    is_compound: false,
                    rationale: Some(rationale),
                    is_genuine: false,
                    genuine_id: None,
                }
            }
        }
    }

    fn resolve_word(&self, word: &str, context: &str) -> WordMapEntry {
        if let Some(candidate) = self.resolve(word) {
            return WordMapEntry::from_candidate(word, candidate);
        }

        if self.config.ai_enabled {
            if let Some(fallback) = &self.fallback {
                match fallback.resolve(word, context) {
                    Ok(Some(candidate)) => {
                        let method = Method::Fallback(candidate.method.to_string());
                        return WordMapEntry::from_candidate(
                            word,
                            Candidate { method, ..candidate },
                        );
                    }
                    Ok(None) => {}
                    Err(e) => warn!("fallback for '{}' failed: {}", word, e),
                }
            }
        }

        WordMapEntry::unresolved(word, normalize_for_lookup(word))
    }
}
