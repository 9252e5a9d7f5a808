use glosa_core::core::phrase::PhraseMatcher;
use glosa_core::glossing::Lemmatizer;
use glosa_core::{
    Candidate, IdiomPhrase, LexiconRepository, Method, PipelineConfig, PreferenceStore, Result,
    Sign, SignPipeline,
};

fn sign(id: &str, word: &str) -> Sign {
    Sign::new(id, word)
}

fn lexicon() -> LexiconRepository {
    let mut lex = LexiconRepository::new();
    lex.insert_sign("bil", sign("00100", "bil"));
    lex.insert_sign("bilar", sign("00101", "bilar"));
    lex.insert_sign("för", sign("00200", "för"));
    lex.insert_sign("står", sign("00201", "står"));
    lex.insert_sign("jag", sign("00300", "jag"));
    lex.insert_inflection("förstår", "förstå");
    lex.add_idioms(vec![
        IdiomPhrase {
            phrase: "ha koll".to_string(),
            id: "09000".to_string(),
            synonyms: Vec::new(),
        },
        IdiomPhrase {
            phrase: "koll på".to_string(),
            id: "09001".to_string(),
            synonyms: Vec::new(),
        },
    ]);
    lex
}

fn pipeline() -> SignPipeline {
    SignPipeline::new(lexicon(), PipelineConfig::default()).unwrap()
}

#[test]
fn exact_match_beats_suffix_stripping() {
    let candidate = pipeline().resolve("bilar").unwrap();
    assert_eq!(candidate.method, Method::Exact);
    assert_eq!(candidate.base, "bilar");
    assert_eq!(candidate.signs.unwrap()[0].id, "00101");
}

#[test]
fn inflected_word_is_never_split() {
    let candidate = pipeline().resolve("förstår").unwrap();
    assert!(!candidate.is_compound);
    assert_eq!(candidate.base, "förstå");
    assert!(candidate.signs.is_none());
    assert!(matches!(candidate.method, Method::InflectionWithoutSign { .. }));

    // Without the inflection entry the same token splits.
    let mut bare_lex = LexiconRepository::new();
    bare_lex.insert_sign("för", sign("00200", "för"));
    bare_lex.insert_sign("står", sign("00201", "står"));
    let bare = SignPipeline::new(bare_lex, PipelineConfig::default()).unwrap();
    let split = bare.resolve("förstår").unwrap();
    assert!(split.is_compound);
    assert_eq!(split.base, "för+står");
    assert_eq!(split.parts, vec!["för", "står"]);
    let ids: Vec<&str> = split.signs.as_ref().unwrap().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["00200", "00201"]);
}

#[test]
fn second_resolve_is_served_from_cache() {
    let pipeline = pipeline();
    let first = pipeline.resolve("Bilar");
    let second = pipeline.resolve("bilar");
    assert_eq!(first, second);

    let stats = pipeline.cache_stats();
    assert_eq!(stats.misses(), 1);
    assert_eq!(stats.hits(), 1);
}

#[test]
fn unresolved_results_are_cached_too() {
    let pipeline = pipeline();
    assert!(pipeline.resolve("qwxz").is_none());
    assert!(pipeline.resolve("qwxz").is_none());
    assert_eq!(pipeline.cache_stats().misses(), 1);
}

#[test]
fn least_recently_used_token_is_evicted() {
    let pipeline = pipeline();
    for i in 0..501 {
        assert!(pipeline.resolve(&format!("okänd{i}")).is_none());
    }
    assert_eq!(pipeline.cache_stats().misses(), 501);
    assert!(!pipeline.is_cached("okänd0"));
    assert!(pipeline.is_cached("okänd1"));
    assert!(pipeline.is_cached("okänd500"));

    pipeline.resolve("okänd0");
    assert_eq!(pipeline.cache_stats().misses(), 502);
    assert!(pipeline.is_cached("okänd0"));
    assert!(!pipeline.is_cached("okänd1"));
}

#[test]
fn overlapping_phrases_are_not_both_accepted() {
    let lex = lexicon();
    let matcher = PhraseMatcher::new(4);

    let matches = matcher.find_matches("jag ha koll på läget", lex.idioms());
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].phrase, "ha koll");

    let matches = matcher.find_matches("jag har koll på läget", lex.idioms());
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].id, "09001");
}

#[test]
fn ranking_is_stable() {
    let signs = vec![sign("A", "a"), sign("B", "b"), sign("C", "c")];
    let mut prefs = PreferenceStore::new();

    let ids = |ranked: Vec<Sign>| ranked.into_iter().map(|s| s.id).collect::<Vec<_>>();
    assert_eq!(ids(prefs.rank(&signs, "ord")), vec!["A", "B", "C"]);

    prefs.increment("ord", "B", 5);
    assert_eq!(ids(prefs.rank(&signs, "ord")), vec!["B", "A", "C"]);
}

#[test]
fn primary_sign_moves_to_front() {
    let mut lex = LexiconRepository::new();
    lex.insert_sign("hus", sign("1", "hus"));
    lex.insert_sign("hus", sign("2", "hus"));
    let mut pipeline = SignPipeline::new(lex, PipelineConfig::default()).unwrap();

    pipeline.vote("hus", "1");
    pipeline.set_primary("hus", "2");
    let entry = &pipeline.search("hus")[0];
    assert_eq!(entry.signs.as_ref().unwrap()[0].id, "2");

    pipeline.clear_feedback();
    assert_eq!(pipeline.resolve("hus").unwrap().signs.unwrap()[0].id, "1");
}

#[test]
fn time_word_leads_the_gloss() {
    let gloss = pipeline().gloss("Igår åkte jag till skolan");
    assert!(gloss.starts_with("IGÅR "));
    assert_eq!(gloss, "IGÅR ÅKTE JAG SKOLAN.");
}

#[test]
fn negation_goes_before_terminator() {
    let pipeline = pipeline();
    assert!(pipeline.gloss("Jag vill inte åka hem.").ends_with(" INTE."));
    assert!(pipeline.gloss("Aldrig mer kaffe").ends_with(" INTE."));
}

#[test]
fn question_and_statement_terminators() {
    let pipeline = pipeline();
    assert!(pipeline.gloss("Vad heter du?").ends_with('?'));
    assert!(pipeline.gloss("Jag heter Anna.").ends_with('.'));
}

#[test]
fn participle_is_protected() {
    let lemmatizer = Lemmatizer::new();
    assert_eq!(lemmatizer.lemmatize("sett", &LexiconRepository::new()), "SETT");
    assert_eq!(pipeline().gloss("Sett"), "SETT.");
}

#[test]
fn search_output_reconstructs_input() {
    let text = "Jag, ha koll på bilar!\n\tOkänt ord...";
    let entries = pipeline().search(text);
    let rebuilt: String = entries.iter().map(|e| e.original.as_str()).collect();
    assert_eq!(rebuilt, text);

    let genuine = entries.iter().find(|e| e.is_genuine).unwrap();
    assert_eq!(genuine.original, "ha koll");
    assert_eq!(genuine.genuine_id.as_deref(), Some("09000"));
    assert_eq!(genuine.rationale.as_deref(), Some("Genuine sign: ha koll"));
}

#[test]
fn dash_is_a_delimiter_entry() {
    let entries = pipeline().search("jag – bil");
    let dash = entries.iter().find(|e| e.original == "–").unwrap();
    assert!(!dash.is_word);
    assert!(dash.signs.is_none());
}

#[test]
fn sentences_split_on_terminators_and_newlines() {
    let sentences = pipeline().sentences("Jag går. Du går?\nHej");
    assert_eq!(sentences.len(), 3);
    assert!(sentences.iter().all(|s| s.iter().any(|e| e.is_word)));
}

#[test]
fn fallback_is_gated_by_ai_mode() {
    let strategy = |token: &str, context: &str| -> Result<Option<Candidate>> {
        assert_eq!(context, "jag zzyzx");
        Ok(Some(Candidate {
            signs: Some(vec![Sign::new("ai-1", token)]),
            base: token.to_string(),
            method: Method::Exact,
            is_compound: false,
            parts: Vec::new(),
        }))
    };
    let mut pipeline = pipeline().with_fallback(Box::new(strategy));

    let entries = pipeline.search("jag zzyzx");
    assert_eq!(entries[2].rationale.as_deref(), Some("No match"));

    pipeline.set_ai_enabled(true);
    let entries = pipeline.search("jag zzyzx");
    assert_eq!(entries[2].signs.as_ref().unwrap()[0].id, "ai-1");
    // Local resolution is untouched by the fallback.
    assert_eq!(entries[0].rationale.as_deref(), Some("Exact match"));
}

#[test]
fn lexicon_updates_invalidate_cached_misses() {
    let mut pipeline = pipeline();
    assert!(pipeline.resolve("tåg").is_none());
    pipeline.update_lexicon(|lex| lex.insert_sign("tåg", sign("00400", "tåg")));
    assert_eq!(pipeline.resolve("tåg").unwrap().method, Method::Exact);
}

#[test]
fn fuzzy_stays_off_by_default() {
    let default = pipeline();
    assert!(default.resolve("jagg").is_none());

    let config = PipelineConfig {
        enable_fuzzy: true,
        fuzzy_min_length: 3,
        ..PipelineConfig::default()
    };
    let fuzzy = SignPipeline::new(lexicon(), config).unwrap();
    let candidate = fuzzy.resolve("jagg").unwrap();
    assert_eq!(candidate.base, "jag");
    assert!(matches!(candidate.method, Method::Fuzzy { distance: 1, .. }));
}

#[test]
fn concurrent_resolution_shares_the_cache() {
    let pipeline = pipeline();
    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for word in ["bil", "bilar", "jag", "okänd"] {
                    pipeline.resolve(word);
                }
            });
        }
    });
    let stats = pipeline.cache_stats();
    assert_eq!(stats.hits() + stats.misses(), 16);
    assert!(stats.misses() >= 4);
}

#[test]
fn invalid_config_is_rejected() {
    let config = PipelineConfig {
        max_phrase_words: 1,
        ..PipelineConfig::default()
    };
    assert!(SignPipeline::new(LexiconRepository::new(), config).is_err());
    assert!(PipelineConfig::from_json_str(r#"{"cache_capacity": 0}"#).is_err());
}
