// File: src/loader.rs
use crate::core::lexicon::LexiconRepository;
use crate::core::types::{IdiomPhrase, Sign};
use crate::errors::{GlosaError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{info, warn};

/// A sign row as stored in the bundle. Both fields are optional here so that
/// a broken row can be skipped instead of failing the whole document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignRow {
    pub id: Option<String>,
    pub word: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdiomRow {
    #[serde(alias = "tecken")]
    pub phrase: Option<String>,
    pub id: Option<String>,
    #[serde(default, alias = "synonymer")]
    pub synonyms: Vec<String>,
}

/// The on-disk lexicon bundle the host ships with the app.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LexiconBundle {
    pub lexicon: HashMap<String, Vec<SignRow>>,
    pub user_signs: HashMap<String, Vec<SignRow>>,
    pub inflections: HashMap<String, String>,
    pub gloss_variants: HashMap<String, String>,
    pub aliases: HashMap<String, String>,
    pub idioms: Vec<IdiomRow>,
}

/// Counts from turning a bundle into a repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub signs: usize,
    pub idioms: usize,
    pub skipped: usize,
}

impl LexiconBundle {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// A bundle document must be a JSON object; every section is optional.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        if !value.is_object() {
            return Err(GlosaError::invalid_format(
                "bundle",
                "the document root must be a JSON object",
            ));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Builds the lookup tables. Malformed rows are logged and skipped.
    pub fn into_repository(self) -> (LexiconRepository, LoadReport) {
        let mut repo = LexiconRepository::new();
        let mut report = LoadReport::default();

        for (key, rows) in self.lexicon {
            for sign in valid_signs(&key, rows, &mut report) {
                tally(repo.insert_sign(&key, sign), &mut report);
            }
        }
        for (key, rows) in self.user_signs {
            for sign in valid_signs(&key, rows, &mut report) {
                tally(repo.insert_user_sign(&key, sign), &mut report);
            }
        }

        let mappings = [
            ("inflection", self.inflections, LexiconRepository::insert_inflection as MappingInsert),
            ("gloss variant", self.gloss_variants, LexiconRepository::insert_gloss_variant as MappingInsert),
            ("alias", self.aliases, LexiconRepository::insert_alias as MappingInsert),
        ];
        for (table, rows, insert) in mappings {
            for (from, to) in rows {
                if !insert(&mut repo, &from, &to) {
                    warn!("skipping malformed {} row: {:?} -> {:?}", table, from, to);
                    report.skipped += 1;
                }
            }
        }

        let mut idioms = Vec::with_capacity(self.idioms.len());
        for row in self.idioms {
            match (row.phrase, row.id) {
                (Some(phrase), Some(id)) if !phrase.trim().is_empty() && !id.trim().is_empty() => {
                    idioms.push(IdiomPhrase {
                        phrase,
                        id,
                        synonyms: row.synonyms,
                    });
                }
                (phrase, id) => {
                    warn!("skipping malformed idiom: phrase={:?} id={:?}", phrase, id);
                    report.skipped += 1;
                }
            }
        }
        report.idioms = idioms.len();
        repo.add_idioms(idioms);

        info!(
            "lexicon loaded: {} signs, {} idioms, {} rows skipped",
            report.signs, report.idioms, report.skipped
        );
        (repo, report)
    }
}

type MappingInsert = fn(&mut LexiconRepository, &str, &str) -> bool;

fn present(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.trim().is_empty())
}

/// Keeps rows carrying both an id and a word. Rows are counted once they are
/// actually inserted, see `tally`.
fn valid_signs(key: &str, rows: Vec<SignRow>, report: &mut LoadReport) -> Vec<Sign> {
    rows.into_iter()
        .filter_map(|row| match (present(row.id), present(row.word)) {
            (Some(id), Some(word)) => Some(Sign { id, word }),
            (id, word) => {
                warn!("skipping malformed sign under '{}': id={:?} word={:?}", key, id, word);
                report.skipped += 1;
                None
            }
        })
        .collect()
}

fn tally(inserted: bool, report: &mut LoadReport) {
    if inserted {
        report.signs += 1;
    } else {
        warn!("skipping sign under an empty key");
        report.skipped += 1;
    }
}

pub fn load_bundle(path: &Path) -> Result<LexiconBundle> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    LexiconBundle::from_value(serde_json::from_reader(reader)?)
}

/// Reads a bundle from disk straight into a repository.
pub fn load_repository(path: &Path) -> Result<(LexiconRepository, LoadReport)> {
    Ok(load_bundle(path)?.into_repository())
}
