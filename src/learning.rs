// File: src/learning.rs
use crate::core::types::Sign;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashMap;

/// Weight added by an ordinary thumbs-up.
pub const VOTE_WEIGHT: i64 = 1;
/// Weight added when the user marks a sign as the primary one.
pub const PRIMARY_WEIGHT: i64 = 999;

/// Learned per-key sign weights, owned by the host and mutated by feedback.
///
/// Weights only accumulate; `clear` is the sole way back to zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceStore {
    /// lookup key -> (sign id -> weight)
    weights: HashMap<String, HashMap<String, i64>>,
}

impl PreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The only write path. Returns the new accumulated weight.
    pub fn increment(&mut self, lookup_key: &str, sign_id: &str, amount: i64) -> i64 {
        let weight = self
            .weights
            .entry(lookup_key.to_string())
            .or_default()
            .entry(sign_id.to_string())
            .or_insert(0);
        *weight += amount;
        *weight
    }

    pub fn vote(&mut self, lookup_key: &str, sign_id: &str) -> i64 {
        self.increment(lookup_key, sign_id, VOTE_WEIGHT)
    }

    pub fn set_primary(&mut self, lookup_key: &str, sign_id: &str) -> i64 {
        self.increment(lookup_key, sign_id, PRIMARY_WEIGHT)
    }

    pub fn weight(&self, lookup_key: &str, sign_id: &str) -> i64 {
        self.weights
            .get(lookup_key)
            .and_then(|prefs| prefs.get(sign_id))
            .copied()
            .unwrap_or(0)
    }

    pub fn has_preferences(&self, lookup_key: &str) -> bool {
        self.weights.contains_key(lookup_key)
    }

    /// Drops every learned weight.
    pub fn clear(&mut self) {
        self.weights.clear();
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Orders `signs` by descending weight for `lookup_key`.
    ///
    /// The sort is stable: unweighted and equally weighted signs keep catalog order.
    pub fn rank(&self, signs: &[Sign], lookup_key: &str) -> Vec<Sign> {
        let Some(prefs) = self.weights.get(lookup_key) else {
            return signs.to_vec();
        };
        let mut ranked = signs.to_vec();
        ranked.sort_by_key(|sign| Reverse(prefs.get(&sign.id).copied().unwrap_or(0)));
        ranked
    }
}
