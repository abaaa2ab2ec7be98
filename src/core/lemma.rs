// src/core/lemma.rs
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Single-word base form lookup. Candidates are ordered best first;
/// the normalizer only ever uses the first one.
pub trait Lemmatizer {
    fn lemma_of(&self, word: &str) -> Vec<String>;

    fn first_lemma(&self, word: &str) -> Option<String> {
        self.lemma_of(word).into_iter().next()
    }
}

/// Offers no candidates, so every word is kept as it is.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityLemmatizer;

impl Lemmatizer for IdentityLemmatizer {
    fn lemma_of(&self, _word: &str) -> Vec<String> {
        Vec::new()
    }
}

/// A word -> candidates table, usually loaded from `lemmas.json`.
///
/// Keys are lowercase words. For normalization to stay idempotent the
/// first candidate of every entry should map to itself (or be absent).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LemmaTable {
    forms: HashMap<String, Vec<String>>,
}

impl LemmaTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, word: &str, candidates: &[&str]) {
        self.forms.insert(
            word.to_string(),
            candidates.iter().map(|c| c.to_string()).collect(),
        );
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

impl Lemmatizer for LemmaTable {
    fn lemma_of(&self, word: &str) -> Vec<String> {
        self.forms.get(word).cloned().unwrap_or_default()
    }
}
