// src/core/catalog.rs
use crate::core::connections::verify_connections;
use crate::core::search::find_matches;
use crate::core::types::{LookupEntry, MatchResult, PhraseIndex, PhraseRecord};
use crate::error::{CatalogError, Result};
use tracing::info;

/// The phrase table and its lookup table, positionally aligned and read-only.
///
/// Built once per loaded dataset; the most relevant entry is resolved here
/// rather than on every request.
#[derive(Debug, Clone)]
pub struct Catalog {
    phrases: Vec<PhraseRecord>,
    lookups: Vec<LookupEntry>,
    most_relevant: Option<PhraseIndex>,
}

impl Catalog {
    /// Validates the two tables against each other and takes ownership.
    pub fn new(phrases: Vec<PhraseRecord>, lookups: Vec<LookupEntry>) -> Result<Self> {
        if phrases.len() != lookups.len() {
            return Err(CatalogError::integrity(format!(
                "{} phrase records but {} lookup entries",
                phrases.len(),
                lookups.len()
            )));
        }

        for (position, lookup) in lookups.iter().enumerate() {
            if lookup.index != position {
                return Err(CatalogError::integrity(format!(
                    "lookup entry at position {position} claims index {}",
                    lookup.index
                )));
            }
            if (lookup.relevance as usize) < lookup.lemmas.len() {
                return Err(CatalogError::integrity(format!(
                    "lookup entry {position} has relevance {} below its {} lemmas",
                    lookup.relevance,
                    lookup.lemmas.len()
                )));
            }
        }
        verify_connections(&lookups)?;

        let most_relevant = most_relevant_index(&lookups);
        info!(entries = lookups.len(), ?most_relevant, "catalog loaded");

        Ok(Self { phrases, lookups, most_relevant })
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn phrases(&self) -> &[PhraseRecord] {
        &self.phrases
    }

    pub fn lookups(&self) -> &[LookupEntry] {
        &self.lookups
    }

    pub fn fetch_phrase(&self, index: PhraseIndex) -> Result<&PhraseRecord> {
        self.phrases.get(index).ok_or(CatalogError::IndexOutOfRange { index, len: self.len() })
    }

    pub fn fetch_lookup(&self, index: PhraseIndex) -> Result<&LookupEntry> {
        self.lookups.get(index).ok_or(CatalogError::IndexOutOfRange { index, len: self.len() })
    }

    /// Highest relevance in the table, first one wins a tie. `None` when empty.
    pub fn most_relevant_entry(&self) -> Option<&LookupEntry> {
        self.most_relevant.map(|i| &self.lookups[i])
    }

    /// Resolves an entry's connections to the lookup entries they point at.
    pub fn expand_connections(&self, entry: &LookupEntry) -> Vec<&LookupEntry> {
        entry
            .connections()
            .iter()
            .filter_map(|c| self.lookups.get(c.index))
            .collect()
    }

    /// See [`find_matches`]; `text` must already be normalized.
    pub fn find_matches(&self, text: &str) -> Vec<MatchResult<'_>> {
        find_matches(text, &self.lookups)
    }
}

fn most_relevant_index(lookups: &[LookupEntry]) -> Option<PhraseIndex> {
    let mut best: Option<(PhraseIndex, u32)> = None;
    for (i, lookup) in lookups.iter().enumerate() {
        match best {
            Some((_, top)) if lookup.relevance <= top => {}
            _ => best = Some((i, lookup.relevance)),
        }
    }
    best.map(|(i, _)| i)
}
