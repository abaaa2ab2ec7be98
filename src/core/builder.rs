// src/core/builder.rs
use crate::core::connections::{connect, relevance};
use crate::core::lemma::Lemmatizer;
use crate::core::normalizer::normalize_with;
use crate::core::types::{LookupEntry, Lemmas, PhraseRecord};
use crate::error::Result;
use tracing::{info, warn};

fn lookup_for<L: Lemmatizer + ?Sized>(index: usize, record: &PhraseRecord, lemmatizer: &L) -> LookupEntry {
    let lemmas = Lemmas {
        phrase: normalize_with(&record.phrase, lemmatizer),
        meaning: normalize_with(&record.meaning, lemmatizer),
        category: record.category.as_deref().map(|c| normalize_with(c, lemmatizer)),
    };
    if lemmas.iter().any(str::is_empty) {
        warn!(index, phrase = %record.phrase, "record has a field that normalizes to nothing");
    }

    LookupEntry {
        lemmas,
        acronyms: record.acronyms.clone(),
        index,
        connections: None,
        relevance: 0,
    }
}

/// Rebuilds the full lookup table from the phrase records.
///
/// Connections need every entry to exist first, so this always runs over the
/// whole batch. The result is meant to replace the persisted lookup document.
pub fn build<L: Lemmatizer + ?Sized>(records: &[PhraseRecord], lemmatizer: &L) -> Result<Vec<LookupEntry>> {
    let mut entries: Vec<LookupEntry> = records
        .iter()
        .enumerate()
        .map(|(i, record)| lookup_for(i, record, lemmatizer))
        .collect();

    connect(&mut entries, records)?;

    for entry in entries.iter_mut() {
        entry.relevance = relevance(entry);
    }

    let connected = entries.iter().filter(|e| e.connections.is_some()).count();
    info!(entries = entries.len(), connected, "lookup table rebuilt");
    Ok(entries)
}

/// Renders entries as a lookup document: one compact object per line.
pub fn render_lookup_document(entries: &[LookupEntry]) -> Result<String> {
    let lines = entries
        .iter()
        .map(serde_json::to_string)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    if lines.is_empty() {
        return Ok("[]\n".to_string());
    }
    Ok(format!("[\n  {}\n]\n", lines.join(",\n  ")))
}

/// Batch regeneration: phrase records in, lookup document text out.
/// Nothing is written; the operator decides where the text goes.
pub fn regenerate_document<L: Lemmatizer + ?Sized>(records: &[PhraseRecord], lemmatizer: &L) -> Result<String> {
    render_lookup_document(&build(records, lemmatizer)?)
}
