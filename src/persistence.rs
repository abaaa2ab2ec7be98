// File: src/persistence.rs
use crate::core::catalog::Catalog;
use crate::core::lemma::{IdentityLemmatizer, LemmaTable, Lemmatizer};
use crate::core::types::{LookupEntry, PhraseRecord};
use crate::error::Result;
use serde::de::DeserializeOwned;
use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)?;
    let value = serde_json::from_reader(BufReader::new(file))?;
    debug!(path = %path.display(), "document read");
    Ok(value)
}

pub fn load_phrases(path: &Path) -> Result<Vec<PhraseRecord>> {
    read_json(path)
}

pub fn load_lookups(path: &Path) -> Result<Vec<LookupEntry>> {
    read_json(path)
}

/// Reads both documents eagerly and validates them against each other.
pub fn load_catalog(phrases: &Path, lookups: &Path) -> Result<Catalog> {
    Catalog::new(load_phrases(phrases)?, load_lookups(lookups)?)
}

/// The configured lemma table, or the identity lemmatizer when there is none.
pub fn load_lemmatizer(path: Option<&Path>) -> Result<Box<dyn Lemmatizer>> {
    match path {
        Some(path) => {
            let table: LemmaTable = read_json(path)?;
            info!(path = %path.display(), words = table.len(), "lemma table loaded");
            Ok(Box::new(table))
        }
        None => Ok(Box::new(IdentityLemmatizer)),
    }
}

/// Replaces `path` with `text` atomically: written to a temp file beside it, then renamed.
pub fn write_lookup_document(path: &Path, text: &str) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let mut temp_file = NamedTempFile::new_in(parent_dir)?;
    temp_file.write_all(text.as_bytes())?;
    temp_file.flush()?;
    temp_file.persist(path).map_err(|e| e.error)?;

    info!(path = %path.display(), bytes = text.len(), "lookup document written");
    Ok(())
}
