// File: src/config.rs
use std::path::{Path, PathBuf};

pub const PHRASES_FILE: &str = "phrases.json";
pub const LOOKUP_FILE: &str = "lookup.json";
pub const LEMMAS_FILE: &str = "lemmas.json";

/// Where the catalog documents live on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPaths {
    pub phrases: PathBuf,
    pub lookup: PathBuf,
    /// Optional word -> base form table. `None` means no lemmatization.
    pub lemmas: Option<PathBuf>,
}

impl CatalogPaths {
    /// Standard file names inside `dir`. The lemma table is only used if it exists.
    pub fn in_dir(dir: &Path) -> Self {
        let lemmas = dir.join(LEMMAS_FILE);
        Self {
            phrases: dir.join(PHRASES_FILE),
            lookup: dir.join(LOOKUP_FILE),
            lemmas: lemmas.is_file().then_some(lemmas),
        }
    }
}

/// Per-user data directory, e.g. `~/.local/share/jargon-graph` on Linux.
pub fn default_data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    path.push("jargon-graph");
    path
}
