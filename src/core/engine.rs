use crate::config::CatalogPaths;
use crate::core::builder::regenerate_document;
use crate::core::catalog::Catalog;
use crate::core::lemma::{IdentityLemmatizer, Lemmatizer};
use crate::core::normalizer::{normalize_bytes, normalize_with};
use crate::core::types::{LookupEntry, MatchResult, PhraseIndex, PhraseRecord};
use crate::error::Result;
use crate::persistence::{load_catalog, load_lemmatizer};
use serde::Serialize;

/// Normalized query text together with every catalog entry it references.
#[derive(Debug, Serialize)]
pub struct Scan<'a> {
    pub text: String,
    pub matches: Vec<MatchResult<'a>>,
}

// The engine is the loaded catalog plus the lemmatizer queries are normalized with.
pub struct JargonEngine {
    catalog: Catalog,
    lemmatizer: Box<dyn Lemmatizer>,
}

impl JargonEngine {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_lemmatizer(catalog, Box::new(IdentityLemmatizer))
    }

    pub fn with_lemmatizer(catalog: Catalog, lemmatizer: Box<dyn Lemmatizer>) -> Self {
        Self { catalog, lemmatizer }
    }

    /// Loads both documents (and the lemma table, if configured) from disk.
    /// Refuses to start on misaligned data.
    pub fn open(paths: &CatalogPaths) -> Result<Self> {
        let catalog = load_catalog(&paths.phrases, &paths.lookup)?;
        let lemmatizer = load_lemmatizer(paths.lemmas.as_deref())?;
        Ok(Self::with_lemmatizer(catalog, lemmatizer))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn normalize(&self, text: &str) -> String {
        normalize_with(text, self.lemmatizer.as_ref())
    }

    pub fn fetch_phrase(&self, index: PhraseIndex) -> Result<&PhraseRecord> {
        self.catalog.fetch_phrase(index)
    }

    pub fn fetch_lookup(&self, index: PhraseIndex) -> Result<&LookupEntry> {
        self.catalog.fetch_lookup(index)
    }

    pub fn most_relevant_entry(&self) -> Option<&LookupEntry> {
        self.catalog.most_relevant_entry()
    }

    /// `text` must already be normalized.
    pub fn find_matches(&self, text: &str) -> Vec<MatchResult<'_>> {
        self.catalog.find_matches(text)
    }

    /// Normalizes raw text, then finds every entry it references.
    pub fn scan(&self, raw: &str) -> Scan<'_> {
        let text = self.normalize(raw);
        let matches = self.catalog.find_matches(&text);
        Scan { text, matches }
    }

    pub fn scan_bytes(&self, raw: &[u8]) -> Result<Scan<'_>> {
        let text = normalize_bytes(raw, self.lemmatizer.as_ref())?;
        let matches = self.catalog.find_matches(&text);
        Ok(Scan { text, matches })
    }

    /// Recomputes the lookup document from the loaded phrase records.
    pub fn regenerate(&self) -> Result<String> {
        regenerate_document(self.catalog.phrases(), self.lemmatizer.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::build;
    use crate::core::lemma::LemmaTable;

    fn engine_with(table: LemmaTable) -> JargonEngine {
        let phrases: Vec<PhraseRecord> = serde_json::from_str(
            r#"[
                {"phrase": "Covered Claim", "meaning": "a claim the policy pays", "acronyms": ["CC"]},
                {"phrase": "Subrogation", "meaning": "recovery from a third party"}
            ]"#,
        )
        .unwrap();
        let lookups = build(&phrases, &table).unwrap();
        JargonEngine::with_lemmatizer(Catalog::new(phrases, lookups).unwrap(), Box::new(table))
    }

    #[test]
    fn scan_normalizes_with_the_same_lemmatizer_as_the_build() {
        let mut table = LemmaTable::new();
        table.insert("claims", &["claim"]);
        let engine = engine_with(table);

        let scan = engine.scan("Two Covered Claims, pending.");
        assert_eq!(scan.text, "two covered claim pending");
        assert_eq!(scan.matches.len(), 1);
        assert_eq!(scan.matches[0].lookup.index, 0);
        assert_eq!(scan.matches[0].locations[0].slice(&scan.text), Some("covered claim"));
    }

    #[test]
    fn scan_bytes_rejects_non_text() {
        let engine = engine_with(LemmaTable::new());
        assert!(engine.scan_bytes(&[0xc3, 0x28]).is_err());
        assert_eq!(engine.scan_bytes(b"SUBROGATION!").unwrap().matches.len(), 1);
    }

    #[test]
    fn regenerate_reproduces_the_loaded_lookups() {
        let engine = engine_with(LemmaTable::new());
        let text = engine.regenerate().unwrap();
        let lookups: Vec<LookupEntry> = serde_json::from_str(&text).unwrap();
        assert_eq!(lookups.as_slice(), engine.catalog().lookups());
    }
}
