// File: src/explore.rs
use crate::core::catalog::Catalog;
use crate::core::types::PhraseIndex;
use crate::error::{CatalogError, Result};

/// The rows of entries shown while browsing the connection graph.
///
/// Row 0 holds the seed. Selecting an entry collapses its row to that entry,
/// drops every later row and appends the entry's connections as a new row.
/// An entry is shown at most once across the whole trail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trail {
    rows: Vec<Vec<PhraseIndex>>,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    /// A trail starting from the catalog's most relevant entry (empty for an empty catalog).
    pub fn seeded(catalog: &Catalog) -> Self {
        let mut trail = Self::new();
        if let Some(seed) = catalog.most_relevant_entry() {
            trail.rows.push(vec![seed.index]);
        }
        trail
    }

    pub fn rows(&self) -> &[Vec<PhraseIndex>] {
        &self.rows
    }

    pub fn is_shown(&self, index: PhraseIndex) -> bool {
        self.rows.iter().any(|row| row.contains(&index))
    }

    /// Selects the entry at `position` in `row` and returns the row appended for it.
    pub fn select(&mut self, catalog: &Catalog, row: usize, position: usize) -> Result<&[PhraseIndex]> {
        let Some(&chosen) = self.rows.get(row).and_then(|r| r.get(position)) else {
            return Err(CatalogError::InvalidInput {
                reason: format!("no entry at row {row}, position {position}"),
            });
        };

        self.rows.truncate(row + 1);
        self.rows[row] = vec![chosen];

        let lookup = catalog.fetch_lookup(chosen)?;
        let next: Vec<PhraseIndex> = catalog
            .expand_connections(lookup)
            .into_iter()
            .map(|entry| entry.index)
            .filter(|&index| !self.is_shown(index))
            .collect();
        if !next.is_empty() {
            self.rows.push(next);
        }

        Ok(self.rows.last().map(Vec::as_slice).unwrap_or_default())
    }
}
