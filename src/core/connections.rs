// src/core/connections.rs
use crate::core::types::{Connection, LookupEntry, PhraseRecord};
use crate::error::{CatalogError, Result};
use std::collections::HashSet;
use tracing::debug;

/// True when both entries carry acronyms and share at least one.
fn share_acronym(a: &LookupEntry, b: &LookupEntry) -> bool {
    let (Some(left), Some(right)) = (&a.acronyms, &b.acronyms) else {
        return false;
    };
    if left.is_empty() || right.is_empty() {
        return false;
    }
    let left: HashSet<&str> = left.iter().map(String::as_str).collect();
    right.iter().any(|acr| left.contains(acr.as_str()))
}

/// True when any lemma of one entry contains any lemma of the other.
/// Empty lemmas never relate anything.
fn share_lemma(a: &LookupEntry, b: &LookupEntry) -> bool {
    a.lemmas.iter().filter(|l| !l.is_empty()).any(|left| {
        b.lemmas
            .iter()
            .filter(|r| !r.is_empty())
            .any(|right| left.contains(right) || right.contains(left))
    })
}

/// The relation between two distinct entries. Symmetric in its arguments.
pub fn related(a: &LookupEntry, b: &LookupEntry) -> bool {
    share_acronym(a, b) || share_lemma(a, b)
}

/// Discovers every relation in the set and records it on both endpoints.
///
/// Each unordered pair is compared once; since the outer loop visits entries
/// in ascending order, every edge list still comes out sorted by target.
/// Existing connections are replaced.
pub fn connect(entries: &mut [LookupEntry], phrases: &[PhraseRecord]) -> Result<()> {
    if entries.len() != phrases.len() {
        return Err(CatalogError::integrity(format!(
            "{} lookup entries for {} phrase records",
            entries.len(),
            phrases.len()
        )));
    }

    let mut edges: Vec<Vec<Connection>> = vec![Vec::new(); entries.len()];
    for i in 0..entries.len() {
        for j in (i + 1)..entries.len() {
            if related(&entries[i], &entries[j]) {
                edges[i].push(Connection { index: j, phrase: phrases[j].phrase.clone() });
                edges[j].push(Connection { index: i, phrase: phrases[i].phrase.clone() });
            }
        }
    }

    let mut total = 0;
    for (entry, found) in entries.iter_mut().zip(edges) {
        total += found.len();
        entry.connections = if found.is_empty() { None } else { Some(found) };
    }
    debug!(entries = entries.len(), edges = total, "connection graph built");

    verify_connections(entries)
}

/// Checks that edges are in range, never self-referential, and reciprocated.
pub fn verify_connections(entries: &[LookupEntry]) -> Result<()> {
    for (i, entry) in entries.iter().enumerate() {
        for conn in entry.connections() {
            if conn.index == i {
                return Err(CatalogError::integrity(format!("entry {i} connects to itself")));
            }
            let Some(target) = entries.get(conn.index) else {
                return Err(CatalogError::integrity(format!(
                    "entry {i} connects to missing entry {}",
                    conn.index
                )));
            };
            if !target.is_connected_to(i) {
                return Err(CatalogError::integrity(format!(
                    "entry {i} connects to {} but not the other way around",
                    conn.index
                )));
            }
        }
    }
    Ok(())
}

/// Lemma count plus acronym count plus connection count.
pub fn relevance(entry: &LookupEntry) -> u32 {
    (entry.lemmas.len() + entry.acronyms().len() + entry.connections().len()) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Lemmas;
    use proptest::prelude::*;

    fn entry(index: usize, lemmas: &[&str], acronyms: Option<&[&str]>) -> LookupEntry {
        let values: Vec<String> = lemmas.iter().map(|s| s.to_string()).collect();
        LookupEntry {
            lemmas: Lemmas::try_from(values).unwrap(),
            acronyms: acronyms.map(|a| a.iter().map(|s| s.to_string()).collect()),
            index,
            connections: None,
            relevance: 0,
        }
    }

    fn records(n: usize) -> Vec<PhraseRecord> {
        (0..n)
            .map(|i| PhraseRecord {
                phrase: format!("Phrase {i}"),
                meaning: String::new(),
                category: None,
                acronyms: None,
            })
            .collect()
    }

    #[test]
    fn shared_acronym_connects() {
        let a = entry(0, &["errors and omissions", "x"], Some(&["E&O", "EO"][..]));
        let b = entry(1, &["professional indemnity", "y"], Some(&["PI", "E&O"][..]));
        let c = entry(2, &["umbrella", "z"], None);
        assert!(related(&a, &b));
        assert!(!related(&a, &c));
    }

    #[test]
    fn lemma_containment_is_checked_both_ways_across_positions() {
        let a = entry(0, &["deductible", "amount paid before coverage"], None);
        let b = entry(1, &["coverage", "protection"], None);
        assert!(related(&a, &b));
        assert!(related(&b, &a));

        let cat_a = entry(0, &["aa", "bb", "property"], None);
        let cat_b = entry(1, &["cc", "dd", "property"], None);
        assert!(related(&cat_a, &cat_b));
    }

    #[test]
    fn empty_lemmas_do_not_connect() {
        let a = entry(0, &["", "alpha"], None);
        let b = entry(1, &["beta", ""], None);
        assert!(!related(&a, &b));
    }

    #[test]
    fn edges_are_sorted_reciprocal_and_carry_phrase_text() {
        let mut entries = vec![
            entry(0, &["premium", "price of cover"], None),
            entry(1, &["earned premium", "portion used"], None),
            entry(2, &["rider", "extra clause"], None),
            entry(3, &["written premium", "total booked"], None),
        ];
        connect(&mut entries, &records(4)).unwrap();

        let targets: Vec<usize> = entries[0].connections().iter().map(|c| c.index).collect();
        assert_eq!(targets, vec![1, 3]);
        assert_eq!(entries[0].connections()[1].phrase, "Phrase 3");
        assert!(entries[1].is_connected_to(0));
        assert!(entries[3].is_connected_to(0));
        assert_eq!(entries[2].connections, None);
    }

    #[test]
    fn connect_rejects_misaligned_phrases() {
        let mut entries = vec![entry(0, &["a", "b"], None)];
        assert!(matches!(
            connect(&mut entries, &records(2)),
            Err(CatalogError::DataIntegrity { .. })
        ));
    }

    #[test]
    fn verify_detects_one_sided_edges() {
        let mut entries = vec![entry(0, &["a", "b"], None), entry(1, &["c", "d"], None)];
        entries[0].connections = Some(vec![Connection { index: 1, phrase: "c".into() }]);
        assert!(verify_connections(&entries).is_err());

        entries[0].connections = Some(vec![Connection { index: 0, phrase: "a".into() }]);
        assert!(verify_connections(&entries).is_err());
    }

    #[test]
    fn relevance_adds_lemmas_acronyms_and_connections() {
        let mut e = entry(0, &["a", "b", "c"], Some(&["AB", "CD"][..]));
        e.connections = Some(vec![Connection { index: 1, phrase: "x".into() }]);
        assert_eq!(relevance(&e), 6);
        assert_eq!(relevance(&entry(1, &["a", "b"], None)), 2);
    }

    proptest! {
        #[test]
        fn connections_are_reciprocal_without_self_loops(
            lemmas in proptest::collection::vec(("[ab ]{1,4}", "[cd ]{1,4}"), 1..12)
        ) {
            let mut entries: Vec<LookupEntry> = lemmas
                .iter()
                .enumerate()
                .map(|(i, (p, m))| entry(i, &[p.as_str(), m.as_str()], None))
                .collect();
            let n = entries.len();
            connect(&mut entries, &records(n)).unwrap();
            for (i, e) in entries.iter().enumerate() {
                prop_assert!(!e.is_connected_to(i));
                for (j, other) in entries.iter().enumerate() {
                    prop_assert_eq!(e.is_connected_to(j), other.is_connected_to(i));
                }
            }
        }
    }
}
