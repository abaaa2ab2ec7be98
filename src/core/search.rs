// src/core/search.rs
use crate::core::types::{Location, LookupEntry, Match, MatchResult};

/// Start offsets of every non-overlapping occurrence of `needle`, scanning
/// left to right and resuming after the end of each hit.
fn occurrences(haystack: &str, needle: &str) -> Vec<usize> {
    if needle.is_empty() {
        return Vec::new();
    }
    haystack.match_indices(needle).map(|(at, _)| at).collect()
}

fn record(found: &mut Vec<Match>, needle: &str, indices: Vec<usize>) {
    if !indices.is_empty() {
        found.push(Match {
            matched: needle.to_string(),
            indices,
            span: needle.len(),
        });
    }
}

/// True when the hit at `at..at + len` is not glued to a letter or digit on either side.
fn is_whole_token(text: &str, at: usize, len: usize) -> bool {
    let before = text[..at].chars().next_back();
    let after = text[at + len..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}

/// Non-overlapping acronym hits. An exact-case hit counts anywhere; a hit that
/// only matches after case folding must stand as its own token, so `PL` is
/// found in "pl" but not in "plan".
fn acronym_occurrences(text: &str, folded: &str, acronym: &str) -> Vec<usize> {
    let needle = acronym.to_ascii_lowercase();
    let mut indices = Vec::new();
    if needle.is_empty() {
        return indices;
    }

    let mut from = 0;
    while let Some(offset) = folded[from..].find(&needle) {
        let at = from + offset;
        if &text[at..at + needle.len()] == acronym || is_whole_token(text, at, needle.len()) {
            indices.push(at);
            from = at + needle.len();
        } else {
            from = at + needle.chars().next().map_or(1, char::len_utf8);
        }
    }
    indices
}

fn search_folded(text: &str, folded: &str, entry: &LookupEntry) -> Vec<Match> {
    let mut found = Vec::new();

    record(&mut found, &entry.lemmas.phrase, occurrences(text, &entry.lemmas.phrase));

    for acronym in entry.acronyms() {
        record(&mut found, acronym, acronym_occurrences(text, folded, acronym));
    }

    if let Some(category) = entry.lemmas.category.as_deref() {
        record(&mut found, category, occurrences(text, category));
    }

    found
}

/// Finds where one entry is referenced in already-normalized text.
///
/// Checked in order: the phrase lemma, each acronym, then the category
/// lemma. Lemmas match literally. Acronyms also match a lowercase token
/// (`e&o` for `E&O`). Needles with no hit are left out.
pub fn search(text: &str, entry: &LookupEntry) -> Vec<Match> {
    search_folded(text, &text.to_ascii_lowercase(), entry)
}

/// Every lookup entry referenced in `text`, in table order, with its
/// locations flattened needle by needle.
pub fn find_matches<'a>(text: &str, lookups: &'a [LookupEntry]) -> Vec<MatchResult<'a>> {
    let folded = text.to_ascii_lowercase();
    lookups
        .iter()
        .filter_map(|lookup| {
            let locations: Vec<Location> = search_folded(text, &folded, lookup)
                .into_iter()
                .flat_map(|m| {
                    let span = m.span;
                    m.indices.into_iter().map(move |index| Location { index, span })
                })
                .collect();
            (!locations.is_empty()).then_some(MatchResult { lookup, locations })
        })
        .collect()
}
