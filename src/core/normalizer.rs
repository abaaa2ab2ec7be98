// src/core/normalizer.rs
use crate::core::lemma::{IdentityLemmatizer, Lemmatizer};
use crate::error::{CatalogError, Result};

/// Characters that break words apart. The apostrophe is not one of them:
/// it is deleted so a possessive `'s` stays on its word.
const BREAKS: &[char] = &['[', ']', ',', '.', '(', ')', '/', '\\', '"'];

/// True for words made only of `A-Z` and `&`, at least two characters long.
/// Case sensitive: runs on the token before it is lowercased.
pub fn is_acronym(word: &str) -> bool {
    word.len() >= 2 && word.bytes().all(|b| b.is_ascii_uppercase() || b == b'&')
}

/// Canonicalizes text without base-form lookup.
pub fn normalize(text: &str) -> String {
    normalize_with(text, &IdentityLemmatizer)
}

/// Canonicalizes text so lemmas and queries compare literally.
///
/// Punctuation becomes a word break, except the apostrophe, which is deleted
/// so a possessive `'s` folds onto its word (`insurer's` -> `insurers`).
/// Acronyms keep their casing; every other word is lowercased and replaced
/// by its first lemma candidate, if any.
pub fn normalize_with<L: Lemmatizer + ?Sized>(text: &str, lemmatizer: &L) -> String {
    let stripped: String = text
        .chars()
        .filter(|&c| c != '\'')
        .map(|c| if BREAKS.contains(&c) { ' ' } else { c })
        .collect();

    stripped
        .split_whitespace()
        .map(|word| {
            if is_acronym(word) {
                word.to_string()
            } else {
                let lower = word.to_lowercase();
                lemmatizer.first_lemma(&lower).unwrap_or(lower)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Byte-level entry point for query text read from files or stdin.
pub fn normalize_bytes<L: Lemmatizer + ?Sized>(bytes: &[u8], lemmatizer: &L) -> Result<String> {
    let text = std::str::from_utf8(bytes).map_err(|e| CatalogError::InvalidInput {
        reason: format!("query is not UTF-8 text: {e}"),
    })?;
    Ok(normalize_with(text, lemmatizer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lemma::LemmaTable;
    use proptest::prelude::*;

    #[test]
    fn acronym_detection() {
        assert!(is_acronym("E&O"));
        assert!(is_acronym("HMO"));
        assert!(!is_acronym("A"));
        assert!(!is_acronym("Hmo"));
        assert!(!is_acronym("e&o"));
        assert!(!is_acronym("COBRA2"));
    }

    #[test]
    fn keeps_acronyms_and_lowercases_the_rest() {
        assert_eq!(normalize("Coverage for E&O claims"), "coverage for E&O claims");
    }

    #[test]
    fn collapses_possessives() {
        assert_eq!(normalize("the insurer's policy"), "the insurers policy");
    }

    #[test]
    fn strips_punctuation_and_whitespace() {
        assert_eq!(
            normalize("  Loss [Adjustment], (Expense).  \"Allocated\"\t\\ok/ "),
            "loss adjustment expense allocated ok"
        );
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" . , "), "");
    }

    #[test]
    fn punctuation_separates_words() {
        assert_eq!(normalize("and/or"), "and or");
        assert_eq!(normalize("E&O/GL limits"), "E&O GL limits");
        assert_eq!(normalize("deductible,coinsurance"), "deductible coinsurance");
    }

    #[test]
    fn hyphens_survive() {
        assert_eq!(normalize("Stop-Loss"), "stop-loss");
    }

    #[test]
    fn acronym_check_runs_after_punctuation_removal() {
        assert_eq!(normalize("(COBRA)"), "COBRA");
        assert_eq!(normalize("P.P.O."), "p p o");
    }

    #[test]
    fn applies_first_lemma_to_non_acronyms() {
        let mut table = LemmaTable::new();
        table.insert("claims", &["claim", "claims"]);
        table.insert("hmo", &["ignored"]);
        assert_eq!(normalize_with("Covered Claims for HMO", &table), "covered claim for HMO");
    }

    #[test]
    fn rejects_non_utf8_bytes() {
        let err = normalize_bytes(&[0x66, 0xff, 0x66], &IdentityLemmatizer).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidInput { .. }));
        assert_eq!(normalize_bytes(b"Net Premium", &IdentityLemmatizer).unwrap(), "net premium");
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(text in ".{0,64}") {
            let once = normalize(&text);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn normalize_is_idempotent_on_catalog_like_text(text in "[A-Za-z&',. ()]{0,48}") {
            let once = normalize(&text);
            prop_assert_eq!(normalize(&once), once);
        }
    }
}
