// src/core/types.rs
use serde::{Deserialize, Serialize};

/// Position of a record in the phrase document. Also the join key into the lookup document.
pub type PhraseIndex = usize;

/// One raw catalog entry, loaded verbatim from the phrase document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseRecord {
    pub phrase: String,
    pub meaning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acronyms: Option<Vec<String>>,
}

/// Normalized forms of a record's phrase, meaning and (optional) category.
///
/// Serialized as a 2 or 3 element array: `[phrase, meaning, category?]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Lemmas {
    pub phrase: String,
    pub meaning: String,
    pub category: Option<String>,
}

impl Lemmas {
    pub fn len(&self) -> usize {
        if self.category.is_some() {
            3
        } else {
            2
        }
    }

    /// Every lemma in positional order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        [Some(self.phrase.as_str()), Some(self.meaning.as_str()), self.category.as_deref()]
            .into_iter()
            .flatten()
    }
}

impl TryFrom<Vec<String>> for Lemmas {
    type Error = String;

    fn try_from(values: Vec<String>) -> Result<Self, Self::Error> {
        let count = values.len();
        let mut values = values.into_iter();
        match (values.next(), values.next(), values.next(), count) {
            (Some(phrase), Some(meaning), category, 2 | 3) => Ok(Self { phrase, meaning, category }),
            _ => Err(format!("expected 2 or 3 lemmas, found {count}")),
        }
    }
}

impl From<Lemmas> for Vec<String> {
    fn from(lemmas: Lemmas) -> Self {
        let mut out = vec![lemmas.phrase, lemmas.meaning];
        out.extend(lemmas.category);
        out
    }
}

/// A directed relation edge. `phrase` is the target's raw phrase text, copied for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub index: PhraseIndex,
    pub phrase: String,
}

/// The normalized, cross-referenced derivative of a [`PhraseRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupEntry {
    pub lemmas: Lemmas,
    /// Acronyms copied verbatim from the source record; never normalized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acronyms: Option<Vec<String>>,
    pub index: PhraseIndex,
    /// Only present when at least one related entry was found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connections: Option<Vec<Connection>>,
    #[serde(default)]
    pub relevance: u32,
}

impl LookupEntry {
    pub fn acronyms(&self) -> &[String] {
        self.acronyms.as_deref().unwrap_or_default()
    }

    pub fn connections(&self) -> &[Connection] {
        self.connections.as_deref().unwrap_or_default()
    }

    pub fn is_connected_to(&self, index: PhraseIndex) -> bool {
        self.connections().iter().any(|c| c.index == index)
    }
}

/// Every non-overlapping occurrence of one needle in a text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    /// The needle as cataloged (lemma or acronym).
    pub matched: String,
    /// Byte offsets of each occurrence, ascending.
    pub indices: Vec<usize>,
    /// Byte length of one occurrence.
    pub span: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    pub index: usize,
    pub span: usize,
}

impl Location {
    /// The matched slice of the text this location was found in.
    pub fn slice<'t>(&self, text: &'t str) -> Option<&'t str> {
        text.get(self.index..self.index + self.span)
    }
}

/// A lookup entry referenced by a text, with every place it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult<'a> {
    pub lookup: &'a LookupEntry,
    pub locations: Vec<Location>,
}
