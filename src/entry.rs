//! Dictionary entry representation.
//!
//! An Entry is either a lemma (the base dictionary form) or a derived form
//! produced by expanding a lemma under its paradigm. Derived entries point
//! back to their lemma by [`EntryId`], an index into the owning
//! [`Dictionary`](crate::Dictionary).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::inflection::InflectionCategory;
use crate::kana::is_punctuation;

/// Simplified POS tag for punctuation
pub const PUNCT: &str = "PUNCT";

/// POS reported by a segmenter that has no tag for a token
pub const UNKNOWN_POS: &str = "*";

/// Simplified POS tag shared by all verb subclasses
pub const VERB: &str = "V";

/// Gloss of the placeholder returned for unknown spans
pub const OUT_OF_VOCABULARY: &str = "[out-of-vocabulary]";

/// Gloss of the placeholder returned for unknown punctuation
pub const PUNCTUATION_MARK: &str = "[punctuation mark]";

/// Index of an entry inside a dictionary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryId(pub usize);

/// How an entry's paradigm was assigned
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "source", content = "name", rename_all = "lowercase")]
pub enum ParadigmTag {
    /// Given in the dump's `POS[paradigm]` tag
    Explicit(String),
    /// Inferred from POS hints and the pronunciation
    Inferred(String),
    /// Hand-assigned to an irregular lexeme
    Irregular(String),
}

impl ParadigmTag {
    /// The paradigm name, whatever its source
    pub fn name(&self) -> &str {
        match self {
            ParadigmTag::Explicit(name) | ParadigmTag::Inferred(name) | ParadigmTag::Irregular(name) => name,
        }
    }

    /// Check if the paradigm was inferred rather than given
    pub fn is_inferred(&self) -> bool {
        matches!(self, ParadigmTag::Inferred(_))
    }
}

/// Lemma or derived form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EntryKind {
    /// Base dictionary form
    #[default]
    Lemma,
    /// Inflected form of a lemma
    Derived {
        /// The lemma this form was generated from
        lemma: EntryId,
        /// The category whose rule produced it
        category: InflectionCategory,
    },
}

/// A single dictionary entry.
///
/// Equality is structural over everything but the difficulty marker, which
/// is derived from the form.
#[derive(Debug, Clone, Eq, Default, Serialize, Deserialize)]
pub struct Entry {
    /// Surface form (kanji and kana)
    pub form: String,

    /// Pronunciation (kana)
    pub pronunciation: String,

    /// Simplified part-of-speech tag, e.g. "N", "VT2", "A"
    pub pos: String,

    /// Inflection paradigm, if the entry inflects
    pub paradigm: Option<ParadigmTag>,

    /// Ordered glosses, best first
    pub glosses: Vec<String>,

    /// Per-character difficulty marker
    pub difficulty: String,

    /// Lemma or derived
    pub kind: EntryKind,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.form == other.form
            && self.pronunciation == other.pronunciation
            && self.pos == other.pos
            && self.paradigm == other.paradigm
            && self.glosses == other.glosses
            && self.kind == other.kind
    }
}

impl Entry {
    /// Create a lemma entry
    pub fn lemma(
        form: impl Into<String>,
        pronunciation: impl Into<String>,
        pos: impl Into<String>,
        paradigm: Option<ParadigmTag>,
        glosses: Vec<String>,
    ) -> Self {
        Entry {
            form: form.into(),
            pronunciation: pronunciation.into(),
            pos: pos.into(),
            paradigm,
            glosses,
            ..Default::default()
        }
    }

    /// Create a derived entry sharing POS, paradigm and glosses with its lemma
    pub fn derived(
        lemma: &Entry,
        lemma_id: EntryId,
        form: impl Into<String>,
        pronunciation: impl Into<String>,
        category: InflectionCategory,
    ) -> Self {
        Entry {
            form: form.into(),
            pronunciation: pronunciation.into(),
            pos: lemma.pos.clone(),
            paradigm: lemma.paradigm.clone(),
            glosses: lemma.glosses.clone(),
            difficulty: String::new(),
            kind: EntryKind::Derived {
                lemma: lemma_id,
                category,
            },
        }
    }

    /// Placeholder for a span with no dictionary match
    pub fn out_of_vocabulary(form: impl Into<String>, pronunciation: impl Into<String>, pos: impl Into<String>) -> Self {
        let form = form.into();
        let pos = pos.into();
        let untagged = pos.is_empty() || pos == UNKNOWN_POS;
        let gloss = if collapse_pos(&pos) == PUNCT || (untagged && is_punctuation(&form)) {
            PUNCTUATION_MARK
        } else {
            OUT_OF_VOCABULARY
        };
        Entry::lemma(form, pronunciation, pos, None, vec![gloss.to_string()])
    }

    /// Set the difficulty marker
    pub fn with_difficulty(mut self, marker: impl Into<String>) -> Self {
        self.difficulty = marker.into();
        self
    }

    /// Check if this is a derived (inflected) entry
    pub fn is_derived(&self) -> bool {
        matches!(self.kind, EntryKind::Derived { .. })
    }

    /// Check if this is a lemma entry
    pub fn is_lemma(&self) -> bool {
        self.kind == EntryKind::Lemma
    }

    /// The lemma a derived entry was generated from
    pub fn lemma_id(&self) -> Option<EntryId> {
        match self.kind {
            EntryKind::Derived { lemma, .. } => Some(lemma),
            EntryKind::Lemma => None,
        }
    }

    /// The category that produced a derived entry
    pub fn category(&self) -> Option<InflectionCategory> {
        match self.kind {
            EntryKind::Derived { category, .. } => Some(category),
            EntryKind::Lemma => None,
        }
    }

    /// Name of the paradigm, if any
    pub fn paradigm_name(&self) -> Option<&str> {
        self.paradigm.as_ref().map(ParadigmTag::name)
    }

    /// Check if the entry has a paradigm to inflect by
    pub fn inflects(&self) -> bool {
        self.paradigm.is_some()
    }

    /// POS with verb subclasses collapsed to [`VERB`]
    pub fn simplified_pos(&self) -> &str {
        collapse_pos(&self.pos)
    }

    /// Check if this is one of the out-of-vocabulary placeholders
    pub fn is_out_of_vocabulary(&self) -> bool {
        self.glosses.len() == 1
            && (self.glosses[0] == OUT_OF_VOCABULARY || self.glosses[0] == PUNCTUATION_MARK)
    }

    /// The `POS[paradigm]` tag as it appears in a dump row
    pub fn pos_tag(&self) -> String {
        match self.paradigm_name() {
            Some(name) => format!("{}[{}]", self.pos, name),
            None => self.pos.clone(),
        }
    }

    /// Glosses in the dump's numbered-list convention
    pub fn numbered_glosses(&self) -> String {
        self.glosses
            .iter()
            .enumerate()
            .map(|(i, g)| format!("{}) {}", i + 1, g))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Collapse verb subclass tags ("V1", "VI1", "VT2", "VB3", "VS") to "V".
///
/// Any other tag is returned unchanged.
pub fn collapse_pos(pos: &str) -> &str {
    let mut chars = pos.chars();
    if chars.next() != Some('V') {
        return pos;
    }
    let rest = chars.as_str();
    let letters = rest.chars().take_while(|c| c.is_ascii_uppercase()).count();
    let digits_only = rest[letters..].chars().all(|c| c.is_ascii_digit());
    if letters <= 1 && digits_only {
        VERB
    } else {
        pos
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}\t{}", self.form, self.pronunciation, self.pos, self.glosses.join("; "))?;
        if let Some(category) = self.category() {
            write!(f, "\t{}", category)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inochi() -> Entry {
        Entry::lemma("命", "いのち", "N", None, vec!["life".to_string(), "lifespan".to_string()])
    }

    #[test]
    fn test_lemma_creation() {
        let entry = inochi();
        assert!(entry.is_lemma());
        assert!(!entry.inflects());
        assert_eq!(entry.lemma_id(), None);
        assert_eq!(entry.category(), None);
    }

    #[test]
    fn test_derived_shares_lemma_data() {
        let lemma = Entry::lemma(
            "飛ぶ",
            "とぶ",
            "V1",
            Some(ParadigmTag::Explicit("go-bu".to_string())),
            vec!["to fly".to_string()],
        );
        let derived = Entry::derived(&lemma, EntryId(7), "飛ば", "とば", InflectionCategory::Imperfective);

        assert!(derived.is_derived());
        assert_eq!(derived.lemma_id(), Some(EntryId(7)));
        assert_eq!(derived.category(), Some(InflectionCategory::Imperfective));
        assert_eq!(derived.pos, "V1");
        assert_eq!(derived.paradigm_name(), Some("go-bu"));
        assert_eq!(derived.glosses, lemma.glosses);
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(inochi(), inochi());
        let other_reading = Entry::lemma("命", "みこと", "N", None, inochi().glosses);
        assert_ne!(inochi(), other_reading);

        let lemma = inochi();
        let a = Entry::derived(&lemma, EntryId(0), "x", "x", InflectionCategory::Terminal);
        let b = Entry::derived(&lemma, EntryId(1), "x", "x", InflectionCategory::Terminal);
        assert_ne!(a, b);

        // the difficulty marker is not part of an entry's identity
        assert_eq!(inochi().with_difficulty("1-0"), inochi().with_difficulty("0-0"));
    }

    #[test]
    fn test_paradigm_sources_are_distinguishable() {
        let explicit = ParadigmTag::Explicit("ichi".to_string());
        let inferred = ParadigmTag::Inferred("ichi".to_string());
        assert_eq!(explicit.name(), inferred.name());
        assert_ne!(explicit, inferred);
        assert!(inferred.is_inferred());
        assert!(!explicit.is_inferred());
    }

    #[test]
    fn test_collapse_pos() {
        assert_eq!(collapse_pos("V"), "V");
        assert_eq!(collapse_pos("V1"), "V");
        assert_eq!(collapse_pos("VI1"), "V");
        assert_eq!(collapse_pos("VT2"), "V");
        assert_eq!(collapse_pos("VB3"), "V");
        assert_eq!(collapse_pos("N"), "N");
        assert_eq!(collapse_pos("PRN"), "PRN");
        assert_eq!(collapse_pos("VERB"), "VERB");
        assert_eq!(collapse_pos(""), "");
    }

    #[test]
    fn test_out_of_vocabulary_placeholders() {
        let oov = Entry::out_of_vocabulary("ほげ", "ほげ", "N");
        assert_eq!(oov.glosses, vec![OUT_OF_VOCABULARY]);
        assert!(oov.is_out_of_vocabulary());

        let punct = Entry::out_of_vocabulary("。", "。", PUNCT);
        assert_eq!(punct.glosses, vec![PUNCTUATION_MARK]);

        // untagged tokens fall back to the surface
        let untagged = Entry::out_of_vocabulary("、", "、", UNKNOWN_POS);
        assert_eq!(untagged.glosses, vec![PUNCTUATION_MARK]);
        let untagged = Entry::out_of_vocabulary("ほげ", "ほげ", "");
        assert_eq!(untagged.glosses, vec![OUT_OF_VOCABULARY]);
        let tagged = Entry::out_of_vocabulary("、", "、", "N");
        assert_eq!(tagged.glosses, vec![OUT_OF_VOCABULARY]);
    }

    #[test]
    fn test_dump_formatting() {
        let entry = Entry::lemma(
            "妙",
            "みょう",
            "A",
            Some(ParadigmTag::Explicit("na".to_string())),
            vec!["strange".to_string(), "excellent".to_string()],
        );
        assert_eq!(entry.pos_tag(), "A[na]");
        assert_eq!(entry.numbered_glosses(), "1) strange 2) excellent");
        assert_eq!(format!("{}", entry), "妙\tみょう\tA\tstrange; excellent");
    }
}
