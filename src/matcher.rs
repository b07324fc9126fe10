//! Token matching and ranking.
//!
//! Takes the output of an external morphological segmenter, regroups
//! inflection fragments the segmenter split apart ("食べ|まし|た"), looks
//! the recovered spans up in the [`Dictionary`] and ranks the candidates
//! against the segmenter's own POS and reading.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::trace;
use unicode_normalization::UnicodeNormalization;

use crate::dictionary::Dictionary;
use crate::entry::{collapse_pos, Entry};
use crate::kana::normalize_reading;

/// Sentence terminator in MeCab output
pub const EOS: &str = "EOS";

/// Feature value for "not applicable"
const NO_FEATURE: &str = "*";

/// Index of the coarse POS in a MeCab/IPADIC feature list
const FEATURE_POS: usize = 0;
/// Index of the conjugation type
const FEATURE_CONJUGATION_TYPE: usize = 4;
/// Index of the katakana reading
const FEATURE_READING: usize = 7;

/// IPADIC coarse tags and their dictionary counterparts
const IPADIC_POS: &[(&str, &str)] = &[
    ("名詞", "N"),
    ("動詞", "V"),
    ("形容詞", "A"),
    ("副詞", "ADV"),
    ("助詞", "PRT"),
    ("助動詞", "V"),
    ("連体詞", "ADN"),
    ("接続詞", "CONJ"),
    ("感動詞", "INTJ"),
    ("接頭詞", "PFX"),
    ("記号", "PUNCT"),
    ("フィラー", "INTJ"),
];

/// Map a segmenter POS tag to the dictionary's simplified tag.
///
/// IPADIC coarse tags are translated, verb subclasses collapse to `V` and
/// anything else passes through.
pub fn simplify_tokenizer_pos(tag: &str) -> &str {
    IPADIC_POS
        .iter()
        .find(|(ipadic, _)| *ipadic == tag)
        .map(|(_, simple)| *simple)
        .unwrap_or_else(|| collapse_pos(tag))
}

/// One token of segmenter output
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SegmentedToken {
    pub surface: String,
    pub reading: String,
    /// Coarse POS as given by the segmenter
    pub pos: String,
    /// Part of a conjugated chain
    pub inflection_fragment: bool,
}

impl SegmentedToken {
    pub fn new(
        surface: impl Into<String>,
        reading: impl Into<String>,
        pos: impl Into<String>,
        inflection_fragment: bool,
    ) -> Self {
        SegmentedToken {
            surface: surface.into(),
            reading: reading.into(),
            pos: pos.into(),
            inflection_fragment,
        }
    }

    /// Parse one line of MeCab/IPADIC output:
    /// `surface \t pos1,pos2,pos3,pos4,ctype,cform,base,reading,pron`.
    ///
    /// Returns `None` for `EOS`, blank lines and lines without features.
    /// Unknown words without a reading use the surface as reading.
    pub fn from_mecab_line(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(&['\r', '\n'][..]);
        if line.is_empty() || line == EOS {
            return None;
        }
        let (surface, features) = line.split_once('\t')?;
        let features: Vec<&str> = features.split(',').collect();

        let pos = features.get(FEATURE_POS).copied().unwrap_or_default();
        let fragment = features
            .get(FEATURE_CONJUGATION_TYPE)
            .is_some_and(|ctype| *ctype != NO_FEATURE && !ctype.is_empty());
        let reading = features
            .get(FEATURE_READING)
            .copied()
            .filter(|r| *r != NO_FEATURE && !r.is_empty())
            .unwrap_or(surface);

        Some(SegmentedToken::new(
            surface.nfc().collect::<String>(),
            reading,
            pos,
            fragment,
        ))
    }

    /// POS in the dictionary's tag set
    pub fn simplified_pos(&self) -> &str {
        simplify_tokenizer_pos(&self.pos)
    }
}

/// Split MeCab output into sentences of tokens
pub fn parse_mecab_output(output: &str) -> Vec<Vec<SegmentedToken>> {
    let mut sentences = Vec::new();
    let mut current = Vec::new();
    for line in output.lines() {
        if line.trim() == EOS {
            sentences.push(std::mem::take(&mut current));
        } else if let Some(token) = SegmentedToken::from_mecab_line(line) {
            current.push(token);
        }
    }
    if !current.is_empty() {
        sentences.push(current);
    }
    sentences
}

/// A recovered span and its ranked candidates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedSpan {
    pub surface: String,
    pub reading: String,
    /// Simplified POS of the span's first token
    pub pos: String,
    /// Index of the first consumed token
    pub start: usize,
    /// Number of consumed tokens
    pub len: usize,
    /// Candidates, best first; never empty
    pub candidates: Vec<Entry>,
}

impl MatchedSpan {
    /// Top-ranked candidate
    pub fn best(&self) -> Option<&Entry> {
        self.candidates.first()
    }

    /// Check if the span fell back to the out-of-vocabulary placeholder
    pub fn is_out_of_vocabulary(&self) -> bool {
        self.candidates.len() == 1 && self.candidates[0].is_out_of_vocabulary()
    }
}

/// Stable ranking: POS match, then reading match, then derived before lemma
pub fn rank_candidates(pos: &str, reading: &str, candidates: &mut [Entry]) {
    let pos = collapse_pos(pos);
    let reading = normalize_reading(reading);
    candidates.sort_by_cached_key(|entry| {
        (
            entry.simplified_pos() != pos,
            normalize_reading(&entry.pronunciation) != reading,
            !entry.is_derived(),
        )
    });
}

/// Matches segmenter output against a dictionary
pub struct Matcher {
    dictionary: Arc<Dictionary>,
}

impl Matcher {
    pub fn new(dictionary: Dictionary) -> Self {
        Matcher {
            dictionary: Arc::new(dictionary),
        }
    }

    /// Create a matcher over a shared dictionary
    pub fn with_arc(dictionary: Arc<Dictionary>) -> Self {
        Matcher { dictionary }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Match a whole token sequence, left to right
    pub fn match_tokens(&self, tokens: &[SegmentedToken]) -> Vec<MatchedSpan> {
        let mut spans = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            let (span, next_i) = self.match_at(tokens, i);
            spans.push(span);
            i = next_i;
        }
        spans
    }

    /// Ranked candidates for a surface, or the out-of-vocabulary placeholder
    pub fn lookup(&self, surface: &str, reading: &str, pos: &str) -> Vec<Entry> {
        let mut candidates: Vec<Entry> = self.dictionary.lookup(surface).into_iter().cloned().collect();
        if candidates.is_empty() {
            return vec![Entry::out_of_vocabulary(surface, reading, pos)];
        }
        rank_candidates(pos, reading, &mut candidates);
        candidates
    }

    /// Find the longest fragment run starting at `start` that the
    /// dictionary knows, falling back to the single token
    fn match_at(&self, tokens: &[SegmentedToken], start: usize) -> (MatchedSpan, usize) {
        let first = &tokens[start];
        let pos = first.simplified_pos().to_string();

        let run = if first.inflection_fragment {
            tokens[start..].iter().take_while(|t| t.inflection_fragment).count()
        } else {
            1
        };

        for len in (2..=run).rev() {
            let chain = &tokens[start..start + len];
            let surface: String = chain.iter().map(|t| t.surface.as_str()).collect();
            if !self.dictionary.contains_form(&surface) {
                continue;
            }
            let reading: String = chain.iter().map(|t| t.reading.as_str()).collect();
            trace!(surface = %surface, len, "Recovered inflected span");
            let candidates = self.lookup(&surface, &reading, &pos);
            return (
                MatchedSpan {
                    surface,
                    reading,
                    pos,
                    start,
                    len,
                    candidates,
                },
                start + len,
            );
        }

        let candidates = self.lookup(&first.surface, &first.reading, &pos);
        (
            MatchedSpan {
                surface: first.surface.clone(),
                reading: first.reading.clone(),
                pos,
                start,
                len: 1,
                candidates,
            },
            start + 1,
        )
    }
}
