//! Inflection expander.
//!
//! Turns a lemma and its paradigm into derived entries, one per rule. How
//! the stem is cut before a suffix is appended depends on the paradigm
//! family, see [`StemRule`].

use tracing::{trace, warn};

use crate::difficulty::DifficultyTable;
use crate::entry::{Entry, EntryId};
use crate::inflection::InflectionCategory;
use crate::kana::{char_from_end, drop_first_chars, drop_last_chars, is_kanji, remove_whitespace};
use crate::paradigm::{Paradigm, ParadigmStore, Rule};

/// Kanji spelling of the existential verb whose templates carry 有/無
const ARU_KANJI: &str = "有る";

/// Kanji spelling of the independent "to do"
const SURU_KANJI: &str = "為る";

/// Categories with no attested form for [`SURU_KANJI`]
const SURU_KANJI_MISSING: &[InflectionCategory] =
    &[InflectionCategory::Imperfective, InflectionCategory::Imperfective3];

/// How a lemma's stem is derived before a suffix is appended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StemRule {
    /// Drop this many trailing characters from form and pronunciation
    TrimFinal(usize),
    /// Append the suffix to the lemma unchanged
    Unmodified,
    /// The suffix is the whole irregular form
    SuffixIncludesStem,
    /// The suffix starts with the shifted stem mora
    VowelShift,
}

impl StemRule {
    /// Stem rule for a paradigm family
    pub fn for_paradigm(name: &str) -> Self {
        match name {
            "aru" | "suru-indep" => StemRule::SuffixIncludesStem,
            "kuru" => StemRule::VowelShift,
            // verbalizing する/ずる
            "suru" | "suru-i-ku" | "suru-tsu" | "zuru" => StemRule::TrimFinal(2),
            "na" | "tari" => StemRule::Unmodified,
            _ => StemRule::TrimFinal(1),
        }
    }
}

/// 有/無 spelled out in kana
fn aru_kanji_to_kana(s: &str) -> String {
    s.replace('有', "あ").replace('無', "な")
}

/// Builds derived entries from lemmas
#[derive(Debug, Clone, Copy)]
pub struct Expander<'a> {
    store: &'a ParadigmStore,
    difficulty: &'a DifficultyTable,
}

impl<'a> Expander<'a> {
    pub fn new(store: &'a ParadigmStore, difficulty: &'a DifficultyTable) -> Self {
        Expander { store, difficulty }
    }

    /// Paradigm store the expander resolves names against
    pub fn store(&self) -> &'a ParadigmStore {
        self.store
    }

    /// Expand a lemma stored under `lemma_id`.
    ///
    /// Returns nothing for lemmas without a paradigm, and logs a warning
    /// when the paradigm name is not in the store.
    pub fn expand(&self, lemma: &Entry, lemma_id: EntryId) -> Vec<Entry> {
        let Some(name) = lemma.paradigm_name() else {
            return Vec::new();
        };
        match self.store.get(name) {
            Some(paradigm) => self.expand_with(lemma, lemma_id, paradigm),
            None => {
                warn!(form = %lemma.form, paradigm = name, "Unknown paradigm, lemma left unexpanded");
                Vec::new()
            }
        }
    }

    /// Expand a lemma with an explicit paradigm
    pub fn expand_with(&self, lemma: &Entry, lemma_id: EntryId, paradigm: &Paradigm) -> Vec<Entry> {
        let stem_rule = StemRule::for_paradigm(paradigm.name());
        let derived: Vec<Entry> = paradigm
            .rules()
            .iter()
            .filter_map(|rule| self.inflect(lemma, lemma_id, rule, stem_rule, paradigm.name()))
            .collect();
        trace!(form = %lemma.form, paradigm = paradigm.name(), count = derived.len(), "Expanded lemma");
        derived
    }

    fn inflect(
        &self,
        lemma: &Entry,
        lemma_id: EntryId,
        rule: &Rule,
        stem_rule: StemRule,
        paradigm: &str,
    ) -> Option<Entry> {
        let (form, pron) = match stem_rule {
            StemRule::SuffixIncludesStem => irregular_forms(lemma, rule, paradigm)?,
            StemRule::VowelShift => vowel_shift_forms(lemma, &rule.suffix),
            StemRule::Unmodified => (
                format!("{}{}", lemma.form, rule.suffix),
                format!("{}{}", lemma.pronunciation, rule.suffix),
            ),
            StemRule::TrimFinal(n) => (
                format!("{}{}", drop_last_chars(&lemma.form, n), rule.suffix),
                format!("{}{}", drop_last_chars(&lemma.pronunciation, n), rule.suffix),
            ),
        };

        let form = remove_whitespace(&form);
        let pron = remove_whitespace(&pron);
        let marker = self.difficulty.marker(&form);
        Some(Entry::derived(lemma, lemma_id, form, pron, rule.category).with_difficulty(marker))
    }
}

/// Forms for families whose suffixes spell out the whole word
fn irregular_forms(lemma: &Entry, rule: &Rule, paradigm: &str) -> Option<(String, String)> {
    let suffix = rule.suffix.as_str();
    // an empty suffix would spell no word at all
    if suffix.is_empty() {
        return None;
    }
    match paradigm {
        "aru" => {
            let pron = aru_kanji_to_kana(suffix);
            let form = if lemma.form == ARU_KANJI {
                suffix.to_string()
            } else {
                pron.clone()
            };
            Some((form, pron))
        }
        "suru-indep" if lemma.form == SURU_KANJI => {
            if SURU_KANJI_MISSING.contains(&rule.category) {
                return None;
            }
            let rest = drop_first_chars(suffix, 1);
            let kanji = if suffix.starts_with('で') { '出' } else { '為' };
            Some((format!("{}{}", kanji, rest), suffix.to_string()))
        }
        _ => Some((suffix.to_string(), suffix.to_string())),
    }
}

/// Forms for 来る-type verbs: the suffix already holds the stem mora
fn vowel_shift_forms(lemma: &Entry, suffix: &str) -> (String, String) {
    let pron = format!("{}{}", drop_last_chars(&lemma.pronunciation, 2), suffix);
    let form = match char_from_end(&lemma.form, 1) {
        Some(c) if is_kanji(c) => format!(
            "{}{}",
            drop_last_chars(&lemma.form, 1),
            drop_first_chars(suffix, 1)
        ),
        _ => pron.clone(),
    };
    (form, pron)
}
