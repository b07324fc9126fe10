//! Grammatical categories an inflection template can produce.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One grammatical distinction (stem form, tense, politeness, negation...)
///
/// Template keys are matched case-insensitively against [`as_str`](Self::as_str).
/// Numbered variants (`Imperfective2`, `Causative2`...) are alternative
/// realisations of the same category listed separately by the templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InflectionCategory {
    // stem forms
    Imperfective,
    Imperfective2,
    Imperfective3,
    Continuative,
    Continuative2,
    Terminal,
    Attributive,
    Attributive2,
    Hypothetical,
    Hypothetical2,
    Imperative,
    Imperative2,
    Imperative3,
    Stem,
    // key constructions
    Passive,
    Causative,
    Causative2,
    Potential,
    Volitional,
    Volitional2,
    Negative,
    NegativeContinuative,
    NegativeContinuative2,
    NegativeConjunctive,
    Perfective,
    Conjunctive,
    HypotheticalConditional,
    // politeness
    Formal,
    FormalNegative,
    FormalPerfective,
    FormalNegativePerfective,
    FormalPast,
    FormalNegativePast,
    // adjective constructions
    InformalNegative,
    InformalPast,
    InformalNegativePast,
    Conditional,
    Provisional,
    Adverbial,
    Degree,
}

impl InflectionCategory {
    /// Every category, in declaration order
    pub const ALL: [InflectionCategory; 40] = [
        InflectionCategory::Imperfective,
        InflectionCategory::Imperfective2,
        InflectionCategory::Imperfective3,
        InflectionCategory::Continuative,
        InflectionCategory::Continuative2,
        InflectionCategory::Terminal,
        InflectionCategory::Attributive,
        InflectionCategory::Attributive2,
        InflectionCategory::Hypothetical,
        InflectionCategory::Hypothetical2,
        InflectionCategory::Imperative,
        InflectionCategory::Imperative2,
        InflectionCategory::Imperative3,
        InflectionCategory::Stem,
        InflectionCategory::Passive,
        InflectionCategory::Causative,
        InflectionCategory::Causative2,
        InflectionCategory::Potential,
        InflectionCategory::Volitional,
        InflectionCategory::Volitional2,
        InflectionCategory::Negative,
        InflectionCategory::NegativeContinuative,
        InflectionCategory::NegativeContinuative2,
        InflectionCategory::NegativeConjunctive,
        InflectionCategory::Perfective,
        InflectionCategory::Conjunctive,
        InflectionCategory::HypotheticalConditional,
        InflectionCategory::Formal,
        InflectionCategory::FormalNegative,
        InflectionCategory::FormalPerfective,
        InflectionCategory::FormalNegativePerfective,
        InflectionCategory::FormalPast,
        InflectionCategory::FormalNegativePast,
        InflectionCategory::InformalNegative,
        InflectionCategory::InformalPast,
        InflectionCategory::InformalNegativePast,
        InflectionCategory::Conditional,
        InflectionCategory::Provisional,
        InflectionCategory::Adverbial,
        InflectionCategory::Degree,
    ];

    /// Template key for this category
    pub fn as_str(&self) -> &'static str {
        match self {
            InflectionCategory::Imperfective => "IMPERFECTIVE",
            InflectionCategory::Imperfective2 => "IMPERFECTIVE2",
            InflectionCategory::Imperfective3 => "IMPERFECTIVE3",
            InflectionCategory::Continuative => "CONTINUATIVE",
            InflectionCategory::Continuative2 => "CONTINUATIVE2",
            InflectionCategory::Terminal => "TERMINAL",
            InflectionCategory::Attributive => "ATTRIBUTIVE",
            InflectionCategory::Attributive2 => "ATTRIBUTIVE2",
            InflectionCategory::Hypothetical => "HYPOTHETICAL",
            InflectionCategory::Hypothetical2 => "HYPOTHETICAL2",
            InflectionCategory::Imperative => "IMPERATIVE",
            InflectionCategory::Imperative2 => "IMPERATIVE2",
            InflectionCategory::Imperative3 => "IMPERATIVE3",
            InflectionCategory::Stem => "STEM",
            InflectionCategory::Passive => "PASSIVE",
            InflectionCategory::Causative => "CAUSATIVE",
            InflectionCategory::Causative2 => "CAUSATIVE2",
            InflectionCategory::Potential => "POTENTIAL",
            InflectionCategory::Volitional => "VOLITIONAL",
            InflectionCategory::Volitional2 => "VOLITIONAL2",
            InflectionCategory::Negative => "NEGATIVE",
            InflectionCategory::NegativeContinuative => "NEGATIVE_CONTINUATIVE",
            InflectionCategory::NegativeContinuative2 => "NEGATIVE_CONTINUATIVE2",
            InflectionCategory::NegativeConjunctive => "NEGATIVE_CONJUNCTIVE",
            InflectionCategory::Perfective => "PERFECTIVE",
            InflectionCategory::Conjunctive => "CONJUNCTIVE",
            InflectionCategory::HypotheticalConditional => "HYPOTHETICAL_CONDITIONAL",
            InflectionCategory::Formal => "FORMAL",
            InflectionCategory::FormalNegative => "FORMAL_NEGATIVE",
            InflectionCategory::FormalPerfective => "FORMAL_PERFECTIVE",
            InflectionCategory::FormalNegativePerfective => "FORMAL_NEGATIVE_PERFECTIVE",
            InflectionCategory::FormalPast => "FORMAL_PAST",
            InflectionCategory::FormalNegativePast => "FORMAL_NEGATIVE_PAST",
            InflectionCategory::InformalNegative => "INFORMAL_NEGATIVE",
            InflectionCategory::InformalPast => "INFORMAL_PAST",
            InflectionCategory::InformalNegativePast => "INFORMAL_NEGATIVE_PAST",
            InflectionCategory::Conditional => "CONDITIONAL",
            InflectionCategory::Provisional => "PROVISIONAL",
            InflectionCategory::Adverbial => "ADVERBIAL",
            InflectionCategory::Degree => "DEGREE",
        }
    }

    /// Look up a category by template key, ignoring case and surrounding space
    pub fn from_name(name: &str) -> Option<Self> {
        let key = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(key))
    }

    /// Human-readable label, e.g. "negative continuative"
    pub fn label(&self) -> String {
        self.as_str().to_ascii_lowercase().replace('_', " ")
    }
}

impl fmt::Display for InflectionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
