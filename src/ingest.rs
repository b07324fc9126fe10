//! Lexicon dump ingestion.
//!
//! A dump row is `form \t pronunciation \t POS[paradigm] \t glosses`. Each
//! row becomes a lemma [`Entry`] with cleaned glosses, a resolved paradigm
//! and a difficulty marker; inflecting lemmas are expanded and every
//! resulting entry is inserted into a [`DictionaryBuilder`].

use std::io::BufRead;
use std::path::Path;
use tracing::{debug, info};
use unicode_normalization::UnicodeNormalization;

use crate::dictionary::{Dictionary, DictionaryBuilder};
use crate::difficulty::DifficultyTable;
use crate::entry::{collapse_pos, Entry, ParadigmTag, VERB};
use crate::error::{Error, Result};
use crate::expander::Expander;
use crate::gloss::process_glosses;
use crate::kana::char_from_end;
use crate::paradigm::ParadigmStore;

/// POS tag of suffix entries ("-さん")
pub const SUFFIX_POS: &str = "SFX";

/// Paradigm tag of adjectives whose family the dump leaves open
pub const UNKNOWN_ADJECTIVE: &str = "?";

/// Trailing marker on na-adjective dump rows
pub const NA_BRACKET: &str = "(な)";

/// A raw, unprocessed dump row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpRow {
    pub form: String,
    pub pronunciation: String,
    pub pos_tag: String,
    pub glosses: String,
}

impl DumpRow {
    /// Parse a dump line. Comments, blank lines and rows with fewer than
    /// four fields give `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim().trim_start_matches('\u{FEFF}');
        if line.is_empty() || line.starts_with("##") {
            return None;
        }
        let mut fields = line.split('\t').map(|f| f.trim().nfc().collect::<String>());
        Some(DumpRow {
            form: fields.next()?,
            pronunciation: fields.next()?,
            pos_tag: fields.next()?,
            glosses: fields.next()?,
        })
    }
}

/// Split `"V1[go-bu]"` into `("V1", Some("go-bu"))`
pub fn split_pos_tag(tag: &str) -> (&str, Option<&str>) {
    match (tag.find('['), tag.find(']')) {
        (Some(open), Some(close)) if open < close => (&tag[..open], Some(&tag[open + 1..close])),
        _ => (tag, None),
    }
}

/// A lexeme with a hand-built paradigm
#[derive(Debug, Clone, Copy)]
pub struct IrregularLexeme {
    pub form: &'static str,
    pub paradigm: &'static str,
    /// The dump lists a placeholder reading; use the form instead
    pub reading_from_form: bool,
}

const fn irregular(form: &'static str, paradigm: &'static str, reading_from_form: bool) -> IrregularLexeme {
    IrregularLexeme {
        form,
        paradigm,
        reading_from_form,
    }
}

/// Surface forms remapped to irregular paradigms
pub const IRREGULAR_LEXEMES: &[IrregularLexeme] = &[
    irregular("ある", "aru", false),
    irregular("有る", "aru", false),
    irregular("する", "suru-indep", false),
    irregular("為る", "suru-indep", false),
    irregular("来る", "kuru", false),
    irregular("くる", "kuru", false),
    irregular("くれる", "kureru", false),
    irregular("呉れる", "kureru", false),
    irregular("べし", "beshi", true),
    irregular("だ", "da", true),
    irregular("です", "desu", false),
    irregular("ます", "masu", false),
];

/// Irregular lexeme entry for a surface form
pub fn irregular_lexeme(form: &str) -> Option<&'static IrregularLexeme> {
    IRREGULAR_LEXEMES.iter().find(|l| l.form == form)
}

/// Conjugation hints carried by a verb POS tag and its reading.
///
/// `VT2` has codeword `T` and class `2`; `VS` has codeword `S` and no class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerbHints<'a> {
    pub codeword: &'a str,
    pub class: Option<u32>,
    pub reading: &'a str,
}

impl<'a> VerbHints<'a> {
    pub fn new(pos: &'a str, reading: &'a str) -> Self {
        let rest = pos.strip_prefix('V').unwrap_or("");
        let split = rest.find(|c: char| c.is_ascii_digit()).unwrap_or(rest.len());
        let (codeword, digits) = rest.split_at(split);
        VerbHints {
            codeword,
            class: digits.parse().ok(),
            reading,
        }
    }

    fn ends_with(&self, ending: &str) -> bool {
        self.reading.ends_with(ending)
    }

    /// Godan and ichidan class digits rule out the する/ずる families
    fn may_verbalize(&self) -> bool {
        matches!(self.class, None | Some(3))
    }
}

/// One step of paradigm inference
pub type InferenceRule = fn(&VerbHints) -> Option<&'static str>;

/// Inference rules, tried in order; the first match wins
pub const INFERENCE_RULES: &[(&str, InferenceRule)] = &[
    ("kuru", infer_kuru),
    ("zuru", infer_zuru),
    ("suru", infer_suru),
    ("ichidan class", infer_ichidan_class),
    ("godan class", infer_godan_class),
    ("ichidan ending", infer_ichidan_ending),
    ("godan ending", godan_paradigm),
];

fn infer_kuru(hints: &VerbHints) -> Option<&'static str> {
    (hints.codeword == "K" || (hints.class == Some(3) && hints.ends_with("くる"))).then_some("kuru")
}

fn infer_zuru(hints: &VerbHints) -> Option<&'static str> {
    (hints.codeword == "Z" || (hints.may_verbalize() && hints.ends_with("ずる"))).then_some("zuru")
}

fn infer_suru(hints: &VerbHints) -> Option<&'static str> {
    (hints.codeword == "S" || (hints.may_verbalize() && hints.ends_with("する"))).then_some("suru")
}

fn infer_ichidan_class(hints: &VerbHints) -> Option<&'static str> {
    (hints.class == Some(2)).then_some("ichi")
}

fn infer_godan_class(hints: &VerbHints) -> Option<&'static str> {
    if hints.class == Some(1) {
        godan_paradigm(hints)
    } else {
        None
    }
}

/// Kana of the i- and e-rows, which precede る in ichidan verbs
const ICHIDAN_STEM_KANA: &str = "いきぎしじちぢにひびぴみりえけげせぜてでねへべぺめれ";

fn infer_ichidan_ending(hints: &VerbHints) -> Option<&'static str> {
    if hints.class.is_some() || !hints.ends_with("る") {
        return None;
    }
    char_from_end(hints.reading, 1)
        .filter(|c| ICHIDAN_STEM_KANA.contains(*c))
        .map(|_| "ichi")
}

/// Godan paradigm named after the final mora
fn godan_paradigm(hints: &VerbHints) -> Option<&'static str> {
    let paradigm = match hints.reading.chars().last()? {
        'う' => "go-u",
        'く' => "go-ku",
        'ぐ' => "go-gu",
        'す' => "go-su",
        'つ' => "go-tsu",
        'ぬ' => "go-nu",
        'ぶ' => "go-bu",
        'む' => "go-mu",
        'る' => "go-ru",
        _ => return None,
    };
    Some(paradigm)
}

/// Infer a verb paradigm from its POS tag and reading
pub fn infer_paradigm(pos: &str, reading: &str) -> Option<&'static str> {
    let hints = VerbHints::new(pos, reading);
    INFERENCE_RULES.iter().find_map(|(label, rule)| {
        let paradigm = rule(&hints)?;
        debug!(pos, reading, rule = *label, paradigm, "Inferred paradigm");
        Some(paradigm)
    })
}

/// Paradigm and pronunciation after irregular overrides and inference
fn resolve_paradigm(form: &str, pronunciation: &str, pos: &str, tag: Option<&str>) -> (Option<ParadigmTag>, String) {
    let is_verb = collapse_pos(pos) == VERB;

    if is_verb || tag.is_some() {
        if let Some(lexeme) = irregular_lexeme(form) {
            let reading = if lexeme.reading_from_form { form } else { pronunciation };
            return (Some(ParadigmTag::Irregular(lexeme.paradigm.to_string())), reading.to_string());
        }
    }

    let paradigm = match tag {
        Some(UNKNOWN_ADJECTIVE) => {
            let name = if form.ends_with('い') { "i" } else { "na" };
            Some(ParadigmTag::Inferred(name.to_string()))
        }
        Some(name) => Some(ParadigmTag::Explicit(name.to_string())),
        None if is_verb => infer_paradigm(pos, pronunciation).map(|name| ParadigmTag::Inferred(name.to_string())),
        None => None,
    };
    (paradigm, pronunciation.to_string())
}

fn strip_na_bracket(s: &str) -> &str {
    s.strip_suffix(NA_BRACKET).unwrap_or(s)
}

/// Feeds dump rows through normalization and expansion
#[derive(Debug, Clone, Copy)]
pub struct Ingestor<'a> {
    expander: Expander<'a>,
    difficulty: &'a DifficultyTable,
}

impl<'a> Ingestor<'a> {
    pub fn new(store: &'a ParadigmStore, difficulty: &'a DifficultyTable) -> Self {
        Ingestor {
            expander: Expander::new(store, difficulty),
            difficulty,
        }
    }

    /// Normalize a row into its lemma entry, without expanding it
    pub fn normalize(&self, row: &DumpRow) -> Entry {
        let (pos, tag) = split_pos_tag(&row.pos_tag);
        let (paradigm, pronunciation) = resolve_paradigm(&row.form, &row.pronunciation, pos, tag);
        Entry::lemma(
            row.form.as_str(),
            pronunciation,
            pos,
            paradigm,
            process_glosses(&row.glosses),
        )
        .with_difficulty(self.difficulty.marker(&row.form))
    }

    /// Ingest one row; returns the number of entries inserted
    pub fn ingest_row(&self, row: &DumpRow, builder: &mut DictionaryBuilder) -> usize {
        let before = builder.len();
        let mut lemma = self.normalize(row);

        // the dashed spelling is kept as is, the bare one is expanded
        if lemma.pos == SUFFIX_POS && (lemma.form.contains('-') || lemma.pronunciation.contains('-')) {
            builder.insert(lemma.clone());
            lemma.form = lemma.form.replace('-', "");
            lemma.pronunciation = lemma.pronunciation.replace('-', "");
            lemma.difficulty = self.difficulty.marker(&lemma.form);
        }

        if lemma.paradigm_name() == Some("na") && lemma.form.ends_with(NA_BRACKET) {
            builder.insert(lemma.clone());
            lemma.form = strip_na_bracket(&lemma.form).to_string();
            lemma.pronunciation = strip_na_bracket(&lemma.pronunciation).to_string();
            lemma.difficulty = self.difficulty.marker(&lemma.form);
        }

        let id = builder.insert(lemma);
        if let Some(lemma) = builder.get(id).cloned() {
            for derived in self.expander.expand(&lemma, id) {
                builder.insert(derived);
            }
        }
        builder.len() - before
    }

    /// Ingest every row of a dump held in memory
    pub fn ingest_str(&self, content: &str, builder: &mut DictionaryBuilder) -> usize {
        content
            .lines()
            .filter_map(DumpRow::parse)
            .map(|row| self.ingest_row(&row, builder))
            .sum()
    }

    /// Ingest every row of a dump stream
    pub fn ingest_reader<R: BufRead>(&self, reader: R, builder: &mut DictionaryBuilder) -> std::io::Result<usize> {
        let mut rows = 0;
        let mut inserted = 0;
        for line in reader.lines() {
            if let Some(row) = DumpRow::parse(&line?) {
                rows += 1;
                inserted += self.ingest_row(&row, builder);
            }
        }
        debug!(rows, inserted, "Ingested dump stream");
        Ok(inserted)
    }

    /// Ingest a dump file
    pub fn ingest_file<P: AsRef<Path>>(&self, path: P, builder: &mut DictionaryBuilder) -> Result<usize> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| Error::io(path, e))?;
        let inserted = self
            .ingest_reader(std::io::BufReader::new(file), builder)
            .map_err(|e| Error::io(path, e))?;
        info!(path = %path.display(), inserted, "Read dictionary file");
        Ok(inserted)
    }
}

/// Build a dictionary from in-memory dumps
pub fn build_dictionary<'s, I>(store: &ParadigmStore, difficulty: &DifficultyTable, dumps: I) -> Dictionary
where
    I: IntoIterator<Item = &'s str>,
{
    let ingestor = Ingestor::new(store, difficulty);
    let mut builder = DictionaryBuilder::new();
    for dump in dumps {
        ingestor.ingest_str(dump, &mut builder);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(line: &str) -> DumpRow {
        DumpRow::parse(line).unwrap()
    }

    #[test]
    fn test_parse_row() {
        let r = row("\u{FEFF}飛ぶ\tとぶ\tV1[go-bu]\t1) to fly 2) to jump");
        assert_eq!(r.form, "飛ぶ");
        assert_eq!(r.pos_tag, "V1[go-bu]");
        assert_eq!(r.glosses, "1) to fly 2) to jump");
    }

    #[test]
    fn test_short_and_comment_rows_are_skipped() {
        assert!(DumpRow::parse("飛ぶ\tとぶ\tV1").is_none());
        assert!(DumpRow::parse("## Source: https://en.wiktionary.org/").is_none());
        assert!(DumpRow::parse("").is_none());
    }

    #[test]
    fn test_split_pos_tag() {
        assert_eq!(split_pos_tag("V1[go-bu]"), ("V1", Some("go-bu")));
        assert_eq!(split_pos_tag("A[na]"), ("A", Some("na")));
        assert_eq!(split_pos_tag("N"), ("N", None));
        assert_eq!(split_pos_tag("V]x["), ("V]x[", None));
    }

    #[test]
    fn test_verb_hints() {
        let hints = VerbHints::new("VT2", "たべる");
        assert_eq!(hints.codeword, "T");
        assert_eq!(hints.class, Some(2));
        let hints = VerbHints::new("V", "かく");
        assert_eq!(hints.codeword, "");
        assert_eq!(hints.class, None);
    }

    #[test]
    fn test_inference_rules_in_isolation() {
        assert_eq!(infer_kuru(&VerbHints::new("VK", "くる")), Some("kuru"));
        assert_eq!(infer_kuru(&VerbHints::new("V3", "つれてくる")), Some("kuru"));
        assert_eq!(infer_kuru(&VerbHints::new("V1", "くる")), None);
        assert_eq!(infer_suru(&VerbHints::new("V3", "かいする")), Some("suru"));
        assert_eq!(infer_zuru(&VerbHints::new("V", "しょうずる")), Some("zuru"));
        assert_eq!(infer_suru(&VerbHints::new("V1", "こする")), None);
        assert_eq!(infer_zuru(&VerbHints::new("VT1", "ひきずる")), None);
        assert_eq!(infer_suru(&VerbHints::new("VS", "あいする")), Some("suru"));
        assert_eq!(infer_ichidan_class(&VerbHints::new("V2", "たべる")), Some("ichi"));
        assert_eq!(infer_godan_class(&VerbHints::new("V1", "かく")), Some("go-ku"));
        assert_eq!(infer_ichidan_ending(&VerbHints::new("V", "みる")), Some("ichi"));
        assert_eq!(infer_ichidan_ending(&VerbHints::new("V", "とる")), None);
        assert_eq!(godan_paradigm(&VerbHints::new("V", "まつ")), Some("go-tsu"));
        assert_eq!(godan_paradigm(&VerbHints::new("V", "")), None);
    }

    #[test]
    fn test_infer_paradigm_order() {
        assert_eq!(infer_paradigm("V2", "たべる"), Some("ichi"));
        // class beats the ending heuristic
        assert_eq!(infer_paradigm("V1", "かえる"), Some("go-ru"));
        assert_eq!(infer_paradigm("V", "かえる"), Some("ichi"));
        assert_eq!(infer_paradigm("VB3", "かいする"), Some("suru"));
        assert_eq!(infer_paradigm("V1", "のむ"), Some("go-mu"));
        // a godan class wins over a する/ずる reading
        assert_eq!(infer_paradigm("V1", "こする"), Some("go-su"));
        assert_eq!(infer_paradigm("VT1", "ひきずる"), Some("go-ru"));
        assert_eq!(infer_paradigm("V", "しょうずる"), Some("zuru"));
        assert_eq!(infer_paradigm("V", "x"), None);
    }

    #[test]
    fn test_irregular_override() {
        let (paradigm, reading) = resolve_paradigm("為る", "する", "V", Some("verbconj"));
        assert_eq!(paradigm, Some(ParadigmTag::Irregular("suru-indep".to_string())));
        assert_eq!(reading, "する");

        let (paradigm, reading) = resolve_paradigm("べし", "suffix", "V", Some("verbconj"));
        assert_eq!(paradigm, Some(ParadigmTag::Irregular("beshi".to_string())));
        assert_eq!(reading, "べし");

        // non-verb rows keep their own paradigm
        let (paradigm, _) = resolve_paradigm("ある", "ある", "ADN", None);
        assert_eq!(paradigm, None);
    }

    #[test]
    fn test_unknown_adjective_family() {
        let (paradigm, _) = resolve_paradigm("美しい", "うつくしい", "A", Some("?"));
        assert_eq!(paradigm, Some(ParadigmTag::Inferred("i".to_string())));
        let (paradigm, _) = resolve_paradigm("綺麗", "きれい", "A", Some("?"));
        assert_eq!(paradigm, Some(ParadigmTag::Inferred("na".to_string())));
    }

    #[test]
    fn test_normalize_row() {
        let store = ParadigmStore::new();
        let difficulty = DifficultyTable::new();
        let ingestor = Ingestor::new(&store, &difficulty);

        let entry = ingestor.normalize(&row("食べる\tたべる\tV2\t1) to eat"));
        assert_eq!(entry.pos, "V2");
        assert_eq!(entry.paradigm, Some(ParadigmTag::Inferred("ichi".to_string())));
        assert_eq!(entry.glosses, vec!["to eat"]);
        assert_eq!(entry.difficulty, "0-0-0");

        let entry = ingestor.normalize(&row("命\tいのち\tN\t1) ?"));
        assert_eq!(entry.paradigm, None);
        assert_eq!(entry.glosses, vec![crate::gloss::NO_TRANSLATION]);
    }

    #[test]
    fn test_suffix_rows_get_a_bare_variant() {
        let store = ParadigmStore::new();
        let difficulty = DifficultyTable::new();
        let mut builder = DictionaryBuilder::new();
        let inserted = Ingestor::new(&store, &difficulty)
            .ingest_str("-さん\t-さん\tSFX\t1) Mr., Ms.", &mut builder);
        assert_eq!(inserted, 2);

        let dict = builder.build();
        assert_eq!(dict.lookup("-さん").len(), 1);
        assert_eq!(dict.lookup("さん")[0].pronunciation, "さん");
    }

    #[test]
    fn test_inflecting_suffix_rows_are_expanded() {
        let mut store = ParadigmStore::new();
        store.load_str("i", "|imperfective=かろ\n|negative=くない\n");
        let difficulty = DifficultyTable::new();
        let dict = build_dictionary(&store, &difficulty, ["-っぽい\t-っぽい\tSFX[i]\t1) -ish"]);

        // dashed lemma, bare lemma, two derived forms
        assert_eq!(dict.len(), 4);
        assert_eq!(dict.iter().filter(|(_, e)| e.is_derived()).count(), 2);
        assert!(dict.lookup("-っぽい")[0].is_lemma());

        let negative = dict.lookup("っぽくない");
        assert_eq!(negative[0].pronunciation, "っぽくない");
        assert_eq!(dict.lemma_of(negative[0]).unwrap().form, "っぽい");
        assert!(!dict.contains_form("-っぽくない"));
    }

    #[test]
    fn test_na_bracket_is_indexed_both_ways() {
        let mut store = ParadigmStore::new();
        store.load_str("na", "|terminal=だ\n|attributive=な\n");
        let difficulty = DifficultyTable::new();
        let mut builder = DictionaryBuilder::new();
        let inserted = Ingestor::new(&store, &difficulty)
            .ingest_str("妙(な)\tみょう(な)\tA[na]\t1) strange", &mut builder);
        assert_eq!(inserted, 4);

        let dict = builder.build();
        assert_eq!(dict.lookup("妙(な)").len(), 1);
        assert!(dict.lookup("妙(な)")[0].is_lemma());
        assert_eq!(dict.lookup("妙")[0].pronunciation, "みょう");
        assert_eq!(dict.lookup("妙だ")[0].pronunciation, "みょうだ");
        assert_eq!(dict.lemma_of(dict.lookup("妙な")[0]).unwrap().form, "妙");
    }

    #[test]
    fn test_unexpanded_paradigm_keeps_lemma() {
        let store = ParadigmStore::new();
        let difficulty = DifficultyTable::new();
        let dict = build_dictionary(&store, &difficulty, ["惨憺\tさんたん\tA[tari]\t1) miserable"]);
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.lookup("惨憺")[0].paradigm_name(), Some("tari"));
    }
}
