//! Paradigm template store.
//!
//! A paradigm template is a Wiktionary inflection table dumped as
//! `|category=suffix` lines. Each paradigm becomes an ordered list of
//! [`Rule`]s; order is kept from the source and duplicate categories are
//! allowed.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::inflection::InflectionCategory;
use crate::kana::drop_last_chars;

/// Opening delimiter of an optional-kana span
pub const OPTIONAL_OPEN: char = '（';

/// Closing delimiter of an optional-kana span
pub const OPTIONAL_CLOSE: char = '）';

/// Polite affirmative ending the formal forms are synthesized from
pub const FORMAL_MARKER: &str = "ます";

/// Substitutions applied to [`FORMAL_MARKER`] for missing formal forms
const FORMAL_SUBSTITUTIONS: &[(InflectionCategory, &str)] = &[
    (InflectionCategory::FormalNegative, "ません"),
    (InflectionCategory::FormalPerfective, "ました"),
    (InflectionCategory::FormalNegativePerfective, "ませんでした"),
];

/// Prefix of template file names
const TEMPLATE_PREFIX: &str = "ja-";

/// Words marking a line as a known non-rule annotation
const ANNOTATION_WORDS: &[&str] = &["include", "lemma", "kana", "note"];

/// Wiki markup stripped before a line is split
static MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"[->|<!{}]").unwrap());

/// Romanization left over in suffix values
static ROMANIZATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z0-9_]").unwrap());

/// A single (category, suffix) rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub category: InflectionCategory,
    pub suffix: String,
}

impl Rule {
    pub fn new(category: InflectionCategory, suffix: impl Into<String>) -> Self {
        Rule {
            category,
            suffix: suffix.into(),
        }
    }
}

/// Outcome of reading one template line
#[derive(Debug, Clone, PartialEq, Eq)]
enum TemplateLine {
    Rule(InflectionCategory, String),
    /// Comments, blank lines and recognized annotations
    Skip,
    /// Unknown key that is not a recognized annotation
    Unparsable(String),
}

fn parse_line(line: &str) -> TemplateLine {
    let line = line.trim().trim_start_matches('\u{FEFF}');
    if line.starts_with("##") || !line.contains('=') {
        return TemplateLine::Skip;
    }

    let line = MARKUP.replace_all(line, "");
    let (key, value) = line.split_once('=').unwrap_or((&*line, ""));
    let key = key.trim();

    match InflectionCategory::from_name(key) {
        Some(category) => {
            let suffix = ROMANIZATION.replace_all(value, "");
            let suffix = suffix.trim().replace(". ", "");
            TemplateLine::Rule(category, suffix)
        }
        None if key.ends_with("_rom") || ANNOTATION_WORDS.iter().any(|w| line.contains(w)) => {
            TemplateLine::Skip
        }
        None => TemplateLine::Unparsable(line.into_owned()),
    }
}

/// Split a suffix on an optional-kana span into its short and long variants
pub fn optional_variants(suffix: &str) -> Option<(String, String)> {
    let open = suffix.find(OPTIONAL_OPEN)?;
    let close = suffix.find(OPTIONAL_CLOSE)?;
    if close < open {
        return None;
    }
    let before = &suffix[..open];
    let inside = &suffix[open + OPTIONAL_OPEN.len_utf8()..close];
    let after = &suffix[close + OPTIONAL_CLOSE.len_utf8()..];
    Some((format!("{}{}", before, after), format!("{}{}{}", before, inside, after)))
}

/// Paradigm name for a template file: the file stem without the `ja-` prefix
pub fn paradigm_name_from_file<P: AsRef<Path>>(path: P) -> String {
    let stem = path
        .as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    stem.strip_prefix(TEMPLATE_PREFIX).map(str::to_string).unwrap_or(stem)
}

/// An ordered list of suffix rules for one inflection family
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Paradigm {
    name: String,
    rules: Vec<Rule>,
}

impl Paradigm {
    /// Create an empty paradigm
    pub fn new(name: impl Into<String>) -> Self {
        Paradigm {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    /// Parse template text. Bad lines are logged and dropped.
    pub fn parse(name: impl Into<String>, content: &str) -> Self {
        let mut paradigm = Paradigm::new(name);
        for line in content.lines() {
            paradigm.read_line(line);
        }
        paradigm.synthesize_formal_forms();
        paradigm
    }

    /// Parse template text from a reader
    pub fn from_reader<R: BufRead>(name: impl Into<String>, reader: R) -> std::io::Result<Self> {
        let mut paradigm = Paradigm::new(name);
        for line in reader.lines() {
            paradigm.read_line(&line?);
        }
        paradigm.synthesize_formal_forms();
        Ok(paradigm)
    }

    fn read_line(&mut self, line: &str) {
        match parse_line(line) {
            TemplateLine::Rule(category, suffix) => self.push(category, &suffix),
            TemplateLine::Skip => {}
            TemplateLine::Unparsable(line) => {
                warn!(paradigm = %self.name, "Could not parse template line: {}", line);
            }
        }
    }

    /// Append a rule. An optional-kana suffix appends two rules: the short
    /// variant, then the long one.
    pub fn push(&mut self, category: InflectionCategory, suffix: &str) {
        match optional_variants(suffix) {
            Some((short, long)) => {
                self.rules.push(Rule::new(category, short));
                self.rules.push(Rule::new(category, long));
            }
            None => self.rules.push(Rule::new(category, suffix)),
        }
    }

    /// Derive missing formal negative/perfective rules from the affirmative
    /// formal rule ending in [`FORMAL_MARKER`].
    pub fn synthesize_formal_forms(&mut self) {
        let Some(formal) = self
            .rules
            .iter()
            .find(|r| r.category == InflectionCategory::Formal && r.suffix.ends_with(FORMAL_MARKER))
        else {
            return;
        };
        let stem = drop_last_chars(&formal.suffix, FORMAL_MARKER.chars().count()).to_string();

        for (category, ending) in FORMAL_SUBSTITUTIONS {
            if !self.has_category(*category) {
                self.rules.push(Rule::new(*category, format!("{}{}", stem, ending)));
            }
        }
    }

    /// Paradigm name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rules in source order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Check if any rule produces the category
    pub fn has_category(&self, category: InflectionCategory) -> bool {
        self.rules.iter().any(|r| r.category == category)
    }

    /// All suffixes listed for a category, in order
    pub fn suffixes_for(&self, category: InflectionCategory) -> impl Iterator<Item = &str> + '_ {
        self.rules
            .iter()
            .filter(move |r| r.category == category)
            .map(|r| r.suffix.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Paradigms keyed by name
#[derive(Debug, Clone, Default)]
pub struct ParadigmStore {
    paradigms: HashMap<String, Paradigm>,
}

impl ParadigmStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a paradigm, replacing any earlier one of the same name
    pub fn insert(&mut self, paradigm: Paradigm) {
        debug!(name = paradigm.name(), rules = paradigm.len(), "Loaded paradigm");
        if let Some(old) = self.paradigms.insert(paradigm.name.clone(), paradigm) {
            warn!(name = old.name(), "Paradigm defined twice, keeping the later one");
        }
    }

    /// Parse and add a paradigm from template text
    pub fn load_str(&mut self, name: impl Into<String>, content: &str) {
        self.insert(Paradigm::parse(name, content));
    }

    /// Parse and add a template file, named after the file
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| Error::io(path, e))?;
        let reader = std::io::BufReader::new(file);
        let paradigm = Paradigm::from_reader(paradigm_name_from_file(path), reader)
            .map_err(|e| Error::io(path, e))?;
        self.insert(paradigm);
        Ok(())
    }

    /// Load several template files
    pub fn load_files<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<()> {
        for path in paths {
            self.load_file(path)?;
        }
        info!("Read {} inflection templates", self.len());
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Paradigm> {
        self.paradigms.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.paradigms.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.paradigms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paradigms.is_empty()
    }

    /// Paradigm names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.paradigms.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use InflectionCategory::*;

    #[test]
    fn test_parse_wiki_lines() {
        let template = "\u{FEFF}## ja-go-bu\n\
                        |imperfective=ば\n\
                        |imperfective_rom=ba\n\
                        |continuative=び\n\
                        |terminal=ぶ\n\
                        }}\n";
        let paradigm = Paradigm::parse("go-bu", template);
        assert_eq!(
            paradigm.rules(),
            &[
                Rule::new(Imperfective, "ば"),
                Rule::new(Continuative, "び"),
                Rule::new(Terminal, "ぶ"),
            ]
        );
    }

    #[test]
    fn test_markup_and_romanization_are_stripped() {
        assert_eq!(parse_line("|passive=ばれる ba-reru"), TemplateLine::Rule(Passive, "ばれる".to_string()));
        assert_eq!(parse_line("  | Terminal = <!--x-->ぶ  "), TemplateLine::Rule(Terminal, "ぶ".to_string()));
        assert_eq!(parse_line("|imperfective="), TemplateLine::Rule(Imperfective, String::new()));
    }

    #[test]
    fn test_annotations_are_skipped_silently() {
        assert_eq!(parse_line("no equals sign here"), TemplateLine::Skip);
        assert_eq!(parse_line("|include_kana=yes"), TemplateLine::Skip);
        assert_eq!(parse_line("|lemma_form=ぶ"), TemplateLine::Skip);
        assert_eq!(parse_line("|note=irregular"), TemplateLine::Skip);
        assert_eq!(parse_line("|stem_rom=to"), TemplateLine::Skip);
        assert_eq!(parse_line("##|imperfective=ば"), TemplateLine::Skip);
    }

    #[test]
    fn test_unknown_category_is_dropped() {
        assert_eq!(parse_line("|gerund=んで"), TemplateLine::Unparsable("gerund=んで".to_string()));

        let paradigm = Paradigm::parse("go-bu", "|gerund=んで\n|terminal=ぶ\n");
        assert_eq!(paradigm.rules(), &[Rule::new(Terminal, "ぶ")]);
    }

    #[test]
    fn test_optional_kana_yields_two_rules() {
        let paradigm = Paradigm::parse("na", "|conditional=なら（ば）\n");
        assert_eq!(
            paradigm.rules(),
            &[Rule::new(Conditional, "なら"), Rule::new(Conditional, "ならば")]
        );
        assert_eq!(paradigm.suffixes_for(Conditional).collect::<Vec<_>>(), vec!["なら", "ならば"]);
    }

    #[test]
    fn test_unpaired_brackets_are_kept_verbatim() {
        assert_eq!(optional_variants("な）ら（"), None);
        assert_eq!(optional_variants("なら（ば"), None);
    }

    #[test]
    fn test_formal_forms_are_synthesized() {
        let paradigm = Paradigm::parse("go-bu", "|formal=びます\n|formal_negative=びません\n");
        assert_eq!(
            paradigm.rules(),
            &[
                Rule::new(Formal, "びます"),
                Rule::new(FormalNegative, "びません"),
                Rule::new(FormalPerfective, "びました"),
                Rule::new(FormalNegativePerfective, "びませんでした"),
            ]
        );
    }

    #[test]
    fn test_no_synthesis_without_formal_marker() {
        let paradigm = Paradigm::parse("i", "|formal=いです\n");
        assert_eq!(paradigm.len(), 1);
        assert!(!paradigm.has_category(FormalNegative));
    }

    #[test]
    fn test_paradigm_name_from_file() {
        assert_eq!(paradigm_name_from_file("data/inflection-templates/ja-go-bu.txt"), "go-bu");
        assert_eq!(paradigm_name_from_file("ja-suru-indep.txt"), "suru-indep");
        assert_eq!(paradigm_name_from_file("custom.txt"), "custom");
    }

    #[test]
    fn test_store_lookup_is_stable() {
        let mut store = ParadigmStore::new();
        store.load_str("i", "|terminal=い\n|adverbial=く\n");
        store.load_str("na", "|terminal=だ\n");

        assert_eq!(store.len(), 2);
        assert_eq!(store.names(), vec!["i", "na"]);
        let first = store.get("i").unwrap().rules().to_vec();
        assert_eq!(store.get("i").unwrap().rules(), first.as_slice());
        assert!(store.get("tari").is_none());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let mut store = ParadigmStore::new();
        let err = store.load_file("/nonexistent/ja-i.txt").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
