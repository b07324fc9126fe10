//! Gloss cleaning for lexicon dump rows.
//!
//! Dump glosses arrive as one numbered string ("1) ... 2) ...") with
//! leftover wiki markup: HTML escapes, `<!-- -->` comments, `##` bullet
//! markers and template braces. [`process_glosses`] turns that into an
//! ordered list of clean glosses.

use once_cell::sync::Lazy;
use regex::Regex;

/// Placeholder used when a row carries no usable gloss
pub const NO_TRANSLATION: &str = "[no translation given]";

/// HTML-style escapes seen in the dumps. Bare `&lt`/`&gt` (missing `;`)
/// come after the terminated forms and `&amp;` comes last so it is never
/// decoded twice.
const ESCAPES: &[(&str, &str)] = &[
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&nbsp;", " "),
    ("&lt", "<"),
    ("&gt", ">"),
    ("&amp;", "&"),
];

/// A terminated comment span
static CLOSED_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<\s*!--.*?-->").unwrap());

/// A comment that runs to the end of its gloss
static OPEN_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<\s*!--.*$").unwrap());

/// Gloss numbering: "1) ", " 2) "
static ENUMERATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:^|\s)\d+\)").unwrap());

/// Trailing bullet / emphasis debris ("###", "####*##*", " #")
static TRAILING_MARKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s#*]+$").unwrap());

/// Nested-list bullets inside a gloss
static BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"#{2,}\s*").unwrap());

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Usage labels that push a leading gloss to the end of the list
static ARCHAIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\[[^\]]*\b(?:archaic|obsolete)\b[^\]]*\]|\([^)]*\b(?:archaic|obsolete)\b[^)]*\)").unwrap()
});

/// Decode the fixed set of HTML escapes
pub fn decode_escapes(text: &str) -> String {
    ESCAPES
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// Whether a gloss carries an archaic/obsolete usage label
pub fn is_archaic(gloss: &str) -> bool {
    ARCHAIC.is_match(gloss)
}

/// Split, clean and reorder a raw numbered gloss string.
///
/// Never returns an empty list: a row without usable glosses yields
/// [`NO_TRANSLATION`].
pub fn process_glosses(raw: &str) -> Vec<String> {
    let decoded = decode_escapes(raw);
    let without_comments = CLOSED_COMMENT.replace_all(&decoded, " ");

    let mut glosses: Vec<String> = ENUMERATOR
        .split(&without_comments)
        .filter_map(clean_gloss)
        .collect();

    move_archaic_to_end(&mut glosses);

    if glosses.is_empty() {
        glosses.push(NO_TRANSLATION.to_string());
    }
    glosses
}

/// Clean one gloss; `None` for empty or placeholder ("?") glosses
fn clean_gloss(gloss: &str) -> Option<String> {
    let gloss = OPEN_COMMENT.replace(gloss, "");
    let gloss = TRAILING_MARKS.replace(&gloss, "");
    let gloss = BULLET.replace_all(&gloss, "•");
    let gloss: String = gloss.chars().filter(|c| *c != '{' && *c != '}').collect();
    let gloss = WHITESPACE.replace_all(gloss.trim(), " ").into_owned();

    if gloss.is_empty() || gloss == "?" {
        None
    } else {
        Some(gloss)
    }
}

/// Move the leading run of archaic glosses behind the others.
///
/// Only applies when there is more than one gloss; relative order inside
/// both groups is kept.
fn move_archaic_to_end(glosses: &mut Vec<String>) {
    if glosses.len() < 2 {
        return;
    }
    let leading = glosses.iter().take_while(|g| is_archaic(g)).count();
    if leading == 0 || leading == glosses.len() {
        return;
    }
    glosses.rotate_left(leading);
}
