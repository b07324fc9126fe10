//! Script classification and reading normalization for Japanese text.
//!
//! Stem trimming works on trailing characters, which for kana readings are
//! morae; these helpers keep that arithmetic on `char` boundaries.

use unicode_normalization::UnicodeNormalization;

/// Scripts a character can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Script {
    /// Hiragana (ぁ-ゖ, ゝゞ)
    Hiragana,
    /// Katakana, including the prolonged sound mark ー
    Katakana,
    /// CJK ideographs and the iteration mark 々
    Kanji,
    /// Latin letters and digits (ASCII and full-width)
    Latin,
    /// CJK and ASCII punctuation
    Punct,
    /// Whitespace and reading separators
    Separator,
    /// Other/unknown character
    #[default]
    Other,
}

/// Characters dropped when comparing readings
const SEPARATOR_CHARS: &[char] = &[
    ' ',        // SPACE
    '\t',       // TAB
    '\u{3000}', // IDEOGRAPHIC SPACE
    '\u{00A0}', // NO-BREAK SPACE
    '\u{FEFF}', // ZERO WIDTH NO-BREAK SPACE
    '・',       // KATAKANA MIDDLE DOT
    '･',        // HALFWIDTH KATAKANA MIDDLE DOT
    '-',        // HYPHEN-MINUS
    '‐',        // HYPHEN
    '.',        // FULL STOP
    '=',        // EQUALS SIGN (compound boundary)
    '゠',       // KATAKANA-HIRAGANA DOUBLE HYPHEN
];

/// Offset between a katakana and its hiragana counterpart
const KANA_OFFSET: u32 = 0x60;

/// Get the script of a character
pub fn get_script(c: char) -> Script {
    if SEPARATOR_CHARS.contains(&c) || c.is_whitespace() {
        return Script::Separator;
    }

    match c {
        '\u{3041}'..='\u{3096}' | '\u{309D}'..='\u{309F}' => Script::Hiragana,
        '\u{30A1}'..='\u{30FA}' | '\u{30FC}'..='\u{30FF}' | '\u{31F0}'..='\u{31FF}' => {
            Script::Katakana
        }
        '\u{FF66}'..='\u{FF9F}' => Script::Katakana,
        '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' | '\u{F900}'..='\u{FAFF}' | '々' | '〆' => {
            Script::Kanji
        }
        'a'..='z' | 'A'..='Z' | '0'..='9' => Script::Latin,
        '\u{FF10}'..='\u{FF19}' | '\u{FF21}'..='\u{FF3A}' | '\u{FF41}'..='\u{FF5A}' => Script::Latin,
        '\u{3000}'..='\u{303F}' | '\u{FF01}'..='\u{FF0F}' | '\u{FF1A}'..='\u{FF20}' => Script::Punct,
        c if c.is_ascii_punctuation() => Script::Punct,
        _ => Script::Other,
    }
}

/// Check whether a character is a kanji
pub fn is_kanji(c: char) -> bool {
    get_script(c) == Script::Kanji
}

/// Check whether every character of a non-empty string is punctuation
pub fn is_punctuation(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| get_script(c) == Script::Punct)
}

/// Convert full-width katakana to hiragana; everything else is kept
pub fn katakana_to_hiragana(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\u{30A1}'..='\u{30F6}' | '\u{30FD}'..='\u{30FE}' => {
                char::from_u32(c as u32 - KANA_OFFSET).unwrap_or(c)
            }
            _ => c,
        })
        .collect()
}

/// Canonical form of a reading for comparison.
///
/// Applies NFKC (folding half-width katakana), drops separators and
/// converts katakana to hiragana, so "イノチ", "いのち" and "い・のち"
/// compare equal.
pub fn normalize_reading(reading: &str) -> String {
    let folded: String = reading
        .nfkc()
        .filter(|c| get_script(*c) != Script::Separator)
        .collect();
    katakana_to_hiragana(&folded)
}

/// Remove every whitespace character
pub fn remove_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Drop the last `n` characters (the whole string if it is shorter)
pub fn drop_last_chars(s: &str, n: usize) -> &str {
    let count = s.chars().count();
    if n >= count {
        return "";
    }
    match s.char_indices().nth(count - n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Drop the first `n` characters (empty if the string is shorter)
pub fn drop_first_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[idx..],
        None => "",
    }
}

/// The `n`-th character counted from the end (0 = last)
pub fn char_from_end(s: &str, n: usize) -> Option<char> {
    s.chars().rev().nth(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripts() {
        assert_eq!(get_script('あ'), Script::Hiragana);
        assert_eq!(get_script('ア'), Script::Katakana);
        assert_eq!(get_script('ー'), Script::Katakana);
        assert_eq!(get_script('来'), Script::Kanji);
        assert_eq!(get_script('々'), Script::Kanji);
        assert_eq!(get_script('。'), Script::Punct);
        assert_eq!(get_script('!'), Script::Punct);
        assert_eq!(get_script('a'), Script::Latin);
        assert_eq!(get_script('・'), Script::Separator);
        assert_eq!(get_script(' '), Script::Separator);
    }

    #[test]
    fn test_katakana_to_hiragana() {
        assert_eq!(katakana_to_hiragana("イノチ"), "いのち");
        assert_eq!(katakana_to_hiragana("ヴァ"), "ゔぁ");
        // the prolonged sound mark has no hiragana counterpart
        assert_eq!(katakana_to_hiragana("ラーメン"), "らーめん");
        assert_eq!(katakana_to_hiragana("命"), "命");
    }

    #[test]
    fn test_normalize_reading() {
        assert_eq!(normalize_reading("イノチ"), "いのち");
        assert_eq!(normalize_reading("い・のち"), "いのち");
        assert_eq!(normalize_reading("ｲﾉﾁ"), "いのち");
        assert_eq!(normalize_reading("-さん"), "さん");
        assert_eq!(normalize_reading("つれて くる"), "つれてくる");
    }

    #[test]
    fn test_char_trimming() {
        assert_eq!(drop_last_chars("つれてくる", 2), "つれて");
        assert_eq!(drop_last_chars("とぶ", 1), "と");
        assert_eq!(drop_last_chars("る", 2), "");
        assert_eq!(drop_first_chars("こさせる", 1), "させる");
        assert_eq!(drop_first_chars("", 1), "");
        assert_eq!(char_from_end("連れて来る", 1), Some('来'));
        assert_eq!(char_from_end("る", 1), None);
    }

    #[test]
    fn test_punctuation_and_whitespace() {
        assert!(is_punctuation("。"));
        assert!(is_punctuation("、。"));
        assert!(!is_punctuation("。あ"));
        assert!(!is_punctuation(""));
        assert_eq!(remove_whitespace("ではあり ません\u{3000}"), "ではありません");
    }
}
