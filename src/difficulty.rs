//! Per-character difficulty markers.
//!
//! The surrounding application supplies a character → code table (for
//! instance a jōyō kanji grade list). A marker is one code per character of
//! a surface form, joined by a separator; characters missing from the table
//! get the default code.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};

/// Default code for characters missing from the table
pub const DEFAULT_CODE: &str = "0";

/// Default separator between per-character codes
pub const DEFAULT_SEPARATOR: &str = "-";

/// Character → difficulty code lookup
#[derive(Debug, Clone)]
pub struct DifficultyTable {
    codes: HashMap<char, String>,
    default_code: String,
    separator: String,
}

impl DifficultyTable {
    /// Create an empty table with the default code and separator
    pub fn new() -> Self {
        DifficultyTable {
            codes: HashMap::new(),
            default_code: DEFAULT_CODE.to_string(),
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    /// Use a different code for unknown characters
    pub fn with_default_code(mut self, code: impl Into<String>) -> Self {
        self.default_code = code.into();
        self
    }

    /// Use a different separator between codes
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Assign a code to a character
    pub fn insert(&mut self, c: char, code: impl Into<String>) {
        self.codes.insert(c, code.into());
    }

    /// Read a CSV table, taking the character and the code from the given
    /// zero-based columns. Rows whose character cell is not exactly one
    /// character (headers, blank lines) are skipped.
    pub fn load_csv<R: Read>(&mut self, reader: R, char_column: usize, code_column: usize) -> Result<usize> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut loaded = 0;
        for record in csv.records() {
            let record = record?;
            let (Some(cell), Some(code)) = (record.get(char_column), record.get(code_column)) else {
                continue;
            };
            let mut chars = cell.trim().chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                self.insert(c, code.trim());
                loaded += 1;
            }
        }
        Ok(loaded)
    }

    /// Read a CSV table from a file
    pub fn load_csv_file<P: AsRef<Path>>(&mut self, path: P, char_column: usize, code_column: usize) -> Result<usize> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| Error::io(path, e))?;
        self.load_csv(file, char_column, code_column)
    }

    /// Code for a single character
    pub fn code_for(&self, c: char) -> &str {
        self.codes.get(&c).map(String::as_str).unwrap_or(&self.default_code)
    }

    /// Marker string for a surface form
    pub fn marker(&self, text: &str) -> String {
        text.chars()
            .map(|c| self.code_for(c))
            .collect::<Vec<_>>()
            .join(&self.separator)
    }

    /// Number of characters with an explicit code
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Check if the table has no explicit codes
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self::new()
    }
}
