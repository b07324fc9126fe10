//! Build configuration.
//!
//! Describes where the paradigm templates, lexicon dumps and difficulty
//! table live, and how difficulty markers are rendered. Every field has a
//! default so a partial TOML file is enough.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Configuration for building the dictionary from a data directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Base directory; relative paths below are resolved against it
    pub data_dir: PathBuf,
    /// Directory holding one template file per paradigm (`ja-<name>.txt`)
    pub template_dir: PathBuf,
    /// Directory holding the tab-separated lexicon dumps
    pub dictionary_dir: PathBuf,
    /// CSV file mapping characters to difficulty codes (optional on disk)
    pub difficulty_table: PathBuf,

    /// Extension of template files
    pub template_extension: String,
    /// Extension of dump files
    pub dictionary_extension: String,

    /// Separator placed between per-character difficulty codes
    pub difficulty_separator: String,
    /// Code used for characters missing from the difficulty table
    pub default_difficulty: String,
    /// Zero-based CSV column holding the character
    pub difficulty_char_column: usize,
    /// Zero-based CSV column holding the difficulty code
    pub difficulty_code_column: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            template_dir: PathBuf::from("inflection-templates"),
            dictionary_dir: PathBuf::from("dictionary"),
            difficulty_table: PathBuf::from("difficulty-rating/joyo-kanji.csv"),
            template_extension: "txt".to_string(),
            dictionary_extension: "tsv".to_string(),
            difficulty_separator: "-".to_string(),
            default_difficulty: "0".to_string(),
            difficulty_char_column: 1,
            difficulty_code_column: 5,
        }
    }
}

impl BuildConfig {
    /// Configuration rooted at the given data directory, defaults elsewhere.
    pub fn with_data_dir<P: Into<PathBuf>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Ok(Self::from_toml_str(&content)?)
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Absolute (or data-dir relative) template directory.
    pub fn template_path(&self) -> PathBuf {
        self.resolve(&self.template_dir)
    }

    /// Absolute (or data-dir relative) dump directory.
    pub fn dictionary_path(&self) -> PathBuf {
        self.resolve(&self.dictionary_dir)
    }

    /// Absolute (or data-dir relative) difficulty table path.
    pub fn difficulty_path(&self) -> PathBuf {
        self.resolve(&self.difficulty_table)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir.join(path)
        }
    }
}
