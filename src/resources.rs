//! Data directory discovery and the startup build.
//!
//! A data directory holds `inflection-templates/ja-*.txt`,
//! `dictionary/*.tsv` and optionally a difficulty CSV. Paths and
//! extensions come from [`BuildConfig`].

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::BuildConfig;
use crate::dictionary::{Dictionary, DictionaryBuilder};
use crate::difficulty::DifficultyTable;
use crate::error::{Error, Result};
use crate::ingest::Ingestor;
use crate::paradigm::ParadigmStore;

/// Input files found in a data directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataFiles {
    /// Paradigm templates, sorted
    pub templates: Vec<PathBuf>,
    /// Lexicon dumps, sorted
    pub dictionaries: Vec<PathBuf>,
    /// Difficulty table, if present
    pub difficulty: Option<PathBuf>,
}

impl DataFiles {
    /// Locate every input named by the configuration.
    ///
    /// Missing template or dictionary directories are errors; a missing
    /// difficulty table is not.
    pub fn discover(config: &BuildConfig) -> Result<Self> {
        let templates = collect_files(&config.template_path(), &config.template_extension)?;
        let dictionaries = collect_files(&config.dictionary_path(), &config.dictionary_extension)?;
        let difficulty = Some(config.difficulty_path()).filter(|p| p.is_file());
        if difficulty.is_none() {
            warn!(path = %config.difficulty_path().display(), "No difficulty table, using default codes");
        }
        info!(
            templates = templates.len(),
            dictionaries = dictionaries.len(),
            "Found data files"
        );
        Ok(DataFiles {
            templates,
            dictionaries,
            difficulty,
        })
    }
}

/// Recursively collect files with the given extension, sorted by path
pub fn collect_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::MissingResource(dir.to_path_buf()));
    }
    let mut files = Vec::new();
    walk(dir, extension, &mut files).map_err(|e| Error::io(dir, e))?;
    files.sort();
    Ok(files)
}

fn walk(dir: &Path, extension: &str, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            walk(&path, extension, files)?;
        } else if path.extension().map_or(false, |ext| ext == extension) {
            files.push(path);
        }
    }
    Ok(())
}

/// Load every template into a store
pub fn load_paradigms(files: &DataFiles) -> Result<ParadigmStore> {
    let mut store = ParadigmStore::new();
    store.load_files(&files.templates)?;
    Ok(store)
}

/// Load the difficulty table, or an empty one when none was found
pub fn load_difficulty(files: &DataFiles, config: &BuildConfig) -> Result<DifficultyTable> {
    let mut table = DifficultyTable::new()
        .with_default_code(config.default_difficulty.as_str())
        .with_separator(config.difficulty_separator.as_str());
    if let Some(path) = &files.difficulty {
        let loaded = table.load_csv_file(path, config.difficulty_char_column, config.difficulty_code_column)?;
        info!(path = %path.display(), loaded, "Read difficulty table");
    }
    Ok(table)
}

/// Build the paradigm store and the dictionary from a data directory
pub fn build_from_config(config: &BuildConfig) -> Result<(ParadigmStore, Dictionary)> {
    let files = DataFiles::discover(config)?;
    let store = load_paradigms(&files)?;
    let difficulty = load_difficulty(&files, config)?;

    let ingestor = Ingestor::new(&store, &difficulty);
    let mut builder = DictionaryBuilder::new();
    for path in &files.dictionaries {
        ingestor.ingest_file(path, &mut builder)?;
    }
    let dictionary = builder.build();
    Ok((store, dictionary))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    #[test]
    fn test_missing_directory() {
        let err = collect_files(Path::new("/nonexistent/templates"), "txt").unwrap_err();
        assert!(matches!(err, Error::MissingResource(_)));
    }

    #[test]
    fn test_discover_bundled_data() {
        let config = BuildConfig::with_data_dir(data_dir());
        let files = DataFiles::discover(&config).unwrap();

        assert!(files
            .templates
            .iter()
            .any(|p| p.file_name().map_or(false, |n| n == "ja-go-bu.txt")));
        assert!(files.templates.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(files.dictionaries.len(), 1);
        assert!(files.difficulty.is_some());
    }

    #[test]
    fn test_build_from_config() {
        let config = BuildConfig::with_data_dir(data_dir());
        let (store, dictionary) = build_from_config(&config).unwrap();

        assert!(store.contains("go-bu"));
        assert!(store.contains("suru-indep"));
        assert!(!dictionary.lookup("飛ばない").is_empty());
        assert_eq!(dictionary.lookup("明るい")[0].difficulty, "2-0-0");
    }

    #[test]
    fn test_missing_data_dir_fails() {
        let config = BuildConfig::with_data_dir("/nonexistent/data");
        assert!(build_from_config(&config).is_err());
    }
}
