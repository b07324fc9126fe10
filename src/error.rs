//! Error type for dictionary construction.
//!
//! Only failures that prevent the dictionary from being built surface here.
//! Malformed template lines, short dump rows and unknown paradigms are
//! logged and skipped instead.

use std::path::PathBuf;

/// Result alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that can occur while loading resources and building the dictionary
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An input stream or file could not be read
    #[error("could not read '{}': {source}", path.display())]
    Io {
        /// Path (or stream name) of the failing input
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The TOML build configuration is malformed
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// The difficulty rating table is malformed
    #[error("invalid difficulty table: {0}")]
    Csv(#[from] csv::Error),

    /// A configured resource directory does not exist
    #[error("resource not found: {}", .0.display())]
    MissingResource(PathBuf),
}

impl Error {
    /// Wrap an I/O error together with the input it came from.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_the_input() {
        let err = Error::io(
            "dictionary/dump.tsv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        let msg = err.to_string();
        assert!(msg.contains("dictionary/dump.tsv"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn test_missing_resource_message() {
        let err = Error::MissingResource(PathBuf::from("data/inflection-templates"));
        assert_eq!(
            err.to_string(),
            "resource not found: data/inflection-templates"
        );
    }
}
