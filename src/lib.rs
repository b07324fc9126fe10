//! # jahelper-rs
//!
//! A Japanese learner's dictionary core: it expands Wiktionary lexicon
//! dumps into every inflected surface form and matches the output of a
//! morphological segmenter (MeCab, Kuromoji) against the result.
//!
//! The pipeline has four stages:
//!
//! 1. [`ParadigmStore`] reads the suffix tables of each inflection family.
//! 2. [`Ingestor`] cleans dump rows into [`Entry`] values and resolves
//!    their paradigm.
//! 3. [`Expander`] derives one entry per paradigm rule.
//! 4. [`Matcher`] regroups segmenter fragments and ranks the candidates
//!    from the [`Dictionary`].
//!
//! ## Quick Start
//!
//! ```rust
//! use jahelper_rs::{build_dictionary, DifficultyTable, Matcher, ParadigmStore, SegmentedToken};
//!
//! let mut store = ParadigmStore::new();
//! store.load_str("go-bu", "|imperfective=ば\n|negative=ばない\n|formal=びます\n");
//!
//! let dump = "飛ぶ\tとぶ\tV1[go-bu]\t1) to fly 2) to jump";
//! let dictionary = build_dictionary(&store, &DifficultyTable::new(), [dump]);
//!
//! let matcher = Matcher::new(dictionary);
//! let tokens = [
//!     SegmentedToken::new("飛び", "トビ", "動詞", true),
//!     SegmentedToken::new("ませ", "マセ", "助動詞", true),
//!     SegmentedToken::new("ん", "ン", "助動詞", true),
//! ];
//! let spans = matcher.match_tokens(&tokens);
//!
//! assert_eq!(spans[0].surface, "飛びません");
//! assert_eq!(spans[0].best().unwrap().glosses, vec!["to fly", "to jump"]);
//! ```
//!
//! ## Loading a data directory
//!
//! ```no_run
//! use jahelper_rs::{build_from_config, BuildConfig};
//!
//! let config = BuildConfig::with_data_dir("data");
//! let (_store, dictionary) = build_from_config(&config)?;
//! println!("{} entries", dictionary.len());
//! # Ok::<(), jahelper_rs::Error>(())
//! ```

pub mod config;
pub mod dictionary;
pub mod difficulty;
pub mod entry;
pub mod error;
pub mod expander;
pub mod gloss;
pub mod inflection;
pub mod ingest;
pub mod kana;
pub mod matcher;
pub mod paradigm;
pub mod resources;

// Re-export main types for convenience
pub use config::BuildConfig;
pub use dictionary::{Dictionary, DictionaryBuilder, SharedDictionary};
pub use difficulty::DifficultyTable;
pub use entry::{Entry, EntryId, EntryKind, ParadigmTag};
pub use error::{Error, Result};
pub use expander::{Expander, StemRule};
pub use gloss::process_glosses;
pub use inflection::InflectionCategory;
pub use ingest::{build_dictionary, DumpRow, Ingestor};
pub use matcher::{parse_mecab_output, rank_candidates, MatchedSpan, Matcher, SegmentedToken};
pub use paradigm::{Paradigm, ParadigmStore, Rule};
pub use resources::{build_from_config, DataFiles};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_pipeline() {
        let mut store = ParadigmStore::new();
        store.load_str("ichi", "|negative=ない\n|continuative=\n|formal=ます\n");

        let dump = "## header\n食べる\tたべる\tV2\t1) to eat\n命\tいのち\tN\t1) life";
        let dictionary = build_dictionary(&store, &DifficultyTable::new(), [dump]);
        // 食べる + 6 derived + 命
        assert_eq!(dictionary.len(), 8);

        let matcher = Matcher::new(dictionary);
        let tokens = parse_mecab_output(
            "食べ\t動詞,自立,*,*,一段,連用形,食べる,タベ,タベ\n\
             まし\t助動詞,*,*,*,特殊・マス,連用形,ます,マシ,マシ\n\
             た\t助動詞,*,*,*,特殊・タ,基本形,た,タ,タ\n\
             命\t名詞,一般,*,*,*,*,命,イノチ,イノチ\n\
             EOS\n",
        );
        let spans = matcher.match_tokens(&tokens[0]);

        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].surface, "食べました");
        assert_eq!(spans[0].len, 3);
        assert_eq!(
            spans[0].best().unwrap().category(),
            Some(InflectionCategory::FormalPerfective)
        );
        assert_eq!(spans[1].best().unwrap().glosses, vec!["life"]);
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
