//! Dictionary index: surface form → entries.
//!
//! Entries live in an arena and are addressed by [`EntryId`]; derived
//! entries reference their lemma by id. The index is filled once through a
//! [`DictionaryBuilder`] and read-only afterwards, so a built
//! [`Dictionary`] can be shared behind an `Arc` by any number of readers.

use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::Arc;
use tracing::{debug, info};

use crate::entry::{Entry, EntryId};

/// First line of an exported dictionary
pub const EXPORT_HEADER: &str = "## Source: https://en.wiktionary.org/";

/// Immutable surface-form index
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: Vec<Entry>,
    by_form: HashMap<String, Vec<EntryId>>,
    inflections: HashMap<EntryId, Vec<EntryId>>,
}

impl Dictionary {
    /// Entries stored under a surface form, in insertion order
    pub fn lookup(&self, form: &str) -> Vec<&Entry> {
        self.lookup_ids(form).iter().map(|id| &self.entries[id.0]).collect()
    }

    /// Ids stored under a surface form, in insertion order
    pub fn lookup_ids(&self, form: &str) -> &[EntryId] {
        self.by_form.get(form).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check if any entry has this surface form
    pub fn contains_form(&self, form: &str) -> bool {
        self.by_form.contains_key(form)
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.get(id.0)
    }

    /// The lemma a derived entry was generated from
    pub fn lemma_of(&self, entry: &Entry) -> Option<&Entry> {
        entry.lemma_id().and_then(|id| self.get(id))
    }

    /// Derived entries of a lemma, in expansion order
    pub fn inflections_of(&self, lemma: EntryId) -> Vec<&Entry> {
        self.inflections
            .get(&lemma)
            .map(|ids| ids.iter().map(|id| &self.entries[id.0]).collect())
            .unwrap_or_default()
    }

    /// Total number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct surface forms
    pub fn form_count(&self) -> usize {
        self.by_form.len()
    }

    /// All entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &Entry)> {
        self.entries.iter().enumerate().map(|(i, e)| (EntryId(i), e))
    }

    /// Write every entry as a dump-style TSV line.
    ///
    /// Derived entries carry two extra columns: the category and the
    /// lemma's form.
    pub fn write_tsv<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "{}", EXPORT_HEADER)?;
        for (_, entry) in self.iter() {
            write!(
                writer,
                "{}\t{}\t{}\t{}",
                entry.form,
                entry.pronunciation,
                entry.pos_tag(),
                entry.numbered_glosses()
            )?;
            if let (Some(category), Some(lemma)) = (entry.category(), self.lemma_of(entry)) {
                write!(writer, "\t{}\t{}", category, lemma.form)?;
            }
            writeln!(writer)?;
        }
        writer.flush()
    }
}

/// Single-threaded builder for a [`Dictionary`]
#[derive(Debug, Default)]
pub struct DictionaryBuilder {
    dictionary: Dictionary,
}

impl DictionaryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry under its surface form.
    ///
    /// A derived entry must reference a lemma that is already inserted.
    pub fn insert(&mut self, entry: Entry) -> EntryId {
        let dict = &mut self.dictionary;
        let id = EntryId(dict.entries.len());

        if let Some(lemma) = entry.lemma_id() {
            debug_assert!(lemma.0 < id.0, "derived entry inserted before its lemma");
            dict.inflections.entry(lemma).or_default().push(id);
        }
        dict.by_form.entry(entry.form.clone()).or_default().push(id);
        dict.entries.push(entry);
        id
    }

    /// Entry inserted under `id`
    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.dictionary.get(id)
    }

    pub fn len(&self) -> usize {
        self.dictionary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dictionary.is_empty()
    }

    /// Freeze the index
    pub fn build(self) -> Dictionary {
        let dictionary = self.dictionary;
        info!(
            entries = dictionary.len(),
            forms = dictionary.form_count(),
            "Built dictionary"
        );
        dictionary
    }
}

/// Build-once handle publishing a shared dictionary.
///
/// Concurrent callers of [`get_or_build`](Self::get_or_build) block until
/// the first build finishes; the build closure runs at most once
/// successfully.
#[derive(Debug, Default)]
pub struct SharedDictionary {
    cell: OnceCell<Arc<Dictionary>>,
}

impl SharedDictionary {
    pub const fn new() -> Self {
        SharedDictionary { cell: OnceCell::new() }
    }

    /// The published dictionary, if built
    pub fn get(&self) -> Option<Arc<Dictionary>> {
        self.cell.get().cloned()
    }

    /// Return the published dictionary, building it first if needed.
    /// A failed build publishes nothing.
    pub fn get_or_build<F, E>(&self, build: F) -> Result<Arc<Dictionary>, E>
    where
        F: FnOnce() -> Result<Dictionary, E>,
    {
        self.cell
            .get_or_try_init(|| {
                debug!("Building shared dictionary");
                build().map(Arc::new)
            })
            .cloned()
    }
}
