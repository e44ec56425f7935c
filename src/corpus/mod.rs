//! Verse corpus store.
//!
//! Holds the flattened `(reference, text)` records the matcher draws from.
//! The corpus is loaded once at startup and shared read-only behind an `Arc`
//! for the lifetime of the process.
//!
//! - [`preprocess`] - Flattens the nested books/chapters/verses source document

pub mod preprocess;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single scripture citation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseRecord {
    /// Citation label, e.g. `"Isaiah 41:10"`.
    pub reference: String,
    /// Verse text.
    pub text: String,
}

impl VerseRecord {
    pub fn new(reference: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            text: text.into(),
        }
    }
}

/// Raised when the flattened corpus cannot be read.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// The backing file does not exist.
    #[error("Corpus data file not found at {}", .path.display())]
    NotFound { path: PathBuf },

    /// The backing file exists but could not be read.
    #[error("Failed to read corpus data: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a JSON array of `{reference, text}` objects.
    #[error("Malformed corpus data: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Ordered, immutable collection of verse records.
///
/// Duplicate references are kept as distinct entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    verses: Vec<VerseRecord>,
}

impl Corpus {
    /// Build a corpus from already-flattened records.
    pub fn from_records(records: Vec<VerseRecord>) -> Self {
        let total = records.len();
        let verses: Vec<VerseRecord> = records
            .into_iter()
            .filter(|v| !v.reference.trim().is_empty() && !v.text.trim().is_empty())
            .collect();

        if verses.len() < total {
            log::warn!(
                "Skipped {} corpus records with an empty reference or text",
                total - verses.len()
            );
        }

        Self { verses }
    }

    /// An empty corpus, the degraded state after a failed load.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Read a flattened JSON array of `{reference, text}` objects.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CorpusError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let raw = std::fs::read_to_string(path)?;
        let records: Vec<VerseRecord> = serde_json::from_str(&raw)?;
        Ok(Self::from_records(records))
    }

    /// Load the corpus, degrading to an empty one on failure.
    ///
    /// The failure is logged rather than propagated so the process keeps
    /// serving; every verse-producing path checks [`Corpus::is_empty`] first.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(corpus) => {
                log::info!("Loaded {} verses from {}", corpus.len(), path.display());
                corpus
            }
            Err(e) => {
                log::error!("Error: {}", e);
                Self::empty()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }

    pub fn verses(&self) -> &[VerseRecord] {
        &self.verses
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VerseRecord> {
        self.verses.iter()
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a VerseRecord;
    type IntoIter = std::slice::Iter<'a, VerseRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
