//! Hash-keyed duplicate grouping.
//!
//! # Overview
//!
//! The [`DuplicateIndex`] maps each content digest to a [`FileRecord`]. The
//! first path seen with a digest becomes the record's `original`; every later
//! path with the same digest is appended to `duplicates`. Records are never
//! removed and keep first-discovery order.
//!
//! # Example
//!
//! ```
//! use hashdupe::duplicates::{Classification, DuplicateIndex};
//! use std::path::PathBuf;
//!
//! let mut index = DuplicateIndex::new();
//! let digest = [7u8; 32];
//!
//! assert_eq!(index.record(digest, PathBuf::from("/a.txt")), Classification::Original);
//! assert_eq!(index.record(digest, PathBuf::from("/b.txt")), Classification::Duplicate);
//!
//! let groups: Vec<_> = index.groups().collect();
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].original, PathBuf::from("/a.txt"));
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use crate::scanner::Digest;

/// All paths sharing one content digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Content digest shared by every path in this record
    pub hash: Digest,
    /// First path observed with this digest
    pub original: PathBuf,
    /// Later paths with the same digest, in discovery order
    pub duplicates: Vec<PathBuf>,
}

impl FileRecord {
    /// Create a record with no duplicates yet.
    #[must_use]
    pub fn new(hash: Digest, original: PathBuf) -> Self {
        Self {
            hash,
            original,
            duplicates: Vec::new(),
        }
    }

    /// Whether at least one duplicate has been recorded.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        !self.duplicates.is_empty()
    }

    /// Number of duplicate copies (excluding the original).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.duplicates.len()
    }

    /// Original followed by all duplicates.
    pub fn paths(&self) -> impl Iterator<Item = &PathBuf> {
        std::iter::once(&self.original).chain(self.duplicates.iter())
    }
}

/// Outcome of recording a path in the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// First file seen with this digest
    Original,
    /// Digest was already present
    Duplicate,
}

/// Mapping from content digest to [`FileRecord`].
#[derive(Debug, Default)]
pub struct DuplicateIndex {
    /// Records in first-discovery order
    records: Vec<FileRecord>,
    /// Digest to position in `records`
    positions: HashMap<Digest, usize>,
}

impl DuplicateIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `path` under `hash`.
    pub fn record(&mut self, hash: Digest, path: PathBuf) -> Classification {
        if let Some(&pos) = self.positions.get(&hash) {
            self.records[pos].duplicates.push(path);
            Classification::Duplicate
        } else {
            self.positions.insert(hash, self.records.len());
            self.records.push(FileRecord::new(hash, path));
            Classification::Original
        }
    }

    /// Number of distinct digests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, in discovery order.
    pub fn records(&self) -> impl Iterator<Item = &FileRecord> {
        self.records.iter()
    }

    /// Records with at least one duplicate, in discovery order.
    pub fn groups(&self) -> impl Iterator<Item = &FileRecord> {
        self.records.iter().filter(|r| r.has_duplicates())
    }

    /// Consume the index, keeping only records with duplicates.
    #[must_use]
    pub fn into_groups(self) -> Vec<FileRecord> {
        self.records
            .into_iter()
            .filter(FileRecord::has_duplicates)
            .collect()
    }
}
