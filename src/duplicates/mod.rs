//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Hash-keyed duplicate grouping ([`groups`])
//! - The two-pass count-then-classify scan ([`finder`])

pub mod finder;
pub mod groups;

pub use finder::{
    DuplicateFinder, FinderConfig, FinderError, RunState, Scan, ScanReport, ScanState, TreeCounts,
};
pub use groups::{Classification, DuplicateIndex, FileRecord};
