//! Plain-text output formatter for duplicate scan results.
//!
//! # Format
//!
//! ```text
//! 2 folders and 5 files found
//!
//! <progress line>
//!
//! /root/a.txt
//!     /root/sub/a-copy.txt
//!     /root/other/a.txt
//!
//! ```
//!
//! Each group prints the original on its own line and every duplicate
//! indented by four spaces, followed by a blank line. Files without
//! duplicates are not listed.

use std::io::{self, Write};

use crate::duplicates::{FileRecord, ScanReport, TreeCounts};

const INDENT: &str = "    ";

/// Write the counting-pass summary line followed by a blank line.
///
/// # Errors
///
/// Returns any error from `writer`.
pub fn write_summary<W: Write>(mut writer: W, counts: TreeCounts) -> io::Result<()> {
    writeln!(
        writer,
        "{} folders and {} files found",
        counts.folders, counts.files
    )?;
    writeln!(writer)
}

/// Text formatter for a finished scan.
pub struct TextOutput<'a> {
    report: &'a ScanReport,
}

impl<'a> TextOutput<'a> {
    /// Create a new text formatter.
    #[must_use]
    pub fn new(report: &'a ScanReport) -> Self {
        Self { report }
    }

    /// Write the duplicate groups, then any skipped entries.
    ///
    /// # Errors
    ///
    /// Returns any error from `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for group in &self.report.groups {
            write_group(&mut writer, group)?;
        }

        let skipped = &self.report.state.skipped;
        if !skipped.is_empty() {
            writeln!(writer, "Skipped {} entries:", skipped.len())?;
            for err in skipped {
                writeln!(writer, "{INDENT}{err}")?;
            }
            writeln!(writer)?;
        }
        writer.flush()
    }
}

fn write_group<W: Write>(writer: &mut W, group: &FileRecord) -> io::Result<()> {
    writeln!(writer, "{}", group.original.display())?;
    for path in &group.duplicates {
        writeln!(writer, "{INDENT}{}", path.display())?;
    }
    writeln!(writer)
}
