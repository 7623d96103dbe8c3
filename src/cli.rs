//! Command-line interface definitions for hashdupe.
//!
//! # Example
//!
//! ```bash
//! # Scan a directory
//! hashdupe ~/Downloads
//!
//! # Keep going past unreadable files, reporting them at the end
//! hashdupe --skip-errors ~/Downloads
//!
//! # Verbose mode for debugging
//! hashdupe -v ~/Downloads
//! ```

use clap::Parser;
use std::path::PathBuf;

use crate::scanner::{DEFAULT_BUFFER_SIZE, MAX_BUFFER_SIZE};

/// Find duplicate files in a directory tree by content hash.
///
/// Every file below PATH is hashed with SHA-256. Files with identical
/// content are listed together: the first one found, then its copies.
#[derive(Debug, Parser)]
#[command(name = "hashdupe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan for duplicates
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Increase verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress and all log output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Follow symbolic links during scan
    ///
    /// Links that point back to an ancestor directory are reported as errors.
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Skip unreadable files and directories instead of stopping
    ///
    /// Skipped entries are listed after the report.
    #[arg(long)]
    pub skip_errors: bool,

    /// Read buffer size used while hashing (e.g., 64KiB, 1MB)
    ///
    /// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB. Maximum 1GiB.
    #[arg(
        long,
        value_name = "SIZE",
        value_parser = parse_buffer_size,
        default_value_t = DEFAULT_BUFFER_SIZE
    )]
    pub buffer_size: usize,
}

/// Parse a human-readable size string into bytes.
///
/// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB, TB, TiB
/// Case-insensitive. Numbers without suffix are treated as bytes.
///
/// # Examples
///
/// ```
/// use hashdupe::cli::parse_size;
///
/// assert_eq!(parse_size("1024").unwrap(), 1024);
/// assert_eq!(parse_size("1KB").unwrap(), 1000);
/// assert_eq!(parse_size("1KiB").unwrap(), 1024);
/// assert_eq!(parse_size("1MiB").unwrap(), 1_048_576);
/// ```
/// # Errors
///
/// Returns an error if the string is empty, contains an invalid number,
/// a negative number, or an unknown size suffix.
pub fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Size cannot be empty".to_string());
    }

    // Find where the number ends and the suffix begins
    let (num_str, suffix) = match s.find(|c: char| !c.is_ascii_digit() && c != '.') {
        Some(idx) => (&s[..idx], s[idx..].trim().to_uppercase()),
        None => (s, String::new()),
    };

    let num: f64 = num_str
        .parse()
        .map_err(|_| format!("Invalid number: '{num_str}'"))?;

    if !num.is_finite() || num < 0.0 {
        return Err(format!("Invalid number: '{num_str}'"));
    }

    let multiplier: u64 = match suffix.as_str() {
        "" | "B" => 1,
        "KB" | "K" => 1_000,
        "KIB" => 1_024,
        "MB" | "M" => 1_000_000,
        "MIB" => 1_048_576,
        "GB" | "G" => 1_000_000_000,
        "GIB" => 1_073_741_824,
        "TB" | "T" => 1_000_000_000_000,
        "TIB" => 1_099_511_627_776,
        _ => return Err(format!("Unknown size suffix: '{suffix}'")),
    };

    Ok((num * multiplier as f64) as u64)
}

/// Parse a hashing buffer size between one byte and [`MAX_BUFFER_SIZE`].
///
/// # Errors
///
/// Returns an error for anything [`parse_size`] rejects, for zero, and for
/// sizes above [`MAX_BUFFER_SIZE`].
pub fn parse_buffer_size(s: &str) -> Result<usize, String> {
    let bytes = parse_size(s)?;
    if bytes == 0 {
        return Err("Buffer size must be at least 1 byte".to_string());
    }
    usize::try_from(bytes)
        .ok()
        .filter(|&size| size <= MAX_BUFFER_SIZE)
        .ok_or_else(|| format!("Buffer size too large: {bytes} (maximum is 1GiB)"))
}
