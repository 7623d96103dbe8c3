//! Output formatters for duplicate scan results.
//!
//! # Example
//!
//! ```no_run
//! use hashdupe::duplicates::DuplicateFinder;
//! use hashdupe::output::TextOutput;
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let report = finder.find_duplicates(Path::new(".")).unwrap();
//!
//! TextOutput::new(&report).write_to(std::io::stdout()).unwrap();
//! ```

pub mod text;

// Re-export main types
pub use text::{write_summary, TextOutput};
