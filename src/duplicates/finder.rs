//! Two-pass duplicate detection.
//!
//! # Overview
//!
//! A [`Scan`] owns all state for one run and moves through a fixed sequence:
//!
//! ```text
//! NotStarted -> CountingPass -> ClassifyingPass -> Reporting -> Done
//!      \
//!       `-> Aborted   (validation or I/O failure)
//! ```
//!
//! 1. **Validate**: the root must exist and be a directory.
//! 2. **Count**: walk the tree once, counting folders and files. The file
//!    total is the denominator for progress.
//! 3. **Classify**: walk the tree again, hashing each file and recording it
//!    in the [`DuplicateIndex`].
//! 4. **Finish**: hand back a [`ScanReport`].
//!
//! Both passes use the same [`Walker`], so for a static tree the number of
//! files classified equals the number counted.
//!
//! [`DuplicateFinder`] wraps the sequence for callers that do not need to
//! act between passes.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::groups::{Classification, DuplicateIndex, FileRecord};
use crate::progress::{Phase, ProgressCallback};
use crate::scanner::{
    Hasher, ScanError, Visitor, Walker, WalkerConfig, DEFAULT_BUFFER_SIZE, MAX_BUFFER_SIZE,
};

/// Configuration for a scan.
#[derive(Clone)]
pub struct FinderConfig {
    /// Walker configuration
    pub walker_config: WalkerConfig,
    /// Hasher read buffer size in bytes
    pub buffer_size: usize,
    /// Record unreadable entries and continue instead of aborting
    pub skip_errors: bool,
    /// Optional progress callback
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FinderConfig")
            .field("walker_config", &self.walker_config)
            .field("buffer_size", &self.buffer_size)
            .field("skip_errors", &self.skip_errors)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            walker_config: WalkerConfig::default(),
            buffer_size: DEFAULT_BUFFER_SIZE,
            skip_errors: false,
            progress_callback: None,
        }
    }
}

impl FinderConfig {
    /// Set the walker configuration.
    #[must_use]
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    /// Set the hasher buffer size, clamped to `1..=MAX_BUFFER_SIZE`.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.clamp(1, MAX_BUFFER_SIZE);
        self
    }

    /// Skip unreadable entries instead of aborting the scan.
    #[must_use]
    pub fn with_skip_errors(mut self, skip: bool) -> Self {
        self.skip_errors = skip;
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }
}

/// Lifecycle of a [`Scan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Created, no pass run yet
    NotStarted,
    /// Counting pass entered
    CountingPass,
    /// Classification pass entered
    ClassifyingPass,
    /// Building the report
    Reporting,
    /// Report handed out
    Done,
    /// Validation or a pass failed; the scan cannot continue
    Aborted,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::NotStarted => "not started",
            RunState::CountingPass => "counting",
            RunState::ClassifyingPass => "classifying",
            RunState::Reporting => "reporting",
            RunState::Done => "done",
            RunState::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// Folder and file totals from the counting pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeCounts {
    /// Directories below the root
    pub folders: usize,
    /// Non-directory entries below the root
    pub files: usize,
}

/// Running counters for one scan.
#[derive(Debug, Default)]
pub struct ScanState {
    /// Directories seen by the counting pass
    pub folders: usize,
    /// Files seen by the counting pass
    pub files: usize,
    /// Files handled by the classification pass
    pub processed: usize,
    /// Files whose digest was already in the index
    pub duplicates: usize,
    /// Symlinks to directories left unfollowed by the counting pass
    pub skipped_links: usize,
    /// Entries skipped because of errors (only with `skip_errors`)
    pub skipped: Vec<ScanError>,
}

impl ScanState {
    /// Totals from the counting pass.
    #[must_use]
    pub fn counts(&self) -> TreeCounts {
        TreeCounts {
            folders: self.folders,
            files: self.files,
        }
    }
}

/// Final result of a scan.
#[derive(Debug)]
pub struct ScanReport {
    /// Counters at the end of the scan
    pub state: ScanState,
    /// Records with at least one duplicate, in discovery order
    pub groups: Vec<FileRecord>,
    /// Wall time of both passes
    pub duration: Duration,
}

impl ScanReport {
    /// Totals from the counting pass.
    #[must_use]
    pub fn counts(&self) -> TreeCounts {
        self.state.counts()
    }

    /// Number of duplicate groups.
    #[must_use]
    pub fn duplicate_groups(&self) -> usize {
        self.groups.len()
    }

    /// Number of duplicate files (excluding originals).
    #[must_use]
    pub fn duplicate_files(&self) -> usize {
        self.state.duplicates
    }

    /// Whether any entry was skipped because of an error.
    #[must_use]
    pub fn has_skipped(&self) -> bool {
        !self.state.skipped.is_empty()
    }
}

/// Errors that can occur during duplicate finding.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The provided path does not exist.
    #[error("Path doesn't exist: {0}")]
    PathNotFound(PathBuf),

    /// The provided path is not a directory.
    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),

    /// A scan operation was called in the wrong state.
    #[error("Cannot {operation} a scan that is {state}")]
    OutOfOrder {
        /// The operation that was attempted
        operation: &'static str,
        /// State the scan was in
        state: RunState,
    },

    /// A scan error occurred.
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// One duplicate-detection run over a single root.
pub struct Scan {
    walker: Walker,
    config: FinderConfig,
    state: RunState,
    counters: ScanState,
    index: DuplicateIndex,
    started: Option<Instant>,
}

impl Scan {
    /// Create a scan of `root`.
    #[must_use]
    pub fn new(root: &Path, config: FinderConfig) -> Self {
        Self {
            walker: Walker::new(root, config.walker_config.clone()),
            config,
            state: RunState::NotStarted,
            counters: ScanState::default(),
            index: DuplicateIndex::new(),
            started: None,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Counters so far.
    #[must_use]
    pub fn counters(&self) -> &ScanState {
        &self.counters
    }

    /// Check that the root exists and is a directory.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::PathNotFound`] or [`FinderError::NotADirectory`]
    /// and moves the scan to [`RunState::Aborted`].
    pub fn validate(&mut self) -> Result<(), FinderError> {
        self.expect_state("validate", RunState::NotStarted)?;

        let root = self.walker.root();
        let err = if !root.exists() {
            FinderError::PathNotFound(root.to_path_buf())
        } else if !root.is_dir() {
            FinderError::NotADirectory(root.to_path_buf())
        } else {
            return Ok(());
        };
        self.state = RunState::Aborted;
        Err(err)
    }

    /// Run the counting pass.
    ///
    /// # Errors
    ///
    /// Returns validation errors, or the first walk error unless
    /// `skip_errors` is set.
    pub fn count(&mut self) -> Result<TreeCounts, FinderError> {
        self.validate()?;
        self.state = RunState::CountingPass;
        self.started = Some(Instant::now());
        log::info!("Counting pass: {}", self.walker.root().display());

        let progress = self.config.progress_callback.as_deref();
        if let Some(cb) = progress {
            cb.on_phase_start(Phase::Counting, 0);
        }

        let mut counter = Counter {
            counters: &mut self.counters,
            skip_errors: self.config.skip_errors,
            progress,
        };
        let result = self.walker.walk(&mut counter);

        if let Some(cb) = progress {
            cb.on_phase_end(Phase::Counting);
        }
        self.abort_on_error(result)?;

        let counts = self.counters.counts();
        log::info!(
            "Counting pass: {} folders, {} files",
            counts.folders,
            counts.files
        );
        if self.counters.skipped_links > 0 {
            log::warn!(
                "{} symlinked directories were not scanned (use --follow-symlinks)",
                self.counters.skipped_links
            );
        }
        Ok(counts)
    }

    /// Run the classification pass.
    ///
    /// # Errors
    ///
    /// Returns the first walk or hash error unless `skip_errors` is set.
    pub fn classify(&mut self) -> Result<(), FinderError> {
        self.expect_state("classify", RunState::CountingPass)?;
        self.state = RunState::ClassifyingPass;
        log::info!("Classifying pass: {} files", self.counters.files);

        let progress = self.config.progress_callback.as_deref();
        if let Some(cb) = progress {
            cb.on_phase_start(Phase::Classifying, self.counters.files);
        }

        let mut classifier = Classifier {
            counters: &mut self.counters,
            index: &mut self.index,
            hasher: Hasher::with_buffer_size(self.config.buffer_size),
            skip_errors: self.config.skip_errors,
            progress,
        };
        let result = self.walker.walk(&mut classifier);

        if let Some(cb) = progress {
            cb.on_phase_end(Phase::Classifying);
        }
        self.abort_on_error(result)?;

        if self.counters.processed != self.counters.files {
            log::warn!(
                "Tree changed during scan: counted {} files, classified {}",
                self.counters.files,
                self.counters.processed
            );
        }
        log::info!(
            "Classifying pass: {} distinct contents, {} duplicates",
            self.index.len(),
            self.counters.duplicates
        );
        Ok(())
    }

    /// Finish the scan and take its report.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::OutOfOrder`] unless the classification pass
    /// has completed.
    pub fn finish(&mut self) -> Result<ScanReport, FinderError> {
        self.expect_state("finish", RunState::ClassifyingPass)?;
        self.state = RunState::Reporting;

        let index = std::mem::take(&mut self.index);
        let report = ScanReport {
            state: std::mem::take(&mut self.counters),
            groups: index.into_groups(),
            duration: self.started.map(|t| t.elapsed()).unwrap_or_default(),
        };

        self.state = RunState::Done;
        log::debug!(
            "Scan finished in {:?}: {} groups",
            report.duration,
            report.duplicate_groups()
        );
        Ok(report)
    }

    fn expect_state(&self, operation: &'static str, expected: RunState) -> Result<(), FinderError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(FinderError::OutOfOrder {
                operation,
                state: self.state,
            })
        }
    }

    fn abort_on_error(&mut self, result: Result<(), ScanError>) -> Result<(), FinderError> {
        result.map_err(|err| {
            self.state = RunState::Aborted;
            FinderError::from(err)
        })
    }
}

/// Counting-pass visitor.
struct Counter<'a> {
    counters: &'a mut ScanState,
    skip_errors: bool,
    progress: Option<&'a dyn ProgressCallback>,
}

impl Visitor for Counter<'_> {
    fn on_folder(&mut self, _path: &Path) -> Result<(), ScanError> {
        self.counters.folders += 1;
        Ok(())
    }

    fn on_file(&mut self, path: &Path) -> Result<(), ScanError> {
        self.counters.files += 1;
        if let Some(cb) = self.progress {
            cb.on_progress(self.counters.files, 0, path);
        }
        Ok(())
    }

    fn on_skipped_link(&mut self, path: &Path) -> Result<(), ScanError> {
        self.counters.skipped_links += 1;
        log::info!("Not following symlink to directory: {}", path.display());
        Ok(())
    }

    fn on_error(&mut self, err: ScanError) -> Result<(), ScanError> {
        if self.skip_errors {
            // Recorded by the classification pass, which sees the same error.
            log::debug!("Counting pass skipped: {}", err);
            Ok(())
        } else {
            Err(err)
        }
    }
}

/// Classification-pass visitor: hash, record, report progress.
struct Classifier<'a> {
    counters: &'a mut ScanState,
    index: &'a mut DuplicateIndex,
    hasher: Hasher,
    skip_errors: bool,
    progress: Option<&'a dyn ProgressCallback>,
}

impl Classifier<'_> {
    fn skip(&mut self, err: ScanError) -> Result<(), ScanError> {
        if self.skip_errors {
            log::warn!("Skipping {}", err);
            self.counters.skipped.push(err);
            Ok(())
        } else {
            Err(err)
        }
    }
}

impl Visitor for Classifier<'_> {
    fn on_file(&mut self, path: &Path) -> Result<(), ScanError> {
        match self.hasher.hash_file(path) {
            Ok(hash) => {
                if self.index.record(hash, path.to_path_buf()) == Classification::Duplicate {
                    self.counters.duplicates += 1;
                    log::debug!("Duplicate: {}", path.display());
                }
            }
            Err(err) => self.skip(err.into())?,
        }

        self.counters.processed += 1;
        if let Some(cb) = self.progress {
            cb.on_progress(self.counters.processed, self.counters.duplicates, path);
        }
        Ok(())
    }

    fn on_error(&mut self, err: ScanError) -> Result<(), ScanError> {
        self.skip(err)
    }
}

/// Duplicate finder that runs a complete [`Scan`].
///
/// # Example
///
/// ```no_run
/// use hashdupe::duplicates::{DuplicateFinder, FinderConfig};
/// use std::path::Path;
///
/// let finder = DuplicateFinder::new(FinderConfig::default());
/// let report = finder.find_duplicates(Path::new(".")).unwrap();
///
/// for group in &report.groups {
///     println!("{} has {} copies", group.original.display(), group.duplicate_count());
/// }
/// ```
#[derive(Debug, Default)]
pub struct DuplicateFinder {
    config: FinderConfig,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        Self { config }
    }

    /// Create a new duplicate finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Find all duplicate files below `path`.
    ///
    /// # Errors
    ///
    /// Returns `FinderError` if:
    /// - The path does not exist
    /// - The path is not a directory
    /// - An entry cannot be read and `skip_errors` is off
    pub fn find_duplicates(&self, path: &Path) -> Result<ScanReport, FinderError> {
        let mut scan = Scan::new(path, self.config.clone());
        scan.count()?;
        scan.classify()?;
        scan.finish()
    }
}
