//! Progress reporting utilities using indicatif.
//!
//! This module provides the [`ProgressCallback`] trait, through which the
//! scan reports its passes, and the [`Progress`] reporter that renders them
//! as a single in-place line on stdout.

use std::fmt;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// A traversal pass of the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// First pass: count folders and files.
    Counting,
    /// Second pass: hash and classify each file.
    Classifying,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Counting => write!(f, "counting"),
            Phase::Classifying => write!(f, "classifying"),
        }
    }
}

/// Progress callback for the scan passes.
///
/// Implement this trait to receive progress updates during a scan.
pub trait ProgressCallback: Send + Sync {
    /// Called when a pass starts.
    ///
    /// `total` is the number of files the pass will process, or 0 when it is
    /// not yet known (the counting pass).
    fn on_phase_start(&self, phase: Phase, total: usize);

    /// Called after each file is processed.
    ///
    /// # Arguments
    ///
    /// * `processed` - Files processed so far in this pass (1-based)
    /// * `duplicates` - Duplicates found so far
    /// * `path` - File just processed
    fn on_progress(&self, processed: usize, duplicates: usize, path: &Path);

    /// Called when a pass completes.
    fn on_phase_end(&self, phase: Phase);
}

/// Progress reporter using indicatif.
///
/// Shows a spinner while counting and a single overwriting status line
/// while classifying. Install it only when stdout is a terminal.
#[derive(Default)]
pub struct Progress {
    bar: Mutex<Option<ProgressBar>>,
}

impl Progress {
    /// Create a new progress reporter.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashdupe::progress::Progress;
    ///
    /// let progress = Progress::new();
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn counting_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} Counting... {pos} files found")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
    }

    fn classifying_style() -> ProgressStyle {
        ProgressStyle::with_template("{pos} of {len} files analyzed, {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }

    fn set_bar(&self, bar: Option<ProgressBar>) -> Option<ProgressBar> {
        let mut slot = self.bar.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::replace(&mut *slot, bar)
    }
}

impl ProgressCallback for Progress {
    fn on_phase_start(&self, phase: Phase, total: usize) {
        let bar = match phase {
            Phase::Counting => {
                let pb = ProgressBar::with_draw_target(None, ProgressDrawTarget::stdout());
                pb.set_style(Self::counting_style());
                pb.enable_steady_tick(Duration::from_millis(100));
                pb
            }
            Phase::Classifying => {
                let pb =
                    ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::stdout());
                pb.set_style(Self::classifying_style());
                pb.set_message(duplicates_message(0));
                pb
            }
        };
        if let Some(previous) = self.set_bar(Some(bar)) {
            previous.finish_and_clear();
        }
    }

    fn on_progress(&self, processed: usize, duplicates: usize, _path: &Path) {
        if let Some(ref pb) = *self.bar.lock().unwrap_or_else(|e| e.into_inner()) {
            pb.set_position(processed as u64);
            pb.set_message(duplicates_message(duplicates));
        }
    }

    fn on_phase_end(&self, phase: Phase) {
        if let Some(pb) = self.set_bar(None) {
            match phase {
                // The counting summary replaces the spinner.
                Phase::Counting => pb.finish_and_clear(),
                Phase::Classifying => pb.finish(),
            }
        }
    }
}

fn duplicates_message(duplicates: usize) -> String {
    format!("{duplicates} duplicates found.")
}
