//! hashdupe - Duplicate File Finder
//!
//! Finds duplicate files in a directory tree by SHA-256 content hash. A
//! first pass counts folders and files, a second pass hashes every file and
//! groups identical contents under the first path that was found.

pub mod cli;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;

use std::io::{IsTerminal, Write};
use std::path::Path;
use std::sync::Arc;

use cli::Cli;
use duplicates::{FinderConfig, Scan};
use error::ExitCode;
use progress::Progress;
use scanner::WalkerConfig;

/// Run the application for parsed CLI arguments.
///
/// # Errors
///
/// Returns an error if the root is invalid, if an entry cannot be read
/// (without `--skip-errors`), or if writing to stdout fails.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    let show_progress = !cli.quiet && std::io::stdout().is_terminal();
    let mut config = FinderConfig::default()
        .with_walker_config(WalkerConfig::new(cli.follow_symlinks))
        .with_buffer_size(cli.buffer_size)
        .with_skip_errors(cli.skip_errors);
    if show_progress {
        config = config.with_progress_callback(Arc::new(Progress::new()));
    }

    // Unlocked handle: the progress bar writes to stdout as well.
    run_scan(&cli.path, config, std::io::stdout(), show_progress)
}

/// Scan `root` and write the summary and report to `out`.
///
/// Set `progress_line` when a progress line is drawn on the same terminal,
/// so the report starts on a fresh line below it.
///
/// # Errors
///
/// Returns scan errors and any error from `out`.
pub fn run_scan<W: Write>(
    root: &Path,
    config: FinderConfig,
    mut out: W,
    progress_line: bool,
) -> anyhow::Result<ExitCode> {
    let mut scan = Scan::new(root, config);

    let counts = scan.count()?;
    output::write_summary(&mut out, counts)?;
    out.flush()?;

    scan.classify()?;
    let report = scan.finish()?;

    if progress_line {
        writeln!(out)?;
    }
    output::TextOutput::new(&report).write_to(&mut out)?;
    log::info!(
        "{} duplicate groups, {} duplicate files",
        report.duplicate_groups(),
        report.duplicate_files()
    );

    if report.has_skipped() {
        log::warn!(
            "Scan completed with {} skipped entries",
            report.state.skipped.len()
        );
        Ok(ExitCode::PartialSuccess)
    } else {
        Ok(ExitCode::Success)
    }
}
