//! Logging infrastructure for hashdupe.
//!
//! Structured logging uses the `log` facade with an `env_logger` backend
//! writing to stderr, so stdout carries only the scan output. The level comes
//! from the CLI flags alone:
//!
//! - `--quiet`: error only
//! - default: warn (skipped entries, unfollowed directory links, tree changes)
//! - `-v`: info (pass boundaries and totals)
//! - `-vv`: debug (duplicates, skipped symlinks)
//! - `-vvv`: trace (every entry and digest)
//!
//! # Build-specific Formatting
//!
//! - **Debug builds**: timestamp, level and module path
//! - **Release builds**: level and message only

use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;

/// Initialize the logging subsystem based on CLI verbosity flags.
///
/// Call once at startup, before any logging calls are made. Later calls
/// are ignored.
pub fn init_logging(verbose: u8, quiet: bool) {
    let level = determine_level(verbose, quiet);

    let mut builder = Builder::new();
    builder.filter_level(level);
    configure_format(&mut builder);

    if builder.try_init().is_ok() {
        log::debug!("Logging initialized at level: {:?}", level);
    }
}

/// Determine the log level from CLI flags.
fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn configure_format(builder: &mut Builder) {
    #[cfg(debug_assertions)]
    {
        builder.format(|buf, record| {
            let level = record.level();
            let level_style = buf.default_level_style(level);
            writeln!(
                buf,
                "{} {level_style}{:<5}{level_style:#} [{}] {}",
                buf.timestamp_seconds(),
                level,
                record.module_path().unwrap_or("unknown"),
                record.args()
            )
        });
    }

    #[cfg(not(debug_assertions))]
    {
        builder.format(|buf, record| {
            let level = record.level();
            let level_style = buf.default_level_style(level);
            writeln!(
                buf,
                "{level_style}{:<5}{level_style:#} {}",
                level,
                record.args()
            )
        });
    }
}
