//! Exit codes.

/// Exit codes for the hashdupe application.
///
/// - 0: Success (scan completed, with or without duplicates)
/// - 1: General error (invalid root path, or an I/O error stopped the scan)
/// - 3: Partial success (completed with `--skip-errors`, some entries skipped)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success: Scan completed.
    Success = 0,
    /// General error: validation failed or the scan hit an I/O error.
    GeneralError = 1,
    /// Partial success: Scan completed but skipped unreadable entries.
    PartialSuccess = 3,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "HD000",
            Self::GeneralError => "HD001",
            Self::PartialSuccess => "HD003",
        }
    }
}
