//! SHA-256 file hasher with streaming support.
//!
//! # Overview
//! This module provides the [`Hasher`] struct for computing SHA-256 digests
//! of file contents. Files are read through a fixed-size buffer, so memory
//! use stays constant regardless of file size. The buffer size only affects
//! how many `read` calls are issued; it never changes the resulting digest.
//!
//! # Example
//!
//! ```no_run
//! use hashdupe::scanner::{hash_to_hex, Hasher};
//! use std::path::Path;
//!
//! let mut hasher = Hasher::new();
//! let digest = hasher.hash_file(Path::new("Cargo.toml")).unwrap();
//! println!("{}", hash_to_hex(&digest));
//! ```

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use sha2::{Digest as _, Sha256};

use super::HashError;

/// Default read chunk size (10 MiB).
pub const DEFAULT_BUFFER_SIZE: usize = 10 * 1024 * 1024;

/// Largest accepted read chunk size (1 GiB).
pub const MAX_BUFFER_SIZE: usize = 1024 * 1024 * 1024;

/// A SHA-256 content digest.
pub type Digest = [u8; 32];

/// Streaming SHA-256 hasher.
///
/// Owns its read buffer, which is reused for every file hashed, so a single
/// `Hasher` should be kept for the duration of a scan.
#[derive(Debug)]
pub struct Hasher {
    buffer: Vec<u8>,
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher {
    /// Create a hasher with [`DEFAULT_BUFFER_SIZE`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_buffer_size(DEFAULT_BUFFER_SIZE)
    }

    /// Create a hasher that reads in chunks of `size` bytes, clamped to
    /// `1..=MAX_BUFFER_SIZE`.
    #[must_use]
    pub fn with_buffer_size(size: usize) -> Self {
        Self {
            buffer: vec![0; size.clamp(1, MAX_BUFFER_SIZE)],
        }
    }

    /// Size of the read buffer in bytes.
    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.buffer.len()
    }

    /// Compute the digest of a file's full content.
    ///
    /// The file is opened, streamed to end-of-file and closed before this
    /// returns.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or read.
    pub fn hash_file(&mut self, path: &Path) -> Result<Digest, HashError> {
        let file = File::open(path).map_err(|e| HashError::from_io(path.to_path_buf(), e))?;
        let digest = self
            .hash_reader(file)
            .map_err(|e| HashError::from_io(path.to_path_buf(), e))?;
        log::trace!("Hashed {}: {}", path.display(), hash_to_hex(&digest));
        Ok(digest)
    }

    /// Compute the digest of everything `reader` yields until end-of-stream.
    ///
    /// # Errors
    ///
    /// Returns the first I/O error other than [`ErrorKind::Interrupted`].
    pub fn hash_reader<R: Read>(&mut self, mut reader: R) -> std::io::Result<Digest> {
        let mut hasher = Sha256::new();
        loop {
            let n = match reader.read(&mut self.buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            hasher.update(&self.buffer[..n]);
        }
        Ok(hasher.finalize().into())
    }
}

/// Render a digest as lowercase hex.
#[must_use]
pub fn hash_to_hex(hash: &Digest) -> String {
    use std::fmt::Write;

    hash.iter().fold(String::with_capacity(64), |mut out, byte| {
        let _ = write!(out, "{byte:02x}");
        out
    })
}
