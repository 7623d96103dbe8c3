//! Depth-first directory walker.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct, which traverses a directory
//! tree and reports each entry to a [`Visitor`]. Traversal is single-threaded
//! and uses [`walkdir`]'s explicit directory stack, so tree depth is not
//! limited by the call stack.
//!
//! # Ordering
//!
//! - The root itself is not reported.
//! - Entries are reported in the order the OS lists them (unsorted).
//! - A directory is reported before any of its contents.
//!
//! # Symbolic links
//!
//! By default links are never followed. A link whose target is a directory is
//! reported to [`Visitor::on_skipped_link`] and not descended into; any other
//! link is reported as a file. With
//! [`WalkerConfig::follow_symlinks`] links are resolved and a link back to an
//! ancestor is reported as [`ScanError::SymlinkLoop`] instead of recursing.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::{ScanError, WalkerConfig};

/// Receives entries discovered by a [`Walker`].
///
/// Every method has a default, so a visitor only implements the callbacks
/// it needs.
pub trait Visitor {
    /// Called for each directory, before its contents are visited.
    ///
    /// # Errors
    ///
    /// An error stops the walk and is returned from [`Walker::walk`].
    fn on_folder(&mut self, _path: &Path) -> Result<(), ScanError> {
        Ok(())
    }

    /// Called for each non-directory entry.
    ///
    /// # Errors
    ///
    /// An error stops the walk and is returned from [`Walker::walk`].
    fn on_file(&mut self, _path: &Path) -> Result<(), ScanError> {
        Ok(())
    }

    /// Called for a symbolic link to a directory that is not followed.
    ///
    /// # Errors
    ///
    /// An error stops the walk and is returned from [`Walker::walk`].
    fn on_skipped_link(&mut self, _path: &Path) -> Result<(), ScanError> {
        Ok(())
    }

    /// Called when an entry cannot be listed or inspected.
    ///
    /// The default re-raises the error, which ends the walk. Returning
    /// `Ok(())` skips the entry and continues.
    ///
    /// # Errors
    ///
    /// Returns the error to abort the walk.
    fn on_error(&mut self, err: ScanError) -> Result<(), ScanError> {
        Err(err)
    }
}

/// Directory walker for sequential file discovery.
#[derive(Debug, Clone)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given path.
    ///
    /// The root is not validated here; callers check it exists and is a
    /// directory before walking.
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
        }
    }

    /// Root directory of this walker.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the tree, reporting every descendant of the root to `visitor`.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by the visitor. Listing failures are
    /// routed through [`Visitor::on_error`] first.
    pub fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), ScanError> {
        log::debug!("Walking {}", self.root.display());

        let walk_dir = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(self.config.follow_symlinks);

        for entry in walk_dir {
            match entry {
                Ok(entry) => self.dispatch(&entry, visitor)?,
                Err(err) => visitor.on_error(self.convert_error(err))?,
            }
        }
        Ok(())
    }

    fn dispatch<V: Visitor + ?Sized>(
        &self,
        entry: &DirEntry,
        visitor: &mut V,
    ) -> Result<(), ScanError> {
        let path = entry.path();
        let file_type = entry.file_type();

        if file_type.is_dir() {
            log::trace!("Folder: {}", path.display());
            return visitor.on_folder(path);
        }

        // Unfollowed link to a directory: neither descend nor hash it.
        if file_type.is_symlink() && std::fs::metadata(path).is_ok_and(|m| m.is_dir()) {
            log::debug!("Skipping symlink to directory: {}", path.display());
            return visitor.on_skipped_link(path);
        }

        log::trace!("File: {}", path.display());
        visitor.on_file(path)
    }

    /// Convert a walkdir error to ScanError.
    fn convert_error(&self, err: walkdir::Error) -> ScanError {
        let path = err
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);

        if let Some(ancestor) = err.loop_ancestor() {
            return ScanError::SymlinkLoop {
                path,
                ancestor: ancestor.to_path_buf(),
            };
        }

        match err.into_io_error() {
            Some(source) => ScanError::from_io(path, source),
            None => ScanError::Io {
                path,
                source: io::Error::other("directory walk failed"),
            },
        }
    }
}
