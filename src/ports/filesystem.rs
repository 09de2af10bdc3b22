//! Filesystem port for the primitive calls tree operations are built from.

use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// What kind of entry a path names, without following symbolic links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Symbolic link; never descended into.
    Symlink,
    /// Sockets, fifos, devices.
    Other,
}

impl EntryKind {
    /// Returns `true` for entries a traversal must not descend into.
    #[must_use]
    pub fn is_leaf(self) -> bool {
        !matches!(self, Self::Directory)
    }
}

/// Attributes of a single entry, as reported by `lstat`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMeta {
    /// Entry kind.
    pub kind: EntryKind,
    /// Size in bytes.
    pub size: u64,
    /// Last modification time, when the platform reports one.
    pub modified: Option<SystemTime>,
    /// Device and inode number; equal ids name the same underlying file
    /// even through different hard links. `None` where unsupported.
    pub file_id: Option<(u64, u64)>,
}

/// Provides filesystem access for listing, inspecting and mutating entries.
///
/// Abstracting the filesystem lets tests inject failures (permission
/// denial, entries vanishing mid-walk) without depending on the user the
/// tests run as.
pub trait FileSystem: Send + Sync {
    /// Reads entry attributes without following a trailing symbolic link.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry does not exist or cannot be inspected.
    fn symlink_metadata(&self, path: &Path) -> io::Result<EntryMeta>;

    /// Lists the full paths of the immediate children of a directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a directory or cannot be read.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Creates a single directory; the parent must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry already exists or the parent is not writable.
    fn create_dir(&self, path: &Path) -> io::Result<()>;

    /// Removes a file or symbolic link.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is missing or cannot be removed.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Removes an empty directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory is missing, non-empty, or protected.
    fn remove_dir(&self, path: &Path) -> io::Result<()>;

    /// Renames `from` to `to`, replacing `to` when the platform allows it.
    ///
    /// # Errors
    ///
    /// Returns an error if either side is inaccessible or they are on
    /// different devices.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Copies file contents from `from` to `to`, truncating `to`.
    ///
    /// # Errors
    ///
    /// Returns an error on any read or write failure.
    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<u64>;

    /// Resolves a path to its absolute, symlink-free form.
    ///
    /// # Errors
    ///
    /// Returns an error if any component does not exist.
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;
}
