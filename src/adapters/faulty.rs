//! Fault-injecting adapter for the `FileSystem` port.
//!
//! Wraps another implementation and fails selected calls on selected paths,
//! so partial-failure behavior can be exercised regardless of the user the
//! process runs as.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use crate::ports::filesystem::{EntryMeta, FileSystem};

/// Port method a fault applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `symlink_metadata`
    Metadata,
    /// `read_dir`
    ReadDir,
    /// `create_dir`
    CreateDir,
    /// `remove_file`
    RemoveFile,
    /// `remove_dir`
    RemoveDir,
    /// `rename`, matched on the source path.
    Rename,
    /// `copy_file`, matched on the source path.
    Copy,
}

/// Delegates to an inner filesystem, failing configured `(operation, path)` pairs.
pub struct FaultyFileSystem {
    inner: Box<dyn FileSystem>,
    faults: HashSet<(Operation, PathBuf)>,
    kind: io::ErrorKind,
}

impl FaultyFileSystem {
    /// Creates an adapter that injects `PermissionDenied` by default.
    pub fn new(inner: Box<dyn FileSystem>) -> Self {
        Self { inner, faults: HashSet::new(), kind: io::ErrorKind::PermissionDenied }
    }

    /// Fails `operation` whenever it is called on `path`.
    #[must_use]
    pub fn deny(mut self, operation: Operation, path: impl Into<PathBuf>) -> Self {
        self.faults.insert((operation, path.into()));
        self
    }

    /// Changes the error kind returned for injected failures.
    #[must_use]
    pub fn with_error_kind(mut self, kind: io::ErrorKind) -> Self {
        self.kind = kind;
        self
    }

    fn check(&self, operation: Operation, path: &Path) -> io::Result<()> {
        if self.faults.contains(&(operation, path.to_path_buf())) {
            Err(io::Error::new(self.kind, format!("injected {operation:?} failure")))
        } else {
            Ok(())
        }
    }
}

impl FileSystem for FaultyFileSystem {
    fn symlink_metadata(&self, path: &Path) -> io::Result<EntryMeta> {
        self.check(Operation::Metadata, path)?;
        self.inner.symlink_metadata(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        self.check(Operation::ReadDir, path)?;
        self.inner.read_dir(path)
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        self.check(Operation::CreateDir, path)?;
        self.inner.create_dir(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        self.check(Operation::RemoveFile, path)?;
        self.inner.remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        self.check(Operation::RemoveDir, path)?;
        self.inner.remove_dir(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        self.check(Operation::Rename, from)?;
        self.inner.rename(from, to)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<u64> {
        self.check(Operation::Copy, from)?;
        self.inner.copy_file(from, to)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        self.inner.canonicalize(path)
    }
}
