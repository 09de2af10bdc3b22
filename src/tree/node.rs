//! Transient view of a single filesystem entry.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::ports::filesystem::{EntryKind, EntryMeta};

/// A filesystem entry as produced by listing or stat; never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    /// Final path component (the full path for a root).
    pub name: String,
    /// Absolute path of the entry.
    pub path: PathBuf,
    /// Entry kind, symbolic links not followed.
    pub kind: EntryKind,
    /// Size in bytes.
    pub size: u64,
    /// Last modification time.
    pub modified: Option<SystemTime>,
}

impl FileNode {
    /// Builds a node from a path and its attributes.
    #[must_use]
    pub fn new(path: &Path, meta: EntryMeta) -> Self {
        Self {
            name: display_name(path),
            path: path.to_path_buf(),
            kind: meta.kind,
            size: meta.size,
            modified: meta.modified,
        }
    }

    /// Returns `true` when the entry is a directory.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Last path component, or the whole path when there is none (`/`).
#[must_use]
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}
