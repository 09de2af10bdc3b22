//! Operations on filesystem subtrees.
//!
//! Everything here is stateless: callers pass the filesystem port and
//! absolute paths, and get plain data back. Recursive operations walk with
//! an explicit worklist, treat symbolic links as leaves, and collect
//! per-entry failures instead of stopping at the first one.

pub mod delete;
pub mod node;
pub mod primitives;
pub mod search;

use std::path::PathBuf;

use crate::error::ShellError;

pub use delete::{remove_tree, DeleteReport, RemovedEntry};
pub use node::FileNode;
pub use primitives::{copy_file, list, make_dir, move_entry, stat};
pub use search::{find, SearchReport};

/// A single entry a traversal could not process.
#[derive(Debug)]
pub struct EntryFailure {
    /// Entry that was left in place or skipped.
    pub path: PathBuf,
    /// Why.
    pub error: ShellError,
}

impl EntryFailure {
    pub(crate) fn new(path: impl Into<PathBuf>, error: ShellError) -> Self {
        Self { path: path.into(), error }
    }
}
