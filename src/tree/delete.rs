//! Best-effort recursive delete.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::ShellError;
use crate::ports::filesystem::{EntryKind, FileSystem};
use crate::tree::EntryFailure;

/// An entry that was removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedEntry {
    /// Path of the removed entry.
    pub path: PathBuf,
    /// What it was before removal.
    pub kind: EntryKind,
}

/// Outcome of [`remove_tree`].
#[derive(Debug, Default)]
pub struct DeleteReport {
    /// Entries removed, children before their parent.
    pub removed: Vec<RemovedEntry>,
    /// Entries that remain, with the reason.
    pub failures: Vec<EntryFailure>,
}

impl DeleteReport {
    /// Returns `true` when every entry was removed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn removed(&mut self, path: &Path, kind: EntryKind) {
        debug!(path = %path.display(), ?kind, "removed");
        self.removed.push(RemovedEntry { path: path.to_path_buf(), kind });
    }

    fn failed(&mut self, path: &Path, error: ShellError) {
        warn!(path = %path.display(), %error, "could not remove");
        self.failures.push(EntryFailure::new(path, error));
    }
}

struct Frame {
    path: PathBuf,
    depth: usize,
    children_done: bool,
}

/// Deletes `root`, descending into directories depth-first.
///
/// Symbolic links are removed as leaves and never followed. A failure on one
/// entry is recorded and the walk moves on; its ancestors then fail to
/// remove as non-empty and are reported too. Directories more than
/// `max_depth` levels below `root` are not descended into. A trailing
/// separator on `root` is ignored, so a link is never resolved through it.
pub fn remove_tree(fs: &dyn FileSystem, root: &Path, max_depth: usize) -> DeleteReport {
    let mut report = DeleteReport::default();
    let root: PathBuf = root.components().collect();
    let root = root.as_path();

    let meta = match fs.symlink_metadata(root) {
        Ok(meta) => meta,
        Err(err) => {
            report.failed(root, ShellError::from_io(root, err));
            return report;
        }
    };
    if meta.kind.is_leaf() {
        remove_leaf(fs, root, meta.kind, &mut report);
        return report;
    }

    let mut stack = vec![Frame { path: root.to_path_buf(), depth: 0, children_done: false }];
    while let Some(frame) = stack.pop() {
        if frame.children_done {
            match fs.remove_dir(&frame.path) {
                Ok(()) => report.removed(&frame.path, EntryKind::Directory),
                Err(err) => report.failed(&frame.path, ShellError::from_io(&frame.path, err)),
            }
            continue;
        }

        let children = match fs.read_dir(&frame.path) {
            Ok(children) => children,
            Err(err) => {
                report.failed(&frame.path, ShellError::from_io(&frame.path, err));
                continue;
            }
        };
        let depth = frame.depth;
        stack.push(Frame { children_done: true, ..frame });

        for child in children {
            let kind = match fs.symlink_metadata(&child) {
                Ok(meta) => meta.kind,
                Err(err) => {
                    report.failed(&child, ShellError::from_io(&child, err));
                    continue;
                }
            };
            if kind.is_leaf() {
                remove_leaf(fs, &child, kind, &mut report);
            } else if depth + 1 > max_depth {
                let error = ShellError::DepthLimit { path: child.clone(), limit: max_depth };
                report.failed(&child, error);
            } else {
                stack.push(Frame { path: child, depth: depth + 1, children_done: false });
            }
        }
    }
    report
}

fn remove_leaf(fs: &dyn FileSystem, path: &Path, kind: EntryKind, report: &mut DeleteReport) {
    match fs.remove_file(path) {
        Ok(()) => report.removed(path, kind),
        Err(err) => report.failed(path, ShellError::from_io(path, err)),
    }
}
