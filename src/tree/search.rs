//! Recursive search by exact entry name.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::ShellError;
use crate::ports::filesystem::{EntryKind, FileSystem};
use crate::tree::EntryFailure;

/// Outcome of [`find`].
#[derive(Debug, Default)]
pub struct SearchReport {
    /// Absolute paths whose final component equals the target name.
    pub matches: Vec<PathBuf>,
    /// Directories whose immediate children held no match.
    pub empty_levels: Vec<PathBuf>,
    /// Directories or entries that could not be read and were skipped.
    pub failures: Vec<EntryFailure>,
}

impl SearchReport {
    fn skipped(&mut self, path: &Path, error: ShellError) {
        warn!(path = %path.display(), %error, "skipping during search");
        self.failures.push(EntryFailure::new(path, error));
    }
}

/// Finds every entry below `root` named exactly `name`.
///
/// Each directory's immediate children are checked before its
/// subdirectories are entered. Symbolic links are compared by name but
/// never followed, so link cycles terminate. Directories more than
/// `max_depth` levels below `root` are reported and not entered.
pub fn find(fs: &dyn FileSystem, root: &Path, name: &str, max_depth: usize) -> SearchReport {
    let target = OsStr::new(name);
    let mut report = SearchReport::default();
    let mut stack = vec![(root.to_path_buf(), 0_usize)];

    while let Some((dir, depth)) = stack.pop() {
        debug!(dir = %dir.display(), depth, "searching");
        let mut children = match fs.read_dir(&dir) {
            Ok(children) => children,
            Err(err) => {
                report.skipped(&dir, ShellError::from_io(&dir, err));
                continue;
            }
        };
        children.sort();

        let mut found_here = false;
        let mut subdirs = Vec::new();
        for child in children {
            if child.file_name() == Some(target) {
                report.matches.push(child.clone());
                found_here = true;
            }
            match fs.symlink_metadata(&child) {
                Ok(meta) if meta.kind == EntryKind::Directory => subdirs.push(child),
                Ok(_) => {}
                Err(err) => report.skipped(&child, ShellError::from_io(&child, err)),
            }
        }
        if !found_here {
            report.empty_levels.push(dir);
        }

        // Reverse so the first subdirectory is popped first.
        for sub in subdirs.into_iter().rev() {
            if depth + 1 > max_depth {
                let error = ShellError::DepthLimit { path: sub.clone(), limit: max_depth };
                report.skipped(&sub, error);
            } else {
                stack.push((sub, depth + 1));
            }
        }
    }
    report
}
