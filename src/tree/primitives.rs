//! Non-recursive primitives: list, mkdir, move, copy, stat.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Result, ShellError};
use crate::ports::filesystem::{EntryKind, FileSystem};
use crate::tree::node::FileNode;

/// Lists the immediate children of `dir`.
///
/// An unreadable directory yields an empty listing. Children that vanish
/// between the listing and their `lstat` are skipped.
pub fn list(fs: &dyn FileSystem, dir: &Path, sort: bool) -> Vec<FileNode> {
    let children = match fs.read_dir(dir) {
        Ok(children) => children,
        Err(err) => {
            warn!(path = %dir.display(), error = %err, "cannot list directory");
            return Vec::new();
        }
    };

    let mut nodes: Vec<FileNode> = children
        .into_iter()
        .filter_map(|child| match fs.symlink_metadata(&child) {
            Ok(meta) => Some(FileNode::new(&child, meta)),
            Err(err) => {
                warn!(path = %child.display(), error = %err, "skipping unreadable entry");
                None
            }
        })
        .collect();
    if sort {
        nodes.sort_by(|a, b| a.name.cmp(&b.name));
    }
    nodes
}

/// Creates one directory at `path`.
///
/// # Errors
///
/// Returns an error if the entry already exists or cannot be created.
pub fn make_dir(fs: &dyn FileSystem, path: &Path) -> Result<PathBuf> {
    fs.create_dir(path).map_err(|e| ShellError::from_io(path, e))?;
    debug!(path = %path.display(), "created directory");
    Ok(path.to_path_buf())
}

/// Reports attributes of a single entry.
///
/// # Errors
///
/// Returns an error if the entry is missing or its attributes unreadable.
pub fn stat(fs: &dyn FileSystem, path: &Path) -> Result<FileNode> {
    let meta = fs.symlink_metadata(path).map_err(|e| ShellError::from_io(path, e))?;
    Ok(FileNode::new(path, meta))
}

/// Moves `source` to `destination/basename(source)`, replacing any entry there.
///
/// Both sides are validated before anything is touched. A plain file on a
/// different device is copied then removed.
///
/// # Errors
///
/// Returns an error if the source is missing, the destination is not an
/// existing directory, or the rename fails.
pub fn move_entry(fs: &dyn FileSystem, source: &Path, destination: &Path) -> Result<PathBuf> {
    let meta = fs.symlink_metadata(source).map_err(|e| ShellError::from_io(source, e))?;
    let target = target_path(fs, source, destination)?;

    match fs.rename(source, &target) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::CrossesDevices && meta.kind == EntryKind::File => {
            debug!(from = %source.display(), "rename crosses devices, copying");
            fs.copy_file(source, &target).map_err(|e| ShellError::from_io(&target, e))?;
            fs.remove_file(source).map_err(|e| ShellError::from_io(source, e))?;
        }
        Err(err) => return Err(ShellError::from_io(source, err)),
    }
    debug!(from = %source.display(), to = %target.display(), "moved");
    Ok(target)
}

/// Copies the file `source` to `destination/basename(source)`, overwriting.
///
/// # Errors
///
/// Returns an error if the source is missing or not a regular file, the
/// destination is not an existing directory, or the copy fails.
pub fn copy_file(fs: &dyn FileSystem, source: &Path, destination: &Path) -> Result<PathBuf> {
    let meta = fs.symlink_metadata(source).map_err(|e| ShellError::from_io(source, e))?;
    if meta.kind == EntryKind::Directory {
        return Err(ShellError::IsADirectory { path: source.to_path_buf() });
    }
    let target = target_path(fs, source, destination)?;

    let bytes = fs.copy_file(source, &target).map_err(|e| ShellError::from_io(&target, e))?;
    debug!(from = %source.display(), to = %target.display(), bytes, "copied");
    Ok(target)
}

/// Validates `destination` as a directory and computes where `source` lands.
///
/// The target must not be the source itself, whether reached through a
/// symbolic link or a hard link.
fn target_path(fs: &dyn FileSystem, source: &Path, destination: &Path) -> Result<PathBuf> {
    let name =
        source.file_name().ok_or_else(|| ShellError::NotFound { path: source.to_path_buf() })?;

    // Follow links here: a link to a directory is a valid destination.
    let resolved =
        fs.canonicalize(destination).map_err(|e| ShellError::from_io(destination, e))?;
    let dest_meta =
        fs.symlink_metadata(&resolved).map_err(|e| ShellError::from_io(destination, e))?;
    if dest_meta.kind != EntryKind::Directory {
        return Err(ShellError::NotADirectory { path: destination.to_path_buf() });
    }

    let target = destination.join(name);
    if let (Ok(a), Ok(b)) = (fs.canonicalize(source), fs.canonicalize(&target)) {
        if a == b {
            return Err(ShellError::SameEntry { path: target });
        }
    }
    if let (Ok(a), Ok(b)) = (fs.symlink_metadata(source), fs.symlink_metadata(&target)) {
        if a.file_id.is_some() && a.file_id == b.file_id {
            return Err(ShellError::SameEntry { path: target });
        }
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::adapters::live::LiveFileSystem;

    #[test]
    fn list_sorts_and_reports_attributes() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), b"12345").unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();

        let nodes = list(&LiveFileSystem, dir.path(), true);
        let names: Vec<_> = nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["a", "b.txt"]);
        assert!(nodes[0].is_dir());
        assert_eq!(nodes[1].size, 5);
    }

    #[test]
    fn list_of_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list(&LiveFileSystem, &dir.path().join("nope"), true).is_empty());
    }

    #[test]
    fn make_dir_twice_reports_already_exists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("foo");
        make_dir(&LiveFileSystem, &path).unwrap();
        let err = make_dir(&LiveFileSystem, &path).unwrap_err();
        assert!(matches!(err, ShellError::AlreadyExists { .. }));
    }

    #[test]
    fn stat_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = stat(&LiveFileSystem, &dir.path().join("ghost")).unwrap_err();
        assert!(matches!(err, ShellError::NotFound { .. }));
    }

    #[test]
    fn move_twice_overwrites_destination() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("a.txt");
        let dest = dir.path().join("dir");
        fs::create_dir(&dest).unwrap();

        fs::write(&src, b"first").unwrap();
        let target = move_entry(&LiveFileSystem, &src, &dest).unwrap();
        assert_eq!(target, dest.join("a.txt"));

        fs::write(&src, b"second").unwrap();
        move_entry(&LiveFileSystem, &src, &dest).unwrap();
        assert!(!src.exists());
        assert_eq!(fs::read_to_string(dest.join("a.txt")).unwrap(), "second");
    }

    #[test]
    fn move_moves_directories() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("tree");
        fs::create_dir_all(src.join("inner")).unwrap();
        let dest = dir.path().join("dest");
        fs::create_dir(&dest).unwrap();

        move_entry(&LiveFileSystem, &src, &dest).unwrap();
        assert!(dest.join("tree/inner").is_dir());
        assert!(!src.exists());
    }

    #[test]
    fn move_with_missing_destination_leaves_source() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("a.txt");
        fs::write(&src, b"x").unwrap();

        let err = move_entry(&LiveFileSystem, &src, &dir.path().join("nowhere")).unwrap_err();
        assert!(matches!(err, ShellError::NotFound { .. }));
        assert!(src.exists());
    }

    #[test]
    fn move_missing_source_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = move_entry(&LiveFileSystem, &dir.path().join("ghost"), dir.path()).unwrap_err();
        assert!(matches!(err, ShellError::NotFound { .. }));
    }

    #[test]
    fn copy_into_file_is_not_a_directory_and_mutates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("a.txt");
        let not_dir = dir.path().join("plain.txt");
        fs::write(&src, b"payload").unwrap();
        fs::write(&not_dir, b"untouched").unwrap();

        let err = copy_file(&LiveFileSystem, &src, &not_dir).unwrap_err();
        assert!(matches!(err, ShellError::NotADirectory { .. }));
        assert_eq!(fs::read_to_string(&not_dir).unwrap(), "untouched");
        assert_eq!(fs::read_to_string(&src).unwrap(), "payload");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn copy_overwrites_existing_target() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("a.txt");
        let dest = dir.path().join("out");
        fs::create_dir(&dest).unwrap();
        fs::write(dest.join("a.txt"), b"old contents").unwrap();
        fs::write(&src, b"new").unwrap();

        let target = copy_file(&LiveFileSystem, &src, &dest).unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"new");
        assert!(src.exists());
    }

    #[test]
    fn copy_of_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("sub");
        fs::create_dir(&src).unwrap();
        let err = copy_file(&LiveFileSystem, &src, dir.path()).unwrap_err();
        assert!(matches!(err, ShellError::IsADirectory { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn copy_onto_hard_link_of_source_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("a.txt");
        let dest = dir.path().join("out");
        fs::create_dir(&dest).unwrap();
        fs::write(&src, b"payload").unwrap();
        fs::hard_link(&src, dest.join("a.txt")).unwrap();

        let err = copy_file(&LiveFileSystem, &src, &dest).unwrap_err();
        assert!(matches!(err, ShellError::SameEntry { .. }));
        assert_eq!(fs::read_to_string(&src).unwrap(), "payload");
    }

    #[cfg(unix)]
    #[test]
    fn move_onto_hard_link_of_source_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("a.txt");
        let dest = dir.path().join("out");
        fs::create_dir(&dest).unwrap();
        fs::write(&src, b"payload").unwrap();
        fs::hard_link(&src, dest.join("a.txt")).unwrap();

        let err = move_entry(&LiveFileSystem, &src, &dest).unwrap_err();
        assert!(matches!(err, ShellError::SameEntry { .. }));
        assert_eq!(fs::read_to_string(&src).unwrap(), "payload");
    }

    #[test]
    fn copy_onto_itself_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("a.txt");
        fs::write(&src, b"keep me").unwrap();

        let err = copy_file(&LiveFileSystem, &src, dir.path()).unwrap_err();
        assert!(matches!(err, ShellError::SameEntry { .. }));
        assert_eq!(fs::read_to_string(&src).unwrap(), "keep me");
    }
}
