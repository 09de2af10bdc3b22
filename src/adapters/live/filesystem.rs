//! Live filesystem adapter using `std::fs`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::ports::filesystem::{EntryKind, EntryMeta, FileSystem};

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn symlink_metadata(&self, path: &Path) -> io::Result<EntryMeta> {
        let meta = fs::symlink_metadata(path)?;
        let file_type = meta.file_type();
        let kind = if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        };
        Ok(EntryMeta {
            kind,
            size: meta.len(),
            modified: meta.modified().ok(),
            file_id: file_id(&meta),
        })
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            entries.push(entry?.path());
        }
        Ok(entries)
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<u64> {
        fs::copy(from, to)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(path)
    }
}

#[cfg(unix)]
fn file_id(meta: &fs::Metadata) -> Option<(u64, u64)> {
    use std::os::unix::fs::MetadataExt;
    Some((meta.dev(), meta.ino()))
}

#[cfg(not(unix))]
fn file_id(_meta: &fs::Metadata) -> Option<(u64, u64)> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_kinds_without_following_links() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, b"hello").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let fs_port = LiveFileSystem;
        let meta = fs_port.symlink_metadata(&file).unwrap();
        assert_eq!(meta.kind, EntryKind::File);
        assert_eq!(meta.size, 5);
        assert!(meta.modified.is_some());
        assert_eq!(
            fs_port.symlink_metadata(&dir.path().join("sub")).unwrap().kind,
            EntryKind::Directory
        );

        #[cfg(unix)]
        {
            let link = dir.path().join("link");
            std::os::unix::fs::symlink(dir.path().join("sub"), &link).unwrap();
            assert_eq!(fs_port.symlink_metadata(&link).unwrap().kind, EntryKind::Symlink);
        }
    }

    #[cfg(unix)]
    #[test]
    fn hard_links_share_a_file_id() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.txt");
        let other = dir.path().join("b.txt");
        fs::write(&file, b"x").unwrap();
        fs::write(&other, b"x").unwrap();
        fs::hard_link(&file, dir.path().join("alias")).unwrap();

        let id = |p: &Path| LiveFileSystem.symlink_metadata(p).unwrap().file_id;
        assert!(id(&file).is_some());
        assert_eq!(id(&file), id(&dir.path().join("alias")));
        assert_ne!(id(&file), id(&other));
    }

    #[test]
    fn read_dir_returns_full_child_paths() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("one"), b"").unwrap();
        fs::write(dir.path().join("two"), b"").unwrap();

        let mut children = LiveFileSystem.read_dir(dir.path()).unwrap();
        children.sort();
        assert_eq!(children, vec![dir.path().join("one"), dir.path().join("two")]);
    }

    #[test]
    fn read_dir_on_missing_path_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = LiveFileSystem.read_dir(&dir.path().join("missing")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
