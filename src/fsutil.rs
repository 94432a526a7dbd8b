//! Filesystem primitives shared by commands.
//!
//! Everything here is plain blocking I/O returning `io::Result`; callers
//! attach context.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;
use walkdir::WalkDir;

/// Write `contents` to `path` via a temp file in the same directory + rename.
///
/// A crash mid-write leaves either the old file or the new one, never a
/// truncated mix. Existing permissions are carried over.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;

    if let Ok(meta) = fs::metadata(path) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }

    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Every regular file under `root`, as paths relative to `root`, sorted.
///
/// Symlinks are listed as files and not followed.
pub fn list_files(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_dir() {
            continue;
        }
        if let Ok(rel) = entry.path().strip_prefix(root) {
            files.push(rel.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

/// Move one file, creating the destination's parent directories.
///
/// `rename` first; across filesystems fall back to copy + delete.
pub fn move_file(src: &Path, dest: &Path) -> io::Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    match fs::rename(src, dest) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            debug!(
                "rename {} -> {} failed ({}), copying",
                src.display(),
                dest.display(),
                rename_err
            );
            fs::copy(src, dest)?;
            fs::remove_file(src)
        }
    }
}

/// Whether `dir` is a directory with no entries
pub fn is_empty_dir(dir: &Path) -> io::Result<bool> {
    Ok(fs::read_dir(dir)?.next().is_none())
}

/// Remove `dir` only if it is empty. Returns whether it was removed.
pub fn remove_dir_if_empty(dir: &Path) -> io::Result<bool> {
    if !dir.is_dir() || !is_empty_dir(dir)? {
        return Ok(false);
    }
    fs::remove_dir(dir)?;
    debug!("removed empty directory {}", dir.display());
    Ok(true)
}

/// Remove every empty directory under `root` (and `root` itself), innermost
/// first. Directories that contain files survive, as do their ancestors.
///
/// `keep` and all of its ancestors are never removed, even when empty.
pub fn prune_empty_dirs(root: &Path, keep: &Path) -> io::Result<Vec<PathBuf>> {
    // Snapshot first so the walk never sees a directory we already deleted
    let mut dirs = Vec::new();
    for entry in WalkDir::new(root).follow_links(false).contents_first(true) {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        }
    }

    let mut removed = Vec::new();
    for dir in dirs {
        if keep.starts_with(&dir) {
            continue;
        }
        if remove_dir_if_empty(&dir)? {
            removed.push(dir);
        }
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_replaces_contents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/file.txt");

        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        // No stray temp files left next to the target
        assert_eq!(fs::read_dir(temp.path().join("nested")).unwrap().count(), 1);
    }

    #[test]
    fn test_list_files_is_relative_and_sorted() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("b/c")).unwrap();
        fs::create_dir_all(temp.path().join("empty")).unwrap();
        fs::write(temp.path().join("b/c/two.kt"), "2").unwrap();
        fs::write(temp.path().join("a.kt"), "1").unwrap();

        let files = list_files(temp.path()).unwrap();
        assert_eq!(
            files,
            vec![PathBuf::from("a.kt"), PathBuf::from("b").join("c").join("two.kt")]
        );
    }

    #[test]
    fn test_move_file_creates_parents() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src.txt");
        let dest = temp.path().join("x/y/dest.txt");
        fs::write(&src, "payload").unwrap();

        move_file(&src, &dest).unwrap();

        assert!(!src.exists());
        assert_eq!(fs::read_to_string(&dest).unwrap(), "payload");
    }

    #[test]
    fn test_prune_keeps_dirs_with_files() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("root");
        fs::create_dir_all(root.join("empty/deeper")).unwrap();
        fs::create_dir_all(root.join("full")).unwrap();
        fs::write(root.join("full/file.txt"), "x").unwrap();

        let removed = prune_empty_dirs(&root, temp.path()).unwrap();

        assert_eq!(removed.len(), 2);
        assert!(!root.join("empty").exists());
        assert!(root.join("full/file.txt").exists());
        assert!(root.exists());
    }

    #[test]
    fn test_prune_respects_keep() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("com");
        let keep = root.join("old/app");
        fs::create_dir_all(&keep).unwrap();
        fs::create_dir_all(root.join("stale")).unwrap();

        prune_empty_dirs(&root, &keep).unwrap();

        assert!(keep.exists());
        assert!(!root.join("stale").exists());
    }

    #[test]
    fn test_remove_dir_if_empty() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("d");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("f"), "x").unwrap();

        assert!(!remove_dir_if_empty(&dir).unwrap());
        fs::remove_file(dir.join("f")).unwrap();
        assert!(remove_dir_if_empty(&dir).unwrap());
        assert!(!dir.exists());
        // Missing directories are simply not removed
        assert!(!remove_dir_if_empty(&dir).unwrap());
    }
}
