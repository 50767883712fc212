//! Process-wide write locks keyed by backing file
//!
//! Two stores opened on the same path share one mutex, so their
//! load-mutate-save cycles never interleave within a process.

use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

static FILE_LOCKS: Lazy<DashMap<PathBuf, Arc<Mutex<()>>>> = Lazy::new(DashMap::new);

/// Shared write lock for `path`
///
/// The key is the deepest existing ancestor in canonical form joined with
/// the rest of the path, so `..`, `.` and symlinked directories map to one
/// lock, and a store opened before its directory exists keys the same as
/// one opened after.
#[must_use]
pub fn write_lock_for(path: &Path) -> Arc<Mutex<()>> {
    let key = lock_key(path);
    Arc::clone(&FILE_LOCKS.entry(key).or_default())
}

fn lock_key(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    // The file itself is replaced by rename, so only directories are resolved
    let Some(dir) = absolute.parent() else {
        return absolute;
    };
    let name = absolute.file_name().map(PathBuf::from).unwrap_or_default();

    for base in dir.ancestors() {
        if let Ok(resolved) = std::fs::canonicalize(base) {
            let rest = dir.strip_prefix(base).unwrap_or(Path::new(""));
            return resolved.join(without_cur_dir(rest)).join(name);
        }
    }
    without_cur_dir(&absolute)
}

fn without_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_path_shares_lock() {
        let a = write_lock_for(Path::new("/tmp/works-lock-test/works.json"));
        let b = write_lock_for(Path::new("/tmp/works-lock-test/./works.json"));
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn different_paths_get_different_locks() {
        let a = write_lock_for(Path::new("/tmp/works-lock-test/a.json"));
        let b = write_lock_for(Path::new("/tmp/works-lock-test/b.json"));
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn lock_key_is_stable_when_dir_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("works.json");

        let before = write_lock_for(&path);
        std::fs::create_dir(dir.path().join("data")).unwrap();
        let after = write_lock_for(&path);
        assert!(Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn parent_dir_components_share_lock() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let a = write_lock_for(&dir.path().join("works.json"));
        let b = write_lock_for(&dir.path().join("sub").join("..").join("works.json"));
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_dir_shares_lock() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("data");
        let link = dir.path().join("link");
        std::fs::create_dir(&real).unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let a = write_lock_for(&real.join("works.json"));
        let b = write_lock_for(&link.join("works.json"));
        assert!(Arc::ptr_eq(&a, &b));
    }
}
