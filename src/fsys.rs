// Filesystem capability and recursive module-file search

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// Filesystem operations the resolver depends on, seamed out so resolution
/// logic can be exercised against a mock tree.
pub trait FileSystem: Send + Sync {
    /// Whether `path` exists and is a directory.
    fn dir_exists(&self, path: &Path) -> bool;

    /// Every file named exactly `file_name` under `directory`, walking the
    /// full subtree. A missing or empty directory yields an empty list,
    /// never an error.
    fn find_files(&self, directory: &Path, file_name: &str) -> Vec<PathBuf>;
}

/// Production implementation over [`std::fs`].
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn dir_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn find_files(&self, directory: &Path, file_name: &str) -> Vec<PathBuf> {
        let mut matches = Vec::new();
        collect_matches(directory, OsStr::new(file_name), &mut matches);
        matches
    }
}

/// Walk entries in sorted order so candidate order, and therefore which
/// match wins, is stable across platforms.
fn collect_matches(dir: &Path, file_name: &OsStr, matches: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    let mut entries: Vec<_> = entries.flatten().collect();
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            collect_matches(&path, file_name, matches);
        } else if path.file_name() == Some(file_name) {
            matches.push(path);
        }
    }
}
