// Convention-based package-folder lookup

use crate::fsys::FileSystem;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Map a short module name to its package folder under `root`.
///
/// Package folders are named after the module's root namespace, so a module
/// `a.b.c` may live under `a.b.c`, `a.b` or `a`. Candidates are tried from
/// most to least specific by dropping one dot-separated segment at a time;
/// the longest existing prefix wins. Returns `None` when no prefix names an
/// existing directory.
pub fn locate_package_folder(
    fs: &dyn FileSystem,
    root: &Path,
    short_name: &str,
) -> Option<PathBuf> {
    let mut name = short_name;
    loop {
        let candidate = root.join(name);
        if fs.dir_exists(&candidate) {
            return Some(candidate);
        }
        match name.rfind('.') {
            Some(cut) => {
                trace!(folder = name, "package folder missing, truncating name");
                name = name.get(..cut).unwrap_or(name);
            }
            None => return None,
        }
    }
}
