// Candidate loading and exact version matching

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Opaque handle to a loaded binary module. The resolver only needs the
/// embedded version string; metadata extraction belongs to the host.
pub trait BinaryModule: std::fmt::Debug + Send + Sync {
    /// Version string embedded in the module metadata.
    fn version(&self) -> &str;

    /// Path the module was loaded from.
    fn path(&self) -> &Path;
}

/// Shared handle returned to the host on successful resolution.
pub type LoadedModule = Arc<dyn BinaryModule>;

/// Per-candidate load result. Skip-and-continue is a policy of the probe
/// loop, so the loader reports unloadable candidates as data rather than
/// through an error path.
pub enum LoadOutcome {
    Loaded(LoadedModule),
    /// Not a valid module for the current platform or format. Expected for
    /// mixed-architecture trees and corrupt files.
    Incompatible,
    /// The file vanished between enumeration and load.
    NotFound,
}

/// Module-load capability supplied by the host. Loads are cached by the
/// host's module system, so repeated loads of the same path are cheap.
pub trait ModuleLoader: Send + Sync {
    fn load(&self, path: &Path) -> LoadOutcome;
}

/// Probe `candidates` in the order supplied and return the first whose
/// embedded version equals `version` exactly. Unloadable candidates and
/// version mismatches are skipped with a debug line; no selection among
/// several equal matches is attempted.
pub fn probe_candidates(
    loader: &dyn ModuleLoader,
    candidates: &[PathBuf],
    version: &str,
) -> Option<LoadedModule> {
    for candidate in candidates {
        match loader.load(candidate) {
            LoadOutcome::Loaded(module) => {
                if module.version() == version {
                    return Some(module);
                }
                debug!(
                    path = %candidate.display(),
                    found = module.version(),
                    wanted = version,
                    "version mismatch, skipping candidate"
                );
            }
            LoadOutcome::Incompatible => {
                debug!(path = %candidate.display(), "candidate not loadable, skipping");
            }
            LoadOutcome::NotFound => {
                debug!(path = %candidate.display(), "candidate no longer present, skipping");
            }
        }
    }
    None
}
