// Default package-manager cache root discovery

use anyhow::{bail, Result};
use std::env;
use std::path::PathBuf;

/// Overrides the default cache location; holds a platform path list so
/// fallback caches can be listed ahead of the main one.
pub const CACHE_ENV_VAR: &str = "MODRES_CACHE";

/// Package-manager cache roots, in search order.
pub fn package_cache_roots() -> Result<Vec<PathBuf>> {
    if let Some(raw) = env::var_os(CACHE_ENV_VAR) {
        let roots: Vec<PathBuf> = env::split_paths(&raw)
            .filter(|p| !p.as_os_str().is_empty())
            .collect();
        if !roots.is_empty() {
            return Ok(roots);
        }
    }

    if let Some(home) = dirs::home_dir() {
        return Ok(vec![home.join(".modres").join("packages")]);
    }

    bail!("cannot determine the package cache directory")
}
