// Resolution error taxonomy

use std::path::PathBuf;
use thiserror::Error;

/// Errors a resolution request can surface to the host.
///
/// Per-candidate load failures are never surfaced here; the probe loop skips
/// them and moves on. Only a malformed reference or a fully exhausted search
/// space aborts a request.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The qualified reference carries no `Version=` marker. Signals a
    /// malformed reference from the caller, raised before any filesystem
    /// access.
    #[error("module reference '{reference}' has no 'Version=' field")]
    VersionMissing { reference: String },

    /// All four search tiers were exhausted without an exact version match.
    /// Only user-configured module folders are named in the message;
    /// package-manager cache roots stay out of diagnostics.
    #[error("unable to resolve module '{reference}'; searched module folders: [{}]", join_roots(.searched_roots))]
    NotResolved {
        reference: String,
        searched_roots: Vec<PathBuf>,
    },
}

fn join_roots(roots: &[PathBuf]) -> String {
    roots
        .iter()
        .map(|r| r.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
