// Host registry seam for the active resolution handler

use crate::error::ResolveError;
use crate::probe::LoadedModule;
use std::sync::Arc;

/// Callback invoked by the host's module-loading subsystem when a reference
/// fails to resolve through normal loading. May be called on arbitrary
/// threads, concurrently.
pub trait ResolveHandler: Send + Sync {
    fn resolve(&self, reference: &str) -> Result<LoadedModule, ResolveError>;
}

/// Host-provided registry for the process-wide resolution hook. Making
/// attach/detach an explicit capability keeps the contract testable with a
/// mock registry instead of ambient global state.
pub trait HostRegistry: Send + Sync {
    /// Install `handler` as the active resolution handler.
    fn attach(&self, handler: Arc<dyn ResolveHandler>);

    /// Remove the active resolution handler.
    fn detach(&self);
}
