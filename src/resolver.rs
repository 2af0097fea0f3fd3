// Resolution orchestrator: four ordered search tiers over two root sets

use crate::error::ResolveError;
use crate::fsys::FileSystem;
use crate::identity::ModuleIdentity;
use crate::locator::locate_package_folder;
use crate::probe::{probe_candidates, LoadedModule, ModuleLoader};
use crate::registry::{HostRegistry, ResolveHandler};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Resolves versioned binary-module references against package-manager
/// cache roots and user-configured module folders.
///
/// One resolver lives per build session. Configure user roots on the
/// exclusive value, wrap it in an [`Arc`], then [`register`](Self::register)
/// it; root sets are read-only from that point on, so concurrent resolve
/// calls need no locking.
///
/// Search order per request: package folder lookup in the cache roots, then
/// in the user roots, then a full recursive scan of the cache roots, then of
/// the user roots. The first candidate whose embedded version equals the
/// requested version exactly wins.
pub struct ModuleResolver {
    base_dir: PathBuf,
    fs: Arc<dyn FileSystem>,
    loader: Arc<dyn ModuleLoader>,
    registry: Arc<dyn HostRegistry>,
    package_roots: Vec<PathBuf>,
    user_roots: Vec<PathBuf>,
    registered: AtomicBool,
}

impl ModuleResolver {
    /// Create a resolver. `package_roots` come from the package-manager
    /// configuration and are fixed for the resolver's lifetime; `base_dir`
    /// anchors relative user roots assigned later.
    pub fn new(
        base_dir: impl Into<PathBuf>,
        fs: Arc<dyn FileSystem>,
        loader: Arc<dyn ModuleLoader>,
        registry: Arc<dyn HostRegistry>,
        package_roots: Vec<PathBuf>,
    ) -> Self {
        Self {
            base_dir: base_dir.into(),
            fs,
            loader,
            registry,
            package_roots,
            user_roots: Vec::new(),
            registered: AtomicBool::new(false),
        }
    }

    /// Replace the user-configured module folders. Relative entries are
    /// anchored at the base directory; order is preserved. Taking
    /// `&mut self` confines mutation to configuration time, before the
    /// resolver is shared.
    pub fn set_user_roots<I, P>(&mut self, roots: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.user_roots = roots
            .into_iter()
            .map(|root| {
                let root = root.into();
                if root.is_absolute() {
                    root
                } else {
                    self.base_dir.join(root)
                }
            })
            .collect();
    }

    pub fn package_roots(&self) -> &[PathBuf] {
        &self.package_roots
    }

    pub fn user_roots(&self) -> &[PathBuf] {
        &self.user_roots
    }

    /// Attach as the active resolution handler. Idempotent; a second call
    /// while registered is a no-op.
    pub fn register(self: &Arc<Self>) {
        if !self.registered.swap(true, Ordering::SeqCst) {
            self.registry.attach(Arc::clone(self) as Arc<dyn ResolveHandler>);
        }
    }

    /// Detach from the host registry. Safe to call without a prior
    /// [`register`](Self::register); that is a no-op.
    pub fn unregister(&self) {
        if self.registered.swap(false, Ordering::SeqCst) {
            self.registry.detach();
        }
    }

    /// Package-folder tier: convention lookup of the folder, then probe
    /// every same-named file inside it.
    fn resolve_by_name(
        &self,
        roots: &[PathBuf],
        identity: &ModuleIdentity,
    ) -> Option<LoadedModule> {
        for root in roots {
            let Some(folder) = locate_package_folder(self.fs.as_ref(), root, identity.short_name())
            else {
                continue;
            };
            let candidates = self.fs.find_files(&folder, identity.file_name());
            if let Some(module) =
                probe_candidates(self.loader.as_ref(), &candidates, identity.version())
            {
                return Some(module);
            }
        }
        None
    }

    /// Recursive tier: probe every same-named file under the whole root.
    fn resolve_recursive(
        &self,
        roots: &[PathBuf],
        identity: &ModuleIdentity,
    ) -> Option<LoadedModule> {
        for root in roots {
            let candidates = self.fs.find_files(root, identity.file_name());
            if let Some(module) =
                probe_candidates(self.loader.as_ref(), &candidates, identity.version())
            {
                return Some(module);
            }
        }
        None
    }
}

impl ResolveHandler for ModuleResolver {
    fn resolve(&self, reference: &str) -> Result<LoadedModule, ResolveError> {
        // Parse failures abort before any filesystem access.
        let identity = ModuleIdentity::parse(reference)?;

        debug!(reference, "package folder lookup in cache roots");
        if let Some(module) = self.resolve_by_name(&self.package_roots, &identity) {
            return Ok(module);
        }

        debug!(reference, "package folder lookup in user roots");
        if let Some(module) = self.resolve_by_name(&self.user_roots, &identity) {
            return Ok(module);
        }

        debug!(reference, "recursive scan of cache roots");
        if let Some(module) = self.resolve_recursive(&self.package_roots, &identity) {
            return Ok(module);
        }

        debug!(reference, "recursive scan of user roots");
        if let Some(module) = self.resolve_recursive(&self.user_roots, &identity) {
            return Ok(module);
        }

        // Cache roots stay out of the message; only user-configured folders
        // are actionable for the caller.
        Err(ResolveError::NotResolved {
            reference: reference.to_string(),
            searched_roots: self.user_roots.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::LoadOutcome;
    use std::path::Path;
    use std::sync::Mutex;

    struct NullFs;

    impl FileSystem for NullFs {
        fn dir_exists(&self, _path: &Path) -> bool {
            false
        }

        fn find_files(&self, _directory: &Path, _file_name: &str) -> Vec<PathBuf> {
            Vec::new()
        }
    }

    /// Fails the test on any filesystem access.
    struct UntouchableFs;

    impl FileSystem for UntouchableFs {
        fn dir_exists(&self, path: &Path) -> bool {
            panic!("unexpected dir_exists({})", path.display())
        }

        fn find_files(&self, directory: &Path, _file_name: &str) -> Vec<PathBuf> {
            panic!("unexpected find_files({})", directory.display())
        }
    }

    struct NullLoader;

    impl ModuleLoader for NullLoader {
        fn load(&self, _path: &Path) -> LoadOutcome {
            LoadOutcome::NotFound
        }
    }

    /// Registry recording the attach/detach sequence.
    struct RecordingRegistry {
        events: Mutex<Vec<&'static str>>,
    }

    impl RecordingRegistry {
        fn new() -> Self {
            Self {
                events: Mutex::new(Vec::new()),
            }
        }

        fn events(&self) -> Vec<&'static str> {
            self.events.lock().expect("lock events").clone()
        }
    }

    impl HostRegistry for RecordingRegistry {
        fn attach(&self, _handler: Arc<dyn ResolveHandler>) {
            self.events.lock().expect("lock events").push("attach");
        }

        fn detach(&self) {
            self.events.lock().expect("lock events").push("detach");
        }
    }

    fn resolver_with(registry: Arc<RecordingRegistry>) -> ModuleResolver {
        ModuleResolver::new(
            "/base",
            Arc::new(NullFs),
            Arc::new(NullLoader),
            registry,
            vec![PathBuf::from("/cache")],
        )
    }

    #[test]
    fn test_user_roots_normalized_against_base() {
        let registry = Arc::new(RecordingRegistry::new());
        let mut resolver = resolver_with(registry);
        resolver.set_user_roots(["libs/local", "/opt/modules"]);

        assert_eq!(
            resolver.user_roots(),
            &[PathBuf::from("/base/libs/local"), PathBuf::from("/opt/modules")]
        );
    }

    #[test]
    fn test_user_root_order_preserved() {
        let registry = Arc::new(RecordingRegistry::new());
        let mut resolver = resolver_with(registry);
        resolver.set_user_roots(["/z", "/a", "/m"]);

        assert_eq!(
            resolver.user_roots(),
            &[PathBuf::from("/z"), PathBuf::from("/a"), PathBuf::from("/m")]
        );
    }

    #[test]
    fn test_register_is_idempotent() {
        let registry = Arc::new(RecordingRegistry::new());
        let resolver = Arc::new(resolver_with(Arc::clone(&registry)));

        resolver.register();
        resolver.register();
        resolver.unregister();
        resolver.unregister();

        assert_eq!(registry.events(), vec!["attach", "detach"]);
    }

    #[test]
    fn test_unregister_without_register_is_noop() {
        let registry = Arc::new(RecordingRegistry::new());
        let resolver = Arc::new(resolver_with(Arc::clone(&registry)));

        resolver.unregister();
        assert!(registry.events().is_empty());

        resolver.register();
        resolver.unregister();
        assert_eq!(registry.events(), vec!["attach", "detach"]);
    }

    #[test]
    fn test_malformed_reference_fails_before_search() {
        let registry = Arc::new(RecordingRegistry::new());
        let mut resolver = ModuleResolver::new(
            "/base",
            Arc::new(UntouchableFs),
            Arc::new(NullLoader),
            registry,
            vec![PathBuf::from("/cache")],
        );
        resolver.set_user_roots(["/u"]);

        let err = resolver
            .resolve("app.core, Culture=neutral")
            .expect_err("missing version marker");
        assert!(matches!(err, ResolveError::VersionMissing { .. }));
    }

    #[test]
    fn test_exhausted_search_names_only_user_roots() {
        let registry = Arc::new(RecordingRegistry::new());
        let mut resolver = resolver_with(registry);
        resolver.set_user_roots(["/u/one", "/u/two"]);

        let err = resolver
            .resolve("app.core, Version=1.0.0")
            .expect_err("nothing to find");
        match err {
            ResolveError::NotResolved {
                reference,
                searched_roots,
            } => {
                assert_eq!(reference, "app.core, Version=1.0.0");
                assert_eq!(
                    searched_roots,
                    vec![PathBuf::from("/u/one"), PathBuf::from("/u/two")]
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
