// modres - runtime resolver for versioned binary modules
//
// Locates and loads the binary module matching a qualified (name, version)
// reference from prioritized search roots, the way a package-manager-backed
// build environment resolves dependencies at runtime.

pub mod cache;
pub mod error;
pub mod fsys;
pub mod identity;
pub mod locator;
pub mod probe;
pub mod registry;
pub mod resolver;

pub use cache::{package_cache_roots, CACHE_ENV_VAR};
pub use error::ResolveError;
pub use fsys::{FileSystem, OsFileSystem};
pub use identity::{ModuleIdentity, MODULE_EXTENSION};
pub use locator::locate_package_folder;
pub use probe::{probe_candidates, BinaryModule, LoadOutcome, LoadedModule, ModuleLoader};
pub use registry::{HostRegistry, ResolveHandler};
pub use resolver::ModuleResolver;

/// Resolver version
pub const VERSION: &str = "0.1.0";
