// Qualified-reference parsing

use crate::error::ResolveError;

/// File extension of loadable binary modules.
pub const MODULE_EXTENSION: &str = "bmod";

const VERSION_MARKER: &str = "Version=";

/// Identity of one resolution request, parsed once from the qualified
/// reference and immutable for the duration of the request.
///
/// A qualified reference looks like
/// `app.core.model, Version=1.4.0, Arch=x64`: the short name is everything
/// before the first comma, and the version is the value of the `Version=`
/// field. Trailing fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleIdentity {
    short_name: String,
    file_name: String,
    version: String,
}

impl ModuleIdentity {
    /// Parse a qualified reference. The short name is taken as-is (an empty
    /// or malformed reference yields an empty or partial name, not an
    /// error); a missing `Version=` field is fatal for the request.
    pub fn parse(reference: &str) -> Result<Self, ResolveError> {
        let short_name = reference
            .split(',')
            .next()
            .unwrap_or_default()
            .to_string();
        let file_name = format!("{}.{}", short_name, MODULE_EXTENSION);

        let version = match reference.split_once(VERSION_MARKER) {
            Some((_, rest)) => rest.split(',').next().unwrap_or(rest).to_string(),
            None => {
                return Err(ResolveError::VersionMissing {
                    reference: reference.to_string(),
                })
            }
        };

        Ok(Self {
            short_name,
            file_name,
            version,
        })
    }

    /// Leading name component, used both as a package-folder lookup key and
    /// as the file-name stem.
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// Short name with the binary-module extension appended.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Requested version, compared by exact string equality.
    pub fn version(&self) -> &str {
        &self.version
    }
}
