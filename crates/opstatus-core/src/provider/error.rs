//! Error types for the provider plugin system.
//!
//! [`ProviderSystemError`] covers construction-time and collection-management
//! failures; they abort the specific operation and leave everything else
//! unchanged. [`StatusCallError`] covers a single status delivery through an
//! already loaded provider. Nothing here is ever fatal to the hosting
//! process.

use std::os::raw::c_int;
use std::path::PathBuf;

use crate::provider::contract::{CALL_PANICKED, CAPABILITY_UNSUPPORTED};

#[derive(Debug, thiserror::Error)]
pub enum ProviderSystemError {
    #[error("cannot open status module '{}': {source}", path.display())]
    ModuleOpen {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("cannot canonicalize module path '{}': {source}", path.display())]
    Canonicalize {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("status module '{}' is already registered for service '{service}'", path.display())]
    DuplicateModule { service: String, path: PathBuf },

    #[error("provider built for service '{found}' cannot join a collection for service '{expected}'")]
    ServiceMismatch { expected: String, found: String },

    #[error("service name contains an interior NUL byte: {name:?}")]
    InvalidServiceName { name: String },

    #[error("invalid module name pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// Outcome of delivering one status value to one provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatusCallError {
    /// The module never exported the entry point; no call was attempted.
    #[error("plugin does not export '{operation}'")]
    Unsupported { operation: &'static str },

    /// The entry point ran and reported a plugin-defined error code.
    #[error("plugin returned error code {code} from '{operation}'")]
    Plugin { operation: &'static str, code: c_int },

    /// A panic unwound out of the plugin call and was caught at the boundary.
    ///
    /// Containment is best effort: only unwinds the host runtime recognizes
    /// can be caught. A panic raised inside an independently built plugin
    /// arrives as a foreign exception and aborts the process instead. A
    /// plugin that unwinds is out of contract either way; well behaved
    /// plugins report failure through their return code.
    #[error("plugin panicked during '{operation}': {message}")]
    Panicked {
        operation: &'static str,
        message: String,
    },
}

impl StatusCallError {
    /// Numeric form of this failure.
    ///
    /// Plugin-reported codes are propagated verbatim; the failure shapes
    /// owned by the loading layer map to their own negative sentinels,
    /// [`CAPABILITY_UNSUPPORTED`] and [`CALL_PANICKED`]. A plugin returning
    /// one of those values as its own code stays distinguishable by variant.
    pub fn code(&self) -> c_int {
        match self {
            Self::Plugin { code, .. } => *code,
            Self::Unsupported { .. } => CAPABILITY_UNSUPPORTED,
            Self::Panicked { .. } => CALL_PANICKED,
        }
    }
}
