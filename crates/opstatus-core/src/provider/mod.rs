//! Provider plugin system.
//!
//! This module owns the entire lifecycle of status provider plugins:
//!
//! - **[`contract`]**: the fixed FFI boundary a shared library must expose to
//!   act as a provider — symbol names, entry point signatures and return code
//!   semantics.
//! - **[`error`]**: typed failures ([`ProviderSystemError`](error::ProviderSystemError))
//!   for loading and collection management, and the per-call
//!   [`StatusCallError`](error::StatusCallError).
//! - **[`loader`]**: [`ServiceStatusProvider`](loader::ServiceStatusProvider),
//!   the move-only wrapper around one loaded module and the capability entry
//!   points resolved from it.
//! - **[`registry`]**: [`ProviderCollection`](registry::ProviderCollection),
//!   a keyed set of providers for a single service name with directory-based
//!   bulk discovery and group-wide status application.

pub mod contract;
pub mod error;
pub mod loader;
pub mod registry;

pub use error::{ProviderSystemError, StatusCallError};
pub use loader::ServiceStatusProvider;
pub use registry::{AddProviderError, DiscoveryReport, ProviderCollection};

#[cfg(test)]
mod tests;
