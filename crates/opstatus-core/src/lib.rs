//! # opstatus-core
//!
//! Lets a running service report its operational state (lifecycle phase and
//! health grade) through zero or more independently built, dynamically loaded
//! plugins, without the service being compiled against any specific plugin
//! implementation.
//!
//! A plugin is any shared library that exposes the capability entry points
//! described in [`provider::contract`]. [`ServiceStatusProvider`] wraps one
//! loaded module and forwards status values to whichever entry points the
//! module actually exports; [`ProviderCollection`] aggregates many providers
//! for a single service name so they can be discovered from a directory and
//! updated as a group.

pub mod provider;
pub mod status;
pub mod utils;

pub use provider::error::{ProviderSystemError, StatusCallError};
pub use provider::loader::ServiceStatusProvider;
pub use provider::registry::{AddProviderError, DiscoveryReport, ProviderCollection};
pub use status::{HealthState, OperatingStatus};
