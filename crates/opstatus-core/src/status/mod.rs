//! Status value enumerations.
//!
//! [`OperatingStatus`] and [`HealthState`] are closed, explicitly numbered
//! 8-bit enumerations. The numeric values are a wire contract with plugins:
//! a provider entry point receives the raw integer, never a symbolic name,
//! so the assignments must never change once published.

pub mod types;

pub use types::{HealthState, OperatingStatus};
