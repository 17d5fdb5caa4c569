//! Small filesystem helpers shared by the provider system.

pub mod fs;
