//! Config module.
//! Provides configuration types and repository root resolution.

pub mod paths;
pub mod types;

pub use paths::{default_repository_root, resolve_repository_root, root_for_executable};
pub use types::{Config, LogLevel};
