//! Core library for `retail_flatten`.
//!
//! Flattens `apps/retail-api/apps/{api,worker,web}` into sibling application
//! directories. The work is a fixed, ordered [`rules::Plan`] applied by a
//! [`flatten::Flattener`] against an explicit repository root, so the whole
//! procedure can run against a temporary directory in tests.

pub mod cli;
pub mod config;
pub mod errors;
pub mod flatten;
pub mod fs_ops;
pub mod output;
pub mod rules;

pub use config::{Config, LogLevel, default_repository_root, resolve_repository_root};
pub use errors::FlattenError;
pub use flatten::{Flattener, Outcome, Report, run};
pub use rules::{MoveMode, MoveRule, Plan, retail_plan};
