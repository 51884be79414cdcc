//! Core utilities for depsize tools.
//!
//! This crate provides the building blocks shared by the report pipeline:
//! - A typed model of the bundler's stats snapshot (modules, sources, reasons)
//! - Module name normalization and `node_modules` package key extraction
//! - Gzip sizing and human-readable size formatting

mod path;
mod size;
mod stats;

// Re-export public API
pub use path::{is_dependency_path, normalize_module_path, package_root};
pub use size::{format_size, gzip_size};
pub use stats::{ChildModule, CompiledModule, Reason, SnapshotOptions, Stats, StatsSnapshot};
