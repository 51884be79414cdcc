//! Per-dependency bundle size reports.
//!
//! This crate reads the module list a bundler reports after a build, keeps
//! the modules that come from `node_modules`, attributes each of them to its
//! package and writes a JSON report of package sizes, largest first. Sizes
//! are either the raw module sizes or, with `gzip` enabled, gzip-compressed
//! sizes.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use depsize_core::StatsSnapshot;
//! use depsize_report::{Config, run_dependency_size_report};
//! use std::io::{BufWriter, Write};
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let stats = StatsSnapshot::from_file(Path::new("dist/stats.json"))?;
//! let cfg = Config { gzip: true, ..Config::default() };
//!
//! let result = run_dependency_size_report(&cfg, &stats, Path::new("."), Path::new("dist"))?;
//!
//! // Use buffered output for better performance
//! let mut stdout = BufWriter::new(std::io::stdout());
//! depsize_report::print_report_summary(&mut stdout, &result, 10)?;
//! stdout.flush()?;
//! # Ok(())
//! # }
//! ```

mod analyzer;
mod collector;
mod config;
mod formatter;
mod grouper;
mod plugin;
mod reporter;
mod types;
mod writer;

// Re-export public API
pub use analyzer::run_dependency_size_report;
pub use config::{Config, DEFAULT_INDENT, DEFAULT_OUTPUT_PATH};
pub use plugin::{Compiler, DependencySizePlugin, DoneCallback, DoneListener, PLUGIN_NAME};
pub use reporter::{print_no_dependencies_message, print_report_summary};
pub use types::{DependencyRecord, FileEntry, PackageEntry, PackageGroup, Report, ReportResult};
pub use writer::{render_report, resolve_output_file};
