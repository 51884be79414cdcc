use anyhow::{Context, Result};
use depsize_core::{SnapshotOptions, Stats};
use log::{debug, info};
use std::path::Path;

use crate::{
    collector::collect_dependency_modules,
    config::Config,
    formatter::{format_report, sort_groups},
    grouper::group_by_package,
    types::ReportResult,
    writer::write_report,
};

/// Build the dependency size report for one finished build and write it
/// under `output_dir`.
///
/// `context` is the build's root directory; module paths are resolved
/// against it when a gzip size has to be measured from disk.
pub fn run_dependency_size_report(
    cfg: &Config,
    stats: &dyn Stats,
    context: &Path,
    output_dir: &Path,
) -> Result<ReportResult> {
    info!("Starting dependency size report");
    debug!("Config: {:?}, context={}, output_dir={}", cfg, context.display(), output_dir.display());

    let snapshot = stats
        .to_snapshot(&SnapshotOptions::modules(cfg.gzip))
        .context("Failed to read module stats")?;
    let modules_analyzed = snapshot.modules.len();
    info!("Analyzing {} modules", modules_analyzed);

    let collected = collect_dependency_modules(&snapshot.modules, cfg.gzip, context);
    let packages = sort_groups(group_by_package(collected.records));
    let report = format_report(&packages);
    let output_file = write_report(&report, output_dir, cfg)?;

    info!("Dependency size report complete. Found {} packages", packages.len());
    Ok(ReportResult {
        packages,
        output_file,
        gzip: cfg.gzip,
        modules_analyzed,
        gzip_fallbacks: collected.gzip_fallbacks,
    })
}
