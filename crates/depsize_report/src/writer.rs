use anyhow::{Context, Result};
use log::{debug, info};
use path_clean::PathClean;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{config::Config, types::Report};

/// Longest indent honored when pretty-printing; longer strings are cut.
const MAX_INDENT_CHARS: usize = 10;

/// Serialize the report as JSON. An empty indent produces compact output.
pub fn render_report(report: &Report, indent: &str) -> Result<String> {
    let indent: String = indent.chars().take(MAX_INDENT_CHARS).collect();
    if indent.is_empty() {
        return Ok(serde_json::to_string(report)?);
    }

    let mut buf = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    report.serialize(&mut serializer)?;
    Ok(String::from_utf8(buf)?)
}

/// Where the report lands: `output_path` under the build output directory,
/// unless it is already absolute.
pub fn resolve_output_file(output_dir: &Path, output_path: &Path) -> PathBuf {
    output_dir.join(output_path).clean()
}

pub(crate) fn write_report(report: &Report, output_dir: &Path, cfg: &Config) -> Result<PathBuf> {
    let output_file = resolve_output_file(output_dir, &cfg.output_path);
    debug!("Writing report with {} packages to {}", report.packages.len(), output_file.display());

    let contents = render_report(report, &cfg.indent)?;
    fs::write(&output_file, contents).with_context(|| {
        format!("Failed to write dependency report to {}", output_file.display())
    })?;

    info!("Wrote dependency report to {}", output_file.display());
    Ok(output_file)
}
