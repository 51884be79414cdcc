use std::{
    env,
    io::{self, Write},
    path::{Component, Path, PathBuf},
};

use colored::Colorize;
use depsize_core::format_size;
use log::{debug, trace};

use crate::types::{PackageGroup, ReportResult};

/// Files listed under each package in the summary tree.
const FILES_PER_PACKAGE: usize = 3;

/// Display `path` relative to the current working directory when possible
fn relativize_to_cwd(path: &Path) -> String {
    let cwd = match env::current_dir() {
        Ok(cwd) => cwd,
        Err(_) => {
            debug!("Failed to get current directory");
            return path.display().to_string();
        }
    };
    trace!("Relativizing {:?} to cwd {:?}", path, cwd);

    match make_relative(path, &cwd) {
        Some(rel_path) => rel_path.to_string_lossy().to_string(),
        None => {
            trace!("Could not relativize {:?}, using original", path);
            path.display().to_string()
        }
    }
}

/// Path of `target` as seen from `base`, or `None` when they share no root.
fn make_relative(target: &Path, base: &Path) -> Option<PathBuf> {
    let target: Vec<Component> = target.components().collect();
    let base: Vec<Component> = base.components().collect();
    if target.first() != base.first() {
        return None;
    }

    let common = target.iter().zip(&base).take_while(|(t, b)| t == b).count();
    let mut result = PathBuf::new();
    for _ in common..base.len() {
        result.push("..");
    }
    for component in &target[common..] {
        result.push(component.as_os_str());
    }

    if result.as_os_str().is_empty() { Some(PathBuf::from(".")) } else { Some(result) }
}

fn size_kind(result: &ReportResult) -> &'static str {
    if result.gzip { "gzip" } else { "raw" }
}

pub fn print_no_dependencies_message<W: Write>(
    writer: &mut W,
    result: &ReportResult,
) -> io::Result<()> {
    debug!("No dependency modules found");
    writeln!(
        writer,
        "{} No third-party dependencies found in {} modules. Empty report written to {}",
        "✓".green().bold(),
        result.modules_analyzed,
        relativize_to_cwd(&result.output_file).blue()
    )?;
    writer.flush()?;
    Ok(())
}

pub fn print_report_summary<W: Write>(
    writer: &mut W,
    result: &ReportResult,
    top: usize,
) -> io::Result<()> {
    debug!("Printing summary for {} packages (top {})", result.packages.len(), top);

    writeln!(
        writer,
        "{} Dependency sizes ({}) written to {}\n",
        "●".bright_blue(),
        size_kind(result),
        relativize_to_cwd(&result.output_file).blue()
    )?;

    for package in result.packages.iter().take(top) {
        print_package_tree(writer, package)?;
    }

    if result.packages.len() > top {
        writeln!(
            writer,
            "{}\n",
            format!("… and {} more packages", result.packages.len() - top).dimmed()
        )?;
    }

    print_summary(writer, result)?;

    writer.flush()?;
    Ok(())
}

fn print_package_tree<W: Write>(writer: &mut W, package: &PackageGroup) -> io::Result<()> {
    trace!("Printing package: {} with {} files", package.name, package.files.len());
    writeln!(
        writer,
        "{} ({}, {} files)",
        package.name.bright_white().bold(),
        format_size(package.total_size).red().bold(),
        package.files.len()
    )?;

    let shown: Vec<_> = package.files.iter().take(FILES_PER_PACKAGE).collect();
    let hidden = package.files.len() - shown.len();

    for (idx, file) in shown.iter().enumerate() {
        let is_last = idx == shown.len() - 1 && hidden == 0;
        let prefix = if is_last { "└──" } else { "├──" };
        writeln!(
            writer,
            "{}  {} ({})",
            prefix.dimmed(),
            file.filepath,
            format_size(file.size).red()
        )?;
    }

    if hidden > 0 {
        let more = format!("{} more files", hidden);
        writeln!(writer, "{}  {}", "└──".dimmed(), more.dimmed())?;
    }

    writeln!(writer)?;
    Ok(())
}

fn print_summary<W: Write>(writer: &mut W, result: &ReportResult) -> io::Result<()> {
    writeln!(writer, "{}", "─".repeat(60).dimmed())?;
    writeln!(writer, "{}", "Summary".bold())?;
    writeln!(writer, "  Packages: {}", result.packages.len().to_string().yellow().bold())?;
    writeln!(
        writer,
        "  Dependency modules: {} of {}",
        result.dependency_modules().to_string().yellow(),
        result.modules_analyzed
    )?;
    writeln!(
        writer,
        "  Total dependency size ({}): {}",
        size_kind(result),
        format_size(result.total_size()).red().bold()
    )?;

    if !result.gzip_fallbacks.is_empty() {
        writeln!(
            writer,
            "  {} {} files counted at raw size (gzip size unavailable):",
            "⚠".yellow().bold(),
            result.gzip_fallbacks.len().to_string().yellow()
        )?;
        for file in &result.gzip_fallbacks {
            writeln!(writer, "    {}", file.dimmed())?;
        }
    }

    Ok(())
}
