use depsize_core::format_size;
use log::debug;

use crate::types::{FileEntry, PackageEntry, PackageGroup, Report};

/// Order packages by total size and their files by size, both descending.
/// Ties fall back to ascending name so the order never depends on module
/// enumeration order.
pub(crate) fn sort_groups(mut groups: Vec<PackageGroup>) -> Vec<PackageGroup> {
    groups.sort_by(|a, b| b.total_size.cmp(&a.total_size).then_with(|| a.name.cmp(&b.name)));
    for group in &mut groups {
        group.files.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.filepath.cmp(&b.filepath)));
    }
    groups
}

/// Render sorted groups with display sizes.
pub(crate) fn format_report(groups: &[PackageGroup]) -> Report {
    debug!("Formatting report for {} packages", groups.len());
    let packages = groups
        .iter()
        .map(|group| {
            let files = group
                .files
                .iter()
                .map(|f| FileEntry {
                    filepath: f.filepath.clone(),
                    size: format_size(f.size),
                    reasons: f.reasons.clone(),
                })
                .collect();
            (group.name.clone(), PackageEntry { size: format_size(group.total_size), files })
        })
        .collect();

    Report { packages }
}
