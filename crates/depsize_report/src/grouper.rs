use depsize_core::package_root;
use log::{debug, trace};
use std::collections::HashMap;

use crate::types::{DependencyRecord, PackageGroup};

/// Group records by owning package, in first-seen package order.
pub(crate) fn group_by_package(records: Vec<DependencyRecord>) -> Vec<PackageGroup> {
    let mut groups: Vec<PackageGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let Some(name) = package_root(&record.filepath) else {
            trace!("No package root for {}", record.filepath);
            continue;
        };

        let idx = match index.get(name) {
            Some(&idx) => idx,
            None => {
                trace!("New package: {}", name);
                index.insert(name.to_string(), groups.len());
                groups.push(PackageGroup {
                    name: name.to_string(),
                    total_size: 0,
                    files: Vec::new(),
                });
                groups.len() - 1
            }
        };

        let group = &mut groups[idx];
        group.total_size += record.size;
        group.files.push(record);
    }

    debug!("Grouped modules into {} packages", groups.len());
    groups
}
