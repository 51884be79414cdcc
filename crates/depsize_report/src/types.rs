use serde::{Serialize, Serializer, ser::SerializeMap};
use std::path::PathBuf;

/// A retained module, attributed to a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRecord {
    pub filepath: String,
    pub size: u64,
    /// Normalized names of the modules that pulled this one in, sorted and unique.
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageGroup {
    /// Package root, e.g. `./node_modules/@scope/pkg`.
    pub name: String,
    pub total_size: u64,
    pub files: Vec<DependencyRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileEntry {
    pub filepath: String,
    pub size: String,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageEntry {
    pub size: String,
    pub files: Vec<FileEntry>,
}

/// The display-ready report. Serializes as a JSON object whose keys keep
/// the order of `packages`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub packages: Vec<(String, PackageEntry)>,
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.packages.len()))?;
        for (name, entry) in &self.packages {
            map.serialize_entry(name, entry)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone)]
pub struct ReportResult {
    /// Packages in report order, with raw byte sizes.
    pub packages: Vec<PackageGroup>,
    pub output_file: PathBuf,
    pub gzip: bool,
    pub modules_analyzed: usize,
    /// Files whose gzip size could not be computed and were counted at raw size.
    pub gzip_fallbacks: Vec<String>,
}

impl ReportResult {
    pub fn total_size(&self) -> u64 {
        self.packages.iter().map(|p| p.total_size).sum()
    }

    pub fn dependency_modules(&self) -> usize {
        self.packages.iter().map(|p| p.files.len()).sum()
    }
}
