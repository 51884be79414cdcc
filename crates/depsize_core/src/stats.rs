use anyhow::{Context, Result};
use log::{debug, trace};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// A module that caused another module to be included in the build.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reason {
    /// Name of the referencing module. Entry points have none.
    #[serde(default)]
    pub module_name: Option<String>,
}

/// One of the original modules folded into a concatenated module.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChildModule {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// A compiled module as reported by the bundler.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CompiledModule {
    #[serde(default)]
    pub name: Option<String>,
    /// Uncompressed size in bytes.
    pub size: u64,
    #[serde(default)]
    pub source: Option<String>,
    /// Present when the module is a concatenation of several originals.
    #[serde(default)]
    pub modules: Option<Vec<ChildModule>>,
    #[serde(default)]
    pub reasons: Option<Vec<Reason>>,
}

impl CompiledModule {
    pub fn reasons(&self) -> &[Reason] {
        self.reasons.as_deref().unwrap_or_default()
    }

    fn strip_sources(&mut self) {
        self.source = None;
        for child in self.modules.iter_mut().flatten() {
            child.source = None;
        }
    }
}

/// The subset of a stats document the report needs.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    #[serde(default)]
    pub modules: Vec<CompiledModule>,
    /// Absolute build output directory, when the bundler included it.
    #[serde(default)]
    pub output_path: Option<PathBuf>,
}

/// Which categories a snapshot should carry. Everything else a bundler can
/// report (assets, chunks, timings, errors, ...) is always left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotOptions {
    pub modules: bool,
    pub source: bool,
}

impl SnapshotOptions {
    /// Modules only, with per-module source text when `source` is set.
    pub fn modules(source: bool) -> Self {
        Self { modules: true, source }
    }
}

/// Anything able to produce a stats snapshot once a build has finished.
pub trait Stats {
    fn to_snapshot(&self, options: &SnapshotOptions) -> Result<StatsSnapshot>;
}

impl Stats for StatsSnapshot {
    fn to_snapshot(&self, options: &SnapshotOptions) -> Result<StatsSnapshot> {
        trace!("Materializing snapshot with {:?}", options);
        let mut snapshot = self.clone();
        if !options.modules {
            snapshot.modules.clear();
        } else if !options.source {
            snapshot.modules.iter_mut().for_each(CompiledModule::strip_sources);
        }
        Ok(snapshot)
    }
}

impl StatsSnapshot {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let snapshot: StatsSnapshot =
            serde_json::from_str(json).context("Stats document is not a valid module listing")?;
        debug!("Parsed stats snapshot with {} modules", snapshot.modules.len());
        Ok(snapshot)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading stats from: {}", path.display());
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read stats file {}", path.display()))?;
        Self::from_json_str(&json).with_context(|| format!("Invalid stats file {}", path.display()))
    }
}
