use anyhow::{Result, anyhow};
use depsize_core::{Stats, StatsSnapshot};
use depsize_report::{Compiler, DoneListener, ReportResult};
use log::{debug, info};
use std::{
    cell::RefCell,
    path::{Path, PathBuf},
    rc::Rc,
};

/// A [`Compiler`] backed by a stats file written by a finished build.
/// Running it fires every registered done-listener once.
pub struct StatsFileCompiler {
    stats: StatsSnapshot,
    context: PathBuf,
    output_path: PathBuf,
    listeners: Vec<(&'static str, DoneListener)>,
}

impl StatsFileCompiler {
    /// Load `stats_file`. The output directory defaults to the one recorded
    /// in the stats, then to `context`.
    pub fn open(stats_file: &Path, context: PathBuf, output_dir: Option<PathBuf>) -> Result<Self> {
        let stats = StatsSnapshot::from_file(stats_file)?;
        let output_path = output_dir
            .or_else(|| stats.output_path.clone())
            .unwrap_or_else(|| context.clone());
        debug!("Context: {}, output path: {}", context.display(), output_path.display());

        Ok(Self { stats, context, output_path, listeners: Vec::new() })
    }

    /// Deliver the build-finished event and collect what each listener
    /// reported through its callback.
    pub fn run(mut self) -> Vec<(&'static str, Result<ReportResult>)> {
        info!("Build finished, notifying {} listeners", self.listeners.len());
        let mut outcomes = Vec::new();

        for (name, mut listener) in std::mem::take(&mut self.listeners) {
            let slot: Rc<RefCell<Option<Result<ReportResult>>>> = Rc::new(RefCell::new(None));
            let sink = Rc::clone(&slot);
            let stats: &dyn Stats = &self.stats;
            listener(
                stats,
                Box::new(move |outcome: Result<ReportResult>| *sink.borrow_mut() = Some(outcome)),
            );

            let outcome = slot
                .take()
                .unwrap_or_else(|| Err(anyhow!("{} did not report completion", name)));
            outcomes.push((name, outcome));
        }

        outcomes
    }
}

impl Compiler for StatsFileCompiler {
    fn context(&self) -> &Path {
        &self.context
    }

    fn output_path(&self) -> &Path {
        &self.output_path
    }

    fn on_done(&mut self, plugin_name: &'static str, listener: DoneListener) {
        debug!("Registered done listener: {}", plugin_name);
        self.listeners.push((plugin_name, listener));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depsize_report::{Config, DependencySizePlugin, PLUGIN_NAME};
    use std::fs;
    use tempfile::TempDir;

    fn write_stats(dir: &Path, output_path: Option<&Path>) -> PathBuf {
        let output = output_path
            .map(|p| format!(r#""outputPath": {:?},"#, p.to_string_lossy()))
            .unwrap_or_default();
        let json = format!(
            r#"{{
  {}
  "modules": [
    {{ "name": "./node_modules/react/index.js", "size": 300, "reasons": [] }},
    {{ "name": "./node_modules/react/cjs/react.production.min.js", "size": 6000,
       "reasons": [{{ "moduleName": "./node_modules/react/index.js" }}] }},
    {{ "name": "./src/index.js", "size": 120, "reasons": [] }}
  ]
}}"#,
            output
        );
        let path = dir.join("stats.json");
        fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_output_dir_defaults_to_stats_output_path() {
        let temp_dir = TempDir::new().unwrap();
        let dist = temp_dir.path().join("dist");
        let stats = write_stats(temp_dir.path(), Some(&dist));

        let compiler = StatsFileCompiler::open(&stats, temp_dir.path().to_path_buf(), None).unwrap();
        assert_eq!(compiler.output_path(), dist.as_path());
    }

    #[test]
    fn test_output_dir_falls_back_to_context() {
        let temp_dir = TempDir::new().unwrap();
        let stats = write_stats(temp_dir.path(), None);

        let compiler = StatsFileCompiler::open(&stats, temp_dir.path().to_path_buf(), None).unwrap();
        assert_eq!(compiler.output_path(), temp_dir.path());
    }

    #[test]
    fn test_explicit_output_dir_wins() {
        let temp_dir = TempDir::new().unwrap();
        let stats = write_stats(temp_dir.path(), Some(Path::new("/elsewhere")));
        let out = temp_dir.path().join("out");

        let compiler =
            StatsFileCompiler::open(&stats, temp_dir.path().to_path_buf(), Some(out.clone()))
                .unwrap();
        assert_eq!(compiler.output_path(), out.as_path());
    }

    #[test]
    fn test_run_writes_report() {
        let temp_dir = TempDir::new().unwrap();
        let stats = write_stats(temp_dir.path(), None);
        let mut compiler =
            StatsFileCompiler::open(&stats, temp_dir.path().to_path_buf(), None).unwrap();
        DependencySizePlugin::new(Config::default()).apply(&mut compiler);

        let outcomes = compiler.run();
        assert_eq!(outcomes.len(), 1);
        let (name, outcome) = outcomes.into_iter().next().unwrap();
        assert_eq!(name, PLUGIN_NAME);

        let result = outcome.unwrap();
        assert_eq!(result.packages.len(), 1);
        assert_eq!(result.packages[0].name, "./node_modules/react");
        assert_eq!(result.total_size(), 6300);
        assert!(temp_dir.path().join("dependency-size.json").exists());
    }

    #[test]
    fn test_run_without_listeners_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let stats = write_stats(temp_dir.path(), None);
        let compiler = StatsFileCompiler::open(&stats, temp_dir.path().to_path_buf(), None).unwrap();
        assert!(compiler.run().is_empty());
    }

    #[test]
    fn test_open_invalid_stats() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("stats.json");
        fs::write(&path, "{ \"modules\": 3 }").unwrap();

        assert!(StatsFileCompiler::open(&path, temp_dir.path().to_path_buf(), None).is_err());
    }
}
