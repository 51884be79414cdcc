//! Build tool integration.
//!
//! A host build tool exposes itself through [`Compiler`]: where the build
//! lives, where it writes output, and a way to be told when a build is done.
//! How a host actually delivers that event is up to its adapter.

use anyhow::Result;
use depsize_core::Stats;
use log::debug;
use std::path::Path;

use crate::{analyzer::run_dependency_size_report, config::Config, types::ReportResult};

pub const PLUGIN_NAME: &str = "dependency-size";

/// Receives the outcome of a report run. Called exactly once per build.
pub type DoneCallback = Box<dyn FnOnce(Result<ReportResult>)>;

/// Invoked by the host every time a build finishes.
pub type DoneListener = Box<dyn FnMut(&dyn Stats, DoneCallback)>;

pub trait Compiler {
    /// Root directory of the build; module names are relative to it.
    fn context(&self) -> &Path;

    /// Directory the build writes its output to.
    fn output_path(&self) -> &Path;

    fn on_done(&mut self, plugin_name: &'static str, listener: DoneListener);
}

/// Writes a dependency size report after each build.
#[derive(Debug, Clone, Default)]
pub struct DependencySizePlugin {
    config: Config,
}

impl DependencySizePlugin {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn apply<C: Compiler + ?Sized>(&self, compiler: &mut C) {
        let config = self.config.clone();
        let context = compiler.context().to_path_buf();
        let output_dir = compiler.output_path().to_path_buf();
        debug!("Registering {} for {}", PLUGIN_NAME, context.display());

        compiler.on_done(
            PLUGIN_NAME,
            Box::new(move |stats: &dyn Stats, callback: DoneCallback| {
                callback(run_dependency_size_report(&config, stats, &context, &output_dir));
            }),
        );
    }
}
