mod compiler;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use depsize_report::{Config, DependencySizePlugin};
use log::{debug, info};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use crate::compiler::StatsFileCompiler;

#[derive(Parser)]
#[command(name = "depsize")]
#[command(about = "Report how much bundle size each third-party dependency contributes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Write a per-dependency size report from a bundler stats file
    Report(ReportArgs),
}

#[derive(Debug, Args)]
struct ReportArgs {
    /// Stats JSON written by the bundler
    #[arg(long)]
    stats: PathBuf,

    /// Build root that module names are relative to (defaults to the current directory)
    #[arg(long)]
    context: Option<PathBuf>,

    /// Build output directory (defaults to the stats `outputPath`, then the context)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// JSON file with plugin options (`outputPath`, `gzip`, `indent`)
    #[arg(long, conflicts_with_all = ["output_path", "gzip", "indent"])]
    options: Option<PathBuf>,

    /// Number of packages shown in the terminal summary
    #[arg(long, default_value = "10")]
    top: usize,

    #[command(flatten)]
    config: Config,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let cli = Cli::parse();
    debug!("Parsed CLI arguments: {:?}", cli.command);

    let start = Instant::now();

    match cli.command {
        Commands::Report(args) => {
            let cfg = match &args.options {
                Some(path) => Config::from_json_file(path)?,
                None => args.config.clone(),
            };
            let context = match args.context {
                Some(context) => context,
                None => std::env::current_dir().context("Failed to resolve current directory")?,
            };

            let mut compiler = StatsFileCompiler::open(&args.stats, context, args.output_dir)?;
            let plugin = DependencySizePlugin::new(cfg);
            info!("Running dependency size report (gzip: {})", plugin.config().gzip);
            plugin.apply(&mut compiler);

            for (name, outcome) in compiler.run() {
                let result = outcome.with_context(|| format!("{} failed", name))?;
                debug!("Found {} packages", result.packages.len());

                if result.packages.is_empty() {
                    depsize_report::print_no_dependencies_message(&mut stdout, &result)?;
                } else {
                    depsize_report::print_report_summary(&mut stdout, &result, args.top)?;
                }

                writeln!(
                    stdout,
                    "\n{} Finished in {}ms on {} modules.",
                    "●".bright_blue(),
                    start.elapsed().as_millis().to_string().cyan(),
                    result.modules_analyzed.to_string().cyan()
                )?;
                stdout.flush()?;
            }

            Ok(())
        }
    }
}
