use anyhow::{Context, Result};
use clap::Args;
use log::debug;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_OUTPUT_PATH: &str = "dependency-size.json";
pub const DEFAULT_INDENT: &str = "  ";

#[derive(Debug, Clone, PartialEq, Args, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Report file, relative to the build output directory
    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output_path: PathBuf,

    /// Measure gzip-compressed sizes instead of raw module sizes
    #[arg(long)]
    pub gzip: bool,

    /// Indentation used to pretty-print the report
    #[arg(long, default_value = DEFAULT_INDENT, allow_hyphen_values = true)]
    pub indent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            gzip: false,
            indent: DEFAULT_INDENT.to_string(),
        }
    }
}

impl Config {
    /// Parse plugin options from a JSON object. Missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Config = serde_json::from_str(json).context("Invalid dependency-size options")?;
        debug!("Loaded options: {:?}", cfg);
        Ok(cfg)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        debug!("Reading options from: {}", path.display());
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read options file {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Invalid options file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        config: Config,
    }

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.output_path, PathBuf::from("dependency-size.json"));
        assert!(!cfg.gzip);
        assert_eq!(cfg.indent, "  ");
    }

    #[test]
    fn test_cli_defaults_match_default_config() {
        let cli = TestCli::parse_from(["test"]);
        assert_eq!(cli.config, Config::default());
    }

    #[test]
    fn test_cli_flags() {
        let cli = TestCli::parse_from([
            "test",
            "--output-path",
            "reports/deps.json",
            "--gzip",
            "--indent",
            "\t",
        ]);
        assert_eq!(cli.config.output_path, PathBuf::from("reports/deps.json"));
        assert!(cli.config.gzip);
        assert_eq!(cli.config.indent, "\t");
    }

    #[test]
    fn test_from_json_str_partial_options() {
        let cfg = Config::from_json_str(r#"{ "gzip": true }"#).unwrap();
        assert!(cfg.gzip);
        assert_eq!(cfg.output_path, PathBuf::from(DEFAULT_OUTPUT_PATH));
        assert_eq!(cfg.indent, DEFAULT_INDENT);
    }

    #[test]
    fn test_from_json_str_all_options() {
        let cfg = Config::from_json_str(
            r#"{ "outputPath": "sizes.json", "gzip": false, "indent": "    " }"#,
        )
        .unwrap();
        assert_eq!(cfg.output_path, PathBuf::from("sizes.json"));
        assert_eq!(cfg.indent, "    ");
    }

    #[test]
    fn test_from_json_str_ignores_unknown_options() {
        let cfg = Config::from_json_str(r#"{ "gzip": true, "verbose": true }"#).unwrap();
        assert!(cfg.gzip);
        assert_eq!(cfg.output_path, PathBuf::from(DEFAULT_OUTPUT_PATH));
    }

    #[test]
    fn test_from_json_str_rejects_wrong_types() {
        assert!(Config::from_json_str(r#"{ "gzip": "yes" }"#).is_err());
    }

    #[test]
    fn test_from_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "outputPath": "deps.json" }}"#).unwrap();

        let cfg = Config::from_json_file(file.path()).unwrap();
        assert_eq!(cfg.output_path, PathBuf::from("deps.json"));
    }
}
