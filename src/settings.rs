use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::ReportError;
use crate::engine::{ChainMode, DEFAULT_PER_PAGE, EngineOptions, MAX_PER_PAGE};

const CONFIG_PATHS: [&str; 2] = ["/etc/reportql/reportql.toml", "./reportql.toml"];
const ENV_PREFIX: &str = "REPORTQL";

/// Runtime settings shared by the server and the command-line tools
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Voter dataset (JSON) loaded at startup
    #[serde(default)]
    pub dataset: Option<PathBuf>,
    #[serde(default = "default_per_page")]
    pub default_per_page: usize,
    #[serde(default = "max_per_page")]
    pub max_per_page: usize,
    #[serde(default)]
    pub chaining: ChainMode,
    #[serde(default = "default_strict_fields")]
    pub strict_fields: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 5480 }
fn default_data_dir() -> PathBuf { PathBuf::from("./data") }
fn default_per_page() -> usize { DEFAULT_PER_PAGE }
fn max_per_page() -> usize { MAX_PER_PAGE }
fn default_strict_fields() -> bool { true }
fn default_log_level() -> String { "info".to_string() }

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_dir: default_data_dir(),
            dataset: None,
            default_per_page: default_per_page(),
            max_per_page: max_per_page(),
            chaining: ChainMode::default(),
            strict_fields: default_strict_fields(),
            log_level: default_log_level(),
        }
    }
}

/// Command-line overrides, flattened into each binary's clap arguments
#[derive(clap::Args, Debug, Clone, Default)]
pub struct CliOverrides {
    /// Server host
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Server port
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// Directory holding saved reports
    #[arg(short = 'D', long)]
    pub data_dir: Option<PathBuf>,

    /// Voter dataset file (JSON)
    #[arg(short = 'f', long)]
    pub dataset: Option<PathBuf>,

    /// AND/OR chaining: standard or legacy
    #[arg(long)]
    pub chaining: Option<ChainMode>,

    /// Log level (RUST_LOG takes precedence)
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Settings {
    /// Load settings with priority: CLI args > ENV > config file > defaults
    pub fn load(args: &CliOverrides) -> Result<Self, ReportError> {
        Self::load_from(&CONFIG_PATHS, args)
    }

    pub fn load_from<P: AsRef<Path>>(config_paths: &[P], args: &CliOverrides) -> Result<Self, ReportError> {
        let mut builder = Config::builder();

        // 1. Config files, later ones override earlier ones
        for path in config_paths {
            let path = path.as_ref();
            if path.exists() {
                builder = builder.add_source(File::from(path));
                tracing::debug!(path = %path.display(), "config file loaded");
            }
        }

        // 2. Environment variables (REPORTQL_*)
        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        // 3. Deserialize with defaults for anything unset
        let base: Self = builder.build()?.try_deserialize()?;

        // 4. CLI args override everything
        let settings = Self {
            host: args.host.clone().unwrap_or(base.host),
            port: args.port.unwrap_or(base.port),
            data_dir: args.data_dir.clone().unwrap_or(base.data_dir),
            dataset: args.dataset.clone().or(base.dataset),
            chaining: args.chaining.unwrap_or(base.chaining),
            log_level: args.log_level.clone().unwrap_or(base.log_level),
            ..base
        };
        settings.check()?;
        Ok(settings)
    }

    fn check(&self) -> Result<(), ReportError> {
        if self.default_per_page == 0 || self.max_per_page == 0 {
            return Err(ReportError::Config("page sizes must be positive".to_string()));
        }
        if self.default_per_page > self.max_per_page {
            return Err(ReportError::Config(format!(
                "default_per_page ({}) exceeds max_per_page ({})",
                self.default_per_page, self.max_per_page
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    #[must_use]
    pub const fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            chain_mode: self.chaining,
            strict_fields: self.strict_fields,
            default_per_page: self.default_per_page,
            max_per_page: self.max_per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn no_files() -> [&'static str; 0] {
        []
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::load_from(&no_files(), &CliOverrides::default()).unwrap();
        assert_eq!(settings.default_per_page, 50);
        assert_eq!(settings.chaining, ChainMode::Standard);
        assert!(settings.strict_fields);
    }

    #[test]
    fn test_file_then_cli() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reportql.toml");
        fs::write(
            &path,
            "port = 6000\nchaining = \"legacy\"\nmax_per_page = 200\nstrict_fields = false\n",
        )
        .unwrap();

        let args = CliOverrides {
            port: Some(7000),
            ..CliOverrides::default()
        };
        let settings = Settings::load_from(&[&path], &args).unwrap();
        assert_eq!(settings.port, 7000);
        assert_eq!(settings.chaining, ChainMode::Legacy);
        assert_eq!(settings.max_per_page, 200);

        let options = settings.engine_options();
        assert!(!options.strict_fields);
        assert_eq!(options.chain_mode, ChainMode::Legacy);
    }

    #[test]
    fn test_inconsistent_page_sizes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reportql.toml");
        fs::write(&path, "default_per_page = 500\nmax_per_page = 100\n").unwrap();
        assert!(matches!(
            Settings::load_from(&[&path], &CliOverrides::default()),
            Err(ReportError::Config(_))
        ));
    }
}
