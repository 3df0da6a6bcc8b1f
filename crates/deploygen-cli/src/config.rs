//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only ever sees the resulting
//! [`RawParameters`].
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (merged at the call-site, not here)
//! 2. `DEPLOYGEN_*` environment variables (a `.env` file is loaded first)
//! 3. Parameter file: `--config FILE`, else `./deploygen.toml` when present
//! 4. Schema defaults (filled in by the validator)

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat, Source, Value};
use tracing::debug;

use deploygen_core::domain::{RawParameters, find_flag};

/// Parameter file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "deploygen.toml";

/// Prefix for environment overrides, e.g. `DEPLOYGEN_REDIS_IP`.
pub const ENV_PREFIX: &str = "DEPLOYGEN";

const NO_COLOR_KEY: &str = "no_color";

/// Application configuration.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Parameter values from the file and environment layers.
    pub parameters: RawParameters,
    /// Disable ANSI output regardless of the terminal.
    pub no_color: bool,
    /// The file that was read, if any.
    pub source: Option<PathBuf>,
}

impl AppConfig {
    /// Load the file and environment layers.
    ///
    /// An explicit `config_file` must exist; the default file is optional.
    /// Every key from the file is kept so unknown names surface as
    /// validation errors. Environment variables are only taken for names
    /// the schema knows, since the environment is shared with other tools.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        let source = (required || path.is_file()).then(|| path.clone());

        let file_values = read_table(
            Config::builder()
                .add_source(File::from(path.as_path()).format(FileFormat::Toml).required(required))
                .build()
                .with_context(|| format!("reading {}", path.display()))?,
        )?;

        let env_values = read_table(
            Config::builder()
                .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(false))
                .build()
                .context("reading DEPLOYGEN_* environment")?,
        )?;

        let mut config = Self {
            source,
            ..Self::default()
        };
        config.absorb(file_values, |_| true)?;
        config.absorb(env_values, |key| key == NO_COLOR_KEY || find_flag(key).is_some())?;

        debug!(
            file = ?config.source,
            keys = config.parameters.keys().count(),
            "Configuration loaded"
        );
        Ok(config)
    }

    fn absorb(
        &mut self,
        table: BTreeMap<String, Value>,
        accept: impl Fn(&str) -> bool,
    ) -> anyhow::Result<()> {
        for (key, value) in table {
            if !accept(&key) {
                continue;
            }
            if key == NO_COLOR_KEY {
                self.no_color = value
                    .into_bool()
                    .with_context(|| format!("'{NO_COLOR_KEY}' must be a boolean"))?;
                continue;
            }
            let text = value
                .into_string()
                .with_context(|| format!("'{key}' must be a string, number or boolean"))?;
            self.parameters.set(key, text);
        }
        Ok(())
    }

    /// The file and environment layers with `overrides` (CLI flags) on top.
    pub fn layered(&self, overrides: RawParameters) -> RawParameters {
        let mut merged = self.parameters.clone();
        merged.merge(overrides);
        merged
    }

    /// The file that was read, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

fn read_table(settings: Config) -> anyhow::Result<BTreeMap<String, Value>> {
    Ok(settings
        .collect()
        .context("configuration must be a table of key = value pairs")?
        .into_iter()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("deploy.toml");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn file_values_become_parameters() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "redis_ip = \"10.0.0.2\"\nredis_port = 6380\nno_color = true\n",
        );
        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.parameters.get("redis_ip"), Some("10.0.0.2"));
        assert_eq!(cfg.parameters.get("redis_port"), Some("6380"));
        assert!(cfg.no_color);
        assert_eq!(cfg.source(), Some(path.as_path()));
    }

    #[test]
    fn unknown_file_keys_are_passed_through() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "redis_host = \"x\"\n");
        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert!(cfg.parameters.ensure_known().is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "redis_ip = = \n");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn nested_tables_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "[redis]\nip = \"10.0.0.2\"\n");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn cli_overrides_win() {
        let cfg = AppConfig {
            parameters: RawParameters::new()
                .with("log_level", "3")
                .with("database", "cmdb"),
            ..AppConfig::default()
        };
        let merged = cfg.layered(RawParameters::new().with("log_level", "6"));
        assert_eq!(merged.get("log_level"), Some("6"));
        assert_eq!(merged.get("database"), Some("cmdb"));
    }
}
