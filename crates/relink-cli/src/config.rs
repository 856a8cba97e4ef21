//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `RELINK_RESOLVER__BASE_URL`, `RELINK_OUTPUT__NO_COLOR`, ...
//! 3. Config file: `--config`, else `./relink.toml`, else the user config directory
//! 4. Built-in defaults (always present)

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use relink_adapters::ResolverSettings;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// File name of a project-local configuration.
pub const LOCAL_CONFIG_FILE: &str = "relink.toml";

const ENV_PREFIX: &str = "RELINK";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Built-in resolver settings and default context properties.
    pub resolver: ResolverConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub base_url: Option<String>,
    pub wiki_prefix: String,
    pub rewrite_markdown: bool,
    /// Added to every render context; `-D` flags win.
    pub properties: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        let settings = ResolverSettings::default();
        Self {
            base_url: settings.base_url,
            wiki_prefix: settings.wiki_prefix,
            rewrite_markdown: settings.rewrite_markdown,
            properties: BTreeMap::new(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "human".into(),
        }
    }
}

impl ResolverConfig {
    pub fn settings(&self) -> ResolverSettings {
        ResolverSettings {
            base_url: self.base_url.clone(),
            wiki_prefix: self.wiki_prefix.clone(),
            rewrite_markdown: self.rewrite_markdown,
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then `RELINK_*`
    /// environment variables.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&Path>) -> CliResult<Self> {
        let defaults = Config::try_from(&Self::default()).map_err(config_error)?;
        let (path, required) = match config_file {
            Some(path) => (path.to_path_buf(), true),
            None => (Self::config_path(), false),
        };
        debug!(path = %path.display(), required, "Loading configuration");

        if required && !path.is_file() {
            return Err(CliError::ConfigError {
                message: format!("config file '{}' does not exist", path.display()),
                source: None,
            });
        }

        Config::builder()
            .add_source(defaults)
            .add_source(File::from(path).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(Config::try_deserialize::<Self>)
            .map_err(config_error)
    }

    /// The configuration file in effect when `--config` is not given:
    /// `./relink.toml` if present, else the user configuration directory.
    pub fn config_path() -> PathBuf {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return local;
        }
        Self::user_config_path()
    }

    /// Path of the per-user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `./relink.toml`.
    pub fn user_config_path() -> PathBuf {
        directories::ProjectDirs::from("org", "relink", "relink")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Look up a dotted key, e.g. `resolver.base_url`.
    ///
    /// Strings come back unquoted and unset values as an empty string.
    pub fn get(&self, key: &str) -> CliResult<String> {
        let root = serde_json::to_value(self).map_err(|e| CliError::ConfigError {
            message: format!("Failed to serialise config: {e}"),
            source: Some(Box::new(e)),
        })?;

        let value = key
            .split('.')
            .try_fold(&root, |value, part| value.get(part))
            .ok_or_else(|| CliError::UnknownConfigKey { key: key.into() })?;

        Ok(match value {
            serde_json::Value::Null => String::new(),
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

fn config_error(err: config::ConfigError) -> CliError {
    CliError::ConfigError {
        message: err.to_string(),
        source: Some(Box::new(err)),
    }
}
