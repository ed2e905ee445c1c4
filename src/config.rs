//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/balena-wrap/balena-wrap.toml`
//! 3. Environment variables: `BALENA_WRAP_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::expand_env_vars;

/// Where device prefix matching happens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// API-side `startswith` filter
    #[default]
    Server,
    /// Fetch the full device list and filter locally
    Client,
}

impl std::str::FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "server" => Ok(SearchMode::Server),
            "client" => Ok(SearchMode::Client),
            other => Err(format!(
                "invalid search_mode '{other}' (expected 'server' or 'client')"
            )),
        }
    }
}

/// Raw settings for intermediate parsing (all optional to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub api_url: Option<String>,
    pub api_version: Option<String>,
    pub cli_name: Option<String>,
    pub token_env_var: Option<String>,
    pub token_file: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub search_mode: Option<SearchMode>,
    pub exact_match: Option<bool>,
}

/// Unified configuration for balena-wrap.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// balena API base URL
    pub api_url: String,
    /// OData API version segment
    pub api_version: String,
    /// Name of the wrapped executable
    pub cli_name: String,
    /// Environment variable holding the auth token
    pub token_env_var: String,
    /// balena CLI token file (default: ~/.balena/token)
    pub token_file: PathBuf,
    /// balena CLI config file (default: ~/.balena/balena.cfg)
    pub config_file: PathBuf,
    /// Server-side or client-side prefix search
    pub search_mode: SearchMode,
    /// Accept a unique exact name among several prefix matches
    pub exact_match: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let balena_dir = dirs_default_balena_dir();
        Self {
            api_url: "https://api.balena-cloud.com".into(),
            api_version: "v6".into(),
            cli_name: "balena".into(),
            token_env_var: "BALENA_AUTH_TOKEN".into(),
            token_file: balena_dir.join("token"),
            config_file: balena_dir.join("balena.cfg"),
            search_mode: SearchMode::default(),
            exact_match: false,
        }
    }
}

/// Get the balena CLI's per-user directory (~/.balena).
fn dirs_default_balena_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".balena"))
        .unwrap_or_else(|| PathBuf::from("~/.balena"))
}

/// Get the XDG config directory for balena-wrap.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "balena-wrap").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("balena-wrap.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        self.token_file = PathBuf::from(expand_env_vars(&self.token_file.to_string_lossy()));
        self.config_file = PathBuf::from(expand_env_vars(&self.config_file.to_string_lossy()));
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            api_url: overlay
                .api_url
                .clone()
                .unwrap_or_else(|| self.api_url.clone()),
            api_version: overlay
                .api_version
                .clone()
                .unwrap_or_else(|| self.api_version.clone()),
            cli_name: overlay
                .cli_name
                .clone()
                .unwrap_or_else(|| self.cli_name.clone()),
            token_env_var: overlay
                .token_env_var
                .clone()
                .unwrap_or_else(|| self.token_env_var.clone()),
            token_file: overlay
                .token_file
                .clone()
                .unwrap_or_else(|| self.token_file.clone()),
            config_file: overlay
                .config_file
                .clone()
                .unwrap_or_else(|| self.config_file.clone()),
            search_mode: overlay.search_mode.unwrap_or(self.search_mode),
            exact_match: overlay.exact_match.unwrap_or(self.exact_match),
        }
    }

    /// Load settings with layered precedence from the global config location.
    pub fn load() -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref())
    }

    /// Load settings using `config_path` as the global config file.
    ///
    /// A missing file is not an error; a malformed one is.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(path) = config_path {
            if path.exists() {
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply BALENA_WRAP_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("BALENA_WRAP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("api_url") {
            settings.api_url = val;
        }
        if let Ok(val) = config.get_string("api_version") {
            settings.api_version = val;
        }
        if let Ok(val) = config.get_string("cli_name") {
            settings.cli_name = val;
        }
        if let Ok(val) = config.get_string("token_env_var") {
            settings.token_env_var = val;
        }
        if let Ok(val) = config.get_string("token_file") {
            settings.token_file = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("config_file") {
            settings.config_file = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("search_mode") {
            settings.search_mode = val
                .parse()
                .map_err(|message| ApplicationError::Config { message })?;
        }
        if let Ok(val) = config.get_bool("exact_match") {
            settings.exact_match = val;
        }

        Ok(settings)
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
