//! balena auth token discovery
//!
//! Sources, first hit wins:
//! 1. `$BALENA_AUTH_TOKEN` (used verbatim)
//! 2. `~/.balena/token`
//! 3. `token = ...` line in `~/.balena/balena.cfg`

use std::path::{Path, PathBuf};
use std::sync::Arc;

use regex::Regex;
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::Credential;
use crate::infrastructure::traits::{Environment, FileSystem};

/// Where to look for the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialSources {
    pub env_var: String,
    pub token_file: PathBuf,
    pub config_file: PathBuf,
}

impl CredentialSources {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            env_var: settings.token_env_var.clone(),
            token_file: settings.token_file.clone(),
            config_file: settings.config_file.clone(),
        }
    }
}

/// Reads the auth token fresh on every call; nothing is cached or written.
pub struct CredentialService {
    fs: Arc<dyn FileSystem>,
    env: Arc<dyn Environment>,
    sources: CredentialSources,
}

impl CredentialService {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        env: Arc<dyn Environment>,
        sources: CredentialSources,
    ) -> Self {
        Self { fs, env, sources }
    }

    pub fn resolve(&self) -> ApplicationResult<Credential> {
        if let Some(token) = self.env.var(&self.sources.env_var) {
            debug!(
                "Using auth token from {} environment variable.",
                self.sources.env_var
            );
            return Ok(Credential::new(token));
        }

        let token_file = &self.sources.token_file;
        let config_file = &self.sources.config_file;

        if self.fs.exists(token_file) {
            debug!("Reading auth token from '{}'.", token_file.display());
            return self.read_token_file(token_file);
        }

        if self.fs.exists(config_file) {
            debug!("Reading auth token from '{}'.", config_file.display());
            return self.read_config_file(config_file);
        }

        Err(ApplicationError::CredentialSourceMissing {
            token_file: token_file.clone(),
            config_file: config_file.clone(),
        })
    }

    fn read_token_file(&self, path: &Path) -> ApplicationResult<Credential> {
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read token file", path)?;
        let token = content.trim();
        if token.is_empty() {
            return Err(ApplicationError::EmptyTokenFile(path.to_path_buf()));
        }
        Ok(Credential::new(token))
    }

    fn read_config_file(&self, path: &Path) -> ApplicationResult<Credential> {
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read config file", path)?;
        parse_config_token(&content)?
            .map(Credential::new)
            .ok_or_else(|| ApplicationError::TokenNotFoundInConfig(path.to_path_buf()))
    }
}

/// Value of the first `token = VALUE` line, if any.
pub fn parse_config_token(content: &str) -> ApplicationResult<Option<String>> {
    let re = Regex::new(r"^\s*token\s*=\s*(\S.*?)\s*$").map_err(|e| {
        ApplicationError::OperationFailed {
            context: "compile regex".to_string(),
            source: Box::new(e),
        }
    })?;

    Ok(content
        .lines()
        .find_map(|line| re.captures(line))
        .map(|caps| caps[1].to_string()))
}
