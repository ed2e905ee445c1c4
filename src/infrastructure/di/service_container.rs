//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use tracing::debug;

use crate::application::services::{
    CliLocator, CredentialService, CredentialSources, DeviceResolver,
};
use crate::application::ApplicationResult;
use crate::config::{SearchMode, Settings};
use crate::infrastructure::directory::{
    ClientFilteredDirectory, PineClient, ServerFilteredDirectory,
};
use crate::infrastructure::traits::{
    CommandRunner, DeviceDirectory, Environment, FileSystem, ProcessLauncher, RealCommandRunner,
    RealEnvironment, RealFileSystem, RealProcessLauncher,
};

/// Container holding all application services.
///
/// The device directory is only built (and the token only read) when a
/// lookup is actually needed.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Process environment abstraction
    pub env: Arc<dyn Environment>,

    /// Command runner abstraction
    pub cmd: Arc<dyn CommandRunner>,

    /// Child process launcher
    pub launcher: Arc<dyn ProcessLauncher>,

    directory: Option<Arc<dyn DeviceDirectory>>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(
            settings,
            Arc::new(RealFileSystem),
            Arc::new(RealEnvironment),
            Arc::new(RealCommandRunner),
            Arc::new(RealProcessLauncher),
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        env: Arc<dyn Environment>,
        cmd: Arc<dyn CommandRunner>,
        launcher: Arc<dyn ProcessLauncher>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            fs,
            env,
            cmd,
            launcher,
            directory: None,
        }
    }

    /// Use `directory` instead of an authenticated HTTP directory (for testing).
    pub fn with_directory(mut self, directory: Arc<dyn DeviceDirectory>) -> Self {
        self.directory = Some(directory);
        self
    }

    pub fn credentials(&self) -> CredentialService {
        CredentialService::new(
            self.fs.clone(),
            self.env.clone(),
            CredentialSources::from_settings(&self.settings),
        )
    }

    pub fn locator(&self) -> CliLocator {
        CliLocator::new(
            self.fs.clone(),
            self.env.clone(),
            self.cmd.clone(),
            self.settings.cli_name.clone(),
        )
    }

    /// Authenticated device directory for the configured search mode.
    pub fn directory(&self) -> ApplicationResult<Arc<dyn DeviceDirectory>> {
        if let Some(directory) = &self.directory {
            return Ok(directory.clone());
        }

        let credential = self.credentials().resolve()?;
        let client = PineClient::new(
            &self.settings.api_url,
            &self.settings.api_version,
            credential,
        );
        debug!("directory: search_mode={:?}", self.settings.search_mode);
        Ok(match self.settings.search_mode {
            SearchMode::Server => Arc::new(ServerFilteredDirectory::new(client)),
            SearchMode::Client => Arc::new(ClientFilteredDirectory::new(client)),
        })
    }

    pub fn resolver(&self) -> ApplicationResult<DeviceResolver> {
        Ok(DeviceResolver::new(self.directory()?))
    }
}
