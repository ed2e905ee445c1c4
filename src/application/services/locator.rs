//! Finding the real balena CLI
//!
//! The wrapper may itself be installed as `balena` ahead of the real CLI on
//! `PATH`, so any candidate inside our own installation directory is skipped.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::{ApplicationError, ApplicationResult};
use crate::infrastructure::traits::{CommandRunner, Environment, FileSystem};

pub struct CliLocator {
    fs: Arc<dyn FileSystem>,
    env: Arc<dyn Environment>,
    cmd: Arc<dyn CommandRunner>,
    cli_name: String,
}

impl CliLocator {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        env: Arc<dyn Environment>,
        cmd: Arc<dyn CommandRunner>,
        cli_name: impl Into<String>,
    ) -> Self {
        Self {
            fs,
            env,
            cmd,
            cli_name: cli_name.into(),
        }
    }

    /// Path of the wrapped CLI: `which` first, then a scan of `PATH`.
    pub fn locate(&self) -> ApplicationResult<PathBuf> {
        let own_dir = self.own_dir();
        debug!("locate: cli={}, own_dir={:?}", self.cli_name, own_dir);

        if let Some(path) = self.which() {
            if self.is_foreign(&path, own_dir.as_deref()) {
                debug!("locate: using `which` result {}", path.display());
                return Ok(path);
            }
            debug!("locate: skipping {} (this wrapper)", path.display());
        }

        if let Some(path) = self.scan_path(own_dir.as_deref()) {
            debug!("locate: found {} on PATH", path.display());
            return Ok(path);
        }

        Err(ApplicationError::CliNotFound(self.cli_name.clone()))
    }

    /// Canonical directory containing the running executable.
    fn own_dir(&self) -> Option<PathBuf> {
        let exe = match self.env.current_exe() {
            Ok(exe) => exe,
            Err(e) => {
                warn!("Unable to determine own executable path: {}", e);
                return None;
            }
        };
        let exe = self.fs.canonicalize(&exe).unwrap_or(exe);
        exe.parent().map(Path::to_path_buf)
    }

    fn which(&self) -> Option<PathBuf> {
        let output = match self.cmd.run("which", &[self.cli_name.as_str()]) {
            Ok(output) => output,
            Err(e) => {
                debug!("which: failed to run: {}", e);
                return None;
            }
        };
        if !output.status.success() {
            debug!("which: {} not found", self.cli_name);
            return None;
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        let path = stdout.lines().next()?.trim();
        (!path.is_empty()).then(|| PathBuf::from(path))
    }

    fn scan_path(&self, own_dir: Option<&Path>) -> Option<PathBuf> {
        let search_path = self.env.var("PATH")?;
        std::env::split_paths(&search_path)
            .map(|dir| dir.join(&self.cli_name))
            .find(|candidate| {
                self.fs.is_executable(candidate) && self.is_foreign(candidate, own_dir)
            })
    }

    /// True unless `path` lives in our own installation directory.
    fn is_foreign(&self, path: &Path, own_dir: Option<&Path>) -> bool {
        let Some(own_dir) = own_dir else {
            return true;
        };
        let resolved = self
            .fs
            .canonicalize(path)
            .unwrap_or_else(|_| path.to_path_buf());
        !resolved.starts_with(own_dir)
    }
}
