//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with mock implementations.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Output;

use crate::domain::{DeviceId, DeviceRecord};
use crate::infrastructure::error::DirectoryResult;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a regular file with an execute bit set.
    fn is_executable(&self, path: &Path) -> bool;

    /// Canonicalize path (resolve symlinks, make absolute).
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;
}

/// Process environment abstraction.
pub trait Environment: Send + Sync {
    /// Value of an environment variable, if set and valid UTF-8.
    fn var(&self, key: &str) -> Option<String>;

    /// Path of the running executable.
    fn current_exe(&self) -> io::Result<PathBuf>;
}

/// External command runner abstraction (captured output).
pub trait CommandRunner: Send + Sync {
    /// Run a command with arguments.
    fn run(&self, cmd: &str, args: &[&str]) -> io::Result<Output>;
}

/// Runs a program attached to this process's stdin/stdout/stderr.
pub trait ProcessLauncher: Send + Sync {
    /// Run `program` with `args`, block until it exits and return its exit code.
    fn run_inherited(&self, program: &Path, args: &[String]) -> io::Result<i32>;
}

/// Device attribute used for prefix matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Name,
    Uuid,
}

impl SearchField {
    /// Field name in the balena API device resource.
    pub fn api_field(self) -> &'static str {
        match self {
            SearchField::Name => "device_name",
            SearchField::Uuid => "uuid",
        }
    }

    pub fn matches(self, record: &DeviceRecord, prefix: &str) -> bool {
        match self {
            SearchField::Name => record.name.starts_with(prefix),
            SearchField::Uuid => record.id.starts_with(prefix),
        }
    }
}

/// Read-only view of the remote device directory.
pub trait DeviceDirectory: Send + Sync {
    /// Name of the device with exactly this UUID; `None` if there is none.
    fn device_name(&self, id: &DeviceId) -> DirectoryResult<Option<String>>;

    /// All devices whose `field` starts with `prefix`.
    fn search_prefix(&self, field: SearchField, prefix: &str)
        -> DirectoryResult<Vec<DeviceRecord>>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_executable(&self, path: &Path) -> bool {
        let Ok(meta) = std::fs::metadata(path) else {
            return false;
        };
        if !meta.is_file() {
            return false;
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            meta.permissions().mode() & 0o111 != 0
        }
        #[cfg(not(unix))]
        {
            true
        }
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        std::fs::canonicalize(path)
    }
}

/// Real process environment.
#[derive(Debug, Default)]
pub struct RealEnvironment;

impl Environment for RealEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn current_exe(&self) -> io::Result<PathBuf> {
        std::env::current_exe()
    }
}

/// Real command runner implementation.
#[derive(Debug, Default)]
pub struct RealCommandRunner;

impl CommandRunner for RealCommandRunner {
    fn run(&self, cmd: &str, args: &[&str]) -> io::Result<Output> {
        std::process::Command::new(cmd).args(args).output()
    }
}

/// Spawns child processes that share our standard streams.
#[derive(Debug, Default)]
pub struct RealProcessLauncher;

impl ProcessLauncher for RealProcessLauncher {
    fn run_inherited(&self, program: &Path, args: &[String]) -> io::Result<i32> {
        use std::process::{Command, Stdio};

        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;

        if let Some(code) = status.code() {
            return Ok(code);
        }

        // Killed by a signal: report it the way shells do.
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Ok(crate::exitcode::SIGNAL_BASE + signal);
            }
        }
        Ok(crate::exitcode::FAILURE)
    }
}
