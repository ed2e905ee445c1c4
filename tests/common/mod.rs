//! Mock implementations of the I/O boundary traits shared by the tests
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::sync::Mutex;

use balena_wrap::domain::{DeviceId, DeviceRecord};
use balena_wrap::infrastructure::directory::filter_by_prefix;
use balena_wrap::infrastructure::traits::{
    CommandRunner, DeviceDirectory, Environment, FileSystem, ProcessLauncher, SearchField,
};
use balena_wrap::infrastructure::{DirectoryError, DirectoryResult};

/// Canonical-length UUID starting with `prefix`, padded with `n`.
pub fn uuid(prefix: &str, n: u32) -> String {
    format!("{prefix}{:0>width$}", n, width = 32 - prefix.len())
}

pub fn device(id: &str, name: &str) -> DeviceRecord {
    DeviceRecord::new(DeviceId::parse(id).unwrap(), name)
}

pub fn strings(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|s| s.to_string()).collect()
}

// ============================================================
// Device directory
// ============================================================

/// In-memory directory that records every query it receives.
pub struct MockDirectory {
    devices: Vec<DeviceRecord>,
    calls: Mutex<Vec<String>>,
}

impl MockDirectory {
    pub fn new(devices: Vec<DeviceRecord>) -> Self {
        Self {
            devices,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queries in order: `get:<uuid>`, `name:<prefix>`, `uuid:<prefix>`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl DeviceDirectory for MockDirectory {
    fn device_name(&self, id: &DeviceId) -> DirectoryResult<Option<String>> {
        self.calls.lock().unwrap().push(format!("get:{}", id));
        Ok(self
            .devices
            .iter()
            .find(|d| &d.id == id)
            .map(|d| d.name.clone()))
    }

    fn search_prefix(
        &self,
        field: SearchField,
        prefix: &str,
    ) -> DirectoryResult<Vec<DeviceRecord>> {
        let label = match field {
            SearchField::Name => "name",
            SearchField::Uuid => "uuid",
        };
        self.calls
            .lock()
            .unwrap()
            .push(format!("{}:{}", label, prefix));
        Ok(filter_by_prefix(self.devices.clone(), field, prefix))
    }
}

/// Directory whose every request fails at the transport level.
pub struct UnreachableDirectory;

impl DeviceDirectory for UnreachableDirectory {
    fn device_name(&self, _id: &DeviceId) -> DirectoryResult<Option<String>> {
        Err(unreachable_error())
    }

    fn search_prefix(
        &self,
        _field: SearchField,
        _prefix: &str,
    ) -> DirectoryResult<Vec<DeviceRecord>> {
        Err(unreachable_error())
    }
}

fn unreachable_error() -> DirectoryError {
    DirectoryError::Transport {
        operation: "device search".into(),
        message: "connection failed".into(),
    }
}

// ============================================================
// Filesystem / environment / processes
// ============================================================

/// Filesystem backed by a map; records every read.
#[derive(Default)]
pub struct MockFileSystem {
    files: HashMap<PathBuf, String>,
    executables: HashSet<PathBuf>,
    links: HashMap<PathBuf, PathBuf>,
    reads: Mutex<Vec<PathBuf>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files.insert(path.into(), content.to_string());
        self
    }

    pub fn with_executable(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.files.insert(path.clone(), String::new());
        self.executables.insert(path);
        self
    }

    /// `canonicalize(link)` returns `target`.
    pub fn with_link(mut self, link: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        self.links.insert(link.into(), target.into());
        self
    }

    pub fn reads(&self) -> Vec<PathBuf> {
        self.reads.lock().unwrap().clone()
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.reads.lock().unwrap().push(path.to_path_buf());
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn is_executable(&self, path: &Path) -> bool {
        self.executables.contains(path)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        Ok(self
            .links
            .get(path)
            .cloned()
            .unwrap_or_else(|| path.to_path_buf()))
    }
}

pub struct MockEnvironment {
    vars: HashMap<String, String>,
    exe: PathBuf,
}

impl MockEnvironment {
    pub fn new(exe: impl Into<PathBuf>) -> Self {
        Self {
            vars: HashMap::new(),
            exe: exe.into(),
        }
    }

    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }
}

impl Environment for MockEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn current_exe(&self) -> io::Result<PathBuf> {
        Ok(self.exe.clone())
    }
}

/// `which` stand-in: prints `which_result`, or fails when `None`.
pub struct MockCommandRunner {
    which_result: Option<String>,
}

impl MockCommandRunner {
    pub fn which(result: Option<&str>) -> Self {
        Self {
            which_result: result.map(String::from),
        }
    }
}

#[cfg(unix)]
impl CommandRunner for MockCommandRunner {
    fn run(&self, cmd: &str, _args: &[&str]) -> io::Result<Output> {
        use std::os::unix::process::ExitStatusExt;

        assert_eq!(cmd, "which");
        Ok(match &self.which_result {
            Some(path) => Output {
                status: std::process::ExitStatus::from_raw(0),
                stdout: format!("{}\n", path).into_bytes(),
                stderr: Vec::new(),
            },
            None => Output {
                status: std::process::ExitStatus::from_raw(1 << 8),
                stdout: Vec::new(),
                stderr: Vec::new(),
            },
        })
    }
}

/// Records launches and returns a fixed exit code.
pub struct MockLauncher {
    exit_code: i32,
    launches: Mutex<Vec<(PathBuf, Vec<String>)>>,
}

impl MockLauncher {
    pub fn exiting_with(exit_code: i32) -> Self {
        Self {
            exit_code,
            launches: Mutex::new(Vec::new()),
        }
    }

    pub fn launches(&self) -> Vec<(PathBuf, Vec<String>)> {
        self.launches.lock().unwrap().clone()
    }
}

impl ProcessLauncher for MockLauncher {
    fn run_inherited(&self, program: &Path, args: &[String]) -> io::Result<i32> {
        self.launches
            .lock()
            .unwrap()
            .push((program.to_path_buf(), args.to_vec()));
        Ok(self.exit_code)
    }
}
