//! `io::Result` to `ApplicationResult`, with the offending path attached

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

pub trait IoResultExt<T> {
    /// Wrap an I/O failure as `OperationFailed { context: "<what> '<path>'" }`.
    fn with_path_context(self, what: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, what: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|source| ApplicationError::OperationFailed {
            context: format!("{what} '{}'", path.display()),
            source: Box::new(source),
        })
    }
}
