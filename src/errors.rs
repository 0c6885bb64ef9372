//! Error types shared by every operation in the crate.
//!
//! I/O failures render as `"<path> error: <code>"`, where `code` is the raw OS
//! error number, so callers can assert on the exact message.

use std::io;
use std::path::Path;

use thiserror::Error;

/// Code reported when a failure carries no OS error number.
pub const NO_OS_CODE: i32 = -1;

#[derive(Error, Debug)]
pub enum ToolsError {
    #[error("{path} error: {code}")]
    NotFound { path: String, code: i32 },

    #[error("{path} error: {code}")]
    PermissionDenied { path: String, code: i32 },

    #[error("{path} error: {code}")]
    Io { path: String, code: i32 },

    /// Two equal-sized files yielded a different number of chunks.
    #[error("fread() error: chunk count mismatch between {left} and {right}")]
    ReadAnomaly { left: String, right: String },

    #[error("invalid filename pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("popen() error: {code}")]
    Spawn { code: i32 },

    #[error("key not found in table")]
    KeyNotFound,

    #[error("value not found in table")]
    ValueNotFound,

    #[error("duplicate value in table")]
    DuplicateValue,

    #[error("can only extend a series with at least one element")]
    EmptySeries,
}

/// Result type for crate operations
pub type ToolsResult<T> = std::result::Result<T, ToolsError>;

impl ToolsError {
    /// Tag an OS-level failure with the path that caused it.
    pub fn from_io(path: &Path, err: &io::Error) -> Self {
        let path = path.display().to_string();
        let code = err.raw_os_error().unwrap_or(NO_OS_CODE);

        match err.kind() {
            io::ErrorKind::NotFound => ToolsError::NotFound { path, code },
            io::ErrorKind::PermissionDenied => ToolsError::PermissionDenied { path, code },
            _ => ToolsError::Io { path, code },
        }
    }
}

/// Extension for attaching a path to `io::Result` values.
pub trait IoResultExt<T> {
    fn at_path(self, path: &Path) -> ToolsResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn at_path(self, path: &Path) -> ToolsResult<T> {
        self.map_err(|e| ToolsError::from_io(path, &e))
    }
}
