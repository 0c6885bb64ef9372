// Shell Operations
// Run a command line through the system shell and capture its stdout

use std::io::{self, Read};
use std::process::{Command, ExitStatus, Stdio};

use tracing::debug;

use crate::core::app_config::compiled;
use crate::errors::{ToolsError, ToolsResult, NO_OS_CODE};

const SHELL_BUFFER_SIZE: usize = compiled::SHELL_BUFFER_SIZE;

/// Captured result of a shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellOutput {
    /// Everything the command wrote to stdout
    pub stdout: String,
    /// Raw wait status: the exit code sits in the high byte, so a missing
    /// command reports `0x7F00`
    pub status: i32,
}

impl ShellOutput {
    pub fn success(&self) -> bool {
        self.status == 0
    }

    /// Exit code the command returned, if it exited normally
    pub fn exit_code(&self) -> Option<i32> {
        if self.status & 0x7F == 0 {
            Some((self.status >> 8) & 0xFF)
        } else {
            None
        }
    }
}

/// Execute `cmd` with `sh -c`
///
/// Only stdout is captured; append `2>&1` to the command to fold stderr in.
pub fn execute(cmd: &str) -> ToolsResult<ShellOutput> {
    let mut child = Command::new("sh")
        .arg("-c")
        .arg(cmd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .spawn()
        .map_err(spawn_error)?;

    let mut stdout = Vec::new();
    if let Some(mut pipe) = child.stdout.take() {
        let mut buffer = [0u8; SHELL_BUFFER_SIZE];
        loop {
            match pipe.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => stdout.extend_from_slice(&buffer[..n]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    // Reap the child before reporting
                    let _ = child.wait();
                    return Err(spawn_error(e));
                }
            }
        }
    }

    let status = child.wait().map_err(spawn_error)?;
    let output = ShellOutput {
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        status: raw_status(status),
    };

    debug!(cmd, status = output.status, bytes = stdout.len(), "executed shell command");
    Ok(output)
}

fn spawn_error(err: io::Error) -> ToolsError {
    ToolsError::Spawn {
        code: err.raw_os_error().unwrap_or(NO_OS_CODE),
    }
}

#[cfg(unix)]
fn raw_status(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status.into_raw()
}

#[cfg(not(unix))]
fn raw_status(status: ExitStatus) -> i32 {
    status.code().map(|code| (code & 0xFF) << 8).unwrap_or(NO_OS_CODE)
}
