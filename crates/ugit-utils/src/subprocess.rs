use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};

use crate::error::UtilError;
use crate::Result;

/// Stdio mode for subprocess streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdioMode {
    /// Inherit the parent process's stream.
    Inherit,
    /// Pipe the stream (capture it).
    Pipe,
    /// Redirect to /dev/null.
    Null,
}

impl StdioMode {
    fn to_stdio(self) -> Stdio {
        match self {
            StdioMode::Inherit => Stdio::inherit(),
            StdioMode::Pipe => Stdio::piped(),
            StdioMode::Null => Stdio::null(),
        }
    }
}

/// Result of running a subprocess.
#[derive(Debug)]
pub struct CommandResult {
    /// The exit status.
    pub status: ExitStatus,
    /// Captured stdout (empty if not piped).
    pub stdout: Vec<u8>,
    /// Captured stderr (empty if not piped).
    pub stderr: Vec<u8>,
}

impl CommandResult {
    /// Returns true if the process exited successfully (status 0).
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }
}

/// Builder for subprocess execution, used to shell out to `diff`/`diff3`.
pub struct ExternalCommand {
    program: OsString,
    args: Vec<OsString>,
    stdin_mode: StdioMode,
    stdout_mode: StdioMode,
    stderr_mode: StdioMode,
    working_dir: Option<PathBuf>,
}

impl ExternalCommand {
    /// Create a new command builder for the given program.
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
            stdin_mode: StdioMode::Inherit,
            stdout_mode: StdioMode::Inherit,
            stderr_mode: StdioMode::Inherit,
            working_dir: None,
        }
    }

    /// Add an argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Add multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl AsRef<OsStr>>) -> Self {
        for arg in args {
            self.args.push(arg.as_ref().to_os_string());
        }
        self
    }

    /// Set stdin mode.
    pub fn stdin(mut self, mode: StdioMode) -> Self {
        self.stdin_mode = mode;
        self
    }

    /// Set stdout mode.
    pub fn stdout(mut self, mode: StdioMode) -> Self {
        self.stdout_mode = mode;
        self
    }

    /// Set stderr mode.
    pub fn stderr(mut self, mode: StdioMode) -> Self {
        self.stderr_mode = mode;
        self
    }

    /// Set the working directory.
    pub fn working_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd.stdin(self.stdin_mode.to_stdio());
        cmd.stdout(self.stdout_mode.to_stdio());
        cmd.stderr(self.stderr_mode.to_stdio());
        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }
        cmd
    }

    fn command_string(&self) -> String {
        let mut s = self.program.to_string_lossy().to_string();
        for arg in &self.args {
            s.push(' ');
            s.push_str(&arg.to_string_lossy());
        }
        s
    }

    /// Run the command and wait for it to complete, capturing output.
    pub fn run(&self) -> Result<CommandResult> {
        let mut cmd = self.build_command();
        let cmd_str = self.command_string();

        let child = cmd.spawn().map_err(|e| UtilError::Subprocess {
            command: cmd_str.clone(),
            source: e,
        })?;

        let output = child
            .wait_with_output()
            .map_err(|e| UtilError::Subprocess {
                command: cmd_str,
                source: e,
            })?;

        Ok(CommandResult {
            status: output.status,
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }

    /// Spawn the command without waiting for it to complete.
    pub fn spawn(&self) -> Result<Child> {
        let mut cmd = self.build_command();
        let cmd_str = self.command_string();
        cmd.spawn().map_err(|e| UtilError::Subprocess {
            command: cmd_str,
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_echo() {
        let result = ExternalCommand::new("echo")
            .arg("hello")
            .stdout(StdioMode::Pipe)
            .stderr(StdioMode::Pipe)
            .run()
            .unwrap();

        assert!(result.success());
        assert_eq!(result.stdout.trim_ascii(), b"hello");
    }

    #[test]
    fn exit_code() {
        let result = ExternalCommand::new("sh")
            .arg("-c")
            .arg("exit 1")
            .stdout(StdioMode::Pipe)
            .stderr(StdioMode::Pipe)
            .run()
            .unwrap();

        assert!(!result.success());
        assert_eq!(result.code(), Some(1));
    }

    #[test]
    fn working_directory() {
        let result = ExternalCommand::new("pwd")
            .stdout(StdioMode::Pipe)
            .working_dir("/tmp")
            .run()
            .unwrap();

        assert!(result.success());
        let output = String::from_utf8_lossy(&result.stdout);
        assert!(output.trim().ends_with("/tmp"));
    }
}
