use std::io;
use std::path::Path;
use std::process::Command;

/// Captured result of one child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` when the child was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn ok(stdout: &str) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    pub fn failed(code: i32, stderr: &str) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Spawns a command line and waits for it.
///
/// Implementations run exactly one child per call.
pub trait ProcessRunner: Send + Sync {
    fn run(&self, command_line: &str, cwd: &Path) -> io::Result<ProcessOutput>;
}

/// Hands the command line to the platform shell.
pub struct ShellRunner;

impl ProcessRunner for ShellRunner {
    fn run(&self, command_line: &str, cwd: &Path) -> io::Result<ProcessOutput> {
        let output = shell_command(command_line).current_dir(cwd).output()?;
        Ok(ProcessOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(unix)]
fn shell_command(command_line: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command_line);
    cmd
}

#[cfg(windows)]
fn shell_command(command_line: &str) -> Command {
    use std::os::windows::process::CommandExt;
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").raw_arg(command_line);
    cmd
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn captures_stdout_verbatim() {
        let td = tempdir().unwrap();
        let out = ShellRunner.run("printf 'ok\\n'", td.path()).unwrap();
        assert!(out.success());
        assert_eq!(out.stdout, "ok\n");
        assert_eq!(out.stderr, "");
    }

    #[test]
    fn runs_in_given_directory() {
        let td = tempdir().unwrap();
        std::fs::write(td.path().join("marker.txt"), "").unwrap();
        let out = ShellRunner.run("ls", td.path()).unwrap();
        assert!(out.stdout.contains("marker.txt"));
    }

    #[test]
    fn reports_exit_code_and_stderr() {
        let td = tempdir().unwrap();
        let out = ShellRunner
            .run("printf 'fatal: bad' >&2; exit 3", td.path())
            .unwrap();
        assert_eq!(out.code, Some(3));
        assert_eq!(out.stderr, "fatal: bad");
    }

    #[test]
    fn missing_directory_is_a_spawn_error() {
        let td = tempdir().unwrap();
        let err = ShellRunner
            .run("true", &td.path().join("gone"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
