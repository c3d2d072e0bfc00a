//! Blocking subprocess execution with a hard time limit.
//!
//! Arguments always travel as an argv list; nothing is ever handed to a
//! shell, so commit messages and descriptions need no quoting.

use std::io::Read;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{io_err, GitError};

const FIRST_POLL: Duration = Duration::from_millis(1);
const MAX_POLL: Duration = Duration::from_millis(50);

/// Captured result of a finished process.
#[derive(Debug)]
pub(crate) struct Captured {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// One external-tool invocation.
pub(crate) struct Invocation<'a> {
    pub tool: &'a str,
    pub program: &'a Path,
    pub args: &'a [&'a str],
    pub cwd: Option<&'a Path>,
    pub envs: &'a [(&'a str, &'a str)],
    pub timeout: Duration,
}

impl Invocation<'_> {
    fn args_display(&self) -> String {
        self.args.join(" ")
    }

    /// Run to completion, returning stdout on a zero exit status.
    pub fn run(&self) -> Result<String, GitError> {
        let captured = self.capture()?;
        if captured.status.success() {
            return Ok(captured.stdout);
        }
        let stderr = if captured.stderr.trim().is_empty() {
            captured.stdout.trim().to_string()
        } else {
            captured.stderr.trim().to_string()
        };
        tracing::debug!(tool = self.tool, args = %self.args_display(), %stderr, "command failed");
        Err(GitError::CommandFailed {
            tool: self.tool.to_string(),
            args: self.args_display(),
            status: captured.status.code(),
            stderr,
        })
    }

    /// Run to completion regardless of exit status; fails only on spawn
    /// errors and timeouts.
    pub fn capture(&self) -> Result<Captured, GitError> {
        tracing::debug!(tool = self.tool, args = %self.args_display(), "running");

        let mut command = Command::new(self.program);
        command
            .args(self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = self.cwd {
            command.current_dir(dir);
        }
        for (key, value) in self.envs {
            command.env(key, value);
        }

        let mut child = command.spawn().map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound && !self.program.exists() {
                GitError::NotFound {
                    tool: self.tool.to_string(),
                }
            } else {
                GitError::Spawn {
                    tool: self.tool.to_string(),
                    source,
                }
            }
        })?;

        // Drain both pipes on their own threads so a chatty child never
        // blocks on a full pipe while we poll for exit.
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let stdout_reader = thread::spawn(move || drain(stdout));
        let stderr_reader = thread::spawn(move || drain(stderr));

        let deadline = Instant::now() + self.timeout;
        let mut delay = FIRST_POLL;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    tracing::warn!(tool = self.tool, args = %self.args_display(), "timed out, killed");
                    return Err(GitError::Timeout {
                        tool: self.tool.to_string(),
                        args: self.args_display(),
                        after: self.timeout,
                    });
                }
                Ok(None) => {
                    let left = deadline.saturating_duration_since(Instant::now());
                    thread::sleep(delay.min(left));
                    delay = next_poll(delay);
                }
                Err(e) => return Err(io_err(self.program, e)),
            }
        };

        let stdout = stdout_reader.join().unwrap_or_default();
        let stderr = stderr_reader.join().unwrap_or_default();
        Ok(Captured {
            status,
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
        })
    }
}

/// Exponential backoff between exit checks, capped at [`MAX_POLL`].
fn next_poll(current: Duration) -> Duration {
    (current * 2).min(MAX_POLL)
}

fn drain(pipe: Option<impl Read>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_end(&mut buf);
    }
    buf
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str, timeout: Duration) -> Result<String, GitError> {
        Invocation {
            tool: "sh",
            program: Path::new("/bin/sh"),
            args: &["-c", script],
            cwd: None,
            envs: &[],
            timeout,
        }
        .run()
    }

    #[test]
    fn poll_backoff_starts_short_and_is_capped() {
        assert_eq!(FIRST_POLL, Duration::from_millis(1));
        let mut delay = FIRST_POLL;
        let mut seen = vec![delay];
        for _ in 0..10 {
            delay = next_poll(delay);
            seen.push(delay);
        }
        assert_eq!(&seen[..4], [1, 2, 4, 8].map(Duration::from_millis));
        assert_eq!(seen.last(), Some(&MAX_POLL));
    }

    #[test]
    fn returns_stdout_on_success() {
        let out = sh("printf 'hello world'", Duration::from_secs(10)).expect("run");
        assert_eq!(out, "hello world");
    }

    #[test]
    fn arguments_are_not_shell_interpolated() {
        let payload = "it's \"quoted\" $HOME; rm -rf /";
        let out = Invocation {
            tool: "sh",
            program: Path::new("/bin/sh"),
            args: &["-c", "printf %s \"$1\"", "sh", payload],
            cwd: None,
            envs: &[],
            timeout: Duration::from_secs(10),
        }
        .run()
        .expect("run");
        assert_eq!(out, payload);
    }

    #[test]
    fn non_zero_exit_carries_stderr() {
        let err = sh("echo boom >&2; exit 3", Duration::from_secs(10)).unwrap_err();
        match err {
            GitError::CommandFailed { status, stderr, .. } => {
                assert_eq!(status, Some(3));
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected: {other}"),
        }
    }

    #[test]
    fn slow_command_times_out() {
        let started = Instant::now();
        let err = sh("sleep 5", Duration::from_millis(200)).unwrap_err();
        assert!(matches!(err, GitError::Timeout { .. }), "got: {err}");
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn missing_program_is_not_found() {
        let err = Invocation {
            tool: "ghost",
            program: Path::new("/nonexistent/ghost"),
            args: &[],
            cwd: None,
            envs: &[],
            timeout: Duration::from_secs(1),
        }
        .run()
        .unwrap_err();
        assert!(err.is_not_found());
    }
}
