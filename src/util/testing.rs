//! Shared test helpers: logging setup and a recording command runner

use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};
use std::sync::{Mutex, Once};

use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::infrastructure::traits::CommandRunner;

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "trace");
        }
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// One recorded external command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCommand {
    pub dir: PathBuf,
    pub program: String,
    pub args: Vec<String>,
}

impl RecordedCommand {
    /// Arguments joined by spaces, e.g. `mod init acme/widget`.
    pub fn args_line(&self) -> String {
        self.args.join(" ")
    }
}

/// How a matching invocation of a [`RecordingCommandRunner`] fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailureMode {
    /// The child runs and exits with status 1.
    NonZeroExit,
    /// The child cannot be started at all.
    Spawn,
}

/// Command runner that records invocations instead of spawning processes.
///
/// Succeeds unless an argument line contains the configured failure pattern.
#[derive(Debug, Default)]
pub struct RecordingCommandRunner {
    calls: Mutex<Vec<RecordedCommand>>,
    fail_on: Option<(String, FailureMode)>,
}

impl RecordingCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exit with status 1 for any invocation whose arguments contain `pattern`.
    pub fn failing_on(pattern: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on: Some((pattern.to_string(), FailureMode::NonZeroExit)),
        }
    }

    /// Fail to start any invocation whose arguments contain `pattern`,
    /// as if the program were not installed. An empty pattern matches everything.
    pub fn failing_to_spawn(pattern: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on: Some((pattern.to_string(), FailureMode::Spawn)),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCommand> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl CommandRunner for RecordingCommandRunner {
    fn run_in(&self, dir: &Path, cmd: &str, args: &[&str]) -> io::Result<Output> {
        let call = RecordedCommand {
            dir: dir.to_path_buf(),
            program: cmd.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        };
        let failure = self
            .fail_on
            .as_ref()
            .filter(|(pattern, _)| call.args_line().contains(pattern.as_str()))
            .map(|(_, mode)| *mode);

        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }

        match failure {
            Some(FailureMode::Spawn) => Err(io::Error::new(
                io::ErrorKind::NotFound,
                "No such file or directory",
            )),
            Some(FailureMode::NonZeroExit) => Ok(Output {
                status: exit_status(1),
                stdout: Vec::new(),
                stderr: b"simulated failure".to_vec(),
            }),
            None => Ok(Output {
                status: exit_status(0),
                stdout: Vec::new(),
                stderr: Vec::new(),
            }),
        }
    }
}

/// Build an `ExitStatus` for the given exit code.
#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

/// Build an `ExitStatus` for the given exit code.
#[cfg(windows)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(code as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_test_setup() {
        init_test_setup();
    }

    #[test]
    fn test_recording_runner_fails_on_pattern() {
        let runner = RecordingCommandRunner::failing_on("zap");
        let ok = runner
            .run_in(Path::new("."), "go", &["get", "-u", "echo"])
            .unwrap();
        let failed = runner
            .run_in(Path::new("."), "go", &["get", "-u", "go.uber.org/zap"])
            .unwrap();

        assert!(ok.status.success());
        assert_eq!(failed.status.code(), Some(1));
        assert_eq!(runner.calls().len(), 2);
    }

    #[test]
    fn test_recording_runner_fails_to_spawn() {
        let runner = RecordingCommandRunner::failing_to_spawn("");

        let err = runner
            .run_in(Path::new("."), "go", &["mod", "init", "acme/widget"])
            .unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert_eq!(runner.calls().len(), 1);
    }
}
