//! Child process execution for installer steps.
//!
//! Children inherit stdin/stdout/stderr so installer progress streams straight
//! to the terminal. There is no timeout: each step blocks until its child exits.

use std::path::PathBuf;
use std::process::{Command, ExitStatus};

use anyhow::{Context, Result};
use tracing::{debug, error, instrument};

use crate::core::command::StepCommand;

/// Exit classification of a finished child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStatus {
    /// `None` when the child was terminated by a signal.
    pub code: Option<i32>,
}

impl RunStatus {
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(self) -> bool {
        self.code == Some(0)
    }

    /// Code the installer itself should exit with to mirror this child.
    pub fn exit_code(self) -> i32 {
        self.code.unwrap_or(1)
    }
}

impl From<ExitStatus> for RunStatus {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

/// Abstraction over process execution so the step sequence can be driven by
/// scripted runners in tests.
pub trait CommandRunner {
    /// Run `cmd` to completion. `Err` means the child could not be started.
    fn run(&self, cmd: &StepCommand) -> Result<RunStatus>;

    /// Pass control to `cmd` as the last action of the installer.
    ///
    /// Implementations may replace the current process and never return on
    /// success; otherwise they return the child's status.
    fn hand_off(&self, cmd: &StepCommand) -> Result<RunStatus>;
}

/// Runner that spawns real processes in `workdir`.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    workdir: PathBuf,
}

impl SystemRunner {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    fn command(&self, step: &StepCommand) -> Command {
        step.command_in(&self.workdir)
    }
}

impl CommandRunner for SystemRunner {
    #[instrument(skip_all, fields(program = %step.program().display()))]
    fn run(&self, step: &StepCommand) -> Result<RunStatus> {
        debug!("spawning child process");
        let status = match self.command(step).status() {
            Ok(status) => status,
            Err(e) => {
                error!(err = %e, "failed to spawn command");
                return Err(e).with_context(|| format!("spawn {}", step.program().display()));
            }
        };
        debug!(exit_code = ?status.code(), "command finished");
        Ok(status.into())
    }

    #[cfg(unix)]
    #[instrument(skip_all, fields(program = %step.program().display()))]
    fn hand_off(&self, step: &StepCommand) -> Result<RunStatus> {
        use std::os::unix::process::CommandExt;

        debug!("replacing process image");
        // `exec` only returns on failure.
        let err = self.command(step).exec();
        error!(err = %err, "failed to exec command");
        Err(err).with_context(|| format!("exec {}", step.program().display()))
    }

    #[cfg(not(unix))]
    #[instrument(skip_all, fields(program = %step.program().display()))]
    fn hand_off(&self, step: &StepCommand) -> Result<RunStatus> {
        self.run(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_status_maps_to_failure_code() {
        let status = RunStatus { code: None };
        assert!(!status.success());
        assert_eq!(status.exit_code(), 1);
        assert_eq!(RunStatus::from_code(3).exit_code(), 3);
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_reports_exit_codes() {
        let temp = tempfile::tempdir().expect("tempdir");
        let runner = SystemRunner::new(temp.path());
        let ok = runner.run(&StepCommand::new("true")).expect("run true");
        assert!(ok.success());
        let failed = runner
            .run(&StepCommand::new("sh").args(["-c", "exit 7"]))
            .expect("run sh");
        assert_eq!(failed.code, Some(7));
    }

    #[test]
    fn system_runner_errors_when_program_is_missing() {
        let temp = tempfile::tempdir().expect("tempdir");
        let runner = SystemRunner::new(temp.path());
        let err = runner
            .run(&StepCommand::new(".venv/bin/python"))
            .expect_err("missing interpreter");
        assert!(format!("{err:#}").contains("spawn"));
    }
}
