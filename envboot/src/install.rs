//! Orchestration of a full installer run.
//!
//! [`prepare`] observes the project directory and builds the plan; [`execute`]
//! runs it step by step and stops at the first command that does not exit
//! cleanly. Nothing created by earlier steps is cleaned up on failure.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::core::command::StepCommand;
use crate::core::plan::{Plan, PlanInputs, StepKind, build_plan};
use crate::core::platform::Platform;
use crate::io::config::Config;
use crate::io::interpreter::resolve_base_python;
use crate::io::process::{CommandRunner, RunStatus};
use crate::io::report::Reporter;
use crate::io::workspace::{environment_exists, manifest_present};

/// Why a step's command did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The command ran and exited unsuccessfully.
    Exit(RunStatus),
    /// The command could not be started.
    Spawn(String),
}

/// The installer's only runtime failure: a step's command did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("FAILED: {command}")]
pub struct StepFailed {
    /// `None` for the final hand-off.
    pub step: Option<StepKind>,
    pub command: String,
    pub reason: FailureReason,
}

/// Result of a run that reached the application hand-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallOutcome {
    /// Status of the launched application.
    pub launch: RunStatus,
}

impl InstallOutcome {
    pub fn exit_code(&self) -> i32 {
        self.launch.exit_code()
    }
}

/// Inspect `root` and build the plan for `config`.
///
/// The base interpreter is only looked up when the environment has to be
/// created.
pub fn prepare(root: &Path, config: &Config, platform: Platform) -> Result<Plan> {
    let env_exists = environment_exists(root, &config.venv_dir);
    let base_python = if env_exists {
        None
    } else {
        Some(resolve_base_python(config.python.as_deref())?)
    };
    let inputs = PlanInputs {
        platform,
        base_python,
        environment_exists: env_exists,
        manifest_present: manifest_present(root, &config.manifest),
    };
    debug!(?inputs, "planning install");
    build_plan(config, &inputs)
}

/// Run every step of `plan` in order, then hand off to the application.
///
/// Returns [`StepFailed`] (inside `anyhow::Error`) for the first step whose
/// command fails; the failure line has already been reported by then.
#[instrument(skip_all, fields(app = %config.app_name))]
pub fn execute<R: CommandRunner, W: Write>(
    plan: &Plan,
    config: &Config,
    platform: Platform,
    runner: &R,
    reporter: &mut Reporter<W>,
) -> Result<InstallOutcome> {
    reporter.banner(&config.app_name)?;
    reporter.log(&format!("OS Detected: {}", platform.name()))?;

    for step in &plan.steps {
        reporter.step(step)?;
        match step.command() {
            Some(cmd) => {
                reporter.command(cmd)?;
                let status = runner.run(cmd);
                check(Some(step.kind), cmd, status, reporter)?;
            }
            None => debug!(step = step.kind.number(), "step skipped"),
        }
    }

    reporter.completion(&config.app_name)?;
    reporter.command(&plan.launch)?;
    info!(command = %plan.launch, "handing off to application");
    let launch = match runner.hand_off(&plan.launch) {
        Ok(status) => status,
        Err(err) => return Err(fail(None, &plan.launch, spawn_reason(&err), reporter)),
    };
    if !launch.success() {
        warn!(exit_code = ?launch.code, "application exited unsuccessfully");
    }
    Ok(InstallOutcome { launch })
}

fn check<W: Write>(
    step: Option<StepKind>,
    cmd: &StepCommand,
    status: Result<RunStatus>,
    reporter: &mut Reporter<W>,
) -> Result<()> {
    match status {
        Ok(status) if status.success() => Ok(()),
        Ok(status) => Err(fail(step, cmd, FailureReason::Exit(status), reporter)),
        Err(err) => Err(fail(step, cmd, spawn_reason(&err), reporter)),
    }
}

fn spawn_reason(err: &anyhow::Error) -> FailureReason {
    FailureReason::Spawn(format!("{err:#}"))
}

fn fail<W: Write>(
    step: Option<StepKind>,
    cmd: &StepCommand,
    reason: FailureReason,
    reporter: &mut Reporter<W>,
) -> anyhow::Error {
    let command = cmd.display();
    warn!(step = ?step, command = %command, reason = ?reason, "step failed");
    if let Err(err) = reporter.failure(&command) {
        return err;
    }
    StepFailed {
        step,
        command,
        reason,
    }
    .into()
}
