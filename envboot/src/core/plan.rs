//! Ordered installer plan built from configuration and observed facts.
//!
//! The plan is fixed-order: environment, tooling, packages, manifest, smoke
//! test, then the launch. Only the `Run`/`Skip` choice of a step depends on
//! inputs.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Result, anyhow};

use crate::core::command::StepCommand;
use crate::core::platform::Platform;
use crate::io::config::Config;

/// Number of numbered steps before the launch.
pub const TOTAL_STEPS: usize = 5;

/// Printed by the smoke-test script once every import succeeded.
pub const SMOKE_OK_MESSAGE: &str = "✔ All core modules loaded successfully";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Environment,
    Tooling,
    Packages,
    Manifest,
    SmokeTest,
}

impl StepKind {
    /// 1-indexed position in the plan.
    pub fn number(self) -> usize {
        match self {
            StepKind::Environment => 1,
            StepKind::Tooling => 2,
            StepKind::Packages => 3,
            StepKind::Manifest => 4,
            StepKind::SmokeTest => 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAction {
    Run(StepCommand),
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStep {
    pub kind: StepKind,
    /// Shown as `STEP n/5: <heading>`.
    pub heading: String,
    /// Extra progress line logged after the heading.
    pub detail: Option<String>,
    pub action: StepAction,
}

impl PlannedStep {
    pub fn command(&self) -> Option<&StepCommand> {
        match &self.action {
            StepAction::Run(cmd) => Some(cmd),
            StepAction::Skip => None,
        }
    }
}

/// Facts observed on the host before planning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanInputs {
    pub platform: Platform,
    /// Interpreter used to create the environment. Only required when the
    /// environment is missing.
    pub base_python: Option<PathBuf>,
    pub environment_exists: bool,
    pub manifest_present: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub steps: Vec<PlannedStep>,
    /// Final hand-off to the application entry point.
    pub launch: StepCommand,
}

impl Plan {
    /// Plain-text listing used by `--dry-run`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for step in &self.steps {
            let _ = writeln!(
                out,
                "STEP {}/{}: {}",
                step.kind.number(),
                TOTAL_STEPS,
                step.heading
            );
            if let Some(detail) = &step.detail {
                let _ = writeln!(out, "    {detail}");
            }
            match &step.action {
                StepAction::Run(cmd) => {
                    let _ = writeln!(out, "    $ {cmd}");
                }
                StepAction::Skip => {
                    let _ = writeln!(out, "    (skipped)");
                }
            }
        }
        let _ = writeln!(out, "LAUNCH: {}", self.launch);
        out
    }
}

/// Build the installer plan.
///
/// Fails only when the environment must be created but no base interpreter
/// was found.
pub fn build_plan(config: &Config, inputs: &PlanInputs) -> Result<Plan> {
    let py = inputs.platform.venv_python(&config.venv_dir);
    let pip = |extra: &[&str]| {
        StepCommand::new(&py)
            .args(["-m", "pip", "install"])
            .args(extra)
    };

    let environment = if inputs.environment_exists {
        PlannedStep {
            kind: StepKind::Environment,
            heading: "Checking virtual environment...".to_string(),
            detail: Some("Virtual environment already exists → skipping creation".to_string()),
            action: StepAction::Skip,
        }
    } else {
        let base = inputs.base_python.as_ref().ok_or_else(|| {
            anyhow!(
                "cannot create {}: no base Python interpreter found (set `python` in the config)",
                config.venv_dir.display()
            )
        })?;
        PlannedStep {
            kind: StepKind::Environment,
            heading: "Checking virtual environment...".to_string(),
            detail: Some("Creating virtual environment...".to_string()),
            action: StepAction::Run(
                StepCommand::new(base)
                    .args(["-m", "venv"])
                    .arg(&config.venv_dir),
            ),
        }
    };

    let tooling = PlannedStep {
        kind: StepKind::Tooling,
        heading: format!("Upgrading {}...", config.tooling.join(", ")),
        detail: None,
        action: StepAction::Run(pip(&["--upgrade"]).args(&config.tooling)),
    };

    let packages = if config.packages.is_empty() {
        PlannedStep {
            kind: StepKind::Packages,
            heading: "Installing core packages...".to_string(),
            detail: Some("No core packages configured → skipping".to_string()),
            action: StepAction::Skip,
        }
    } else {
        PlannedStep {
            kind: StepKind::Packages,
            heading: "Installing core packages...".to_string(),
            detail: None,
            action: StepAction::Run(pip(&[]).args(&config.packages)),
        }
    };

    let manifest_name = config.manifest.display();
    let manifest = if inputs.manifest_present {
        PlannedStep {
            kind: StepKind::Manifest,
            heading: format!("Installing {manifest_name}..."),
            detail: None,
            action: StepAction::Run(pip(&["-r"]).arg(&config.manifest)),
        }
    } else {
        PlannedStep {
            kind: StepKind::Manifest,
            heading: format!("No {manifest_name} found → skipping"),
            detail: None,
            action: StepAction::Skip,
        }
    };

    let smoke = PlannedStep {
        kind: StepKind::SmokeTest,
        heading: "Verifying installation...".to_string(),
        detail: None,
        action: StepAction::Run(
            StepCommand::new(&py)
                .arg("-c")
                .arg(smoke_script(&config.smoke_imports)),
        ),
    };

    Ok(Plan {
        steps: vec![environment, tooling, packages, manifest, smoke],
        launch: StepCommand::new(&py).arg(&config.entry_point),
    })
}

/// Python source for the import smoke test.
pub fn smoke_script(modules: &[String]) -> String {
    format!(
        "import {}; print({:?})",
        modules.join(", "),
        SMOKE_OK_MESSAGE
    )
}
