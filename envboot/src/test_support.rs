//! Test-only helpers: a scripted command runner and temporary projects.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use tempfile::TempDir;

use crate::core::command::StepCommand;
use crate::io::config::Config;
use crate::io::process::{CommandRunner, RunStatus};

/// Canned response for commands whose rendering contains `pattern`.
#[derive(Debug, Clone)]
pub struct ScriptedRule {
    pub pattern: String,
    pub response: ScriptedResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptedResponse {
    Exit(i32),
    SpawnError,
}

/// One call observed by [`ScriptedRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: String,
    pub hand_off: bool,
}

/// Runner that records every command and answers from rules instead of
/// spawning processes. Commands matching no rule exit 0.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    rules: Vec<ScriptedRule>,
    calls: RefCell<Vec<Invocation>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands containing `pattern` exit with `code`.
    pub fn exit_when(mut self, pattern: &str, code: i32) -> Self {
        self.rules.push(ScriptedRule {
            pattern: pattern.to_string(),
            response: ScriptedResponse::Exit(code),
        });
        self
    }

    /// Commands containing `pattern` fail to start.
    pub fn spawn_error_when(mut self, pattern: &str) -> Self {
        self.rules.push(ScriptedRule {
            pattern: pattern.to_string(),
            response: ScriptedResponse::SpawnError,
        });
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.command.clone()).collect()
    }

    fn respond(&self, cmd: &StepCommand, hand_off: bool) -> Result<RunStatus> {
        let command = cmd.display();
        self.calls.borrow_mut().push(Invocation {
            command: command.clone(),
            hand_off,
        });
        let rule = self.rules.iter().find(|r| command.contains(&r.pattern));
        match rule.map(|r| r.response) {
            Some(ScriptedResponse::Exit(code)) => Ok(RunStatus::from_code(code)),
            Some(ScriptedResponse::SpawnError) => Err(anyhow!("spawn {command}: not found")),
            None => Ok(RunStatus::from_code(0)),
        }
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, cmd: &StepCommand) -> Result<RunStatus> {
        self.respond(cmd, false)
    }

    fn hand_off(&self, cmd: &StepCommand) -> Result<RunStatus> {
        self.respond(cmd, true)
    }
}

/// Temporary project directory.
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Default config with an absolute base interpreter so no `PATH` lookup
    /// happens.
    pub fn config(&self) -> Config {
        Config {
            python: Some(fake_base_python().display().to_string()),
            ..Config::default()
        }
    }

    /// Create an (empty) environment directory.
    pub fn create_venv(&self, config: &Config) -> Result<PathBuf> {
        let path = self.path().join(&config.venv_dir);
        fs::create_dir_all(&path)?;
        Ok(path)
    }

    pub fn write_manifest(&self, config: &Config, contents: &str) -> Result<()> {
        fs::write(self.path().join(&config.manifest), contents)?;
        Ok(())
    }

    pub fn write_config(&self, contents: &str) -> Result<PathBuf> {
        let path = self.path().join(crate::io::config::DEFAULT_CONFIG_FILE);
        fs::write(&path, contents)?;
        Ok(path)
    }
}

/// Absolute interpreter path that does not need to exist for scripted runs.
pub fn fake_base_python() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(r"C:\fake\python.exe")
    } else {
        PathBuf::from("/fake/bin/python3")
    }
}
