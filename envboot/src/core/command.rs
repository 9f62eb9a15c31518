//! Structured command line for a single installer step.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Program plus argument vector. Never passed through a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepCommand {
    program: PathBuf,
    args: Vec<OsString>,
}

impl StepCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn arguments(&self) -> &[OsString] {
        &self.args
    }

    /// Human-readable rendering, quoted so it could be pasted into a POSIX shell.
    pub fn display(&self) -> String {
        let words: Vec<String> = std::iter::once(self.program().as_os_str())
            .chain(self.arguments().iter().map(OsString::as_os_str))
            .map(|w| w.to_string_lossy().into_owned())
            .collect();
        shell_words::join(words)
    }

    /// Build a `std::process::Command` that runs in `workdir`.
    ///
    /// Multi-component relative programs (`.venv/bin/python`) are anchored to
    /// `workdir` so they do not depend on how the platform combines
    /// `current_dir` with a relative program path. Bare names keep their
    /// `PATH` lookup.
    pub fn command_in(&self, workdir: &Path) -> Command {
        let mut cmd = Command::new(anchor_program(workdir, &self.program));
        cmd.args(&self.args).current_dir(workdir);
        cmd
    }
}

fn anchor_program(workdir: &Path, program: &Path) -> PathBuf {
    if program.is_relative() && program.components().count() > 1 {
        workdir.join(program)
    } else {
        program.to_path_buf()
    }
}

impl fmt::Display for StepCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}
