//! User-facing progress output.
//!
//! This is product output, separate from the `tracing` diagnostics set up in
//! [`crate::logging`]. Lines are flushed immediately so they interleave
//! correctly with the output of child processes sharing the terminal.

use std::io::{self, Write};

use anyhow::{Context, Result};
use chrono::Local;

use crate::core::command::StepCommand;
use crate::core::plan::{PlannedStep, TOTAL_STEPS};

const RULE_WIDTH: usize = 70;

pub struct Reporter<W: Write> {
    out: W,
}

impl Reporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write an untimestamped line.
    pub fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{text}").context("write progress output")?;
        self.out.flush().context("flush progress output")
    }

    /// Write a `[HH:MM:SS] message` line.
    pub fn log(&mut self, msg: &str) -> Result<()> {
        let stamp = Local::now().format("%H:%M:%S");
        self.line(&format!("[{stamp}] {msg}"))
    }

    pub fn banner(&mut self, app_name: &str) -> Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        self.line(&rule)?;
        self.line(&format!("🚀 {app_name} Installer"))?;
        self.line(&rule)
    }

    pub fn step(&mut self, step: &PlannedStep) -> Result<()> {
        self.log(&format!(
            "STEP {}/{}: {}",
            step.kind.number(),
            TOTAL_STEPS,
            step.heading
        ))?;
        if let Some(detail) = &step.detail {
            self.log(detail)?;
        }
        Ok(())
    }

    pub fn command(&mut self, cmd: &StepCommand) -> Result<()> {
        self.log(&format!("▶ {cmd}"))
    }

    pub fn failure(&mut self, cmd: &str) -> Result<()> {
        self.line(&format!("\n❌ FAILED: {cmd}"))
    }

    pub fn completion(&mut self, app_name: &str) -> Result<()> {
        self.line("\n✅ INSTALLATION COMPLETE")?;
        self.line(&format!("▶ Launching {app_name}...\n"))
    }
}
