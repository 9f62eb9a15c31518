//! `envboot`: create the project's Python environment, install its packages
//! and launch the application.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use envboot::core::platform::Platform;
use envboot::exit_codes;
use envboot::install::{FailureReason, StepFailed, execute, prepare};
use envboot::io::config::load_project_config;
use envboot::io::process::SystemRunner;
use envboot::io::report::Reporter;
use envboot::logging;

#[derive(Parser)]
#[command(
    name = "envboot",
    version,
    about = "Set up an isolated Python environment and launch the application"
)]
struct Cli {
    /// Config file, relative to the working directory. Must exist when given;
    /// otherwise `envboot.toml` is read if present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the steps that would run without executing anything.
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    logging::init();
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            match err.downcast_ref::<StepFailed>() {
                // The failing command was already reported on stdout.
                Some(StepFailed {
                    reason: FailureReason::Spawn(cause),
                    ..
                }) => eprintln!("{cause}"),
                Some(_) => {}
                None => eprintln!("{:#}", err),
            }
            exit_codes::FAILED
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let root = std::env::current_dir().context("resolve working directory")?;
    let config = load_project_config(&root, cli.config.as_deref())?;
    let platform = Platform::current();
    let plan = prepare(&root, &config, platform)?;

    if cli.dry_run {
        print!("{}", plan.render());
        return Ok(exit_codes::OK);
    }

    let runner = SystemRunner::new(&root);
    let mut reporter = Reporter::stdout();
    let outcome = execute(&plan, &config, platform, &runner, &mut reporter)?;
    Ok(outcome.exit_code())
}
