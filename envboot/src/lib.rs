//! Bootstrapper for an isolated Python environment.
//!
//! Creates a virtual environment, installs a fixed package set plus optional
//! project requirements, smoke-tests key imports and hands control to the
//! application entry point. Execution is strictly sequential and stops at the
//! first failing command.
//!
//! - **[`core`]**: Pure planning logic (platform paths, command building, step order).
//!   No I/O, fully testable in isolation.
//! - **[`io`]**: Side effects (config file, filesystem probes, process execution,
//!   progress output).
//!
//! [`install`] drives a plan through an [`io::process::CommandRunner`].

pub mod core;
pub mod exit_codes;
pub mod install;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
