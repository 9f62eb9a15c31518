//! I/O helpers for the installer.

pub mod config;
pub mod interpreter;
pub mod process;
pub mod report;
pub mod workspace;
