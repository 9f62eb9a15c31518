//! Deterministic, pure logic for the installer.
//!
//! Core modules must be free of I/O side effects. They turn configuration and
//! a handful of observed facts into the ordered plan that `install` executes.

pub mod command;
pub mod plan;
pub mod platform;
