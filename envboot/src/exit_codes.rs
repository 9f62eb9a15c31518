//! Stable exit codes for the installer CLI.
//!
//! After a successful hand-off the process exits with the application's own
//! status instead.

/// Every step succeeded (or `--dry-run` printed the plan).
pub const OK: i32 = 0;
/// A step failed, or configuration/interpreter lookup failed before any step ran.
pub const FAILED: i32 = 1;
