//! Base interpreter lookup for creating the environment.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use tracing::debug;

/// Names tried on `PATH` when no interpreter is configured.
pub const CANDIDATES: [&str; 2] = ["python3", "python"];

/// Resolve the interpreter used for `-m venv`.
///
/// A configured value containing a path separator is used as-is; a bare name
/// is looked up on `PATH`. Without configuration the first of [`CANDIDATES`]
/// found on `PATH` wins.
pub fn resolve_base_python(configured: Option<&str>) -> Result<PathBuf> {
    if let Some(name) = configured {
        let candidate = PathBuf::from(name);
        if candidate.components().count() > 1 {
            return Ok(candidate);
        }
        let found = which::which(name).with_context(|| format!("find {name} on PATH"))?;
        debug!(path = %found.display(), "using configured interpreter");
        return Ok(found);
    }

    for name in CANDIDATES {
        if let Ok(found) = which::which(name) {
            debug!(path = %found.display(), "found base interpreter");
            return Ok(found);
        }
    }
    Err(anyhow!("{} not found in PATH", CANDIDATES.join(" or ")))
}
