//! Filesystem probes against the project directory.

use std::path::Path;

use tracing::debug;

/// Whether the environment directory already exists under `root`.
///
/// A plain existence check; a half-built environment counts as present.
pub fn environment_exists(root: &Path, venv_dir: &Path) -> bool {
    let path = root.join(venv_dir);
    let exists = path.exists();
    debug!(path = %path.display(), exists, "checked environment directory");
    exists
}

/// Whether the optional requirements manifest is present under `root`.
pub fn manifest_present(root: &Path, manifest: &Path) -> bool {
    let path = root.join(manifest);
    let present = path.is_file();
    debug!(path = %path.display(), present, "checked manifest");
    present
}
