//! Host platform lookup for paths inside a virtual environment.

use std::path::{Path, PathBuf};

/// Layout family of a Python virtual environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// `Scripts\python.exe`
    Windows,
    /// `bin/python` (Linux, macOS, BSDs).
    Unix,
}

impl Platform {
    /// Platform the binary was compiled for.
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }

    /// Operating system name reported in the `OS Detected` line.
    pub fn name(self) -> &'static str {
        match self {
            Platform::Windows => "Windows",
            Platform::Unix => match std::env::consts::OS {
                "linux" => "Linux",
                "macos" => "Darwin",
                other => other,
            },
        }
    }

    /// Interpreter path inside the environment rooted at `venv_dir`.
    pub fn venv_python(self, venv_dir: &Path) -> PathBuf {
        match self {
            Platform::Windows => venv_dir.join("Scripts").join("python.exe"),
            Platform::Unix => venv_dir.join("bin").join("python"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix_layout_uses_bin() {
        let path = Platform::Unix.venv_python(Path::new(".venv"));
        assert_eq!(path, Path::new(".venv").join("bin").join("python"));
    }

    #[test]
    fn windows_layout_uses_scripts() {
        let path = Platform::Windows.venv_python(Path::new(".venv"));
        assert_eq!(path, Path::new(".venv").join("Scripts").join("python.exe"));
    }

    #[test]
    fn windows_name_is_stable() {
        assert_eq!(Platform::Windows.name(), "Windows");
    }
}
