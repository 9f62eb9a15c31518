//! Installer configuration stored in `envboot.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Default config file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "envboot.toml";

/// Installer configuration (TOML).
///
/// Every field is optional in the file. Missing fields default to the package
/// set and layout the installer has always used.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Name shown in the banner and launch message.
    pub app_name: String,

    /// Environment directory, relative to the working directory.
    pub venv_dir: PathBuf,

    /// Base interpreter used to create the environment. Looked up on `PATH`
    /// (`python3`, then `python`) when unset.
    pub python: Option<String>,

    /// Installer tooling upgraded in step 2.
    pub tooling: Vec<String>,

    /// Requirement specifiers installed in a single call in step 3.
    pub packages: Vec<String>,

    /// Optional project requirements file installed in step 4 when present.
    pub manifest: PathBuf,

    /// Modules imported by the smoke test.
    pub smoke_imports: Vec<String>,

    /// Script handed to the environment interpreter once installation succeeds.
    pub entry_point: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "EthoGrid-ToxMate".to_string(),
            venv_dir: PathBuf::from(".venv"),
            python: None,
            tooling: strings(&["pip", "wheel", "setuptools"]),
            packages: strings(&[
                "numpy==1.26.*",
                "opencv-python",
                "PyQt5",
                "scipy",
                "pandas",
                "matplotlib",
                "seaborn",
                "scikit-learn",
                "torch",
                "torchvision",
                "torchaudio",
                "ultralytics",
            ]),
            manifest: PathBuf::from("requirements.txt"),
            smoke_imports: strings(&["torch", "cv2", "PyQt5", "ultralytics"]),
            entry_point: PathBuf::from("main.py"),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.venv_dir.as_os_str().is_empty() {
            return Err(anyhow!("venv_dir must not be empty"));
        }
        if self.manifest.as_os_str().is_empty() {
            return Err(anyhow!("manifest must not be empty"));
        }
        if self.entry_point.as_os_str().is_empty() {
            return Err(anyhow!("entry_point must not be empty"));
        }
        if let Some(python) = &self.python
            && python.trim().is_empty()
        {
            return Err(anyhow!("python must not be blank when set"));
        }
        if self.tooling.is_empty() || self.tooling.iter().any(|t| t.trim().is_empty()) {
            return Err(anyhow!("tooling must be a non-empty array of package names"));
        }
        if self.packages.iter().any(|p| p.trim().is_empty()) {
            return Err(anyhow!("packages must not contain blank entries"));
        }
        if self.smoke_imports.is_empty() {
            return Err(anyhow!("smoke_imports must be a non-empty array"));
        }
        for module in &self.smoke_imports {
            if !is_module_path(module) {
                return Err(anyhow!("smoke_imports entry {module:?} is not a module name"));
            }
        }
        Ok(())
    }
}

/// Dotted Python identifier such as `cv2` or `PyQt5.QtCore`.
fn is_module_path(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|part| {
            let mut chars = part.chars();
            matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
                && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        })
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `Config::default()`.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        let cfg = Config::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: Config =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

/// Load the config for a project rooted at `root`.
///
/// Without `explicit`, `envboot.toml` is optional. A path passed explicitly
/// must exist.
pub fn load_project_config(root: &Path, explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => {
            let path = root.join(path);
            if !path.is_file() {
                return Err(anyhow!("config file not found: {}", path.display()));
            }
            load_config(&path)
        }
        None => load_config(&root.join(DEFAULT_CONFIG_FILE)),
    }
}
