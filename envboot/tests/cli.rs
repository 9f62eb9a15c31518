//! CLI tests for the `envboot` binary.
//!
//! Spawns the binary in temporary projects. Interpreters are fake shell
//! scripts (Unix only) or absent, so no real Python is needed.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use envboot::exit_codes;
use envboot::test_support::TestProject;

fn envboot(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_envboot"))
        .current_dir(dir)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run envboot")
}

#[test]
fn dry_run_prints_plan_without_running_anything() {
    let project = TestProject::new().expect("project");
    let config = project.config();
    project.create_venv(&config).expect("venv");

    let output = envboot(project.path(), &["--dry-run"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("STEP 1/5: Checking virtual environment..."));
    assert!(stdout.contains("LAUNCH: "));
    assert!(stdout.trim_end().ends_with("main.py"));
}

#[test]
fn unstartable_base_interpreter_fails_with_command_on_stdout() {
    let project = TestProject::new().expect("project");
    project
        .write_config("python = \"/nonexistent/envboot-test/python3\"\n")
        .expect("config");

    let output = envboot(project.path(), &[]);
    assert_eq!(output.status.code(), Some(exit_codes::FAILED));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("❌ FAILED: /nonexistent/envboot-test/python3 -m venv .venv"));
    assert!(!stdout.contains("STEP 2/5"));
}

#[test]
fn explicit_missing_config_fails_instead_of_using_defaults() {
    let project = TestProject::new().expect("project");
    let config = project.config();
    project.create_venv(&config).expect("venv");

    let output = envboot(
        project.path(),
        &["--dry-run", "--config", "typo-does-not-exist.toml"],
    );
    assert_eq!(output.status.code(), Some(exit_codes::FAILED));
    assert!(String::from_utf8_lossy(&output.stdout).is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("config file not found"));
    assert!(stderr.contains("typo-does-not-exist.toml"));
}

#[test]
fn explicit_config_is_used_for_the_plan() {
    let project = TestProject::new().expect("project");
    let config = project.config();
    project.create_venv(&config).expect("venv");
    fs::write(project.path().join("alt.toml"), "entry_point = \"app.py\"\n").expect("config");

    let output = envboot(project.path(), &["--dry-run", "--config", "alt.toml"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert!(String::from_utf8_lossy(&output.stdout).trim_end().ends_with("app.py"));
}

#[test]
fn invalid_config_fails_before_any_step() {
    let project = TestProject::new().expect("project");
    project.write_config("smoke_imports = []\n").expect("config");

    let output = envboot(project.path(), &[]);
    assert_eq!(output.status.code(), Some(exit_codes::FAILED));
    assert!(!String::from_utf8_lossy(&output.stdout).contains("STEP 1/5"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("smoke_imports"));
}

#[cfg(unix)]
mod unix {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    /// Install a fake `.venv/bin/python` that appends its arguments to
    /// `calls.log` in the project root and exits per `cases` (shell `case` arms).
    fn fake_venv_python(root: &Path, cases: &str) {
        let bin = root.join(".venv").join("bin");
        fs::create_dir_all(&bin).expect("mkdir");
        let script = format!(
            "#!/bin/sh\nprintf '%s\\n' \"$*\" >> \"$(dirname \"$0\")/../../calls.log\"\ncase \"$*\" in\n{cases}\nesac\nexit 0\n"
        );
        let path = bin.join("python");
        fs::write(&path, script).expect("write fake python");
        let mut perms = fs::metadata(&path).expect("metadata").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).expect("chmod");
    }

    fn calls(root: &Path) -> Vec<String> {
        fs::read_to_string(root.join("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn full_run_hands_off_and_exits_with_application_status() {
        let project = TestProject::new().expect("project");
        fake_venv_python(project.path(), "*main.py) exit 5 ;;");
        fs::write(project.path().join("requirements.txt"), "requests\n").expect("manifest");

        let output = envboot(project.path(), &[]);
        assert_eq!(output.status.code(), Some(5));

        let calls = calls(project.path());
        assert_eq!(calls.len(), 5);
        assert!(calls[0].starts_with("-m pip install --upgrade pip"));
        assert!(calls[1].contains("ultralytics"));
        assert_eq!(calls[2], "-m pip install -r requirements.txt");
        assert!(calls[3].starts_with("-c import torch"));
        assert_eq!(calls[4], "main.py");

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("Virtual environment already exists → skipping creation"));
        assert!(stdout.contains("✅ INSTALLATION COMPLETE"));
    }

    #[test]
    fn failing_install_stops_before_later_steps() {
        let project = TestProject::new().expect("project");
        fake_venv_python(project.path(), "*\"pip install numpy\"*) exit 3 ;;");

        let output = envboot(project.path(), &[]);
        assert_eq!(output.status.code(), Some(exit_codes::FAILED));

        let calls = calls(project.path());
        assert_eq!(calls.len(), 2);
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("❌ FAILED: "));
        assert!(stdout.contains("ultralytics"));
        assert!(!stdout.contains("STEP 4/5"));
    }
}
