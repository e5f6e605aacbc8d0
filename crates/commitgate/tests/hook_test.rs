#![cfg(unix)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const CLEAN: &str = "true";
const FORMAT: &str = r#"for f in "$@"; do echo formatted >> "$f"; done"#;

fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(["-c", "user.name=Test", "-c", "user.email=test@example.com"])
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git failed to start");
    assert!(output.status.success(), "git {args:?} failed");
    String::from_utf8(output.stdout).unwrap()
}

/// A shell "tool" that logs its invocation to `<repo>/tools.log`, then runs
/// `body`. Tools run from inside an area directory, hence `../`.
fn tool(name: &str, body: &str) -> String {
    format!(
        r#"{{ program = "sh", args = ["-c", 'echo {name} "$@" >> ../tools.log; {body}', "{name}"] }}"#
    )
}

fn write_config(root: &Path, fe_lint: &str, be_lint: &str) {
    let config = format!(
        r#"
[[areas]]
name = "frontend"
root = "client"
extensions = ["ts", "tsx"]
linter = {}
formatter = {}

[[areas]]
name = "backend"
root = "server"
extensions = ["py"]
linter = {}
formatter = {}
"#,
        tool("fe-lint", fe_lint),
        tool("fe-fmt", FORMAT),
        tool("be-lint", be_lint),
        tool("be-fmt", FORMAT),
    );
    fs::write(root.join(".commitgate.toml"), config).unwrap();
}

fn setup_repo(fe_lint: &str, be_lint: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    git(tmp.path(), &["init", "-q"]);
    fs::create_dir_all(tmp.path().join("client/src")).unwrap();
    fs::create_dir_all(tmp.path().join("server")).unwrap();
    fs::write(tmp.path().join("client/src/App.tsx"), "export {}\n").unwrap();
    fs::write(tmp.path().join("server/app.py"), "import os\n").unwrap();
    fs::write(tmp.path().join("README.md"), "# demo\n").unwrap();
    write_config(tmp.path(), fe_lint, be_lint);
    tmp
}

fn tool_log(root: &Path) -> Vec<String> {
    fs::read_to_string(root.join("tools.log"))
        .map(|s| s.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

fn commitgate(root: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("commitgate");
    cmd.current_dir(root)
        .env_remove("COMMITGATE_CONFIG")
        .env_remove("COMMITGATE_ON_FINDINGS")
        .env_remove("COMMITGATE_NON_INTERACTIVE")
        .env_remove("COMMITGATE_LOG")
        .args(["--color", "never"]);
    cmd
}

#[test]
fn nothing_staged_in_any_area_is_silent_success() {
    let repo = setup_repo(CLEAN, CLEAN);
    git(repo.path(), &["add", "README.md"]);

    commitgate(repo.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(tool_log(repo.path()).is_empty());
}

#[test]
fn clean_lint_formats_and_restages_both_areas() {
    let repo = setup_repo(CLEAN, CLEAN);
    git(repo.path(), &["add", "client/src/App.tsx", "server/app.py"]);

    commitgate(repo.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[pre-commit]"))
        .stdout(predicate::str::contains("All checks passed"));

    assert_eq!(
        tool_log(repo.path()),
        vec![
            "fe-lint src/App.tsx",
            "be-lint app.py",
            "fe-fmt src/App.tsx",
            "be-fmt app.py",
        ]
    );

    // Formatter output is in the index, nothing left unstaged.
    assert_eq!(git(repo.path(), &["diff", "--name-only"]), "");
    let staged = git(repo.path(), &["diff", "--cached"]);
    assert!(staged.contains("+formatted"));
}

#[test]
fn backend_only_never_runs_frontend_tools() {
    let repo = setup_repo(CLEAN, CLEAN);
    git(repo.path(), &["add", "server/app.py"]);

    commitgate(repo.path()).arg("run").assert().success();

    assert_eq!(tool_log(repo.path()), vec!["be-lint app.py", "be-fmt app.py"]);
}

#[test]
fn abort_policy_stops_before_formatting() {
    let repo = setup_repo(
        CLEAN,
        r#"echo fixed >> "$1"; echo app.py:1:1: F401 unused import; exit 1"#,
    );
    git(repo.path(), &["add", "client/src/App.tsx", "server/app.py"]);

    commitgate(repo.path())
        .args(["run", "--on-findings", "abort"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("F401 unused import"))
        .stderr(predicate::str::contains("Commit aborted due to backend lint issues"));

    let log = tool_log(repo.path());
    assert_eq!(log, vec!["fe-lint src/App.tsx", "be-lint app.py"]);

    // The auto-fix touched the working tree but was not re-staged.
    assert_eq!(git(repo.path(), &["diff", "--name-only"]), "server/app.py\n");
}

#[test]
fn proceed_policy_formats_despite_findings() {
    let repo = setup_repo(CLEAN, "echo E501 line too long; exit 1");
    git(repo.path(), &["add", "server/app.py"]);

    commitgate(repo.path())
        .args(["--on-findings", "proceed"])
        .assert()
        .success()
        .stderr(predicate::str::contains("E501 line too long"))
        .stderr(predicate::str::contains("Continuing despite backend lint issues"));

    assert_eq!(tool_log(repo.path()), vec!["be-lint app.py", "be-fmt app.py"]);
    assert_eq!(git(repo.path(), &["diff", "--name-only"]), "");
}

#[test]
fn findings_policy_from_environment() {
    let repo = setup_repo("echo warning; exit 0", CLEAN);
    git(repo.path(), &["add", "client/src/App.tsx"]);

    commitgate(repo.path())
        .env("COMMITGATE_ON_FINDINGS", "abort")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Commit aborted due to frontend lint issues"));

    assert_eq!(tool_log(repo.path()), vec!["fe-lint src/App.tsx"]);
}

#[test]
fn without_a_terminal_the_non_interactive_policy_decides() {
    let repo = setup_repo(CLEAN, "echo issue; exit 1");
    git(repo.path(), &["add", "server/app.py"]);

    commitgate(repo.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("No terminal"));

    commitgate(repo.path())
        .env("COMMITGATE_NON_INTERACTIVE", "abort")
        .assert()
        .failure()
        .stderr(predicate::str::contains("aborting"));
}

#[test]
fn linter_crash_is_fatal() {
    let repo = setup_repo(CLEAN, "echo boom >&2; exit 2");
    git(repo.path(), &["add", "server/app.py"]);

    commitgate(repo.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("exited with exit code 2"))
        .stderr(predicate::str::contains("boom"));

    assert_eq!(tool_log(repo.path()), vec!["be-lint app.py"]);
}

#[test]
fn missing_tool_is_fatal() {
    let repo = setup_repo(CLEAN, CLEAN);
    fs::write(
        repo.path().join(".commitgate.toml"),
        r#"
[[areas]]
name = "backend"
root = "server"
extensions = ["py"]
linter = { program = "commitgate-test-missing-linter" }
formatter = { program = "commitgate-test-missing-formatter" }
"#,
    )
    .unwrap();
    git(repo.path(), &["add", "server/app.py"]);

    commitgate(repo.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Tool not found: commitgate-test-missing-linter",
        ));
}

#[test]
fn json_output_carries_the_report() {
    let repo = setup_repo(CLEAN, CLEAN);
    git(repo.path(), &["add", "client/src/App.tsx"]);

    let output = commitgate(repo.path()).arg("--json").output().unwrap();

    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["report"]["verdict"]["result"], "passed");
    assert_eq!(parsed["report"]["areas"][0]["name"], "frontend");
    assert_eq!(parsed["report"]["areas"][0]["files"][0], "client/src/App.tsx");
    assert_eq!(parsed["report"]["areas"][0]["restaged"], true);
}

#[test]
fn staged_previews_without_running_tools() {
    let repo = setup_repo(CLEAN, CLEAN);
    git(repo.path(), &["add", "client/src/App.tsx", "README.md"]);

    commitgate(repo.path())
        .arg("staged")
        .assert()
        .success()
        .stdout(predicate::str::contains("=== frontend ==="))
        .stdout(predicate::str::contains("src/App.tsx"))
        .stdout(predicate::str::contains("lint:"))
        .stdout(predicate::str::contains("backend").not());

    assert!(tool_log(repo.path()).is_empty());
}

#[test]
fn config_flag_selects_another_file() {
    let repo = setup_repo(CLEAN, CLEAN);
    fs::rename(
        repo.path().join(".commitgate.toml"),
        repo.path().join("hooks.toml"),
    )
    .unwrap();
    git(repo.path(), &["add", "server/app.py"]);

    commitgate(repo.path())
        .args(["--config", "hooks.toml"])
        .assert()
        .success();

    assert_eq!(tool_log(repo.path()), vec!["be-lint app.py", "be-fmt app.py"]);
}

#[test]
fn invalid_config_is_reported() {
    let repo = setup_repo(CLEAN, CLEAN);
    fs::write(repo.path().join(".commitgate.toml"), "areas = 3\n").unwrap();

    commitgate(repo.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn outside_a_repository_fails() {
    let tmp = TempDir::new().unwrap();

    commitgate(tmp.path())
        .env("GIT_CEILING_DIRECTORIES", tmp.path().parent().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not inside a git repository"));
}

#[test]
fn init_writes_default_config_once() {
    let tmp = TempDir::new().unwrap();
    git(tmp.path(), &["init", "-q"]);

    commitgate(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains(".commitgate.toml"));

    let config = fs::read_to_string(tmp.path().join(".commitgate.toml")).unwrap();
    assert!(config.contains("ruff"));

    commitgate(tmp.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn install_creates_native_hook() {
    let tmp = TempDir::new().unwrap();
    git(tmp.path(), &["init", "-q"]);

    commitgate(tmp.path())
        .args(["install", "--native"])
        .assert()
        .success();

    let hook = fs::read_to_string(tmp.path().join(".git/hooks/pre-commit")).unwrap();
    assert!(hook.contains("commitgate run"));
}
