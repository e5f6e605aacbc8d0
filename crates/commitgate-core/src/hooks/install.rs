//! Hook installation for various git hook managers.
//!
//! Supports native git hooks, Husky, Lefthook and simple-git-hooks. Existing
//! configuration is extended rather than replaced.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::GateError;
use crate::git::hooks_dir;

/// Command every installed hook runs.
pub const HOOK_COMMAND: &str = "commitgate run";

/// Supported git hook managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookManager {
    /// Native git hooks (`.git/hooks/` or `core.hooksPath`)
    Native,
    /// Husky (`.husky/`)
    Husky,
    /// Lefthook (`lefthook.yml`)
    Lefthook,
    /// simple-git-hooks (`.simple-git-hooks.json`)
    SimpleGitHooks,
}

impl HookManager {
    /// Returns the lowercase name of the hook manager.
    pub fn name(&self) -> &str {
        match self {
            HookManager::Native => "native",
            HookManager::Husky => "husky",
            HookManager::Lefthook => "lefthook",
            HookManager::SimpleGitHooks => "simple-git-hooks",
        }
    }
}

impl std::fmt::Display for HookManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Auto-detect the hook manager in use at the given project root.
///
/// Checks, in order: `lefthook.yml`/`lefthook.yaml`, the `.husky/`
/// directory, `.simple-git-hooks.json`. Returns `None` when none is found;
/// callers fall back to native hooks.
pub fn detect_hook_manager(project_root: &Path) -> Option<HookManager> {
    if project_root.join("lefthook.yml").exists() || project_root.join("lefthook.yaml").exists() {
        Some(HookManager::Lefthook)
    } else if project_root.join(".husky").is_dir() {
        Some(HookManager::Husky)
    } else if project_root.join(".simple-git-hooks.json").exists() {
        Some(HookManager::SimpleGitHooks)
    } else {
        None
    }
}

/// Install the pre-commit hook for `manager`.
///
/// Returns a human-readable description of what was done. `force` only
/// matters for native hooks, where it allows replacing a foreign
/// `pre-commit` script.
pub fn install_hooks(
    project_root: &Path,
    manager: HookManager,
    force: bool,
) -> Result<String, GateError> {
    debug!(manager = %manager, force, "installing hooks");
    match manager {
        HookManager::Native => install_native_hook(project_root, force),
        HookManager::Husky => install_husky(project_root),
        HookManager::Lefthook => install_lefthook(project_root),
        HookManager::SimpleGitHooks => install_simple_git_hooks(project_root),
    }
}

/// Native hook script. `exec` hands the exit status straight to git.
const NATIVE_HOOK_SCRIPT: &str = "#!/bin/sh\nexec commitgate run\n";

fn install_native_hook(project_root: &Path, force: bool) -> Result<String, GateError> {
    let hooks_dir = hooks_dir(project_root)?;
    fs::create_dir_all(&hooks_dir)?;
    let hook_path = hooks_dir.join("pre-commit");

    let action = if hook_path.exists() {
        let existing = fs::read_to_string(&hook_path)?;
        if existing.contains(HOOK_COMMAND) {
            return Ok(format!("Already configured: {}", hook_path.display()));
        }
        if !force {
            return Err(GateError::AlreadyExists(hook_path));
        }
        "Replaced"
    } else {
        "Created"
    };

    fs::write(&hook_path, NATIVE_HOOK_SCRIPT)?;
    make_executable(&hook_path)?;

    Ok(format!("{action} {}", hook_path.display()))
}

fn install_husky(project_root: &Path) -> Result<String, GateError> {
    let husky_dir = project_root.join(".husky");
    fs::create_dir_all(&husky_dir)?;
    let hook_path = husky_dir.join("pre-commit");

    let message = if hook_path.exists() {
        let existing = fs::read_to_string(&hook_path)?;
        if existing.contains(HOOK_COMMAND) {
            return Ok(format!("Already configured: {}", hook_path.display()));
        }
        let separator = if existing.ends_with('\n') || existing.is_empty() {
            ""
        } else {
            "\n"
        };
        fs::write(&hook_path, format!("{existing}{separator}{HOOK_COMMAND}\n"))?;
        format!("Appended to {}", hook_path.display())
    } else {
        fs::write(&hook_path, format!("{HOOK_COMMAND}\n"))?;
        format!("Created {}", hook_path.display())
    };

    make_executable(&hook_path)?;
    Ok(message)
}

/// YAML appended to `lefthook.yml`.
const LEFTHOOK_SNIPPET: &str = r#"
pre-commit:
  commands:
    commitgate:
      run: commitgate run
      interactive: true
"#;

fn install_lefthook(project_root: &Path) -> Result<String, GateError> {
    let config_path = if project_root.join("lefthook.yaml").exists()
        && !project_root.join("lefthook.yml").exists()
    {
        project_root.join("lefthook.yaml")
    } else {
        project_root.join("lefthook.yml")
    };

    let existing = if config_path.exists() {
        fs::read_to_string(&config_path)?
    } else {
        String::new()
    };

    if existing.contains(HOOK_COMMAND) {
        return Ok(format!(
            "Lefthook already configured in {}",
            config_path.display()
        ));
    }

    // A second top-level `pre-commit:` key would be invalid YAML.
    if existing.lines().any(|l| l.starts_with("pre-commit:")) {
        return Ok(format!(
            "{} already defines pre-commit; add this command to it:\n{}",
            config_path.display(),
            LEFTHOOK_SNIPPET.trim_start_matches('\n')
        ));
    }

    fs::write(&config_path, format!("{existing}{LEFTHOOK_SNIPPET}"))?;
    Ok(format!("Appended commitgate to {}", config_path.display()))
}

fn install_simple_git_hooks(project_root: &Path) -> Result<String, GateError> {
    let config_path = project_root.join(".simple-git-hooks.json");

    if !config_path.exists() {
        let hooks = serde_json::json!({ "pre-commit": HOOK_COMMAND });
        let content = serde_json::to_string_pretty(&hooks)?;
        fs::write(&config_path, format!("{content}\n"))?;
        return Ok(format!("Created {}", config_path.display()));
    }

    let existing = fs::read_to_string(&config_path)?;
    if existing.contains(HOOK_COMMAND) {
        return Ok(format!(
            "simple-git-hooks already configured in {}",
            config_path.display()
        ));
    }

    let mut map = match serde_json::from_str::<serde_json::Value>(&existing)? {
        serde_json::Value::Object(map) => map,
        _ => {
            return Err(GateError::Other(format!(
                "{} is not a JSON object",
                config_path.display()
            )))
        }
    };

    let command = match map.get("pre-commit").and_then(|v| v.as_str()) {
        Some(current) if !current.trim().is_empty() => format!("{current} && {HOOK_COMMAND}"),
        _ => HOOK_COMMAND.to_string(),
    };
    map.insert("pre-commit".to_string(), serde_json::Value::String(command));

    let content = serde_json::to_string_pretty(&map)?;
    fs::write(&config_path, format!("{content}\n"))?;
    Ok(format!("Merged commitgate into {}", config_path.display()))
}

fn make_executable(path: &Path) -> Result<(), GateError> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}
