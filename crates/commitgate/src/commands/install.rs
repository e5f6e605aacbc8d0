//! Handler for `commitgate install`.

use commitgate_core::hooks::{detect_hook_manager, install_hooks, HookManager};
use commitgate_core::GateError;

use super::current_repo_root;
use crate::output::Reporter;

/// Install the pre-commit hook, auto-detecting the hook manager unless one
/// was requested explicitly.
pub fn run_install(requested: Option<HookManager>, force: bool, reporter: &mut Reporter) -> bool {
    let Some(root) = current_repo_root(reporter) else {
        return false;
    };

    let manager = match requested {
        Some(m) => m,
        None => match detect_hook_manager(&root) {
            Some(m) => {
                reporter.info(&format!("Detected hook manager: {m}"));
                m
            }
            None => {
                reporter.info("No hook manager detected, defaulting to native git hooks");
                HookManager::Native
            }
        },
    };

    reporter.section(&format!("Installing pre-commit hook via {manager}"));

    match install_hooks(&root, manager, force) {
        Ok(msg) => {
            reporter.success(&msg);
            true
        }
        Err(GateError::AlreadyExists(path)) => {
            reporter.error(&format!(
                "{} already exists and does not run commitgate (use --force to replace it)",
                path.display()
            ));
            false
        }
        Err(e) => {
            reporter.error(&format!("Failed to install hook: {e}"));
            false
        }
    }
}
