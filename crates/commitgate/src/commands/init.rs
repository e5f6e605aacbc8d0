//! Handler for the `commitgate init` CLI command.

use commitgate_core::config::write_default_config;
use commitgate_core::GateError;

use super::current_repo_root;
use crate::output::Reporter;

/// Write the default config at the repository root.
///
/// Returns `true` on success, `false` on failure.
pub fn run_init(force: bool, reporter: &mut Reporter) -> bool {
    let Some(root) = current_repo_root(reporter) else {
        return false;
    };

    match write_default_config(&root, force) {
        Ok(path) => {
            reporter.success(&format!("Wrote {}", path.display()));
            reporter.info("Edit the [[areas]] entries to match your project layout");
            true
        }
        Err(GateError::AlreadyExists(path)) => {
            reporter.error(&format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            ));
            false
        }
        Err(e) => {
            reporter.error(&format!("Failed to write config: {e}"));
            false
        }
    }
}
