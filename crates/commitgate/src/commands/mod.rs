pub mod init;
pub mod install;
pub mod run;
pub mod staged;

use std::env;
use std::path::{Path, PathBuf};

use commitgate_core::config::load_config;
use commitgate_core::git::repo_root;
use commitgate_core::GateConfig;

use crate::output::Reporter;

/// Repository root plus the configuration that applies to it.
pub struct Context {
    pub repo_root: PathBuf,
    pub config: GateConfig,
}

/// Finds the repository containing the current directory, reporting an
/// error if there is none.
fn current_repo_root(reporter: &mut Reporter) -> Option<PathBuf> {
    let cwd = match env::current_dir() {
        Ok(c) => c,
        Err(e) => {
            reporter.error(&format!("Cannot get current directory: {e}"));
            return None;
        }
    };
    match repo_root(&cwd) {
        Ok(root) => Some(root),
        Err(e) => {
            reporter.error(&format!("{e}"));
            None
        }
    }
}

/// Loads the repository root and configuration, reporting any failure.
fn load_context(config_override: Option<&Path>, reporter: &mut Reporter) -> Option<Context> {
    let repo_root = current_repo_root(reporter)?;
    match load_config(&repo_root, config_override) {
        Ok(config) => Some(Context { repo_root, config }),
        Err(e) => {
            reporter.error(&format!("Failed to load config: {e}"));
            None
        }
    }
}
