//! Wiring commitgate into a repository's pre-commit hook.
//!
//! Detects which hook manager is in use and writes (or merges) the
//! configuration that makes it call `commitgate run` before each commit.

pub mod install;

pub use install::{detect_hook_manager, install_hooks, HookManager, HOOK_COMMAND};
