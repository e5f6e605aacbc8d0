//! Git index access for the pre-commit hook.
//!
//! Everything goes through the `git` binary: the repository root comes from
//! `git rev-parse`, staged files from `git diff --cached`, and re-staging is
//! a plain `git add`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::GateError;
use crate::types::StagedFileSet;

/// Read and write access to the staging index.
pub trait StagingIndex {
    /// Files staged as Added, Copied or Modified, in git's order.
    fn staged_files(&self) -> Result<StagedFileSet, GateError>;

    /// Adds the given repository-relative paths back to the index.
    fn restage(&self, paths: &[String]) -> Result<(), GateError>;
}

/// [`StagingIndex`] backed by the `git` command line.
#[derive(Debug, Clone)]
pub struct GitIndex {
    repo_root: PathBuf,
}

impl GitIndex {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
        }
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }
}

impl StagingIndex for GitIndex {
    fn staged_files(&self) -> Result<StagedFileSet, GateError> {
        let stdout = run_git(
            &self.repo_root,
            &["diff", "--cached", "--name-only", "--diff-filter=ACM", "-z"],
        )?;
        let staged = StagedFileSet::from_nul_separated(&stdout);
        debug!(count = staged.len(), "read staged files");
        Ok(staged)
    }

    fn restage(&self, paths: &[String]) -> Result<(), GateError> {
        if paths.is_empty() {
            return Ok(());
        }
        let mut args = vec!["add", "--"];
        args.extend(paths.iter().map(String::as_str));
        run_git(&self.repo_root, &args)?;
        debug!(count = paths.len(), "re-staged files");
        Ok(())
    }
}

/// Finds the top level of the work tree containing `start`.
///
/// # Errors
///
/// Returns [`GateError::NotARepository`] if `start` is not inside a git work
/// tree, or [`GateError::ToolNotFound`] if git is not installed.
pub fn repo_root(start: &Path) -> Result<PathBuf, GateError> {
    match run_git(start, &["rev-parse", "--show-toplevel"]) {
        Ok(stdout) => {
            let root = stdout.trim();
            if root.is_empty() {
                return Err(GateError::NotARepository(start.to_path_buf()));
            }
            Ok(PathBuf::from(root))
        }
        Err(GateError::Git { .. }) => Err(GateError::NotARepository(start.to_path_buf())),
        Err(e) => Err(e),
    }
}

/// Directory git runs hooks from, honouring `core.hooksPath` and worktrees.
pub fn hooks_dir(repo_root: &Path) -> Result<PathBuf, GateError> {
    // `git config --get` exits 1 when the key is unset.
    let configured = run_git(repo_root, &["config", "--get", "core.hooksPath"])
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let raw = match configured {
        Some(path) => path,
        None => run_git(repo_root, &["rev-parse", "--git-path", "hooks"])?
            .trim()
            .to_string(),
    };
    let path = PathBuf::from(raw);
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(repo_root.join(path))
    }
}

/// Runs git in `dir` and returns its stdout.
pub(crate) fn run_git(dir: &Path, args: &[&str]) -> Result<String, GateError> {
    debug!(dir = %dir.display(), ?args, "running git");
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => GateError::ToolNotFound {
                program: "git".to_string(),
            },
            _ => GateError::Io(e),
        })?;

    if !output.status.success() {
        let command = args.first().copied().unwrap_or_default().to_string();
        return Err(GateError::Git {
            command,
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
