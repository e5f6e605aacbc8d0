use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::staged::StagedFileSet;
use super::tool::ToolSpec;

/// Exit codes a linter may return without being treated as broken.
pub const LINTER_EXIT_CODES: &[i32] = &[0, 1];
/// Exit codes a formatter may return without being treated as broken.
pub const FORMATTER_EXIT_CODES: &[i32] = &[0];

/// Selects the staged files that belong to one project area.
///
/// A path matches when it lives under `root` and its extension is one of
/// `extensions`. An empty root means the repository root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaFilter {
    #[serde(default)]
    pub root: String,
    pub extensions: Vec<String>,
}

impl AreaFilter {
    pub fn new(root: &str, extensions: &[&str]) -> Self {
        Self {
            root: root.to_string(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// The root without a leading `./` or trailing `/`.
    pub fn normalized_root(&self) -> &str {
        let root = self.root.strip_prefix("./").unwrap_or(&self.root);
        root.trim_end_matches('/')
    }

    /// Returns the path relative to the area root if `path` belongs to the
    /// area.
    pub fn strip<'a>(&self, path: &'a str) -> Option<&'a str> {
        let root = self.normalized_root();
        let rest = if root.is_empty() || root == "." {
            path
        } else {
            path.strip_prefix(root)?.strip_prefix('/')?
        };
        if rest.is_empty() || !self.has_extension(rest) {
            return None;
        }
        Some(rest)
    }

    fn has_extension(&self, path: &str) -> bool {
        let file_name = path.rsplit('/').next().unwrap_or(path);
        let Some((stem, ext)) = file_name.rsplit_once('.') else {
            return false;
        };
        if stem.is_empty() {
            return false;
        }
        self.extensions
            .iter()
            .any(|wanted| wanted.trim_start_matches('.') == ext)
    }

    /// Selects the matching staged files, stripped of the area root, in
    /// staging order.
    pub fn select(&self, staged: &StagedFileSet) -> Vec<String> {
        staged
            .iter()
            .filter_map(|path| self.strip(path))
            .map(str::to_string)
            .collect()
    }

    /// Turns an area-relative path back into a repository-relative one.
    pub fn repo_path(&self, relative: &str) -> String {
        let root = self.normalized_root();
        if root.is_empty() || root == "." {
            relative.to_string()
        } else {
            format!("{root}/{relative}")
        }
    }

    /// Directory the area's tools run from.
    pub fn working_dir(&self, repo_root: &Path) -> PathBuf {
        let root = self.normalized_root();
        if root.is_empty() || root == "." {
            repo_root.to_path_buf()
        } else {
            repo_root.join(root)
        }
    }
}

/// One project area and the tool chain that guards it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaConfig {
    pub name: String,
    #[serde(flatten)]
    pub filter: AreaFilter,
    pub linter: ToolSpec,
    pub formatter: ToolSpec,
}

impl AreaConfig {
    pub fn frontend() -> Self {
        Self {
            name: "frontend".to_string(),
            filter: AreaFilter::new("client", &["js", "jsx", "ts", "tsx"]),
            linter: ToolSpec::new("npx", &["eslint", "--fix"]),
            formatter: ToolSpec::new("npx", &["prettier", "--write"]),
        }
    }

    pub fn backend() -> Self {
        Self {
            name: "backend".to_string(),
            filter: AreaFilter::new("server", &["py"]),
            linter: ToolSpec::new("ruff", &["check", "--fix"]),
            formatter: ToolSpec::new("ruff", &["format"]),
        }
    }
}
