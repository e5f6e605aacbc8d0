//! Configuration loading and management.
//!
//! Configuration is resolved with the following precedence:
//! 1. Values passed in by the caller (command-line flags)
//! 2. Environment variables (`COMMITGATE_*`)
//! 3. Config file (`.commitgate.toml` at the repository root)
//! 4. Defaults (a `client/` frontend and a `server/` backend)

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GateError;
use crate::types::AreaConfig;

/// File name looked up at the repository root.
pub const CONFIG_FILE_NAME: &str = ".commitgate.toml";

/// Environment variable naming an explicit config file.
pub const ENV_CONFIG: &str = "COMMITGATE_CONFIG";
/// Environment variable overriding `prompt.on_findings`.
pub const ENV_ON_FINDINGS: &str = "COMMITGATE_ON_FINDINGS";
/// Environment variable overriding `prompt.non_interactive`.
pub const ENV_NON_INTERACTIVE: &str = "COMMITGATE_NON_INTERACTIVE";

/// The configuration written by `commitgate init`. Kept equal to
/// [`GateConfig::default`].
pub const DEFAULT_CONFIG_TOML: &str = r#"# commitgate configuration
#
# Each area owns a directory of the repository. Staged files under `root`
# with one of `extensions` are linted, formatted and re-staged, with the
# tools running from inside `root`.

[prompt]
# What to do when a linter prints findings: "prompt", "proceed" or "abort".
on_findings = "prompt"
# Answer used when no terminal is available to ask: "proceed" or "abort".
non_interactive = "proceed"

[[areas]]
name = "frontend"
root = "client"
extensions = ["js", "jsx", "ts", "tsx"]
linter = { program = "npx", args = ["eslint", "--fix"] }
formatter = { program = "npx", args = ["prettier", "--write"] }

[[areas]]
name = "backend"
root = "server"
extensions = ["py"]
linter = { program = "ruff", args = ["check", "--fix"] }
formatter = { program = "ruff", args = ["format"] }
"#;

/// Main configuration struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Areas in processing order.
    pub areas: Vec<AreaConfig>,

    /// Operator interaction settings.
    pub prompt: PromptConfig,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            areas: vec![AreaConfig::frontend(), AreaConfig::backend()],
            prompt: PromptConfig::default(),
        }
    }
}

/// How lint findings are resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    pub on_findings: FindingsPolicy,
    pub non_interactive: NonInteractivePolicy,
}

/// What happens when a linter reports findings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingsPolicy {
    /// Ask the operator on the controlling terminal (default).
    #[default]
    Prompt,
    /// Keep going without asking.
    Proceed,
    /// Abort the commit without asking.
    Abort,
}

/// Answer used when a prompt is needed but no terminal is attached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NonInteractivePolicy {
    #[default]
    Proceed,
    Abort,
}

impl FromStr for FindingsPolicy {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prompt" => Ok(Self::Prompt),
            "proceed" => Ok(Self::Proceed),
            "abort" => Ok(Self::Abort),
            other => Err(GateError::Config(format!(
                "unknown findings policy '{other}' (expected prompt, proceed or abort)"
            ))),
        }
    }
}

impl FromStr for NonInteractivePolicy {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "proceed" => Ok(Self::Proceed),
            "abort" => Ok(Self::Abort),
            other => Err(GateError::Config(format!(
                "unknown non-interactive policy '{other}' (expected proceed or abort)"
            ))),
        }
    }
}

impl GateConfig {
    /// Parses a TOML document and validates it.
    pub fn from_toml(contents: &str) -> Result<Self, GateError> {
        let config: GateConfig =
            toml::from_str(contents).map_err(|e| GateError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Looks up an area by name.
    pub fn area(&self, name: &str) -> Option<&AreaConfig> {
        self.areas.iter().find(|a| a.name == name)
    }

    /// Rejects configurations the gate cannot run.
    pub fn validate(&self) -> Result<(), GateError> {
        let mut seen = HashSet::new();
        for area in &self.areas {
            if area.name.trim().is_empty() {
                return Err(GateError::Config("area name must not be empty".into()));
            }
            if !seen.insert(area.name.as_str()) {
                return Err(GateError::Config(format!(
                    "duplicate area name '{}'",
                    area.name
                )));
            }
            if area.filter.extensions.is_empty() {
                return Err(GateError::Config(format!(
                    "area '{}' must list at least one extension",
                    area.name
                )));
            }
            if area.linter.program.trim().is_empty() || area.formatter.program.trim().is_empty()
            {
                return Err(GateError::Config(format!(
                    "area '{}' needs both a linter and a formatter program",
                    area.name
                )));
            }
        }
        Ok(())
    }

    /// Applies `COMMITGATE_*` overrides using `lookup` to read variables.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), GateError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_ON_FINDINGS) {
            self.prompt.on_findings = value.parse()?;
        }
        if let Some(value) = lookup(ENV_NON_INTERACTIVE) {
            self.prompt.non_interactive = value.parse()?;
        }
        Ok(())
    }
}

/// Resolves which config file to read, if any.
///
/// An explicit path (flag or `COMMITGATE_CONFIG`) must exist. The default
/// `.commitgate.toml` is optional.
pub fn config_path(
    repo_root: &Path,
    explicit: Option<&Path>,
    env_path: Option<String>,
) -> Result<Option<PathBuf>, GateError> {
    let chosen = explicit
        .map(Path::to_path_buf)
        .or_else(|| env_path.filter(|p| !p.is_empty()).map(PathBuf::from));

    match chosen {
        Some(path) => {
            let path = if path.is_relative() {
                repo_root.join(path)
            } else {
                path
            };
            if path.is_file() {
                Ok(Some(path))
            } else {
                Err(GateError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )))
            }
        }
        None => {
            let default = repo_root.join(CONFIG_FILE_NAME);
            Ok(default.is_file().then_some(default))
        }
    }
}

/// Loads the configuration for the repository at `repo_root`.
pub fn load_config(repo_root: &Path, explicit: Option<&Path>) -> Result<GateConfig, GateError> {
    let path = config_path(repo_root, explicit, std::env::var(ENV_CONFIG).ok())?;

    let mut config = match &path {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            let contents = fs::read_to_string(path)?;
            GateConfig::from_toml(&contents).map_err(|e| match e {
                GateError::Config(msg) => {
                    GateError::Config(format!("{}: {msg}", path.display()))
                }
                other => other,
            })?
        }
        None => {
            debug!("no config file, using defaults");
            GateConfig::default()
        }
    };

    config.apply_env_overrides(|key| std::env::var(key).ok())?;
    Ok(config)
}

/// Writes [`DEFAULT_CONFIG_TOML`] to `.commitgate.toml` under `repo_root`.
///
/// # Errors
///
/// Returns [`GateError::AlreadyExists`] if the file is present and `force`
/// is not set, or [`GateError::Io`] if writing fails.
pub fn write_default_config(repo_root: &Path, force: bool) -> Result<PathBuf, GateError> {
    let path = repo_root.join(CONFIG_FILE_NAME);
    if path.exists() && !force {
        return Err(GateError::AlreadyExists(path));
    }
    fs::write(&path, DEFAULT_CONFIG_TOML)?;
    Ok(path)
}
