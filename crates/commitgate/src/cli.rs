use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use commitgate_core::config::FindingsPolicy;

#[derive(Parser, Debug)]
#[command(
    name = "commitgate",
    version,
    about = "Pre-commit hook that lints, formats and re-stages staged files"
)]
pub struct Cli {
    /// Defaults to `run` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Color mode
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,

    /// Path to the config file (overrides .commitgate.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// What to do when a linter reports issues
    #[arg(long, global = true, value_enum)]
    pub on_findings: Option<FindingsMode>,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FindingsMode {
    /// Ask on the terminal
    Prompt,
    /// Continue without asking
    Proceed,
    /// Abort without asking
    Abort,
}

impl From<FindingsMode> for FindingsPolicy {
    fn from(mode: FindingsMode) -> Self {
        match mode {
            FindingsMode::Prompt => FindingsPolicy::Prompt,
            FindingsMode::Proceed => FindingsPolicy::Proceed,
            FindingsMode::Abort => FindingsPolicy::Abort,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lint, format and re-stage staged files (what the hook runs)
    Run,

    /// Show which staged files each area would check, without running tools
    Staged,

    /// Install the pre-commit hook
    Install {
        #[arg(long, group = "manager")]
        native: bool,
        #[arg(long, group = "manager")]
        husky: bool,
        #[arg(long, group = "manager")]
        lefthook: bool,
        #[arg(long, group = "manager")]
        simple_git_hooks: bool,

        /// Replace an existing native pre-commit hook
        #[arg(long)]
        force: bool,
    },

    /// Write a default .commitgate.toml at the repository root
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}
