mod cli;
mod commands;
mod output;
mod terminal;

use std::io;

use clap::{CommandFactory, Parser};
use cli::{Cli, ColorMode, Commands};
use commitgate_core::hooks::HookManager;
use output::{OutputMode, Reporter};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `commitgate_core=debug`.
const ENV_LOG: &str = "COMMITGATE_LOG";

fn main() {
    let cli = Cli::parse();

    init_logging();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Human
    };

    match cli.color {
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Auto => {}
    }

    let mut reporter = Reporter::new(mode);
    let config = cli.config.as_deref();

    let success = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            commands::run::run_hook(config, cli.on_findings.map(Into::into), &mut reporter)
        }
        Commands::Staged => commands::staged::run_staged(config, &mut reporter),
        Commands::Install {
            native,
            husky,
            lefthook,
            simple_git_hooks,
            force,
        } => {
            let requested = if native {
                Some(HookManager::Native)
            } else if husky {
                Some(HookManager::Husky)
            } else if lefthook {
                Some(HookManager::Lefthook)
            } else if simple_git_hooks {
                Some(HookManager::SimpleGitHooks)
            } else {
                None
            };
            commands::install::run_install(requested, force, &mut reporter)
        }
        Commands::Init { force } => commands::init::run_init(force, &mut reporter),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "commitgate", &mut io::stdout());
            true
        }
    };

    reporter.finish();

    if !success {
        std::process::exit(1);
    }
}

/// Logs go to stderr so they never mix with JSON on stdout.
fn init_logging() {
    let filter = EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
