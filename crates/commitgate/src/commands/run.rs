//! Handler for `commitgate run`, the command the pre-commit hook executes.

use std::path::Path;

use commitgate_core::config::FindingsPolicy;
use commitgate_core::git::GitIndex;
use commitgate_core::runner::ProcessRunner;
use commitgate_core::{run_gate, Verdict};

use super::load_context;
use crate::output::Reporter;
use crate::terminal::TerminalOperator;

/// Run the gate over the staged files.
///
/// Returns `true` when the commit may proceed.
pub fn run_hook(
    config_override: Option<&Path>,
    on_findings: Option<FindingsPolicy>,
    reporter: &mut Reporter,
) -> bool {
    let Some(mut ctx) = load_context(config_override, reporter) else {
        return false;
    };
    if let Some(policy) = on_findings {
        ctx.config.prompt.on_findings = policy;
    }

    let index = GitIndex::new(&ctx.repo_root);
    let outcome = {
        let mut operator = TerminalOperator::new(reporter, &ctx.config.prompt);
        run_gate(
            &ctx.config,
            &ctx.repo_root,
            &index,
            &ProcessRunner,
            &mut operator,
        )
    };

    match outcome {
        Ok(report) => {
            reporter.set_report(&report);
            match &report.verdict {
                // Nothing staged in any area: stay silent.
                Verdict::Passed if report.areas.is_empty() => true,
                Verdict::Passed => {
                    reporter.success("All checks passed");
                    true
                }
                Verdict::Aborted { area } => {
                    reporter.error(&format!(
                        "Commit aborted due to {area} lint issues. Fix them and commit again."
                    ));
                    false
                }
            }
        }
        Err(e) => {
            reporter.error(&format!("{e}"));
            reporter.error("Commit aborted. Use 'git commit --no-verify' to skip the hook.");
            false
        }
    }
}
