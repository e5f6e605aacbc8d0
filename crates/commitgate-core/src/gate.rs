//! The commit gate: lint, confirm, format and re-stage staged files.
//!
//! A run has two phases. First every area with staged files is linted and,
//! when its linter prints anything, the operator is asked whether to abort.
//! Only once every area has passed that point are the formatters run and
//! the files re-staged. An abort therefore never leaves any area formatted
//! or re-staged.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::GateConfig;
use crate::error::GateError;
use crate::git::StagingIndex;
use crate::runner::ToolRunner;
use crate::types::area::{FORMATTER_EXIT_CODES, LINTER_EXIT_CODES};
use crate::types::{AreaConfig, ToolResult, ToolSpec};

/// The person (or policy) deciding what happens to a commit with findings.
pub trait Operator {
    /// A progress banner.
    fn notice(&mut self, message: &str);

    /// Shows linter output for `area`. Always called before
    /// [`confirm_abort`](Operator::confirm_abort).
    fn show_findings(&mut self, area: &str, findings: &str);

    /// Returns `true` to abort the commit.
    fn confirm_abort(&mut self, area: &str) -> Result<bool, GateError>;
}

/// Final decision for the commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum Verdict {
    Passed,
    Aborted { area: String },
}

/// What happened to one area during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaReport {
    pub name: String,
    /// Matched files, relative to the repository root.
    pub files: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub findings: Option<String>,
    pub formatted: bool,
    pub restaged: bool,
}

/// Summary of a gate run. Areas without staged files are not listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateReport {
    pub areas: Vec<AreaReport>,
    pub verdict: Verdict,
}

impl GateReport {
    pub fn passed(&self) -> bool {
        self.verdict == Verdict::Passed
    }

    pub fn area(&self, name: &str) -> Option<&AreaReport> {
        self.areas.iter().find(|a| a.name == name)
    }
}

/// An area with staged files, paths relative to its working directory.
struct Selection<'a> {
    area: &'a AreaConfig,
    files: Vec<String>,
}

/// Runs the gate over the files currently staged in `index`.
///
/// # Errors
///
/// Any git failure, a tool that cannot be started, a linter exiting outside
/// its accepted codes, or a formatter failing is returned as an error. Lint
/// findings are not errors; they end in [`Verdict::Aborted`] only when the
/// operator says so.
pub fn run_gate(
    config: &GateConfig,
    repo_root: &Path,
    index: &dyn StagingIndex,
    runner: &dyn ToolRunner,
    operator: &mut dyn Operator,
) -> Result<GateReport, GateError> {
    let staged = index.staged_files()?;

    let selections: Vec<Selection<'_>> = config
        .areas
        .iter()
        .map(|area| Selection {
            area,
            files: area.filter.select(&staged),
        })
        .filter(|s| !s.files.is_empty())
        .collect();

    let mut reports: Vec<AreaReport> = selections
        .iter()
        .map(|s| AreaReport {
            name: s.area.name.clone(),
            files: s.files.iter().map(|f| s.area.filter.repo_path(f)).collect(),
            findings: None,
            formatted: false,
            restaged: false,
        })
        .collect();

    if selections.is_empty() {
        debug!(staged = staged.len(), "no staged files belong to any area");
        return Ok(GateReport {
            areas: reports,
            verdict: Verdict::Passed,
        });
    }

    let mut aborted = None;
    for (selection, report) in selections.iter().zip(reports.iter_mut()) {
        let area = selection.area;
        operator.notice(&format!(
            "Linting {} {} file(s) with {}",
            selection.files.len(),
            area.name,
            area.linter.label()
        ));

        let working_dir = area.filter.working_dir(repo_root);
        let result = runner.run(&area.linter, &working_dir, &selection.files)?;
        ensure_ran(&area.linter, &result, LINTER_EXIT_CODES)?;

        let Some(findings) = result.findings() else {
            continue;
        };
        report.findings = Some(findings.to_string());
        operator.show_findings(&area.name, findings);

        if operator.confirm_abort(&area.name)? {
            info!(area = %area.name, "commit aborted by operator");
            aborted = Some(area.name.clone());
            break;
        }
    }

    if let Some(area) = aborted {
        return Ok(GateReport {
            areas: reports,
            verdict: Verdict::Aborted { area },
        });
    }

    for (selection, report) in selections.iter().zip(reports.iter_mut()) {
        let area = selection.area;
        operator.notice(&format!(
            "Formatting {} {} file(s) with {}",
            selection.files.len(),
            area.name,
            area.formatter.label()
        ));

        let working_dir = area.filter.working_dir(repo_root);
        let result = runner.run(&area.formatter, &working_dir, &selection.files)?;
        ensure_ran(&area.formatter, &result, FORMATTER_EXIT_CODES)?;
        report.formatted = true;
    }

    // Only touch the index once every formatter has succeeded.
    for report in reports.iter_mut() {
        index.restage(&report.files)?;
        report.restaged = true;
        operator.notice(&format!(
            "Re-staged {} {} file(s)",
            report.files.len(),
            report.name
        ));
    }

    Ok(GateReport {
        areas: reports,
        verdict: Verdict::Passed,
    })
}

/// Turns an unexpected exit into [`GateError::ToolFailed`].
fn ensure_ran(
    tool: &ToolSpec,
    result: &ToolResult,
    default_codes: &[i32],
) -> Result<(), GateError> {
    match result.code {
        Some(code) if tool.accepts(code, default_codes) => Ok(()),
        _ => Err(GateError::ToolFailed {
            tool: tool.label(),
            status: result.status_label(),
            output: result.output.trim().to_string(),
        }),
    }
}
