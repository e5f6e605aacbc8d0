//! Handler for `commitgate staged`: a dry run of the area selection.

use std::path::Path;

use commitgate_core::git::{GitIndex, StagingIndex};
use serde::Serialize;

use super::load_context;
use crate::output::Reporter;

#[derive(Debug, Serialize)]
struct AreaPreview {
    area: String,
    working_dir: String,
    files: Vec<String>,
    lint: String,
    format: String,
}

/// List, per area, the staged files and the commands a run would execute.
pub fn run_staged(config_override: Option<&Path>, reporter: &mut Reporter) -> bool {
    let Some(ctx) = load_context(config_override, reporter) else {
        return false;
    };

    let staged = match GitIndex::new(&ctx.repo_root).staged_files() {
        Ok(s) => s,
        Err(e) => {
            reporter.error(&format!("Failed to read staged files: {e}"));
            return false;
        }
    };

    let previews: Vec<AreaPreview> = ctx
        .config
        .areas
        .iter()
        .filter_map(|area| {
            let files = area.filter.select(&staged);
            if files.is_empty() {
                return None;
            }
            Some(AreaPreview {
                area: area.name.clone(),
                working_dir: area.filter.working_dir(&ctx.repo_root).display().to_string(),
                lint: area.linter.command_line(&files),
                format: area.formatter.command_line(&files),
                files,
            })
        })
        .collect();

    if previews.is_empty() {
        reporter.info(&format!(
            "{} staged file(s), none in a configured area",
            staged.len()
        ));
    }

    for preview in &previews {
        reporter.section(&preview.area);
        for file in &preview.files {
            reporter.info(file);
        }
        reporter.info(&format!("in {}", preview.working_dir));
        reporter.info(&format!("lint:   {}", preview.lint));
        reporter.info(&format!("format: {}", preview.format));
    }

    reporter.set_report(&previews);
    true
}
