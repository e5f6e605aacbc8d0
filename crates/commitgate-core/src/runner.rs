//! Execution of external linters and formatters.

use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::GateError;
use crate::types::{ToolResult, ToolSpec};

/// Runs a tool against a list of files.
///
/// Implementations report a tool that could not be started as an error and
/// everything else, including non-zero exits, as a [`ToolResult`]; deciding
/// whether an exit code is acceptable is left to the caller.
pub trait ToolRunner {
    fn run(
        &self,
        tool: &ToolSpec,
        working_dir: &Path,
        files: &[String],
    ) -> Result<ToolResult, GateError>;
}

/// [`ToolRunner`] that spawns real processes and waits for them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    fn run(
        &self,
        tool: &ToolSpec,
        working_dir: &Path,
        files: &[String],
    ) -> Result<ToolResult, GateError> {
        if !working_dir.is_dir() {
            return Err(GateError::Other(format!(
                "Working directory for {} does not exist: {}",
                tool.program,
                working_dir.display()
            )));
        }

        debug!(
            tool = %tool.label(),
            dir = %working_dir.display(),
            files = files.len(),
            "running tool"
        );

        // stdin is closed so a tool that wants input fails instead of
        // stealing the operator's answer.
        let output = Command::new(&tool.program)
            .args(&tool.args)
            .args(files)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => GateError::ToolNotFound {
                    program: tool.program.clone(),
                },
                _ => GateError::Io(e),
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        let result = ToolResult::new(output.status.code(), combined);
        debug!(tool = %tool.label(), status = %result.status_label(), "tool finished");
        Ok(result)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sh(script: &str) -> ToolSpec {
        ToolSpec::new("sh", &["-c", script, "tool"])
    }

    #[test]
    fn captures_stdout_then_stderr_and_exit_code() {
        let tmp = TempDir::new().unwrap();
        let result = ProcessRunner
            .run(&sh("echo out; echo err >&2; exit 1"), tmp.path(), &[])
            .unwrap();
        assert_eq!(result.code, Some(1));
        assert_eq!(result.output, "out\nerr\n");
    }

    #[test]
    fn files_are_appended_as_arguments() {
        let tmp = TempDir::new().unwrap();
        let files = vec!["src/App.tsx".to_string(), "src/my file.ts".to_string()];
        let result = ProcessRunner
            .run(&sh(r#"printf '%s\n' "$@""#), tmp.path(), &files)
            .unwrap();
        assert_eq!(result.output, "src/App.tsx\nsrc/my file.ts\n");
    }

    #[test]
    fn runs_inside_working_directory() {
        let tmp = TempDir::new().unwrap();
        let client = tmp.path().join("client");
        std::fs::create_dir(&client).unwrap();
        std::fs::write(client.join("marker"), "").unwrap();

        let result = ProcessRunner.run(&sh("ls"), &client, &[]).unwrap();
        assert_eq!(result.output.trim(), "marker");
    }

    #[test]
    fn missing_program_is_tool_not_found() {
        let tmp = TempDir::new().unwrap();
        let tool = ToolSpec::new("commitgate-definitely-not-installed", &[]);
        let err = ProcessRunner.run(&tool, tmp.path(), &[]).unwrap_err();
        assert!(matches!(err, GateError::ToolNotFound { .. }));
    }

    #[test]
    fn missing_working_directory_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = ProcessRunner
            .run(&sh("true"), &tmp.path().join("client"), &[])
            .unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn tool_cannot_read_stdin() {
        let tmp = TempDir::new().unwrap();
        let result = ProcessRunner
            .run(&sh("read line || echo eof"), tmp.path(), &[])
            .unwrap();
        assert_eq!(result.output.trim(), "eof");
    }
}
