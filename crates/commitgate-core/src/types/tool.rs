use serde::{Deserialize, Serialize};

/// An external program invoked against a list of files.
///
/// The staged files are appended after `args`, so `program = "ruff"` with
/// `args = ["check", "--fix"]` runs `ruff check --fix <files...>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub program: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    /// Exit codes meaning "the tool ran normally". Anything else is a tool
    /// failure. When unset, linters accept 0 and 1, formatters only 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_codes: Option<Vec<i32>>,
}

impl ToolSpec {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            exit_codes: None,
        }
    }

    /// Program and fixed arguments, for messages.
    pub fn label(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }

    /// The full command line that would run against `files`.
    pub fn command_line(&self, files: &[String]) -> String {
        let mut line = self.label();
        for file in files {
            line.push(' ');
            if file.contains(char::is_whitespace) {
                line.push_str(&format!("'{file}'"));
            } else {
                line.push_str(file);
            }
        }
        line
    }

    /// Whether `code` counts as a normal exit, given the role's default set.
    pub fn accepts(&self, code: i32, default_codes: &[i32]) -> bool {
        match &self.exit_codes {
            Some(codes) => codes.contains(&code),
            None => default_codes.contains(&code),
        }
    }
}

/// Outcome of one tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult {
    /// Exit code, or `None` when the process was killed by a signal.
    pub code: Option<i32>,
    /// Captured stdout followed by stderr.
    pub output: String,
}

impl ToolResult {
    pub fn new(code: Option<i32>, output: impl Into<String>) -> Self {
        Self {
            code,
            output: output.into(),
        }
    }

    /// The output with surrounding whitespace removed, or `None` when the
    /// tool printed nothing meaningful.
    pub fn findings(&self) -> Option<&str> {
        let trimmed = self.output.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }

    pub fn status_label(&self) -> String {
        match self.code {
            Some(code) => format!("exit code {code}"),
            None => "signal".to_string(),
        }
    }
}
