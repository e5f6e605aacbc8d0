use colored::*;
use commitgate_core::prompt::BANNER_PREFIX;
use serde::Serialize;

/// Output mode for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
    Quiet,
}

/// Accumulated JSON result entry.
#[derive(Debug, Serialize, Clone)]
pub struct JsonResultEntry {
    #[serde(rename = "type")]
    pub result_type: String,
    pub message: String,
}

/// Accumulated JSON output.
#[derive(Debug, Serialize)]
pub struct JsonOutput {
    pub results: Vec<JsonResultEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<serde_json::Value>,
}

/// Reporter handles all output formatting.
///
/// Human-mode lines carry the `[pre-commit]` prefix. Linter findings and the
/// abort prompt always go to stderr so `--json` keeps stdout parseable.
pub struct Reporter {
    mode: OutputMode,
    json_results: Vec<JsonResultEntry>,
    report: Option<serde_json::Value>,
}

impl Reporter {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            json_results: Vec::new(),
            report: None,
        }
    }

    fn prefix() -> ColoredString {
        BANNER_PREFIX.cyan()
    }

    fn record(&mut self, result_type: &str, message: &str) {
        self.json_results.push(JsonResultEntry {
            result_type: result_type.to_string(),
            message: message.to_string(),
        });
    }

    pub fn error(&mut self, message: &str) {
        match self.mode {
            OutputMode::Json => self.record("error", message),
            OutputMode::Human | OutputMode::Quiet => {
                eprintln!("{} {} {}", Self::prefix(), "ERROR:".red(), message);
            }
        }
    }

    pub fn warning(&mut self, message: &str) {
        match self.mode {
            OutputMode::Human => {
                eprintln!("{} {} {}", Self::prefix(), "WARNING:".yellow(), message);
            }
            OutputMode::Json => self.record("warning", message),
            OutputMode::Quiet => {}
        }
    }

    pub fn success(&mut self, message: &str) {
        match self.mode {
            OutputMode::Human => println!("{} {} {}", Self::prefix(), "✓".green(), message),
            OutputMode::Json => self.record("success", message),
            OutputMode::Quiet => {}
        }
    }

    pub fn info(&mut self, message: &str) {
        match self.mode {
            OutputMode::Human => println!("{} {}", Self::prefix(), message),
            OutputMode::Json => self.record("info", message),
            OutputMode::Quiet => {}
        }
    }

    pub fn section(&mut self, title: &str) {
        if self.mode == OutputMode::Human {
            println!("{}", format!("=== {title} ===").cyan());
        }
    }

    /// Prints linter output for `area`, whatever the mode.
    pub fn findings(&mut self, area: &str, output: &str) {
        eprintln!(
            "{} {}",
            Self::prefix(),
            format!("{area} linter output:").yellow()
        );
        eprintln!("{output}");
        if self.mode == OutputMode::Json {
            self.record("findings", &format!("{area}: {output}"));
        }
    }

    /// Attaches a structured result to the JSON document.
    pub fn set_report<T: Serialize>(&mut self, report: &T) {
        match serde_json::to_value(report) {
            Ok(value) => self.report = Some(value),
            Err(e) => self.error(&format!("Failed to serialize report: {e}")),
        }
    }

    pub fn finish(&mut self) {
        if self.mode == OutputMode::Json {
            let output = JsonOutput {
                results: std::mem::take(&mut self.json_results),
                report: self.report.take(),
            };
            match serde_json::to_string_pretty(&output) {
                Ok(json) => println!("{json}"),
                // The results are already taken, so this cannot go through `error`.
                Err(e) => eprintln!(
                    "{} {} Failed to serialize JSON output: {e}",
                    Self::prefix(),
                    "ERROR:".red()
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn report_is_attached_in_json_mode() {
        let mut reporter = Reporter::new(OutputMode::Json);
        reporter.set_report(&serde_json::json!({ "verdict": "passed" }));
        assert_eq!(reporter.report.as_ref().unwrap()["verdict"], "passed");
        assert!(reporter.json_results.is_empty());
    }

    #[test]
    fn unserializable_report_is_an_error_entry() {
        // JSON object keys must be strings.
        let report: HashMap<(u8, u8), u8> = HashMap::from([((1, 2), 3)]);

        let mut reporter = Reporter::new(OutputMode::Json);
        reporter.set_report(&report);

        assert!(reporter.report.is_none());
        assert_eq!(reporter.json_results.len(), 1);
        assert_eq!(reporter.json_results[0].result_type, "error");
        assert!(reporter.json_results[0]
            .message
            .starts_with("Failed to serialize report"));
    }
}
