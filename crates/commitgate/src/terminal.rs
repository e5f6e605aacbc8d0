//! The interactive [`Operator`] used by `commitgate run`.
//!
//! The abort question goes to stderr, and the answer is a single key read
//! by `dialoguer`, which falls back to the controlling terminal when git has
//! redirected stdin. When stderr is not a terminal (CI, GUI clients) the
//! configured non-interactive policy answers.

use commitgate_core::config::{FindingsPolicy, NonInteractivePolicy, PromptConfig};
use commitgate_core::prompt::abort_question;
use commitgate_core::{GateError, Operator};
use dialoguer::console::Term;
use dialoguer::theme::SimpleTheme;
use dialoguer::Confirm;
use tracing::debug;

use crate::output::Reporter;

pub struct TerminalOperator<'r> {
    reporter: &'r mut Reporter,
    on_findings: FindingsPolicy,
    non_interactive: NonInteractivePolicy,
    term: Term,
}

impl<'r> TerminalOperator<'r> {
    pub fn new(reporter: &'r mut Reporter, prompt: &PromptConfig) -> Self {
        Self {
            reporter,
            on_findings: prompt.on_findings,
            non_interactive: prompt.non_interactive,
            term: Term::stderr(),
        }
    }

    /// Asks on the terminal. `None` when nobody can be asked.
    fn ask(&self, area: &str) -> Option<bool> {
        if !self.term.is_term() {
            debug!("stderr is not a terminal");
            return None;
        }
        let answer = Confirm::with_theme(&SimpleTheme)
            .with_prompt(abort_question(area))
            .default(false)
            .interact_on_opt(&self.term);
        match answer {
            // Esc or q leaves the question unanswered, which means N.
            Ok(answer) => Some(answer.unwrap_or(false)),
            Err(e) => {
                debug!(error = %e, "prompt failed");
                None
            }
        }
    }

    fn unattended(&mut self, area: &str) -> bool {
        let abort = self.non_interactive == NonInteractivePolicy::Abort;
        let action = if abort { "aborting" } else { "continuing" };
        self.reporter.warning(&format!(
            "No terminal to ask about {area} lint issues, {action}"
        ));
        abort
    }
}

impl Operator for TerminalOperator<'_> {
    fn notice(&mut self, message: &str) {
        self.reporter.info(message);
    }

    fn show_findings(&mut self, area: &str, findings: &str) {
        self.reporter.findings(area, findings);
    }

    fn confirm_abort(&mut self, area: &str) -> Result<bool, GateError> {
        match self.on_findings {
            FindingsPolicy::Abort => Ok(true),
            FindingsPolicy::Proceed => {
                self.reporter
                    .warning(&format!("Continuing despite {area} lint issues"));
                Ok(false)
            }
            FindingsPolicy::Prompt => match self.ask(area) {
                Some(abort) => Ok(abort),
                None => Ok(self.unattended(area)),
            },
        }
    }
}
