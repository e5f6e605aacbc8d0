//! The abort confirmation prompt.
//!
//! The question text is what operators see on every commit with findings,
//! so it stays fixed. The CLI appends the `[y/N]` choice marker:
//!
//! ```text
//! [pre-commit] backend linter reported issues. Abort commit? [y/N]
//! ```

/// Prefix of every line the hook prints.
pub const BANNER_PREFIX: &str = "[pre-commit]";

/// The question asked after showing an area's findings.
pub fn abort_question(area: &str) -> String {
    format!("{BANNER_PREFIX} {area} linter reported issues. Abort commit?")
}
