use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Not inside a git repository: {}", .0.display())]
    NotARepository(PathBuf),

    #[error("git {command} failed: {message}")]
    Git { command: String, message: String },

    #[error("Tool not found: {program}")]
    ToolNotFound { program: String },

    #[error("{tool} exited with {status}:\n{output}")]
    ToolFailed {
        tool: String,
        status: String,
        output: String,
    },

    #[error("File already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("{0}")]
    Other(String),
}
