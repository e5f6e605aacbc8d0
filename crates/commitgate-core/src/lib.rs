pub mod config;
pub mod error;
pub mod gate;
pub mod git;
pub mod hooks;
pub mod prompt;
pub mod runner;
pub mod types;

pub use config::GateConfig;
pub use error::GateError;
pub use gate::{run_gate, GateReport, Operator, Verdict};
pub use types::*;
