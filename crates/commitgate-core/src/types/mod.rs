pub mod area;
pub mod staged;
pub mod tool;

pub use area::{AreaConfig, AreaFilter};
pub use staged::StagedFileSet;
pub use tool::{ToolResult, ToolSpec};
