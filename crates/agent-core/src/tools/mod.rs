pub mod registry;
pub mod types;

pub use registry::{dispatch, RegistryError, SharedTool, Tool, ToolRegistry};
pub use types::{ToolError, ToolResult, ToolSchema};
