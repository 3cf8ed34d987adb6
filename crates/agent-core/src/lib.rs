pub mod error;
pub mod events;
pub mod message;
pub mod project;
pub mod step;
pub mod tools;

pub use error::AgentError;
pub use events::{AgentEvent, EventSink};
pub use message::{render_prompt, Message, Role};
pub use project::{ProjectContext, ProjectInfo};
pub use step::Step;
pub use tools::{
    dispatch, RegistryError, SharedTool, Tool, ToolError, ToolRegistry, ToolResult, ToolSchema,
};
