//! The fixed tool set exposed to the model.

pub mod create_project;
pub mod read_file;
pub mod run_command;
pub mod run_project;
pub mod write_file;

use std::sync::Arc;

use serde_json::Value;

use agent_core::{ProjectContext, RegistryError, ToolRegistry};

use crate::command::CommandRunner;

pub use create_project::CreateProjectTool;
pub use read_file::ReadFileTool;
pub use run_command::RunCommandTool;
pub use run_project::RunProjectTool;
pub use write_file::WriteFileTool;

/// Build the closed tool set. Called once at startup; nothing registers
/// tools after this.
pub fn default_registry(
    runner: Arc<dyn CommandRunner>,
    project: ProjectContext,
) -> Result<ToolRegistry, RegistryError> {
    let registry = ToolRegistry::new();
    registry.register(RunCommandTool::new(Arc::clone(&runner)))?;
    registry.register(ReadFileTool::new())?;
    registry.register(WriteFileTool::new())?;
    registry.register(CreateProjectTool::new(Arc::clone(&runner)))?;
    registry.register(RunProjectTool::new(runner, project))?;
    Ok(registry)
}

/// Pull a string parameter out of the model-supplied input: from the first
/// matching key of a mapping, or from a bare string used positionally.
pub(crate) fn string_arg(args: &Value, keys: &[&str]) -> Option<String> {
    match args {
        Value::Object(map) => keys
            .iter()
            .find_map(|key| map.get(*key))
            .and_then(|value| value.as_str())
            .map(str::to_string),
        Value::String(value) => Some(value.clone()),
        _ => None,
    }
}
