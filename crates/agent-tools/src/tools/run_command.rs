use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use agent_core::{Tool, ToolError, ToolResult};

use crate::command::CommandRunner;
use crate::tools::string_arg;

/// Tool wrapper over the command runner.
pub struct RunCommandTool {
    runner: Arc<dyn CommandRunner>,
}

impl RunCommandTool {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl Tool for RunCommandTool {
    fn name(&self) -> &str {
        "run_command"
    }

    fn description(&self) -> &str {
        "Executes a system command and returns the output"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "command": {
                    "type": "string",
                    "description": "The shell command to execute"
                },
                "new_terminal": {
                    "type": "boolean",
                    "description": "Launch the command in a new visible terminal window instead of capturing its output"
                }
            },
            "required": ["command"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult, ToolError> {
        let command = string_arg(&args, &["command"]).ok_or_else(|| {
            ToolError::InvalidArguments("Missing 'command' parameter".to_string())
        })?;
        let new_terminal = args
            .get("new_terminal")
            .and_then(|value| value.as_bool())
            .unwrap_or(false);

        let result = self.runner.run(&command, new_terminal).await;
        Ok(ToolResult {
            success: !result.is_error(),
            output: serde_json::to_value(&result).unwrap_or_default(),
        })
    }
}
