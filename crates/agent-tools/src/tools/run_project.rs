use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use agent_core::{ProjectContext, Tool, ToolError, ToolResult};

use crate::command::CommandRunner;
use crate::runner;
use crate::tools::string_arg;

/// Starts the current (or an explicitly named) project in a new terminal.
pub struct RunProjectTool {
    runner: Arc<dyn CommandRunner>,
    project: ProjectContext,
}

impl RunProjectTool {
    pub fn new(runner: Arc<dyn CommandRunner>, project: ProjectContext) -> Self {
        Self { runner, project }
    }
}

#[async_trait]
impl Tool for RunProjectTool {
    fn name(&self) -> &str {
        "run_project"
    }

    fn description(&self) -> &str {
        "Runs the current project in a new terminal window"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "project_dir": {
                    "type": "string",
                    "description": "Directory of the project to run; defaults to the current project"
                }
            },
            "required": []
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult, ToolError> {
        let directory =
            string_arg(&args, &["project_dir", "project_directory", "directory", "path"])
                .map(PathBuf::from);

        match runner::run_project(self.runner.as_ref(), directory, &self.project).await {
            Ok(result) => Ok(ToolResult {
                success: !result.is_error(),
                output: serde_json::to_value(&result).unwrap_or_default(),
            }),
            Err(message) => Ok(ToolResult::error(message)),
        }
    }
}
