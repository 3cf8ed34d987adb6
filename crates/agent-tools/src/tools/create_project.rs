use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use agent_core::{Tool, ToolError, ToolResult};

use crate::command::CommandRunner;
use crate::scaffold::{self, SUPPORTED_TYPES};
use crate::tools::string_arg;

const DEFAULT_PROJECT_NAME: &str = "my-project";

pub struct CreateProjectTool {
    runner: Arc<dyn CommandRunner>,
}

impl CreateProjectTool {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl Tool for CreateProjectTool {
    fn name(&self) -> &str {
        "create_project"
    }

    fn description(&self) -> &str {
        "Creates a new project with a predefined structure (react, node, python, vite, vite-react, vite-vue, vite-vanilla)"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "project_type": {
                    "type": "string",
                    "enum": SUPPORTED_TYPES,
                    "description": "Scaffold template to use"
                },
                "project_name": {
                    "type": "string",
                    "description": "Name of the project directory to create"
                }
            },
            "required": ["project_type"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult, ToolError> {
        // `template` is accepted as an alias for `project_type`; a bare
        // string input is the type.
        let Some(kind) = string_arg(&args, &["project_type", "template"]) else {
            return Ok(ToolResult::error(format!(
                "No project type provided. Supported types: {}",
                SUPPORTED_TYPES.join(", ")
            )));
        };
        let name = string_arg(&args, &["project_name"])
            .filter(|_| args.is_object())
            .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string());

        match scaffold::create_project(self.runner.as_ref(), &kind, &name).await {
            Ok(outcome) => Ok(ToolResult {
                success: !outcome.results.iter().any(|result| result.is_error()),
                output: serde_json::to_value(&outcome).unwrap_or_default(),
            }),
            Err(message) => Ok(ToolResult::error(message)),
        }
    }
}
