use std::path::Path;

use async_trait::async_trait;
use serde_json::json;

use agent_core::{Tool, ToolError, ToolResult};

use crate::fs_io;
use crate::tools::string_arg;

pub struct WriteFileTool;

impl WriteFileTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WriteFileTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for WriteFileTool {
    fn name(&self) -> &str {
        "write_file"
    }

    fn description(&self) -> &str {
        "Writes content to a file at the given path"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "Path of the file to write; parent directories are created as needed"
                },
                "content": {
                    "type": "string",
                    "description": "Content to write"
                }
            },
            "required": ["file_path", "content"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult, ToolError> {
        let Some(path) = string_arg(&args, &["file_path", "path"]) else {
            return Ok(ToolResult::error("No file path provided"));
        };
        // Absent content means an empty file; present but non-string content
        // is a mistake worth reporting, not coercing.
        let content = match args.get("content") {
            None => "",
            Some(value) => match value.as_str() {
                Some(text) => text,
                None => return Ok(ToolResult::error("File content must be a string")),
            },
        };

        match fs_io::write_file(Path::new(&path), content).await {
            Ok(()) => Ok(ToolResult::ok(json!({
                "status": "success",
                "message": format!("Content written to {path}"),
            }))),
            Err(message) => Ok(ToolResult::error(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn writes_content_and_creates_parents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("src/components/App.jsx");

        let result = WriteFileTool::new()
            .execute(json!({
                "file_path": path.to_string_lossy(),
                "content": "export default function App() {}"
            }))
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.output["status"], "success");
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "export default function App() {}"
        );
    }

    #[tokio::test]
    async fn bare_path_writes_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.txt");

        let result = WriteFileTool::new()
            .execute(json!(path.to_string_lossy()))
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[tokio::test]
    async fn non_string_content_is_a_data_level_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("numeric.txt");

        let result = WriteFileTool::new()
            .execute(json!({"file_path": path.to_string_lossy(), "content": 42}))
            .await
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.output["error"], "File content must be a string");
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn missing_path_is_a_data_level_error() {
        let result = WriteFileTool::new()
            .execute(json!({"content": "orphan"}))
            .await
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.output["error"], "No file path provided");
    }
}
