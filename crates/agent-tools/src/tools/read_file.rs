use std::path::Path;

use async_trait::async_trait;
use serde_json::json;

use agent_core::{Tool, ToolError, ToolResult};

use crate::fs_io;
use crate::tools::string_arg;

pub struct ReadFileTool;

impl ReadFileTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ReadFileTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Reads the content of a file at the given path"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "Path of the file to read"
                }
            },
            "required": ["file_path"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult, ToolError> {
        let Some(path) = string_arg(&args, &["file_path", "path"]) else {
            return Ok(ToolResult::error("No file path provided"));
        };

        match fs_io::read_file(Path::new(&path)).await {
            Ok(decoded) => Ok(ToolResult::ok(json!({
                "content": decoded.content,
                "encoding_used": decoded.encoding_used,
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
    async fn reads_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hello.txt");
        std::fs::write(&path, "hello tool").unwrap();

        let result = ReadFileTool::new()
            .execute(json!({"file_path": path.to_string_lossy()}))
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.output["content"], "hello tool");
        assert_eq!(result.output["encoding_used"], "utf-8");
    }

    #[tokio::test]
    async fn accepts_path_key_alias() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("alias.txt");
        std::fs::write(&path, "aliased").unwrap();

        let result = ReadFileTool::new()
            .execute(json!({"path": path.to_string_lossy()}))
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.output["content"], "aliased");
    }

    #[tokio::test]
    async fn missing_path_is_a_data_level_error() {
        let result = ReadFileTool::new().execute(json!({})).await.unwrap();

        assert!(!result.success);
        assert_eq!(result.output["error"], "No file path provided");
    }

    #[tokio::test]
    async fn missing_file_reports_error_payload() {
        let result = ReadFileTool::new()
            .execute(json!("/nonexistent/surely/absent.txt"))
            .await
            .unwrap();

        assert!(!result.success);
        assert!(result.output["error"]
            .as_str()
            .unwrap()
            .contains("Failed to read file"));
    }
}
