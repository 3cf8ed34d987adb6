use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// What a tool hands back after execution. `output` is the JSON value that
/// gets folded into the transcript as an observation; tools report their own
/// failures as `{"error": ...}` payloads with `success: false` rather than
/// returning `Err`, so the model can replan.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    pub success: bool,
    pub output: Value,
}

impl ToolResult {
    pub fn ok(output: Value) -> Self {
        Self {
            success: true,
            output,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            output: serde_json::json!({ "error": message.into() }),
        }
    }
}

/// Failures at the dispatch boundary, before a tool body runs. A tool's own
/// runtime failures are data-level `{"error"}` results, not `ToolError`s.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    #[error("Tool '{0}' not available")]
    NotFound(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

/// Capability metadata for one tool, rendered into the system instruction so
/// the model can select tools by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}
