use std::sync::Arc;

use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use thiserror::Error;

use crate::tools::{ToolError, ToolResult, ToolSchema};

/// A local side-effecting capability the model can invoke by name.
///
/// `args` is whatever the model supplied as the step's `input`: a keyed
/// mapping of parameter names, or a single bare value for tools that take
/// one positional argument. Tools validate their own inputs and never let a
/// runtime failure escape as `Err`; only argument-shape violations surface
/// as [`ToolError::InvalidArguments`].
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn parameters_schema(&self) -> serde_json::Value;
    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult, ToolError>;

    fn to_schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }
}

pub type SharedTool = Arc<dyn Tool>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("tool with name '{0}' already registered")]
    DuplicateTool(String),

    #[error("invalid tool: {0}")]
    InvalidTool(String),
}

/// The fixed tool set, built once at startup and closed thereafter.
pub struct ToolRegistry {
    tools: DashMap<String, SharedTool>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: DashMap::new(),
        }
    }

    pub fn register<T>(&self, tool: T) -> Result<(), RegistryError>
    where
        T: Tool + 'static,
    {
        self.register_shared(Arc::new(tool))
    }

    pub fn register_shared(&self, tool: SharedTool) -> Result<(), RegistryError> {
        let name = tool.name().trim();

        if name.is_empty() {
            return Err(RegistryError::InvalidTool(
                "tool name cannot be empty".to_string(),
            ));
        }

        match self.tools.entry(name.to_string()) {
            Entry::Occupied(_) => Err(RegistryError::DuplicateTool(name.to_string())),
            Entry::Vacant(entry) => {
                entry.insert(tool);
                Ok(())
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<SharedTool> {
        self.tools.get(name).map(|entry| Arc::clone(entry.value()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Schemas sorted by name, for stable prompt rendering.
    pub fn list_tools(&self) -> Vec<ToolSchema> {
        let mut tools: Vec<ToolSchema> = self
            .tools
            .iter()
            .map(|entry| entry.value().to_schema())
            .collect();
        tools.sort_by(|left, right| left.name.cmp(&right.name));
        tools
    }

    pub fn list_tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Dispatch one action-step invocation. Unknown names and bad argument
/// shapes come back as error results so the caller can fold them into an
/// observation instead of crashing the session.
pub async fn dispatch(
    registry: &ToolRegistry,
    name: &str,
    input: serde_json::Value,
) -> ToolResult {
    let Some(tool) = registry.get(name) else {
        let err = ToolError::NotFound(name.to_string());
        return ToolResult {
            success: false,
            output: serde_json::Value::String(format!("Error: {err}")),
        };
    };

    match tool.execute(input).await {
        Ok(result) => result,
        Err(err) => ToolResult::error(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    struct TestTool {
        name: &'static str,
        description: &'static str,
    }

    #[async_trait]
    impl Tool for TestTool {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            self.description
        }

        fn parameters_schema(&self) -> serde_json::Value {
            json!({
                "type": "object",
                "properties": {}
            })
        }

        async fn execute(&self, _args: serde_json::Value) -> Result<ToolResult, ToolError> {
            Ok(ToolResult::ok(json!({"status": "success", "message": "ok"})))
        }
    }

    #[test]
    fn register_and_get() {
        let registry = ToolRegistry::new();
        let tool = TestTool {
            name: "test_tool",
            description: "test tool",
        };

        assert!(registry.register(tool).is_ok());
        assert!(registry.get("test_tool").is_some());
        assert!(registry.get("unknown").is_none());
    }

    #[test]
    fn duplicate_tool_registration() {
        let registry = ToolRegistry::new();

        registry
            .register(TestTool {
                name: "dup",
                description: "first",
            })
            .unwrap();

        let duplicate = registry.register(TestTool {
            name: "dup",
            description: "second",
        });

        assert!(matches!(duplicate, Err(RegistryError::DuplicateTool(name)) if name == "dup"));
    }

    #[test]
    fn empty_name_rejected() {
        let registry = ToolRegistry::new();
        let result = registry.register(TestTool {
            name: "  ",
            description: "no name",
        });
        assert!(matches!(result, Err(RegistryError::InvalidTool(_))));
    }

    #[test]
    fn list_tools_is_sorted() {
        let registry = ToolRegistry::new();
        registry
            .register(TestTool {
                name: "zeta",
                description: "z",
            })
            .unwrap();
        registry
            .register(TestTool {
                name: "alpha",
                description: "a",
            })
            .unwrap();

        let names: Vec<String> = registry
            .list_tools()
            .into_iter()
            .map(|schema| schema.name)
            .collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[tokio::test]
    async fn dispatch_unknown_tool_yields_not_available() {
        let registry = ToolRegistry::new();
        let result = dispatch(&registry, "missing_tool", json!({})).await;

        assert!(!result.success);
        assert_eq!(
            result.output,
            json!("Error: Tool 'missing_tool' not available")
        );
    }

    #[tokio::test]
    async fn dispatch_known_tool_returns_its_result() {
        let registry = ToolRegistry::new();
        registry
            .register(TestTool {
                name: "test_tool",
                description: "test tool",
            })
            .unwrap();

        let result = dispatch(&registry, "test_tool", json!("anything")).await;
        assert!(result.success);
        assert_eq!(result.output["status"], "success");
    }
}
