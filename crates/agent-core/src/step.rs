use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AgentError;

/// One structured unit of the model's output, tagged by its `step` field.
///
/// This is the wire contract with the model and is treated as an untrusted
/// payload: anything that does not deserialize into one of these shapes is a
/// protocol error, never an unhandled fault. An `action` step must carry both
/// `function` and `input`; `input` may be a keyed mapping of parameter names
/// or a single bare value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "step", rename_all = "lowercase")]
pub enum Step {
    Plan {
        content: String,
    },
    Action {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        function: String,
        input: Value,
    },
    Observe {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        output: Option<Value>,
    },
    Output {
        content: String,
    },
}

impl Step {
    /// Parse a raw model response. Any deviation from the step schema maps
    /// to [`AgentError::Protocol`].
    pub fn parse(raw: &str) -> Result<Self, AgentError> {
        serde_json::from_str(raw)
            .map_err(|e| AgentError::Protocol(format!("failed to parse model step: {e}")))
    }

    /// Canonical JSON form, used when folding the step back into the
    /// transcript.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// An observation step carrying a tool result, as appended to the
    /// transcript after dispatch.
    pub fn observation(output: Value) -> Self {
        Step::Observe {
            content: None,
            output: Some(output),
        }
    }
}
