use std::path::PathBuf;

use serde_json::Value;

use crate::project::ProjectInfo;

/// Progress events surfaced while the loop resolves a query, so the CLI can
/// render planning, actions and observations as they happen.
#[derive(Debug, Clone)]
pub enum AgentEvent {
    Plan {
        content: String,
    },
    Action {
        function: String,
        input: Value,
    },
    /// A relative write path was rebased under the active project directory.
    PathRewritten {
        path: PathBuf,
    },
    Observation {
        output: Value,
    },
    ProjectCreated {
        info: ProjectInfo,
    },
}

/// Callback the loop invokes for each event. The loop is single-threaded and
/// synchronous, so a plain callback suffices; no channel is needed.
pub type EventSink = Box<dyn Fn(&AgentEvent) + Send + Sync>;
