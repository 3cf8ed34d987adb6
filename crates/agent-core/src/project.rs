use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

/// The single active scaffolded project: name, absolute root directory and
/// template type. All three fields are set together on a successful scaffold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectInfo {
    pub name: String,
    pub directory: PathBuf,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Shared handle to the current-project record.
///
/// Starts empty, is fully overwritten on each successful project creation and
/// never cleared for the process lifetime; creating a second project silently
/// replaces the first. The orchestrator is the only writer; the path-rewrite
/// logic and the project runner's fallback read it.
#[derive(Debug, Clone, Default)]
pub struct ProjectContext {
    inner: Arc<RwLock<Option<ProjectInfo>>>,
}

impl ProjectContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the whole record. Partial updates are impossible by
    /// construction.
    pub fn replace(&self, info: ProjectInfo) {
        let mut guard = self.inner.write().expect("project context lock poisoned");
        *guard = Some(info);
    }

    pub fn current(&self) -> Option<ProjectInfo> {
        self.inner
            .read()
            .expect("project context lock poisoned")
            .clone()
    }

    pub fn is_set(&self) -> bool {
        self.inner
            .read()
            .expect("project context lock poisoned")
            .is_some()
    }
}
