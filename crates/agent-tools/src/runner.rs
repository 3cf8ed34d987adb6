//! Project running: inspect the project directory to decide how to start it,
//! then launch it in a new terminal window.

use std::path::PathBuf;

use agent_core::ProjectContext;

use crate::command::{CommandResult, CommandRunner};

const RUN_SCRIPT_PRIORITY: [&str; 3] = ["dev", "start", "serve"];
const PYTHON_ENTRY_FILES: [&str; 2] = ["app.py", "main.py"];

/// Resolve the target directory (explicit argument, else the current
/// project), decide how to start the project and launch it in terminal mode.
///
/// Changes the process working directory to the target and does not revert
/// it, matching the behavior the model is instructed around.
pub async fn run_project(
    runner: &dyn CommandRunner,
    directory: Option<PathBuf>,
    project: &ProjectContext,
) -> Result<CommandResult, String> {
    let directory = directory
        .or_else(|| project.current().map(|info| info.directory))
        .ok_or_else(|| "No project directory specified".to_string())?;

    std::env::set_current_dir(&directory)
        .map_err(|e| format!("Failed to enter '{}': {e}", directory.display()))?;

    let manifest = directory.join("package.json");
    if manifest.exists() {
        let raw = tokio::fs::read_to_string(&manifest)
            .await
            .map_err(|e| format!("Failed to read package.json: {e}"))?;
        let package: serde_json::Value =
            serde_json::from_str(&raw).map_err(|e| format!("Invalid package.json: {e}"))?;

        let scripts = package.get("scripts").and_then(|value| value.as_object());
        let run_script = scripts.and_then(|scripts| {
            RUN_SCRIPT_PRIORITY
                .iter()
                .find(|name| scripts.contains_key(**name))
        });

        return match run_script {
            Some(script) => Ok(runner.run(&format!("npm run {script}"), true).await),
            None => Err("No suitable run script found in package.json".to_string()),
        };
    }

    for entry in PYTHON_ENTRY_FILES {
        if directory.join(entry).exists() {
            return Ok(runner.run(&format!("python {entry}"), true).await);
        }
    }

    Err("Could not determine how to run this project".to_string())
}
