//! Scaffolding: a static table mapping project types to ordered shell command
//! templates, executed through the command runner.

use serde::Serialize;

use agent_core::ProjectInfo;

use crate::command::{CommandResult, CommandRunner};

pub const SUPPORTED_TYPES: [&str; 7] = [
    "react",
    "node",
    "python",
    "vite",
    "vite-react",
    "vite-vue",
    "vite-vanilla",
];

fn template_commands(kind: &str, name: &str) -> Option<Vec<String>> {
    let commands = match kind {
        "react" => vec![
            format!("npx create-react-app {name}"),
            format!("cd {name} && npm install"),
        ],
        "node" => vec![
            format!("mkdir {name}"),
            format!("cd {name} && npm init -y"),
            format!("cd {name} && npm install express"),
        ],
        "python" => vec![
            format!("mkdir {name}"),
            format!("cd {name} && python -m venv venv"),
            format!("cd {name} && pip install pytest"),
        ],
        "vite" | "vite-react" => vec![
            format!("npm create vite@latest {name} -- --template react"),
            format!("cd {name} && npm install"),
        ],
        "vite-vue" => vec![
            format!("npm create vite@latest {name} -- --template vue"),
            format!("cd {name} && npm install"),
        ],
        "vite-vanilla" => vec![
            format!("npm create vite@latest {name} -- --template vanilla"),
            format!("cd {name} && npm install"),
        ],
        _ => return None,
    };
    Some(commands)
}

#[derive(Debug, Serialize)]
pub struct ScaffoldOutcome {
    pub results: Vec<CommandResult>,
    pub project_info: ProjectInfo,
}

/// Run every template command for `kind` in order, collecting one result per
/// command. Execution does not abort early on a failing command; the caller
/// inspects `results` to detect partial failure. The reported directory is
/// `<cwd>/<name>` whether or not creation actually succeeded.
pub async fn create_project(
    runner: &dyn CommandRunner,
    kind: &str,
    name: &str,
) -> Result<ScaffoldOutcome, String> {
    let Some(commands) = template_commands(kind, name) else {
        return Err(format!(
            "Project type '{kind}' not supported. Supported types: {}",
            SUPPORTED_TYPES.join(", ")
        ));
    };

    let directory = std::env::current_dir()
        .map_err(|e| format!("could not resolve current directory: {e}"))?
        .join(name);

    let mut results = Vec::with_capacity(commands.len());
    for command in &commands {
        results.push(runner.run(command, false).await);
    }

    // Best-effort diagnostic listing; failure to list is non-fatal.
    if directory.exists() {
        match std::fs::read_dir(&directory) {
            Ok(entries) => {
                let names: Vec<String> = entries
                    .filter_map(|entry| entry.ok())
                    .map(|entry| entry.file_name().to_string_lossy().into_owned())
                    .collect();
                log::info!("project '{name}' created with entries: {names:?}");
            }
            Err(e) => log::warn!("could not list contents of '{}': {e}", directory.display()),
        }
    }

    Ok(ScaffoldOutcome {
        results,
        project_info: ProjectInfo {
            name: name.to_string(),
            directory,
            kind: kind.to_string(),
        },
    })
}
