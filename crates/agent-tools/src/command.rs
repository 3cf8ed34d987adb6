//! Shell command execution: synchronous capture, or launching the command in
//! a new visible terminal window. No other module talks to the OS process
//! layer directly.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::process::Command;

/// Outcome of one command invocation. Exactly one of the three shapes is
/// produced per call; launch failures become `Failed`, never a panic or an
/// `Err` out of the runner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum CommandResult {
    Captured {
        stdout: String,
        stderr: String,
        return_code: i32,
    },
    Launched {
        status: String,
        message: String,
    },
    Failed {
        error: String,
    },
}

impl CommandResult {
    pub fn launched(message: impl Into<String>) -> Self {
        CommandResult::Launched {
            status: "success".to_string(),
            message: message.into(),
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        CommandResult::Failed {
            error: error.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, CommandResult::Failed { .. })
    }
}

/// Seam for command execution so the scaffolder and project runner can be
/// exercised against a recording fake.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, command: &str, new_terminal: bool) -> CommandResult;
}

/// Runs commands through the platform shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(&self, command: &str, new_terminal: bool) -> CommandResult {
        if new_terminal {
            launch_in_terminal(command).await
        } else {
            run_captured(command).await
        }
    }
}

async fn run_captured(command: &str) -> CommandResult {
    match shell_command(command).output().await {
        Ok(output) => CommandResult::Captured {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            // Signal-killed processes have no exit code
            return_code: output.status.code().unwrap_or(-1),
        },
        Err(e) => CommandResult::failed(format!("Failed to execute command '{command}': {e}")),
    }
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", command]);
    cmd
}

#[cfg(not(windows))]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.args(["-c", command]);
    cmd
}

// Terminal-launch mode is fire-and-forget: the child handle is dropped
// without waiting, and tokio does not kill children on drop, so the spawned
// terminal outlives this process's interest in it. Completion is never
// observed or awaited.

#[cfg(target_os = "windows")]
async fn launch_in_terminal(command: &str) -> CommandResult {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", &format!("start cmd /k \"{command}\"")]);
    match cmd.spawn() {
        Ok(_child) => CommandResult::launched(format!(
            "Command '{command}' launched in a new terminal window"
        )),
        Err(e) => CommandResult::failed(format!("Failed to launch terminal: {e}")),
    }
}

#[cfg(target_os = "macos")]
async fn launch_in_terminal(command: &str) -> CommandResult {
    let script = format!(
        "tell application \"Terminal\"\n    do script \"{command}\"\n    activate\nend tell"
    );
    match Command::new("osascript").args(["-e", &script]).spawn() {
        Ok(_child) => CommandResult::launched(format!(
            "Command '{command}' launched in a new terminal window"
        )),
        Err(e) => CommandResult::failed(format!("Failed to launch terminal: {e}")),
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
async fn launch_in_terminal(command: &str) -> CommandResult {
    const EMULATORS: [&str; 4] = ["gnome-terminal", "xterm", "konsole", "terminator"];

    for emulator in EMULATORS {
        if which::which(emulator).is_err() {
            continue;
        }

        // Keep the window open after the command finishes
        let wrapped = format!("{command}; exec bash");
        let mut cmd = Command::new(emulator);
        if emulator == "gnome-terminal" {
            cmd.args(["--", "bash", "-c", &wrapped]);
        } else {
            cmd.args(["-e", &format!("bash -c \"{wrapped}\"")]);
        }

        return match cmd.spawn() {
            Ok(_child) => CommandResult::launched(format!(
                "Command '{command}' launched in a new terminal window ({emulator})"
            )),
            Err(e) => CommandResult::failed(format!("Failed to launch {emulator}: {e}")),
        };
    }

    CommandResult::failed("Could not find a suitable terminal emulator")
}
