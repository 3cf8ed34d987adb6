//! Rebasing of relative write paths under the active project directory.
//!
//! Only the file-write tool gets this treatment; reads and commands pass
//! through untouched, as upstream behaves.

use std::path::{Path, PathBuf};

use agent_core::ProjectInfo;

/// Resolve a write path against the active project.
///
/// Absolute paths pass through unchanged. A relative path already carrying
/// the `<projectName>/` (or `<projectName>\`) prefix has that prefix
/// stripped before rebasing, so the project directory name is never
/// duplicated; every other relative path is rebased directly under the
/// project directory.
pub fn rewrite_write_path(project: &ProjectInfo, path: &str) -> PathBuf {
    let candidate = Path::new(path);
    if candidate.is_absolute() {
        return candidate.to_path_buf();
    }

    // Already anchored under the project root (e.g. a path the model echoed
    // back from an earlier observation)
    let directory = project.directory.to_string_lossy();
    if path.starts_with(directory.as_ref()) {
        return candidate.to_path_buf();
    }

    let slash_prefix = format!("{}/", project.name);
    let backslash_prefix = format!("{}\\", project.name);
    if let Some(rest) = path
        .strip_prefix(&slash_prefix)
        .or_else(|| path.strip_prefix(&backslash_prefix))
    {
        return project.directory.join(rest);
    }

    project.directory.join(path)
}
