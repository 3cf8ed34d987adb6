pub mod orchestrator;
pub mod prompt;
pub mod rewrite;

pub use orchestrator::{LoopConfig, Orchestrator};
pub use rewrite::rewrite_write_path;
