pub mod command;
pub mod fs_io;
pub mod runner;
pub mod scaffold;
pub mod tools;

pub use command::{CommandResult, CommandRunner, SystemCommandRunner};
pub use tools::default_registry;
