//! Tooling & Integration Layer
//!
//! The command-line front end over the directory and layout session.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext, Commands, LayoutCommands, NetworkCommands, PermissionCommands};
