//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::io::Write;

use crate::cli::args::{Cli, Commands};
use crate::error::Result;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `out` - Destination for the command's report
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] carrying the exit code.
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandResult {
    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self { exit_code: 0 }
    }

    /// Create a result from a raw exit code.
    pub fn from_exit_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    use_color: bool,
}

impl CommandDispatcher {
    /// Create a new dispatcher.
    ///
    /// `use_color` is the terminal's color capability; `--no-color` is
    /// applied on top of it per command.
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    /// Dispatch and execute a command.
    ///
    /// Without a subcommand the check itself runs.
    pub fn dispatch(&self, cli: &Cli, out: &mut dyn Write) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(out)
            }
            None => {
                let color = self.use_color && !cli.check.no_color;
                let cmd = super::check::CheckCommand::new(cli.check.clone(), color);
                cmd.execute(out)
            }
        }
    }
}
