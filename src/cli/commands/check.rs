//! Check command implementation.
//!
//! `check-node-types` with no subcommand reconciles the manifest and
//! reports the verdict. Exit codes: 0 pass, 1 fail, 2 warning, and 0 for
//! `--print` without `--json`.

use std::io::Write;

use tracing::debug;

use crate::checker::{manifest_path_for, reconcile};
use crate::cli::args::CheckArgs;
use crate::error::Result;
use crate::report::{HumanFormatter, JsonFormatter, OutputFormat, ReportFormatter};
use crate::ui::{OutputMode, Theme};

use super::dispatcher::{Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    args: CheckArgs,
    use_color: bool,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(args: CheckArgs, use_color: bool) -> Self {
        Self { args, use_color }
    }

    fn output_format(&self) -> OutputFormat {
        if self.args.json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, mut out: &mut dyn Write) -> Result<CommandResult> {
        let manifest_path = manifest_path_for(&self.args.package);
        let outcome = reconcile(&manifest_path, self.args.source);

        let format = self.output_format();
        match format {
            OutputFormat::Json => JsonFormatter::new().format(&outcome, &mut out)?,
            OutputFormat::Human => {
                let mode = OutputMode::from_flags(self.args.quiet, self.args.verbose);
                HumanFormatter::new(mode, Theme::for_color(self.use_color))
                    .print_only(self.args.print)
                    .format(&outcome, &mut out)?
            }
        }
        out.flush()?;

        let exit_code = if self.args.print && format == OutputFormat::Human {
            0
        } else {
            outcome.status.exit_code()
        };
        debug!(status = ?outcome.status, exit_code, "check finished");
        Ok(CommandResult::from_exit_code(exit_code))
    }
}
