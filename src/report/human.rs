//! Human-readable report formatter.
//!
//! ```text
//! check-node-types: FAIL
//!   engines.node major:  20
//!   @types/node major:   22
//!
//!   Fix: npm install -D @types/node@^20
//! ```

use std::io::Write;

use super::ReportFormatter;
use crate::checker::{CheckStatus, ReconciliationOutcome, TYPES_PACKAGE};
use crate::ui::{OutputMode, Theme};

/// Name shown at the start of the status line.
const TOOL_NAME: &str = "check-node-types";

/// Placeholder for a value that was not declared.
const NOT_FOUND: &str = "not found";

/// Formats a report for terminal display.
#[derive(Debug, Clone)]
pub struct HumanFormatter {
    mode: OutputMode,
    print_only: bool,
    theme: Theme,
}

impl HumanFormatter {
    /// Create a new human formatter.
    pub fn new(mode: OutputMode, theme: Theme) -> Self {
        Self {
            mode,
            print_only: false,
            theme,
        }
    }

    /// Only print the detected raw values, skipping the verdict.
    pub fn print_only(mut self, print_only: bool) -> Self {
        self.print_only = print_only;
        self
    }

    fn write_detected<W: Write>(
        &self,
        outcome: &ReconciliationOutcome,
        writer: &mut W,
    ) -> std::io::Result<()> {
        let runtime_label = format!("{}:", outcome.source.label());
        let types_label = format!("{TYPES_PACKAGE}:");
        let pad = runtime_label.len().max(types_label.len());
        writeln!(
            writer,
            "{runtime_label:<pad$} {}",
            outcome.runtime_version.raw().unwrap_or(NOT_FOUND)
        )?;
        writeln!(
            writer,
            "{types_label:<pad$} {}",
            outcome.type_package_version.raw().unwrap_or(NOT_FOUND)
        )
    }
}

impl ReportFormatter for HumanFormatter {
    fn format<W: Write>(
        &self,
        outcome: &ReconciliationOutcome,
        writer: &mut W,
    ) -> std::io::Result<()> {
        if self.print_only {
            return self.write_detected(outcome, writer);
        }

        let status = outcome.status;
        if status == CheckStatus::Pass && self.mode.silences_pass() {
            return Ok(());
        }

        writeln!(
            writer,
            "{}: {}",
            self.theme.format_highlight(TOOL_NAME),
            self.theme.format_status(status)
        )?;

        let label = outcome.source.label();
        let runtime = &outcome.runtime_version;
        let types = &outcome.type_package_version;
        let show =
            |major: Option<u64>| major.map_or_else(|| "unknown".to_string(), |m| m.to_string());

        match status {
            CheckStatus::Pass if !self.mode.shows_pass_details() => return Ok(()),
            CheckStatus::Pass => {
                let runtime_label = format!("{label}:");
                let types_label = format!("{TYPES_PACKAGE}:");
                let pad = runtime_label.len().max(types_label.len());
                writeln!(
                    writer,
                    "  {runtime_label:<pad$} {} {}",
                    runtime.raw().unwrap_or(NOT_FOUND),
                    self.theme.format_dim(&format!("(major: {})", show(runtime.major())))
                )?;
                writeln!(
                    writer,
                    "  {types_label:<pad$} {} {}",
                    types.raw().unwrap_or(NOT_FOUND),
                    self.theme.format_dim(&format!("(major: {})", show(types.major())))
                )?;
            }
            CheckStatus::Fail => {
                let runtime_label = format!("{label} major:");
                let types_label = format!("{TYPES_PACKAGE} major:");
                let pad = runtime_label.len().max(types_label.len());
                writeln!(
                    writer,
                    "  {runtime_label:<pad$}  {}",
                    self.theme.format_highlight(&show(runtime.major()))
                )?;
                writeln!(
                    writer,
                    "  {types_label:<pad$}  {}",
                    self.theme.format_highlight(&show(types.major()))
                )?;
            }
            CheckStatus::Warning => writeln!(writer, "  {}", outcome.message)?,
        }

        if let Some(fix) = &outcome.fix {
            writeln!(writer)?;
            writeln!(writer, "  Fix: {}", self.theme.format_highlight(fix))?;
        }

        Ok(())
    }
}
