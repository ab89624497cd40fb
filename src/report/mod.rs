//! Report formatters.
//!
//! This module renders a [`ReconciliationOutcome`] either for a terminal
//! (human) or for tooling (JSON).

pub mod human;
pub mod json;

use std::io::Write;

use crate::checker::ReconciliationOutcome;

pub use human::HumanFormatter;
pub use json::JsonFormatter;

/// Output format for a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

/// Trait for formatting a reconciliation outcome.
pub trait ReportFormatter {
    /// Format the outcome to the given writer.
    fn format<W: Write>(
        &self,
        outcome: &ReconciliationOutcome,
        writer: &mut W,
    ) -> std::io::Result<()>;
}
