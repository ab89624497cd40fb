//! JSON report formatter.
//!
//! Emits the full outcome, pretty-printed, for tooling integration.

use std::io::Write;

use super::ReportFormatter;
use crate::checker::ReconciliationOutcome;

/// Formats a report as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter.
    pub fn new() -> Self {
        Self
    }
}

impl ReportFormatter for JsonFormatter {
    fn format<W: Write>(
        &self,
        outcome: &ReconciliationOutcome,
        writer: &mut W,
    ) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, outcome)?;
        writeln!(writer)
    }
}
