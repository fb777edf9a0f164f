//! YAML export of the report model

use std::io::Write;

use super::{export_err, ReportRenderer};
use crate::error::LedgerResult;
use crate::reports::ReportModel;

/// Writes the report as a commented YAML document
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlRenderer;

impl ReportRenderer for YamlRenderer {
    fn extension(&self) -> &'static str {
        "yaml"
    }

    fn render(&self, report: &ReportModel, writer: &mut dyn Write) -> LedgerResult<()> {
        writeln!(writer, "# Expense Ledger Report").map_err(export_err)?;
        writeln!(writer, "# Generated: {}", report.generated_on).map_err(export_err)?;
        writeln!(writer, "# Amounts are in cents").map_err(export_err)?;
        writeln!(writer).map_err(export_err)?;

        serde_yaml::to_writer(&mut *writer, report).map_err(export_err)?;
        Ok(())
    }
}
