//! JSON export of the report model

use std::io::Write;

use super::{export_err, ReportRenderer};
use crate::error::LedgerResult;
use crate::reports::ReportModel;

/// Writes the report as a single JSON document
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer {
    pretty: bool,
}

impl JsonRenderer {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl ReportRenderer for JsonRenderer {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn render(&self, report: &ReportModel, writer: &mut dyn Write) -> LedgerResult<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, report).map_err(export_err)?;
        } else {
            serde_json::to_writer(&mut *writer, report).map_err(export_err)?;
        }
        writeln!(writer).map_err(export_err)?;
        Ok(())
    }
}
