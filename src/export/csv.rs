//! CSV export of the report model
//!
//! The four parts of the report are written one after another as blocks,
//! each introduced by a `# Title` line and separated by a blank line.
//! Amounts are written as decimals here, not cents.

use std::io::Write;

use super::{export_err, ReportRenderer};
use crate::error::LedgerResult;
use crate::reports::ReportModel;

pub const DATA_SHEET_TITLE: &str = "Expense Data";
pub const SUMMARY_TITLE: &str = "Summary";

/// Writes the report as sectioned CSV
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvWorkbookRenderer;

impl ReportRenderer for CsvWorkbookRenderer {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn render(&self, report: &ReportModel, writer: &mut dyn Write) -> LedgerResult<()> {
        let mut sections: Vec<(String, Vec<Vec<String>>)> = Vec::with_capacity(4);

        let mut data = vec![report.data_table.header.clone()];
        data.extend(report.data_table.rows.iter().cloned());
        sections.push((DATA_SHEET_TITLE.to_string(), data));

        let mut summary = vec![vec!["Label".to_string(), "Amount".to_string()]];
        summary.extend(
            report
                .summary
                .items
                .iter()
                .map(|i| vec![i.label.clone(), i.amount.to_decimal_string()]),
        );
        sections.push((SUMMARY_TITLE.to_string(), summary));

        let mut pie = vec![vec![
            "Label".to_string(),
            "Amount".to_string(),
            "Percentage".to_string(),
            "Highlight".to_string(),
        ]];
        pie.extend(report.category_chart.slices.iter().map(|s| {
            vec![
                s.label.clone(),
                s.amount.to_decimal_string(),
                format!("{:.1}", s.percentage),
                s.highlight.to_string(),
            ]
        }));
        sections.push((report.category_chart.title.clone(), pie));

        let mut bars = vec![vec!["Month".to_string(), "Amount".to_string()]];
        bars.extend(
            report
                .monthly_chart
                .points
                .iter()
                .map(|p| vec![p.month.to_string(), p.total.to_decimal_string()]),
        );
        sections.push((report.monthly_chart.title.clone(), bars));

        for (i, (title, rows)) in sections.iter().enumerate() {
            if i > 0 {
                writeln!(writer).map_err(export_err)?;
            }
            writeln!(writer, "# {}", title).map_err(export_err)?;

            let mut csv_writer = csv::WriterBuilder::new()
                .flexible(true)
                .terminator(csv::Terminator::Any(b'\n'))
                .from_writer(&mut *writer);
            for row in rows {
                csv_writer.write_record(row).map_err(export_err)?;
            }
            csv_writer.flush().map_err(export_err)?;
        }

        Ok(())
    }
}
