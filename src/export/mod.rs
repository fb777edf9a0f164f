//! Export module for the expense ledger
//!
//! Renders a [`ReportModel`] in one of several formats:
//! - JSON: machine-readable report for downstream chart tooling
//! - YAML: human-readable report
//! - CSV: one file holding the data sheet, summary block and chart series

pub mod csv;
pub mod json;
pub mod yaml;

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::reports::ReportModel;

pub use self::csv::CsvWorkbookRenderer;
pub use json::JsonRenderer;
pub use yaml::YamlRenderer;

/// Something that can write a report to a byte sink
pub trait ReportRenderer {
    /// File extension for this format, without the dot
    fn extension(&self) -> &'static str;

    /// Write the report
    fn render(&self, report: &ReportModel, writer: &mut dyn Write) -> LedgerResult<()>;
}

/// Supported export formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Yaml,
    Csv,
}

impl ExportFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// Pick the renderer for a format
pub fn renderer_for(format: ExportFormat, pretty: bool) -> Box<dyn ReportRenderer> {
    match format {
        ExportFormat::Json => Box::new(JsonRenderer::new(pretty)),
        ExportFormat::Yaml => Box::new(YamlRenderer),
        ExportFormat::Csv => Box::new(CsvWorkbookRenderer),
    }
}

/// Render a report into a file, replacing it only once rendering succeeded
pub fn export_report(
    report: &ReportModel,
    format: ExportFormat,
    pretty: bool,
    path: &Path,
) -> LedgerResult<()> {
    let renderer = renderer_for(format, pretty);
    write_report(&*renderer, report, path)?;
    info!(path = %path.display(), %format, "Report exported");
    Ok(())
}

/// Render into a sibling temp file, sync it, then rename over `path`
pub fn write_report(
    renderer: &dyn ReportRenderer,
    report: &ReportModel,
    path: &Path,
) -> LedgerResult<()> {
    let temp_path = temp_path_for(path)?;

    let result = render_to(renderer, report, &temp_path).and_then(|()| {
        fs::rename(&temp_path, path)
            .map_err(|e| LedgerError::Export(format!("Failed to rename temp file: {}", e)))
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }

    result
}

fn render_to(renderer: &dyn ReportRenderer, report: &ReportModel, temp_path: &Path) -> LedgerResult<()> {
    let file = File::create(temp_path).map_err(|e| {
        LedgerError::Export(format!("Failed to create {}: {}", temp_path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);

    renderer.render(report, &mut writer)?;

    let file = writer
        .into_inner()
        .map_err(|e| LedgerError::Export(format!("Failed to flush data: {}", e.error())))?;
    file.sync_all().map_err(export_err)?;
    Ok(())
}

fn temp_path_for(path: &Path) -> LedgerResult<PathBuf> {
    let name = path.file_name().ok_or_else(|| {
        LedgerError::Export(format!("{} is not a file path", path.display()))
    })?;
    let mut temp_name = OsString::from(name);
    temp_name.push(".tmp");
    Ok(path.with_file_name(temp_name))
}

pub(crate) fn export_err(e: impl std::fmt::Display) -> LedgerError {
    LedgerError::Export(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ledger, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_path() {
        assert_eq!(ExportFormat::from_path(Path::new("r.json")), Some(ExportFormat::Json));
        assert_eq!(ExportFormat::from_path(Path::new("r.YML")), Some(ExportFormat::Yaml));
        assert_eq!(ExportFormat::from_path(Path::new("r.csv")), Some(ExportFormat::Csv));
        assert_eq!(ExportFormat::from_path(Path::new("r.xlsx")), None);
        assert_eq!(ExportFormat::from_path(Path::new("report")), None);
    }

    #[test]
    fn test_renderer_extensions() {
        assert_eq!(renderer_for(ExportFormat::Json, false).extension(), "json");
        assert_eq!(renderer_for(ExportFormat::Yaml, false).extension(), "yaml");
        assert_eq!(renderer_for(ExportFormat::Csv, false).extension(), "csv");
    }

    #[test]
    fn test_export_report_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.json");
        let today = NaiveDate::from_ymd_opt(2023, 8, 20).unwrap();
        let report = ReportModel::generate(&Ledger::default(), Money::from_dollars(100), today);

        export_report(&report, ExportFormat::Json, false, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("Remaining Budget"));
    }

    struct FailingRenderer;

    impl ReportRenderer for FailingRenderer {
        fn extension(&self) -> &'static str {
            "txt"
        }

        fn render(&self, _report: &ReportModel, writer: &mut dyn Write) -> LedgerResult<()> {
            writer.write_all(b"partial").map_err(export_err)?;
            Err(LedgerError::Export("renderer gave up".into()))
        }
    }

    #[test]
    fn test_failed_render_keeps_previous_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.txt");
        std::fs::write(&path, "previous report").unwrap();
        let today = NaiveDate::from_ymd_opt(2023, 8, 20).unwrap();
        let report = ReportModel::generate(&Ledger::default(), Money::from_dollars(100), today);

        let err = write_report(&FailingRenderer, &report, &path).unwrap_err();
        assert!(matches!(err, LedgerError::Export(_)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "previous report");
        assert!(!temp_dir.path().join("report.txt.tmp").exists());
    }

    #[test]
    fn test_failed_render_creates_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.txt");
        let today = NaiveDate::from_ymd_opt(2023, 8, 20).unwrap();
        let report = ReportModel::generate(&Ledger::default(), Money::from_dollars(100), today);

        assert!(write_report(&FailingRenderer, &report, &path).is_err());
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("report.json");
        let today = NaiveDate::from_ymd_opt(2023, 8, 20).unwrap();
        let report = ReportModel::generate(&Ledger::default(), Money::from_dollars(100), today);

        let err = export_report(&report, ExportFormat::Json, false, &path).unwrap_err();
        assert!(matches!(err, LedgerError::Export(_)));
    }
}
