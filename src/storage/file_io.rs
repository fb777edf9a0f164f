//! File I/O utilities with atomic writes
//!
//! Provides CSV read/write helpers that won't corrupt data on failure.

use std::fs::{self, File};
use std::path::Path;

use crate::error::LedgerError;

/// One row as read from disk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvRow {
    /// Line number in the file, when known
    pub line: Option<u64>,
    /// Field text; invalid UTF-8 is replaced with U+FFFD
    pub fields: Vec<String>,
    /// Original field bytes, kept only when some field is not valid UTF-8
    pub raw: Option<Vec<Vec<u8>>>,
}

impl CsvRow {
    fn from_byte_record(record: &csv::ByteRecord) -> Self {
        let line = record.position().map(|p| p.line());
        let decoded: Result<Vec<String>, _> = record
            .iter()
            .map(|field| String::from_utf8(field.to_vec()))
            .collect();

        match decoded {
            Ok(fields) => Self {
                line,
                fields,
                raw: None,
            },
            Err(_) => Self {
                line,
                fields: record
                    .iter()
                    .map(|field| String::from_utf8_lossy(field).into_owned())
                    .collect(),
                raw: Some(record.iter().map(<[u8]>::to_vec).collect()),
            },
        }
    }

    /// The bytes to write back for this row
    pub fn bytes(&self) -> Vec<Vec<u8>> {
        match &self.raw {
            Some(raw) => raw.clone(),
            None => self.fields.iter().map(|f| f.clone().into_bytes()).collect(),
        }
    }
}

/// Raw contents of a CSV file: first row plus the remaining rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvContents {
    /// First row, empty for an empty file
    pub header: CsvRow,
    pub rows: Vec<CsvRow>,
}

/// Read a CSV file without interpreting it, returning None if the file doesn't exist
///
/// Rows may have differing field counts. Fields that are not valid UTF-8 do
/// not fail the read; see [`CsvRow::raw`].
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Option<CsvContents>, LedgerError> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(None);
    }

    let file = File::open(path)
        .map_err(|e| LedgerError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut contents = CsvContents::default();
    for (i, result) in reader.byte_records().enumerate() {
        let record = result.map_err(|e| {
            LedgerError::Storage(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        let row = CsvRow::from_byte_record(&record);

        if i == 0 {
            contents.header = row;
        } else {
            contents.rows.push(row);
        }
    }

    Ok(Some(contents))
}

/// Write a header and rows to a CSV file atomically (write to temp, then rename)
///
/// This ensures that the file is either completely written or not modified at all,
/// preventing corruption on crashes or power failures. The parent directory
/// must already exist.
pub fn write_csv_atomic<P, I, R, F>(path: P, header: &[&str], rows: I) -> Result<(), LedgerError>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = F>,
    F: AsRef<[u8]>,
{
    let path = path.as_ref();

    // Create temp file in same directory (important for atomic rename)
    let temp_path = path.with_extension("csv.tmp");

    let result = write_rows(&temp_path, header, rows).and_then(|()| {
        fs::rename(&temp_path, path)
            .map_err(|e| LedgerError::Storage(format!("Failed to rename temp file: {}", e)))
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }

    result
}

fn write_rows<I, R, F>(temp_path: &Path, header: &[&str], rows: I) -> Result<(), LedgerError>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = F>,
    F: AsRef<[u8]>,
{
    let file = File::create(temp_path)
        .map_err(|e| LedgerError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(file);

    let write_err = |e: csv::Error| LedgerError::Storage(format!("Failed to write row: {}", e));

    writer.write_record(header).map_err(write_err)?;
    for row in rows {
        writer.write_record(row).map_err(write_err)?;
    }

    let file = writer
        .into_inner()
        .map_err(|e| LedgerError::Storage(format!("Failed to flush data: {}", e.error())))?;

    // Sync to disk before rename
    file.sync_all()
        .map_err(|e| LedgerError::Storage(format!("Failed to sync data: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_read_nonexistent_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.csv");

        assert!(read_csv(&path).unwrap().is_none());
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.csv");

        write_csv_atomic(
            &path,
            &["A", "B"],
            vec![row(&["1", "two, with comma"]), row(&["3", "say \"hi\""])],
        )
        .unwrap();

        let contents = read_csv(&path).unwrap().unwrap();
        assert_eq!(contents.header.fields, row(&["A", "B"]));
        assert_eq!(contents.rows.len(), 2);
        assert_eq!(contents.rows[0].line, Some(2));
        assert_eq!(contents.rows[0].fields, row(&["1", "two, with comma"]));
        assert_eq!(contents.rows[1].fields, row(&["3", "say \"hi\""]));
        assert!(contents.rows.iter().all(|r| r.raw.is_none()));
    }

    #[test]
    fn test_ragged_rows_survive() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ragged.csv");
        fs::write(&path, "A,B,C\n1,2\n1,2,3,4\n").unwrap();

        let contents = read_csv(&path).unwrap().unwrap();
        assert_eq!(contents.rows[0].fields.len(), 2);
        assert_eq!(contents.rows[1].fields.len(), 4);
    }

    #[test]
    fn test_empty_file_has_empty_header() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.csv");
        fs::write(&path, "").unwrap();

        let contents = read_csv(&path).unwrap().unwrap();
        assert!(contents.header.fields.is_empty());
        assert!(contents.rows.is_empty());
    }

    #[test]
    fn test_atomic_write_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.csv");
        let temp_path = temp_dir.path().join("test.csv.tmp");

        write_csv_atomic(&path, &["A"], vec![row(&["1"])]).unwrap();

        assert!(path.exists());
        assert!(!temp_path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "A\n1\n");
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("test.csv");

        let err = write_csv_atomic(&path, &["A"], Vec::<Vec<String>>::new()).unwrap_err();
        assert!(matches!(err, LedgerError::Storage(_)));
        assert!(!temp_dir.path().join("nested").exists());
    }

    #[test]
    fn test_invalid_utf8_row_is_read_and_written_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("latin1.csv");
        let original = b"A,B\n1,ok\n2,Caf\xE9\n".to_vec();
        fs::write(&path, &original).unwrap();

        let contents = read_csv(&path).unwrap().unwrap();
        assert!(contents.rows[0].raw.is_none());
        assert_eq!(contents.rows[1].fields, row(&["2", "Caf\u{FFFD}"]));
        assert_eq!(contents.rows[1].raw, Some(vec![b"2".to_vec(), b"Caf\xE9".to_vec()]));

        write_csv_atomic(&path, &["A", "B"], contents.rows.iter().map(CsvRow::bytes)).unwrap();
        assert_eq!(fs::read(&path).unwrap(), original);
    }

    #[test]
    fn test_failed_write_leaves_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.csv");
        fs::write(&path, "A\n1\n").unwrap();

        // A directory squatting on the temp path makes File::create fail
        fs::create_dir(temp_dir.path().join("test.csv.tmp")).unwrap();

        assert!(write_csv_atomic(&path, &["A"], vec![row(&["2"])]).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "A\n1\n");
    }
}
