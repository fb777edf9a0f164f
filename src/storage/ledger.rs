//! Ledger repository for CSV storage
//!
//! Owns the ledger file and the in-memory sequence loaded from it. Every
//! mutation rewrites the whole file atomically and only updates memory once
//! the write has succeeded.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{ExpenseId, ExpenseRecord, Ledger, LedgerEntry, Money, RawRow, LEDGER_COLUMNS};
use crate::validation::classify_row;

use super::file_io::{read_csv, write_csv_atomic, CsvContents, CsvRow};

/// Outcome of checking the ledger file header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStatus {
    /// The file did not exist and was created with a header only
    Created,
    /// The header was wrong and has been rewritten
    Repaired { rows_preserved: usize },
    /// The header already matched
    Valid,
}

/// Repository for the ledger file
pub struct LedgerStore {
    path: PathBuf,
    ledger: Ledger,
}

impl LedgerStore {
    /// Create a store for the given file; nothing is read until [`load`](Self::load)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ledger: Ledger::default(),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The in-memory sequence as of the last load or mutation
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn len(&self) -> usize {
        self.ledger.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    /// Resolve an identifier to its current position
    pub fn position_of(&self, id: ExpenseId) -> Option<usize> {
        self.ledger.position_of(id)
    }

    /// Load the ledger from disk
    ///
    /// A missing file is an empty ledger. A wrong header is repaired on disk
    /// before returning, keeping every data row.
    pub fn load(&mut self) -> LedgerResult<&Ledger> {
        let entries = match self.read_repairing()? {
            Some((contents, _)) => self.classify(contents),
            None => Vec::new(),
        };

        debug!(path = %self.path.display(), rows = entries.len(), "Loaded ledger");
        self.ledger = Ledger::new(entries);
        Ok(&self.ledger)
    }

    /// Check the header on its own, creating a header-only file if needed
    ///
    /// Running this twice leaves the file byte-for-byte the same.
    pub fn repair_header(&mut self) -> LedgerResult<HeaderStatus> {
        match self.read_repairing()? {
            Some((_, status)) => Ok(status),
            None => {
                write_csv_atomic(&self.path, &LEDGER_COLUMNS, Vec::<Vec<String>>::new())?;
                info!(path = %self.path.display(), "Created ledger file");
                Ok(HeaderStatus::Created)
            }
        }
    }

    /// Append a record, re-reading the file first and rewriting it whole
    ///
    /// Creates the file (header first) if it does not exist.
    pub fn append(&mut self, record: ExpenseRecord) -> LedgerResult<ExpenseId> {
        let mut entries = match self.read_repairing()? {
            Some((contents, _)) => self.classify(contents),
            None => Vec::new(),
        };
        let id = record.id();
        entries.push(LedgerEntry::Record(record));

        self.persist(&entries)?;
        info!(path = %self.path.display(), %id, rows = entries.len(), "Appended expense");
        self.ledger = Ledger::new(entries);
        Ok(id)
    }

    /// Overwrite the entry at `index` and rewrite the file
    ///
    /// The replacement keeps the identifier of the entry it replaces.
    pub fn replace_at(&mut self, index: usize, record: ExpenseRecord) -> LedgerResult<ExpenseId> {
        let mut entries = self.entries_for_mutation(index)?;
        let id = entries[index].id();
        entries[index] = LedgerEntry::Record(record.with_id(id));

        self.persist(&entries)?;
        info!(path = %self.path.display(), index, %id, "Replaced expense");
        self.ledger = Ledger::new(entries);
        Ok(id)
    }

    /// Remove the entry at `index` and rewrite the file
    pub fn delete_at(&mut self, index: usize) -> LedgerResult<LedgerEntry> {
        let mut entries = self.entries_for_mutation(index)?;
        let removed = entries.remove(index);

        self.persist(&entries)?;
        info!(path = %self.path.display(), index, id = %removed.id(), "Deleted expense");
        self.ledger = Ledger::new(entries);
        Ok(removed)
    }

    /// Overwrite the entry with the given identifier
    pub fn replace(&mut self, id: ExpenseId, record: ExpenseRecord) -> LedgerResult<ExpenseId> {
        let index = self.resolve(id)?;
        self.replace_at(index, record)
    }

    /// Remove the entry with the given identifier
    pub fn delete(&mut self, id: ExpenseId) -> LedgerResult<LedgerEntry> {
        let index = self.resolve(id)?;
        self.delete_at(index)
    }

    fn resolve(&self, id: ExpenseId) -> LedgerResult<usize> {
        self.position_of(id)
            .ok_or_else(|| LedgerError::expense_not_found(id.to_string()))
    }

    /// Validate a position and the presence of the backing file
    fn entries_for_mutation(&self, index: usize) -> LedgerResult<Vec<LedgerEntry>> {
        if index >= self.ledger.len() {
            return Err(LedgerError::OutOfRange {
                index,
                len: self.ledger.len(),
            });
        }

        if !self.path.exists() {
            return Err(LedgerError::Storage(format!(
                "Ledger file not found: {}",
                self.path.display()
            )));
        }

        Ok(self.ledger.clone().into_entries())
    }

    fn persist(&self, entries: &[LedgerEntry]) -> LedgerResult<()> {
        write_csv_atomic(
            &self.path,
            &LEDGER_COLUMNS,
            entries.iter().map(LedgerEntry::to_bytes),
        )
    }

    /// Read the file, fixing the header on disk if it is wrong
    fn read_repairing(&self) -> LedgerResult<Option<(CsvContents, HeaderStatus)>> {
        let Some(mut contents) = read_csv(&self.path)? else {
            return Ok(None);
        };

        if header_matches(&contents.header.fields) {
            return Ok(Some((contents, HeaderStatus::Valid)));
        }

        // A file that never had a header starts with a data row; keep it
        if looks_like_data(&contents.header.fields) {
            let mut first = std::mem::take(&mut contents.header);
            first.line = Some(1);
            contents.rows.insert(0, first);
        }

        write_csv_atomic(
            &self.path,
            &LEDGER_COLUMNS,
            contents.rows.iter().map(CsvRow::bytes),
        )?;

        let rows_preserved = contents.rows.len();
        info!(path = %self.path.display(), rows_preserved, "Repaired ledger header");

        contents.header.fields = LEDGER_COLUMNS.iter().map(|c| c.to_string()).collect();
        contents.header.raw = None;
        Ok(Some((contents, HeaderStatus::Repaired { rows_preserved })))
    }

    /// Classify rows, keeping identifiers of entries that are unchanged in memory
    fn classify(&self, contents: CsvContents) -> Vec<LedgerEntry> {
        contents
            .rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                let known = self
                    .ledger
                    .get(i)
                    .filter(|existing| existing.to_bytes() == row.bytes())
                    .map(LedgerEntry::id);
                let entry = match row.raw {
                    Some(raw) => LedgerEntry::Unparsed(RawRow::undecodable(row.fields, raw, row.line)),
                    None => classify_row(row.fields, row.line),
                };
                match known {
                    Some(id) => entry.with_id(id),
                    None => entry,
                }
            })
            .collect()
    }
}

fn header_matches(header: &[String]) -> bool {
    header.len() == LEDGER_COLUMNS.len()
        && header.iter().zip(LEDGER_COLUMNS).all(|(a, b)| a == b)
}

/// A first row whose last field is an amount is data, not a header
fn looks_like_data(first_row: &[String]) -> bool {
    first_row
        .last()
        .is_some_and(|last| Money::parse(last).is_ok())
}
