//! Expense service
//!
//! Business logic on top of [`LedgerStore`]: every mutation validates its
//! input first and only then touches the file.

use chrono::NaiveDate;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{ExpenseId, ExpenseRecord, Ledger, LedgerEntry};
use crate::storage::{HeaderStatus, LedgerStore};
use crate::validation::{validate, ExpenseDraft};

/// Service for expense management
pub struct ExpenseService<'a> {
    store: &'a mut LedgerStore,
}

/// Fields to change on an existing entry; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseEdit {
    pub date: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub amount: Option<String>,
}

impl ExpenseEdit {
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.name.is_none() && self.category.is_none() && self.amount.is_none()
    }

    /// Merge over an entry's current fields
    ///
    /// Unparsed rows contribute whatever fields they have, so an edit can
    /// turn a broken row back into a record.
    pub fn apply_to(&self, entry: &LedgerEntry) -> ExpenseDraft {
        let mut draft = ExpenseDraft::from_fields(&entry.display_fields());
        if let Some(date) = &self.date {
            draft.date = Some(date.clone());
        }
        if let Some(name) = &self.name {
            draft.name = name.clone();
        }
        if let Some(category) = &self.category {
            draft.category = category.clone();
        }
        if let Some(amount) = &self.amount {
            draft.amount = amount.clone();
        }
        draft
    }
}

impl<'a> ExpenseService<'a> {
    pub fn new(store: &'a mut LedgerStore) -> Self {
        Self { store }
    }

    /// Load the ledger from disk
    pub fn list(&mut self) -> LedgerResult<&Ledger> {
        self.store.load()
    }

    /// Entry at a position of the current ledger
    pub fn get(&self, index: usize) -> LedgerResult<&LedgerEntry> {
        self.store.ledger().get(index).ok_or(LedgerError::OutOfRange {
            index,
            len: self.store.len(),
        })
    }

    /// Validate a draft and append it; a missing date becomes `today`
    pub fn add(&mut self, draft: &ExpenseDraft, today: NaiveDate) -> LedgerResult<ExpenseId> {
        let record = ExpenseRecord::from_valid(validate(draft)?, today);
        self.store.append(record)
    }

    /// Validate a draft and overwrite the entry at `index`
    pub fn update_at(
        &mut self,
        index: usize,
        draft: &ExpenseDraft,
        today: NaiveDate,
    ) -> LedgerResult<ExpenseId> {
        let record = ExpenseRecord::from_valid(validate(draft)?, today);
        self.store.replace_at(index, record)
    }

    /// Merge an edit into the entry at `index` and save the result
    pub fn edit_at(
        &mut self,
        index: usize,
        edit: &ExpenseEdit,
        today: NaiveDate,
    ) -> LedgerResult<ExpenseId> {
        let draft = edit.apply_to(self.get(index)?);
        self.update_at(index, &draft, today)
    }

    /// Check the file header, repairing it on disk if needed
    pub fn check_header(&mut self) -> LedgerResult<HeaderStatus> {
        self.store.repair_header()
    }

    pub fn remove_at(&mut self, index: usize) -> LedgerResult<LedgerEntry> {
        self.store.delete_at(index)
    }

    /// Validate a draft and overwrite the entry with the given identifier
    pub fn update(
        &mut self,
        id: ExpenseId,
        draft: &ExpenseDraft,
        today: NaiveDate,
    ) -> LedgerResult<ExpenseId> {
        let record = ExpenseRecord::from_valid(validate(draft)?, today);
        self.store.replace(id, record)
    }

    pub fn remove(&mut self, id: ExpenseId) -> LedgerResult<LedgerEntry> {
        self.store.delete(id)
    }
}
