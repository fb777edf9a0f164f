//! Ledger Summary
//!
//! Derives category totals, monthly totals and the budget remainder from a
//! ledger snapshot. Rows whose amount cannot be read are skipped with a
//! warning instead of failing the whole summary.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{Ledger, LedgerEntry, Money, Month, DATE_FORMAT};

/// Label of the synthetic chart slice for unspent budget
pub const REMAINING_BUDGET_LABEL: &str = "Remaining Budget";

/// Label used for stored rows with a blank category
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Spending for one category label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub label: String,
    pub total: Money,
    /// Number of rows contributing to the total
    pub count: usize,
}

/// Spending for one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    pub month: Month,
    pub total: Money,
}

/// Why a row was left out of the totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The amount text is not a number
    Unreadable,
    /// Adding the amount would overflow a total
    Overflow,
}

/// A stored row left out of the totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowWarning {
    /// Position in the ledger
    pub position: usize,
    /// Line in the ledger file, when known
    pub line: Option<u64>,
    /// The amount text as stored
    pub amount: String,
    pub reason: SkipReason,
}

impl fmt::Display for RowWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Skipped row {}", self.position)?;
        if let Some(line) = self.line {
            write!(f, " (line {})", line)?;
        }
        match self.reason {
            SkipReason::Unreadable => write!(f, ": amount '{}' is not a number", self.amount),
            SkipReason::Overflow => write!(f, ": amount '{}' is too large to total", self.amount),
        }
    }
}

/// Aggregated view of a ledger against a budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub budget: Money,
    /// Totals in first-seen order; never includes the remaining-budget slice
    pub category_totals: Vec<CategoryTotal>,
    pub total_spent: Money,
    /// Budget minus total spent; negative when over budget
    pub remaining_budget: Money,
    /// Totals in chronological order
    pub monthly_totals: Vec<MonthlyTotal>,
    pub warnings: Vec<RowWarning>,
}

/// The fields aggregation reads from an entry
struct EntryView<'a> {
    category: &'a str,
    amount: Result<Money, &'a str>,
    amount_text: String,
    date: Option<NaiveDate>,
    line: Option<u64>,
}

impl<'a> EntryView<'a> {
    fn of(entry: &'a LedgerEntry) -> Self {
        match entry {
            LedgerEntry::Record(record) => Self {
                category: record.category().as_str(),
                amount: Ok(record.amount()),
                amount_text: record.amount().to_decimal_string(),
                date: Some(record.date()),
                line: None,
            },
            LedgerEntry::Unparsed(row) => {
                // The remaining-budget label is reserved for the synthetic slice
                let category = match row.category_field().trim() {
                    "" | REMAINING_BUDGET_LABEL => UNCATEGORIZED_LABEL,
                    other => other,
                };
                Self {
                    category,
                    amount: Money::parse(row.amount_field()).map_err(|_| row.amount_field()),
                    amount_text: row.amount_field().to_string(),
                    date: NaiveDate::parse_from_str(row.date_field().trim(), DATE_FORMAT).ok(),
                    line: row.line(),
                }
            }
        }
    }
}

impl LedgerSummary {
    /// Summarize a ledger
    ///
    /// Rows with a missing or unreadable date count toward the month of `today`.
    /// A row whose amount would overflow any running total is skipped as a
    /// whole, so every total stays consistent with the others.
    pub fn compute(ledger: &Ledger, budget: Money, today: NaiveDate) -> Self {
        let mut category_totals: Vec<CategoryTotal> = Vec::new();
        let mut category_index: HashMap<&str, usize> = HashMap::new();
        let mut monthly: BTreeMap<Month, Money> = BTreeMap::new();
        let mut warnings = Vec::new();
        let mut total_spent = Money::zero();
        let mut remaining_budget = budget;

        for (position, entry) in ledger.iter().enumerate() {
            let view = EntryView::of(entry);
            let skip = |reason| {
                warn!(position, line = ?view.line, amount = %view.amount_text, ?reason, "Skipping row");
                RowWarning {
                    position,
                    line: view.line,
                    amount: view.amount_text.clone(),
                    reason,
                }
            };

            let amount = match view.amount {
                Ok(amount) => amount,
                Err(_) => {
                    warnings.push(skip(SkipReason::Unreadable));
                    continue;
                }
            };

            let month = Month::from_date(view.date.unwrap_or(today));
            let existing = category_index.get(view.category).copied();
            let category_total = existing.map_or(Money::zero(), |i| category_totals[i].total);
            let month_total = monthly.get(&month).copied().unwrap_or_default();

            let totals = (
                total_spent.checked_add(amount),
                remaining_budget.checked_sub(amount),
                category_total.checked_add(amount),
                month_total.checked_add(amount),
            );
            let (Some(spent), Some(remaining), Some(category_total), Some(month_total)) = totals
            else {
                warnings.push(skip(SkipReason::Overflow));
                continue;
            };

            total_spent = spent;
            remaining_budget = remaining;
            monthly.insert(month, month_total);

            let index = existing.unwrap_or_else(|| {
                category_index.insert(view.category, category_totals.len());
                category_totals.push(CategoryTotal {
                    label: view.category.to_string(),
                    total: Money::zero(),
                    count: 0,
                });
                category_totals.len() - 1
            });
            category_totals[index].total = category_total;
            category_totals[index].count += 1;
        }

        Self {
            budget,
            category_totals,
            total_spent,
            remaining_budget,
            monthly_totals: monthly
                .into_iter()
                .map(|(month, total)| MonthlyTotal { month, total })
                .collect(),
            warnings,
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.remaining_budget.is_negative()
    }

    /// The synthetic slice, present only while budget remains
    pub fn remaining_slice(&self) -> Option<CategoryTotal> {
        self.remaining_budget.is_positive().then(|| CategoryTotal {
            label: REMAINING_BUDGET_LABEL.to_string(),
            total: self.remaining_budget,
            count: 0,
        })
    }

    /// Category totals for charting, with the remaining-budget slice last
    pub fn chart_totals(&self) -> Vec<CategoryTotal> {
        let mut totals = self.category_totals.clone();
        totals.extend(self.remaining_slice());
        totals
    }

    /// Sum of [`chart_totals`](Self::chart_totals)
    ///
    /// With the remaining slice present this is the budget, otherwise the
    /// total spent; neither needs another addition.
    pub fn chart_sum(&self) -> Money {
        if self.remaining_budget.is_positive() {
            self.budget
        } else {
            self.total_spent
        }
    }
}
