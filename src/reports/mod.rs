//! Reports module for the expense ledger
//!
//! `aggregation` derives totals from a ledger snapshot; `model` turns a
//! snapshot and its totals into the report handed to renderers.

pub mod aggregation;
pub mod model;

pub use aggregation::{
    CategoryTotal, LedgerSummary, MonthlyTotal, RowWarning, SkipReason, REMAINING_BUDGET_LABEL,
    UNCATEGORIZED_LABEL,
};
pub use model::{
    CategoryChartSpec, ChartSlice, DataTable, MonthlyChartSpec, MonthlyPoint, ReportModel,
    SummaryBlock, SummaryItem, TOTAL_BUDGET_LABEL, TOTAL_SPENT_LABEL,
};
