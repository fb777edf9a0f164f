//! Report model handed to renderers
//!
//! A [`ReportModel`] is plain data built from a ledger snapshot and its
//! summary: the expense table, the budget summary block, and the data behind
//! the category pie chart and the monthly bar chart. It performs no I/O.
//! Amounts are [`Money`] values and serialize as integer cents.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::aggregation::{LedgerSummary, REMAINING_BUDGET_LABEL};
use crate::models::{Ledger, LedgerEntry, Money, Month, LEDGER_COLUMNS};

pub const TOTAL_BUDGET_LABEL: &str = "Total Budget";
pub const TOTAL_SPENT_LABEL: &str = "Total Spent";

/// Header plus one row per ledger entry, in ledger order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// One labeled value of the summary block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryItem {
    pub label: String,
    pub amount: Money,
}

/// Total Budget, Total Spent and Remaining Budget, in that order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryBlock {
    pub items: Vec<SummaryItem>,
    /// Set when spending exceeds the budget
    pub over_budget: bool,
}

impl SummaryBlock {
    fn new(summary: &LedgerSummary) -> Self {
        let item = |label: &str, amount| SummaryItem {
            label: label.to_string(),
            amount,
        };
        Self {
            items: vec![
                item(TOTAL_BUDGET_LABEL, summary.budget),
                item(TOTAL_SPENT_LABEL, summary.total_spent),
                item(REMAINING_BUDGET_LABEL, summary.remaining_budget),
            ],
            over_budget: summary.is_over_budget(),
        }
    }

    /// Look up a value by its label
    pub fn get(&self, label: &str) -> Option<Money> {
        self.items.iter().find(|i| i.label == label).map(|i| i.amount)
    }
}

/// One slice of the category chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSlice {
    pub label: String,
    pub amount: Money,
    /// Share of the chart total, 0-100
    pub percentage: f64,
    /// Set only for the remaining-budget slice
    pub highlight: bool,
}

/// Pie chart of spending by category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryChartSpec {
    pub title: String,
    pub slices: Vec<ChartSlice>,
}

impl CategoryChartSpec {
    pub fn labels(&self) -> Vec<&str> {
        self.slices.iter().map(|s| s.label.as_str()).collect()
    }

    pub fn amounts(&self) -> Vec<Money> {
        self.slices.iter().map(|s| s.amount).collect()
    }
}

/// One bar of the monthly chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    pub month: Month,
    pub total: Money,
}

/// Bar chart of spending per month, chronological
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyChartSpec {
    pub title: String,
    pub points: Vec<MonthlyPoint>,
}

/// Everything an external renderer needs to produce a workbook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportModel {
    pub generated_on: NaiveDate,
    pub data_table: DataTable,
    pub summary: SummaryBlock,
    pub category_chart: CategoryChartSpec,
    pub monthly_chart: MonthlyChartSpec,
    /// Rows that were left out of the totals
    pub warnings: Vec<String>,
}

impl ReportModel {
    /// Summarize a ledger and build its report
    pub fn generate(ledger: &Ledger, budget: Money, today: NaiveDate) -> Self {
        let summary = LedgerSummary::compute(ledger, budget, today);
        Self::build(ledger, &summary, today)
    }

    /// Build a report from a ledger and a summary computed from it
    pub fn build(ledger: &Ledger, summary: &LedgerSummary, generated_on: NaiveDate) -> Self {
        let data_table = DataTable {
            header: LEDGER_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: ledger.iter().map(LedgerEntry::display_fields).collect(),
        };

        let chart_totals = summary.chart_totals();
        let chart_sum = summary.chart_sum();
        let slices = chart_totals
            .into_iter()
            .map(|t| ChartSlice {
                percentage: percentage_of(t.total, chart_sum),
                highlight: t.label == REMAINING_BUDGET_LABEL && t.count == 0,
                label: t.label,
                amount: t.total,
            })
            .collect();

        Self {
            generated_on,
            data_table,
            summary: SummaryBlock::new(summary),
            category_chart: CategoryChartSpec {
                title: "Expenses by Category".to_string(),
                slices,
            },
            monthly_chart: MonthlyChartSpec {
                title: "Monthly Spending".to_string(),
                points: summary
                    .monthly_totals
                    .iter()
                    .map(|m| MonthlyPoint {
                        month: m.month,
                        total: m.total,
                    })
                    .collect(),
            },
            warnings: summary.warnings.iter().map(ToString::to_string).collect(),
        }
    }
}

fn percentage_of(part: Money, whole: Money) -> f64 {
    if whole.is_zero() {
        0.0
    } else {
        part.cents() as f64 * 100.0 / whole.cents() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseRecord, RawRow};
    use crate::validation::{validate, ExpenseDraft};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 8, 20).unwrap()
    }

    fn entry(date: &str, name: &str, category: &str, amount: &str) -> LedgerEntry {
        let valid = validate(&ExpenseDraft::new(name, category, amount).with_date(date)).unwrap();
        LedgerEntry::Record(ExpenseRecord::from_valid(valid, today()))
    }

    #[test]
    fn test_empty_ledger_report() {
        let report = ReportModel::generate(&Ledger::default(), Money::from_dollars(2000), today());

        assert!(report.data_table.rows.is_empty());
        assert_eq!(report.data_table.header, LEDGER_COLUMNS);
        assert_eq!(report.category_chart.labels(), vec![REMAINING_BUDGET_LABEL]);
        assert_eq!(report.category_chart.amounts(), vec![Money::from_dollars(2000)]);
        assert!(report.category_chart.slices[0].highlight);
        assert_eq!(report.category_chart.slices[0].percentage, 100.0);
    }

    #[test]
    fn test_report_contents() {
        let ledger = Ledger::new(vec![
            entry("2023-08-01", "Groceries", "Food", "150"),
            entry("2023-08-02", "Rent", "Rent", "1200"),
            entry("2023-07-28", "Pizza", "Food", "50"),
        ]);
        let report = ReportModel::generate(&ledger, Money::from_dollars(2000), today());

        assert_eq!(
            report.data_table.rows[1],
            vec!["2023-08-02", "Rent", "Rent", "1200.00"]
        );
        assert_eq!(report.summary.get(TOTAL_BUDGET_LABEL), Some(Money::from_dollars(2000)));
        assert_eq!(report.summary.get(TOTAL_SPENT_LABEL), Some(Money::from_dollars(1400)));
        assert_eq!(report.summary.get(REMAINING_BUDGET_LABEL), Some(Money::from_dollars(600)));
        assert!(!report.summary.over_budget);

        assert_eq!(
            report.category_chart.labels(),
            vec!["Food", "Rent", REMAINING_BUDGET_LABEL]
        );
        let highlights: Vec<bool> = report.category_chart.slices.iter().map(|s| s.highlight).collect();
        assert_eq!(highlights, vec![false, false, true]);
        assert_eq!(report.category_chart.slices[0].percentage, 10.0);

        let months: Vec<String> = report
            .monthly_chart
            .points
            .iter()
            .map(|p| p.month.to_string())
            .collect();
        assert_eq!(months, vec!["2023-07", "2023-08"]);
        assert_eq!(report.monthly_chart.points[1].total, Money::from_dollars(1350));
    }

    #[test]
    fn test_overspent_summary_is_negative_without_highlight() {
        let ledger = Ledger::new(vec![entry("2023-08-02", "Rent", "Rent", "2100")]);
        let report = ReportModel::generate(&ledger, Money::from_dollars(2000), today());

        assert_eq!(report.summary.get(REMAINING_BUDGET_LABEL), Some(Money::from_dollars(-100)));
        assert!(report.summary.over_budget);
        assert!(report.category_chart.slices.iter().all(|s| !s.highlight));
    }

    #[test]
    fn test_unparsed_rows_appear_in_table_and_warnings() {
        let ledger = Ledger::new(vec![
            entry("2023-08-01", "Groceries", "Food", "150"),
            LedgerEntry::Unparsed(RawRow::new(
                vec!["Coffee".into(), "Food".into(), "n/a".into()],
                Some(3),
                "row has no date column",
            )),
        ]);
        let report = ReportModel::generate(&ledger, Money::from_dollars(200), today());

        assert_eq!(report.data_table.rows[1], vec!["", "Coffee", "Food", "n/a"]);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.summary.get(TOTAL_SPENT_LABEL), Some(Money::from_dollars(150)));
    }

    #[test]
    fn test_huge_amounts_build_a_report() {
        let ledger = Ledger::new(vec![
            entry("2023-08-01", "Big", "Other", "90000000000000000"),
            entry("2023-08-02", "Bigger", "Other", "90000000000000000"),
        ]);
        let report = ReportModel::generate(&ledger, Money::from_dollars(2000), today());

        assert_eq!(report.data_table.rows.len(), 2);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.summary.over_budget);
        assert_eq!(report.category_chart.labels(), vec!["Other"]);
        assert_eq!(report.category_chart.slices[0].percentage, 100.0);
    }

    #[test]
    fn test_model_survives_serialization() {
        let ledger = Ledger::new(vec![entry("2023-08-01", "Groceries", "Food", "150")]);
        let report = ReportModel::generate(&ledger, Money::from_dollars(2000), today());

        let json = serde_json::to_string(&report).unwrap();
        let back: ReportModel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
