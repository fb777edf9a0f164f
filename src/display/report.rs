//! Report formatting utilities for terminal output

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::Money;
use crate::reports::{ReportModel, REMAINING_BUDGET_LABEL};

const BAR_WIDTH: usize = 20;

#[derive(Tabled)]
struct SliceRow {
    #[tabled(rename = "Category")]
    label: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "")]
    bar: String,
}

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Spent")]
    total: String,
}

/// Format the budget summary, category breakdown and monthly totals
pub fn format_report(report: &ReportModel, symbol: &str) -> String {
    let mut output = String::new();

    for item in &report.summary.items {
        let amount = if item.label == REMAINING_BUDGET_LABEL && report.summary.over_budget {
            format!("{} (over budget)", item.amount.format_with_symbol(symbol))
        } else {
            item.amount.format_with_symbol(symbol)
        };
        output.push_str(&format!("{:<18}{:>14}\n", item.label, amount));
    }
    output.push('\n');

    let slices = &report.category_chart.slices;
    let max = slices.iter().map(|s| s.amount).max().unwrap_or_else(Money::zero);
    let rows = slices.iter().map(|s| SliceRow {
        label: if s.highlight {
            format!("{} *", s.label)
        } else {
            s.label.clone()
        },
        amount: s.amount.format_with_symbol(symbol),
        share: format_percentage(s.percentage),
        bar: format_bar(s.amount.as_f64(), max.as_f64(), BAR_WIDTH),
    });
    output.push_str(&report.category_chart.title);
    output.push('\n');
    output.push_str(
        &Table::new(rows)
            .with(Style::psql())
            .with(Modify::new(Columns::new(1..3)).with(Alignment::right()))
            .to_string(),
    );
    output.push('\n');

    if !report.monthly_chart.points.is_empty() {
        let months = report.monthly_chart.points.iter().map(|p| MonthRow {
            month: p.month.to_string(),
            total: p.total.format_with_symbol(symbol),
        });
        output.push('\n');
        output.push_str(&report.monthly_chart.title);
        output.push('\n');
        output.push_str(
            &Table::new(months)
                .with(Style::psql())
                .with(Modify::new(Columns::single(1)).with(Alignment::right()))
                .to_string(),
        );
        output.push('\n');
    }

    for warning in &report.warnings {
        output.push_str(&format!("\nwarning: {}", warning));
    }
    if !report.warnings.is_empty() {
        output.push('\n');
    }

    output
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
