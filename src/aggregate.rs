//! Branch selection and the per-branch aggregations.
//!
//! Branches are tried in [`BRANCHES`] order and the first whose predicate
//! holds for the table's [`ColumnSet`] produces the summary.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::coerce::{coerce, parse_numeric};
use crate::error::ProcessError;
use crate::summary::{SalesSummary, Summary, ValueSummary};
use crate::table::{ColumnSet, Table, is_missing};

pub const SALES: &str = "Sales";
pub const QUANTITY: &str = "Quantity";
pub const CATEGORY: &str = "Category";
pub const VALUE: &str = "Value";

/// A predicate over the column set paired with the aggregation it selects.
pub struct Branch {
    pub name: &'static str,
    pub applies: fn(&ColumnSet) -> bool,
    pub run: fn(&Table) -> Result<Summary, ProcessError>,
}

/// Ordered branch list. The last entry always applies.
pub static BRANCHES: &[Branch] = &[
    Branch {
        name: "sales",
        applies: |cols| cols.contains(SALES) && cols.contains(QUANTITY),
        run: |table| summarize_sales(table).map(Summary::Sales),
    },
    Branch {
        name: "value",
        applies: |cols| cols.contains(VALUE),
        run: |table| summarize_value(table).map(Summary::Value),
    },
    Branch {
        name: "no_match",
        applies: |_| true,
        run: |_| Ok(Summary::no_matching_columns()),
    },
];

/// Returns the first branch that applies to `columns`.
pub fn select_branch(columns: &ColumnSet) -> &'static Branch {
    BRANCHES
        .iter()
        .find(|b| (b.applies)(columns))
        .unwrap_or(&BRANCHES[BRANCHES.len() - 1])
}

/// Runs the branch selected by the table's columns.
pub fn summarize(table: &Table) -> Result<Summary, ProcessError> {
    let branch = select_branch(table.columns());
    info!(branch = branch.name, rows = table.row_count(), "Aggregating");
    (branch.run)(table)
}

/// Revenue, sales-per-unit and category metrics over `Sales` and `Quantity`.
pub fn summarize_sales(table: &Table) -> Result<SalesSummary, ProcessError> {
    let sales: Vec<f64> = coerced_column(table, SALES)?;
    let quantity: Vec<f64> = coerced_column(table, QUANTITY)?;

    let total_revenue = sum(sales.iter().zip(&quantity).map(|(s, q)| s * q));
    let total_quantity = sum(quantity.iter().copied());
    let total_sales = sum(sales.iter().copied());

    let average_sales_per_unit = if total_quantity == 0.0 {
        0.0
    } else {
        total_sales / total_quantity
    };

    let unique_categories = match table.column(CATEGORY) {
        Some(cells) => cells
            .flatten()
            .filter(|c| !is_missing(c))
            .collect::<HashSet<_>>()
            .len(),
        None => 0,
    };

    debug!(total_quantity, total_sales, "Sales totals");

    Ok(SalesSummary {
        total_revenue: finite("total_revenue", total_revenue)?,
        average_sales_per_unit: finite("average_sales_per_unit", average_sales_per_unit)?,
        unique_categories,
        processed_records: table.row_count(),
    })
}

/// Total, mean and parseable-entry count over `Value`.
pub fn summarize_value(table: &Table) -> Result<ValueSummary, ProcessError> {
    let cells: Vec<Option<f64>> = table
        .column(VALUE)
        .ok_or_else(|| missing_column(VALUE))?
        .map(|c| c.and_then(parse_numeric))
        .collect();

    let count_entries_with_value = cells.iter().filter(|c| c.is_some()).count();
    let total_value = sum(cells.iter().map(|c| c.unwrap_or(0.0)));
    let average_value = if cells.is_empty() {
        0.0
    } else {
        total_value / cells.len() as f64
    };

    Ok(ValueSummary {
        total_value: finite("total_value", total_value)?,
        average_value: finite("average_value", average_value)?,
        count_entries_with_value,
    })
}

/// Sums from positive zero; `Iterator::sum` on no items yields `-0.0`.
fn sum(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0, |acc, x| acc + x)
}

fn coerced_column(table: &Table, name: &str) -> Result<Vec<f64>, ProcessError> {
    Ok(table
        .column(name)
        .ok_or_else(|| missing_column(name))?
        .map(coerce)
        .collect())
}

fn missing_column(name: &str) -> ProcessError {
    ProcessError::unexpected(format!("column '{}' is missing", name))
}

fn finite(metric: &str, value: f64) -> Result<f64, ProcessError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ProcessError::unexpected(format!(
            "numeric overflow while computing '{}'",
            metric
        )))
    }
}
