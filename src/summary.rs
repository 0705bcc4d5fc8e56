//! The summary document produced for every run.

use serde::Serialize;

use crate::error::ProcessError;

pub const NO_MATCHING_COLUMNS: &str =
    "No 'Sales', 'Quantity', or 'Value' columns found for processing.";

/// Metrics for a table with both `Sales` and `Quantity` columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesSummary {
    pub total_revenue: f64,
    pub average_sales_per_unit: f64,
    pub unique_categories: usize,
    pub processed_records: usize,
}

/// Metrics for a table that only has a `Value` column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueSummary {
    pub total_value: f64,
    pub average_value: f64,
    pub count_entries_with_value: usize,
}

/// Exactly one of these is emitted per run.
///
/// Serialized untagged, so callers tell the variants apart by their keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Summary {
    Sales(SalesSummary),
    Value(ValueSummary),
    Message { message: String },
    Error { error: String },
}

impl Summary {
    pub fn no_matching_columns() -> Self {
        Summary::Message {
            message: NO_MATCHING_COLUMNS.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Summary::Error { .. })
    }
}

impl From<ProcessError> for Summary {
    fn from(err: ProcessError) -> Self {
        Summary::Error {
            error: err.to_string(),
        }
    }
}

impl From<Result<Summary, ProcessError>> for Summary {
    fn from(outcome: Result<Summary, ProcessError>) -> Self {
        outcome.unwrap_or_else(Summary::from)
    }
}
