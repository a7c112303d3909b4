//! Typed errors for the data and analysis layers.
//!
//! Application-level plumbing uses `anyhow`; these are the failures that
//! callers may want to match on.

use thiserror::Error;

/// Errors raised while reading a transaction table.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// A column the pipeline depends on is absent from the header row.
    #[error("missing required column '{0}'")]
    MissingColumn(String),

    /// A row could not be parsed into a transaction record.
    #[error("malformed row at line {line}: {source}")]
    MalformedRow {
        line: usize,
        #[source]
        source: csv::Error,
    },
}

/// Arithmetic edge cases that must never leak into a report as NaN or infinity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// Aggregation was requested over a table with no transactions.
    #[error("no transactions to analyze")]
    EmptyDataset,

    /// Growth was requested against a base year with no revenue.
    #[error("cannot compute growth: base year {year} has zero revenue")]
    ZeroBaseRevenue { year: i32 },
}
