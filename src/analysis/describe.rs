//! Descriptive statistics for the numeric columns of a transaction table.

use crate::error::AnalysisError;
use crate::models::TransactionRecord;
use serde::Serialize;

/// Summary of one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    pub column: &'static str,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; undefined below two values.
    pub std: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

type Extractor = fn(&TransactionRecord) -> f64;

const NUMERIC_COLUMNS: [(&str, Extractor); 6] = [
    ("Quantity", |r| f64::from(r.quantity)),
    ("Unit_Price", |r| r.unit_price),
    ("Total_Sales", |r| r.total_sales),
    ("Discount_Percent", |r| f64::from(r.discount_percent)),
    ("Discount_Amount", |r| r.discount_amount),
    ("Final_Price", |r| r.final_price),
];

/// Count, mean, spread, and quartiles for each numeric column.
pub fn describe(records: &[TransactionRecord]) -> Result<Vec<ColumnStats>, AnalysisError> {
    if records.is_empty() {
        return Err(AnalysisError::EmptyDataset);
    }

    Ok(NUMERIC_COLUMNS
        .iter()
        .map(|(column, extract)| column_stats(*column, records.iter().map(extract).collect()))
        .collect())
}

fn column_stats(column: &'static str, mut values: Vec<f64>) -> ColumnStats {
    values.sort_by(f64::total_cmp);

    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    let std = (count > 1).then(|| {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (count - 1) as f64).sqrt()
    });

    ColumnStats {
        column,
        count,
        mean,
        std,
        min: values[0],
        q25: quantile(&values, 0.25),
        median: quantile(&values, 0.5),
        q75: quantile(&values, 0.75),
        max: values[count - 1],
    }
}

/// Linearly interpolated quantile of sorted, non-empty data.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}
