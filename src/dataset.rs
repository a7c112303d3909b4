//! Reading and writing the flat transaction table and derived tables.

use crate::error::DatasetError;
use crate::models::TransactionRecord;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Columns of the transaction table with the type each one holds.
pub const COLUMNS: [(&str, &str); 14] = [
    ("Order_ID", "string"),
    ("Date", "date"),
    ("Customer_ID", "string"),
    ("Customer_Segment", "category"),
    ("Region", "string"),
    ("Category", "string"),
    ("Product", "string"),
    ("Quantity", "int"),
    ("Unit_Price", "float"),
    ("Total_Sales", "float"),
    ("Discount_Percent", "int"),
    ("Discount_Amount", "float"),
    ("Final_Price", "float"),
    ("Payment_Method", "category"),
];

/// Write transactions as CSV with a header row.
pub fn write_transactions(path: &Path, records: &[TransactionRecord]) -> Result<()> {
    write_rows(path, records)?;
    info!("Wrote {} transactions to {}", records.len(), path.display());
    Ok(())
}

/// Load the transaction table from disk.
pub fn load_transactions(path: &Path) -> Result<Vec<TransactionRecord>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open data file: {}", path.display()))?;

    let records = read_transactions(file)
        .with_context(|| format!("Failed to read transactions from {}", path.display()))?;

    info!("Loaded {} transactions from {}", records.len(), path.display());
    Ok(records)
}

/// Parse transactions from any reader. Column order is free; names are not.
pub fn read_transactions<R: Read>(reader: R) -> Result<Vec<TransactionRecord>, DatasetError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|source| DatasetError::MalformedRow { line: 1, source })?
        .clone();

    for (column, _) in COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DatasetError::MissingColumn(column.to_string()));
        }
    }

    let mut records = Vec::new();
    for (index, row) in rdr.deserialize().enumerate() {
        // Line 1 is the header.
        let record: TransactionRecord =
            row.map_err(|source| DatasetError::MalformedRow { line: index + 2, source })?;
        records.push(record);
    }

    debug!("Parsed {} rows", records.len());
    Ok(records)
}

/// Serialize any row type to a CSV file, header derived from the type.
pub fn write_rows<S: Serialize>(path: &Path, rows: &[S]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write row to {}", path.display()))?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;
    Ok(())
}
