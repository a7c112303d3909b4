//! Dataset overview printed after generation.

use crate::analysis::describe::{describe, ColumnStats};
use crate::dataset::COLUMNS;
use crate::error::AnalysisError;
use crate::models::TransactionRecord;

const PREVIEW_ROWS: usize = 5;

/// Row count, schema, a preview of the first rows, and numeric statistics.
pub fn generate_overview(records: &[TransactionRecord]) -> Result<String, AnalysisError> {
    let stats = describe(records)?;
    let mut output = String::new();

    output.push_str(&format!("Dataset created with {} transactions\n", records.len()));
    output.push_str(&generate_schema_section(records.len()));
    output.push_str(&generate_preview_section(records));
    output.push_str(&generate_stats_section(&stats));

    Ok(output)
}

/// Every field is typed, so each column is fully populated.
fn generate_schema_section(rows: usize) -> String {
    let mut section = String::from("\nDataset Info:\n");

    section.push_str(&format!("{:<3} {:<18} {:>14}  {}\n", "#", "Column", "Non-Null Count", "Dtype"));
    for (i, (column, dtype)) in COLUMNS.iter().enumerate() {
        section.push_str(&format!(
            "{:<3} {:<18} {:>5} non-null  {}\n",
            i, column, rows, dtype
        ));
    }

    section
}

fn generate_preview_section(records: &[TransactionRecord]) -> String {
    let mut section = String::from("\nFirst 5 rows:\n");

    section.push_str(&format!(
        "{:<9} {:<10} {:<9} {:<8} {:<10} {:<14} {:<15} {:>3} {:>10} {:>10} {:>4} {:>10}  {}\n",
        "Order_ID",
        "Date",
        "Customer",
        "Segment",
        "Region",
        "Category",
        "Product",
        "Qty",
        "Unit",
        "Total",
        "Disc",
        "Final",
        "Payment"
    ));
    for r in records.iter().take(PREVIEW_ROWS) {
        section.push_str(&format!(
            "{:<9} {:<10} {:<9} {:<8} {:<10} {:<14} {:<15} {:>3} {:>10.2} {:>10.2} {:>3}% {:>10.2}  {}\n",
            r.order_id,
            r.date.format("%Y-%m-%d"),
            r.customer_id,
            r.segment.to_string(),
            r.region,
            r.category,
            r.product,
            r.quantity,
            r.unit_price,
            r.total_sales,
            r.discount_percent,
            r.final_price,
            r.payment_method
        ));
    }

    section
}

fn generate_stats_section(stats: &[ColumnStats]) -> String {
    let mut section = String::from("\nBasic Statistics:\n");

    section.push_str(&format!("{:<6}", ""));
    for s in stats {
        section.push_str(&format!(" {:>16}", s.column));
    }
    section.push('\n');

    let rows: [(&str, fn(&ColumnStats) -> Option<f64>); 8] = [
        ("count", |s| Some(s.count as f64)),
        ("mean", |s| Some(s.mean)),
        ("std", |s| s.std),
        ("min", |s| Some(s.min)),
        ("25%", |s| Some(s.q25)),
        ("50%", |s| Some(s.median)),
        ("75%", |s| Some(s.q75)),
        ("max", |s| Some(s.max)),
    ];

    for (label, value) in rows {
        section.push_str(&format!("{:<6}", label));
        for s in stats {
            match value(s) {
                Some(v) => section.push_str(&format!(" {:>16.2}", v)),
                None => section.push_str(&format!(" {:>16}", "n/a")),
            }
        }
        section.push('\n');
    }

    section
}
