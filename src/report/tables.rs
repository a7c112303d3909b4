//! Derived summary tables persisted alongside the console report.

use crate::analysis::aggregator::KeyedTotals;
use crate::analysis::summary::SalesSummary;
use crate::config::ReportConfig;
use crate::dataset::write_rows;
use crate::models::month_name;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Serialize)]
struct MonthlyRow {
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Month")]
    month: u32,
    #[serde(rename = "Month_Name")]
    month_name: &'static str,
    #[serde(rename = "Final_Price")]
    final_price: f64,
}

/// Write the monthly, product, and category tables into `dir`.
pub fn write_summary_tables(
    summary: &SalesSummary,
    config: &ReportConfig,
    dir: &Path,
) -> Result<Vec<PathBuf>> {
    let monthly_path = dir.join(&config.monthly_summary);
    let rows: Vec<MonthlyRow> = summary
        .monthly
        .iter()
        .map(|m| MonthlyRow {
            year: m.year,
            month: m.month,
            month_name: month_name(m.month),
            final_price: m.totals.revenue(),
        })
        .collect();
    write_rows(&monthly_path, &rows)?;

    let product_path = dir.join(&config.product_performance);
    write_performance(&product_path, "Product", &summary.products)?;

    let category_path = dir.join(&config.category_performance);
    write_performance(&category_path, "Category", &summary.categories)?;

    let written = vec![monthly_path, product_path, category_path];
    for path in &written {
        info!("Saved {}", path.display());
    }
    Ok(written)
}

/// Ranked rows with the grouping key as the first column.
fn write_performance(path: &Path, key_column: &str, rows: &[KeyedTotals<String>]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    writer
        .write_record([key_column, "Total_Revenue", "Units_Sold", "Orders"])
        .with_context(|| format!("Failed to write header to {}", path.display()))?;

    for row in rows {
        writer
            .write_record([
                row.key.clone(),
                format!("{:.2}", row.totals.revenue()),
                row.totals.units.to_string(),
                row.totals.orders.to_string(),
            ])
            .with_context(|| format!("Failed to write row to {}", path.display()))?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_support::record;

    #[test]
    fn test_write_summary_tables() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReportConfig::default();
        let records = vec![
            record("2023-01-10", "CUST1", "Books", "Novel", 2, 12.5),
            record("2023-01-20", "CUST2", "Sports", "Yoga Mat", 1, 40.0),
            record("2023-03-05", "CUST1", "Books", "Novel", 1, 12.5),
        ];
        let summary = SalesSummary::from_records(&records, &config).unwrap();

        let written = write_summary_tables(&summary, &config, dir.path()).unwrap();
        assert_eq!(written.len(), 3);

        let monthly = std::fs::read_to_string(dir.path().join("monthly_sales_summary.csv")).unwrap();
        let lines: Vec<&str> = monthly.lines().collect();
        assert_eq!(lines[0], "Year,Month,Month_Name,Final_Price");
        assert_eq!(lines[1], "2023,1,January,65.0");
        assert_eq!(lines[2], "2023,3,March,12.5");

        let products = std::fs::read_to_string(dir.path().join("product_performance.csv")).unwrap();
        let lines: Vec<&str> = products.lines().collect();
        assert_eq!(lines[0], "Product,Total_Revenue,Units_Sold,Orders");
        assert_eq!(lines[1], "Yoga Mat,40.00,1,1");
        assert_eq!(lines[2], "Novel,37.50,3,2");

        let categories =
            std::fs::read_to_string(dir.path().join("category_performance.csv")).unwrap();
        assert!(categories.starts_with("Category,Total_Revenue,Units_Sold,Orders\n"));
    }
}
