//! Performance trends: quarterly revenue and year-over-year totals.

use super::palette;
use super::widgets::{self, Area, FONT};
use crate::analysis::aggregator::{quarterly_revenue, yearly_totals};
use crate::config::ChartsConfig;
use crate::models::TransactionRecord;
use anyhow::Result;

/// `(label, revenue)` per calendar quarter, chronological.
pub fn quarter_series(records: &[TransactionRecord]) -> Vec<(String, f64)> {
    quarterly_revenue(records)
        .into_iter()
        .map(|((year, quarter), totals)| (format!("Q{quarter} {year}"), totals.revenue()))
        .collect()
}

/// `(year, revenue, orders)` per calendar year, chronological.
pub fn year_series(records: &[TransactionRecord]) -> Vec<(i32, f64, f64)> {
    yearly_totals(records)
        .into_iter()
        .map(|(year, totals)| (year, totals.revenue(), totals.orders as f64))
        .collect()
}

pub fn draw(root: &Area, records: &[TransactionRecord], config: &ChartsConfig) -> Result<()> {
    let root = root.titled("Performance Trends", (FONT, 36))?;
    let (_, height) = root.dim_in_pixel();
    let (upper, lower) = root.split_vertically(height / 2);

    let (labels, values): (Vec<String>, Vec<f64>) = quarter_series(records).into_iter().unzip();
    widgets::vertical_bars(
        &upper,
        "Quarterly Revenue",
        &format!("Revenue ({})", config.currency),
        &labels,
        &values,
        palette::categorical,
    )?;

    let years = year_series(records);
    let labels: Vec<String> = years.iter().map(|(year, _, _)| year.to_string()).collect();
    let revenue: Vec<f64> = years.iter().map(|(_, revenue, _)| *revenue).collect();
    let orders: Vec<f64> = years.iter().map(|(_, _, orders)| *orders).collect();
    let (left, right) = widgets::revenue_and_orders(&revenue, &orders);
    widgets::dual_bars(&lower, "Year over Year Comparison", &labels, left, right)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_support::record;

    fn sample() -> Vec<TransactionRecord> {
        vec![
            record("2023-02-01", "CUST1", "Books", "Novel", 1, 10.0),
            record("2023-11-20", "CUST2", "Books", "Novel", 2, 10.0),
            record("2024-01-15", "CUST1", "Sports", "Yoga Mat", 1, 35.5),
        ]
    }

    #[test]
    fn test_quarter_series() {
        let quarters = quarter_series(&sample());
        assert_eq!(
            quarters,
            vec![
                ("Q1 2023".to_string(), 10.0),
                ("Q4 2023".to_string(), 20.0),
                ("Q1 2024".to_string(), 35.5),
            ]
        );
    }

    #[test]
    fn test_year_series() {
        let years = year_series(&sample());
        assert_eq!(years, vec![(2023, 30.0, 2.0), (2024, 35.5, 1.0)]);
    }
}
