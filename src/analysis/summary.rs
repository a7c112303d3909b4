//! The full set of aggregates behind the sales report.

use super::aggregator::{
    categories_by_revenue, customer_stats, monthly_revenue, overall_totals, payments_by_orders,
    peak_weekday, products_by_revenue, regions_by_revenue, segment_totals, top_months,
    weekday_totals, yearly_totals, yoy_growth, CustomerStats, GroupTotals, KeyedTotals,
    MonthlyRevenue,
};
use crate::config::ReportConfig;
use crate::error::AnalysisError;
use crate::models::{weekday_name, CustomerSegment, PaymentMethod, TransactionRecord};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

/// Headline figures over the whole table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallStats {
    #[serde(flatten)]
    pub totals: GroupTotals,
    pub average_order_value: f64,
    pub unique_customers: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayTotals {
    pub day: &'static str,
    #[serde(flatten)]
    pub totals: GroupTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentStats {
    pub segment: CustomerSegment,
    #[serde(flatten)]
    pub totals: GroupTotals,
    pub unique_customers: usize,
}

/// Revenue comparison between two years.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthMetric {
    pub base_year: i32,
    pub compare_year: i32,
    pub base_revenue_cents: i64,
    pub compare_revenue_cents: i64,
    /// `None` when the base year has no revenue.
    pub growth_percent: Option<f64>,
}

/// Everything the report prints and the summary tables persist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesSummary {
    pub overall: OverallStats,
    pub monthly: Vec<MonthlyRevenue>,
    pub top_months: Vec<MonthlyRevenue>,
    pub products: Vec<KeyedTotals<String>>,
    pub categories: Vec<KeyedTotals<String>>,
    pub regions: Vec<KeyedTotals<String>>,
    pub weekdays: Vec<WeekdayTotals>,
    pub peak_day: &'static str,
    pub segments: Vec<SegmentStats>,
    pub payments: Vec<KeyedTotals<PaymentMethod>>,
    pub growth: GrowthMetric,
    pub customers: CustomerStats,
}

impl SalesSummary {
    /// Compute every aggregate. Fails on an empty table.
    pub fn from_records(
        records: &[TransactionRecord],
        config: &ReportConfig,
    ) -> Result<Self, AnalysisError> {
        let totals = overall_totals(records);
        let average_order_value = totals
            .average_order_value()
            .ok_or(AnalysisError::EmptyDataset)?;
        let first_date = records
            .iter()
            .map(|r| r.date)
            .min()
            .ok_or(AnalysisError::EmptyDataset)?;
        let last_date = records
            .iter()
            .map(|r| r.date)
            .max()
            .ok_or(AnalysisError::EmptyDataset)?;
        let customers = customer_stats(records)?;

        let monthly = monthly_revenue(records);
        let top = top_months(&monthly, config.top_months);

        let weekday_groups = weekday_totals(records);
        let peak_day = weekday_name(peak_weekday(&weekday_groups)?);
        let weekdays = weekday_groups
            .iter()
            .map(|(day, totals)| WeekdayTotals {
                day: weekday_name(*day),
                totals: *totals,
            })
            .collect();

        let segments = segment_totals(records)
            .into_iter()
            .map(|(segment, totals, unique_customers)| SegmentStats {
                segment,
                totals,
                unique_customers,
            })
            .collect();

        let yearly = yearly_totals(records);
        let growth_percent = match yoy_growth(&yearly, config.base_year, config.compare_year) {
            Ok(growth) => Some(growth),
            Err(e) => {
                warn!("{}", e);
                None
            }
        };
        let revenue_of = |year: i32| yearly.get(&year).map_or(0, |t| t.revenue_cents);

        let summary = Self {
            overall: OverallStats {
                totals,
                average_order_value,
                unique_customers: customers.unique_customers,
                first_date,
                last_date,
            },
            monthly,
            top_months: top,
            products: products_by_revenue(records),
            categories: categories_by_revenue(records),
            regions: regions_by_revenue(records),
            weekdays,
            peak_day,
            segments,
            payments: payments_by_orders(records),
            growth: GrowthMetric {
                base_year: config.base_year,
                compare_year: config.compare_year,
                base_revenue_cents: revenue_of(config.base_year),
                compare_revenue_cents: revenue_of(config.compare_year),
                growth_percent,
            },
            customers,
        };

        debug!(
            months = summary.monthly.len(),
            products = summary.products.len(),
            "Computed sales summary"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_support::record;

    fn sample() -> Vec<TransactionRecord> {
        vec![
            record("2023-05-01", "CUST1", "Electronics", "Camera", 1, 400.0),
            record("2023-05-02", "CUST2", "Clothing", "Jeans", 2, 50.0),
            record("2024-05-06", "CUST1", "Electronics", "Tablet", 1, 300.0),
        ]
    }

    #[test]
    fn test_summary_headlines() {
        let summary = SalesSummary::from_records(&sample(), &ReportConfig::default()).unwrap();
        assert_eq!(summary.overall.totals.revenue_cents, 80_000);
        assert_eq!(summary.overall.totals.orders, 3);
        assert_eq!(summary.overall.totals.units, 4);
        assert_eq!(summary.overall.unique_customers, 2);
        assert_eq!(summary.overall.first_date.to_string(), "2023-05-01");
        assert_eq!(summary.overall.last_date.to_string(), "2024-05-06");
        assert_eq!(summary.weekdays.len(), 7);
        assert_eq!(summary.weekdays[0].day, "Monday");
        assert_eq!(summary.peak_day, "Monday");
        assert_eq!(summary.categories[0].key, "Electronics");
    }

    #[test]
    fn test_growth_metric() {
        let summary = SalesSummary::from_records(&sample(), &ReportConfig::default()).unwrap();
        assert_eq!(summary.growth.base_revenue_cents, 50_000);
        assert_eq!(summary.growth.compare_revenue_cents, 30_000);
        let growth = summary.growth.growth_percent.unwrap();
        assert!((growth + 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_base_year_yields_no_growth() {
        let records = vec![record("2024-01-01", "CUST1", "Books", "Magazine", 1, 10.0)];
        let summary = SalesSummary::from_records(&records, &ReportConfig::default()).unwrap();
        assert_eq!(summary.growth.growth_percent, None);
    }

    #[test]
    fn test_empty_table_is_error() {
        assert_eq!(
            SalesSummary::from_records(&[], &ReportConfig::default()),
            Err(AnalysisError::EmptyDataset)
        );
    }

    #[test]
    fn test_same_input_same_summary() {
        let a = SalesSummary::from_records(&sample(), &ReportConfig::default()).unwrap();
        let b = SalesSummary::from_records(&sample(), &ReportConfig::default()).unwrap();
        assert_eq!(a, b);
    }
}
