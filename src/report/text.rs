//! Console sales report.
//!
//! Renders a [`SalesSummary`] as the nine-section executive summary, or as
//! pretty JSON for machine consumers.

use crate::analysis::aggregator::{share_percent, KeyedTotals};
use crate::analysis::summary::{GrowthMetric, SalesSummary};
use crate::config::ReportConfig;
use crate::format::{format_amount, format_cents, format_count};
use crate::models::month_name;
use anyhow::Result;

const RULE_WIDTH: usize = 80;

/// Generate the complete text report.
pub fn generate_text_report(summary: &SalesSummary, config: &ReportConfig) -> String {
    let currency = config.currency.as_str();
    let mut output = String::new();

    output.push_str(&banner("SALES DATA ANALYSIS - EXECUTIVE SUMMARY"));
    output.push_str(&generate_overall_section(summary, currency));
    output.push_str(&generate_monthly_section(summary, currency));
    output.push_str(&generate_products_section(summary, currency, config.top_products));
    output.push_str(&generate_categories_section(summary, currency));
    output.push_str(&generate_regions_section(summary, currency));
    output.push_str(&generate_patterns_section(summary, currency));
    output.push_str(&generate_segments_section(summary, currency));
    output.push_str(&generate_payments_section(summary));
    output.push_str(&generate_insights_section(summary));
    output.push('\n');
    output.push_str(&banner("Analysis Complete! Check the chart images for visuals."));

    output
}

/// Generate a JSON report.
pub fn generate_json_report(summary: &SalesSummary) -> Result<String> {
    serde_json::to_string_pretty(summary).map_err(Into::into)
}

fn banner(title: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("{rule}\n{title}\n{rule}\n")
}

fn heading(number: usize, title: &str) -> String {
    format!("\n{number}. {title}\n{}\n", "-".repeat(RULE_WIDTH))
}

fn generate_overall_section(summary: &SalesSummary, currency: &str) -> String {
    let overall = &summary.overall;
    let mut section = heading(1, "OVERALL PERFORMANCE");

    section.push_str(&format!(
        "Total Revenue: {currency} {}\n",
        format_cents(overall.totals.revenue_cents)
    ));
    section.push_str(&format!(
        "Total Orders: {}\n",
        format_count(overall.totals.orders)
    ));
    section.push_str(&format!(
        "Total Items Sold: {}\n",
        format_count(overall.totals.units)
    ));
    section.push_str(&format!(
        "Average Order Value: {currency} {}\n",
        format_amount(overall.average_order_value)
    ));
    section.push_str(&format!(
        "Total Unique Customers: {}\n",
        format_count(overall.unique_customers)
    ));
    section.push_str(&format!(
        "Period: {} to {}\n",
        overall.first_date.format("%Y-%m-%d"),
        overall.last_date.format("%Y-%m-%d")
    ));

    section
}

fn generate_monthly_section(summary: &SalesSummary, currency: &str) -> String {
    let mut section = heading(2, "MONTHLY REVENUE TRENDS");

    section.push_str(&format!(
        "\nTop {} Months by Revenue:\n",
        summary.top_months.len()
    ));
    for month in &summary.top_months {
        section.push_str(&format!(
            "  {} {}: {currency} {}\n",
            month_name(month.month),
            month.year,
            format_cents(month.totals.revenue_cents)
        ));
    }

    section
}

fn generate_products_section(summary: &SalesSummary, currency: &str, top: usize) -> String {
    let mut section = heading(3, "TOP PERFORMING PRODUCTS");
    let products = &summary.products[..top.min(summary.products.len())];

    section.push_str(&format!("\nTop {} Products by Revenue:\n", products.len()));
    for (i, product) in products.iter().enumerate() {
        section.push_str(&format!("  {}. {}\n", i + 1, product.key));
        section.push_str(&format!(
            "     Revenue: {currency} {} | Units: {} | Orders: {}\n",
            format_cents(product.totals.revenue_cents),
            product.totals.units,
            product.totals.orders
        ));
    }

    section
}

fn generate_categories_section(summary: &SalesSummary, currency: &str) -> String {
    let total = summary.overall.totals.revenue_cents;
    let mut section = heading(4, "CATEGORY PERFORMANCE");

    section.push_str("\nRevenue by Category:\n");
    for category in &summary.categories {
        section.push_str(&format!(
            "  {}: {currency} {} ({:.1}%)\n",
            category.key,
            format_cents(category.totals.revenue_cents),
            share_percent(category.totals.revenue_cents, total)
        ));
    }

    section
}

fn generate_regions_section(summary: &SalesSummary, currency: &str) -> String {
    let total = summary.overall.totals.revenue_cents;
    let mut section = heading(5, "REGIONAL PERFORMANCE");

    section.push_str("\nRevenue by Region:\n");
    for region in &summary.regions {
        section.push_str(&format!(
            "  {}: {currency} {} ({:.1}%)\n",
            region.key,
            format_cents(region.totals.revenue_cents),
            share_percent(region.totals.revenue_cents, total)
        ));
    }

    section
}

fn generate_patterns_section(summary: &SalesSummary, currency: &str) -> String {
    let mut section = heading(6, "PURCHASING PATTERNS");

    section.push_str("\nSales by Day of Week:\n");
    for day in &summary.weekdays {
        section.push_str(&format!(
            "  {}: {currency} {} ({} orders)\n",
            day.day,
            format_cents(day.totals.revenue_cents),
            day.totals.orders
        ));
    }
    section.push_str(&format!("\nPeak Shopping Day: {}\n", summary.peak_day));

    section
}

fn generate_segments_section(summary: &SalesSummary, currency: &str) -> String {
    let mut section = heading(7, "CUSTOMER SEGMENT ANALYSIS");

    section.push_str("\nPerformance by Customer Segment:\n");
    for segment in &summary.segments {
        section.push_str(&format!("\n  {}:\n", segment.segment));
        section.push_str(&format!(
            "    Revenue: {currency} {}\n",
            format_cents(segment.totals.revenue_cents)
        ));
        section.push_str(&format!("    Orders: {}\n", segment.totals.orders));
        section.push_str(&format!("    Customers: {}\n", segment.unique_customers));
        // Segments only appear when they have orders.
        let aov = segment.totals.average_order_value().unwrap_or_default();
        section.push_str(&format!(
            "    Avg Order Value: {currency} {}\n",
            format_amount(aov)
        ));
    }

    section
}

fn generate_payments_section(summary: &SalesSummary) -> String {
    let total = summary.overall.totals.orders as i64;
    let mut section = heading(8, "PAYMENT METHOD PREFERENCE");

    section.push_str("\nOrders by Payment Method:\n");
    for payment in &summary.payments {
        section.push_str(&format!(
            "  {}: {} orders ({:.1}%)\n",
            payment.key,
            payment.totals.orders,
            share_percent(payment.totals.orders as i64, total)
        ));
    }

    section
}

fn generate_insights_section(summary: &SalesSummary) -> String {
    let mut section = String::from("\n");
    section.push_str(&banner("KEY INSIGHTS & RECOMMENDATIONS"));

    let first_key = |keys: &[KeyedTotals<String>]| {
        keys.first().map_or("n/a".to_string(), |k| k.key.clone())
    };
    let top_region = first_key(&summary.regions);

    section.push_str("\n📊 Business Highlights:\n");
    section.push_str(&format!(
        "  • Best performing category: {}\n",
        first_key(&summary.categories)
    ));
    section.push_str(&format!(
        "  • Top selling product: {}\n",
        first_key(&summary.products)
    ));
    section.push_str(&format!("  • Highest revenue region: {}\n", top_region));
    section.push_str(&format!("  • Most active shopping day: {}\n", summary.peak_day));
    section.push_str(&format!(
        "  • Most used payment: {}\n",
        summary
            .payments
            .first()
            .map_or("n/a".to_string(), |p| p.key.to_string())
    ));

    section.push_str("\n📈 Growth Metrics:\n");
    section.push_str(&format!("  • {}\n", growth_line(&summary.growth)));
    section.push_str(&format!(
        "  • Customer Repeat Rate: {:.1}%\n",
        summary.customers.repeat_rate_percent
    ));
    section.push_str(&format!(
        "  • Average orders per customer: {:.1}\n",
        summary.customers.average_orders_per_customer
    ));

    section.push_str("\n💡 Recommendations:\n");
    section.push_str("  1. Focus marketing efforts on high-performing categories\n");
    section.push_str("  2. Optimize inventory for top-selling products\n");
    section.push_str(&format!(
        "  3. Strengthen presence in {} region\n",
        top_region
    ));
    section.push_str("  4. Run promotions on slower days to balance weekly sales\n");
    section.push_str("  5. Develop loyalty programs to increase repeat customer rate\n");

    section
}

fn growth_line(growth: &GrowthMetric) -> String {
    let label = format!(
        "YoY Revenue Growth ({} vs {})",
        growth.compare_year, growth.base_year
    );
    match growth.growth_percent {
        Some(percent) => format!("{label}: {percent:.1}%"),
        None => format!("{label}: n/a (no revenue in {})", growth.base_year),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_support::{discounted, record};
    use crate::models::{CustomerSegment, TransactionRecord};

    fn sample() -> Vec<TransactionRecord> {
        vec![
            record("2023-06-05", "CUST1", "Electronics", "Laptop", 1, 1000.0),
            record("2023-06-06", "CUST2", "Books", "Novel", 2, 12.5),
            discounted(
                record("2024-06-10", "CUST1", "Electronics", "Tablet", 2, 500.0),
                CustomerSegment::Vip,
                10,
            ),
        ]
    }

    fn report_for(records: &[TransactionRecord]) -> String {
        let config = ReportConfig::default();
        let summary = SalesSummary::from_records(records, &config).unwrap();
        generate_text_report(&summary, &config)
    }

    #[test]
    fn test_report_has_all_sections() {
        let report = report_for(&sample());

        for title in [
            "1. OVERALL PERFORMANCE",
            "2. MONTHLY REVENUE TRENDS",
            "3. TOP PERFORMING PRODUCTS",
            "4. CATEGORY PERFORMANCE",
            "5. REGIONAL PERFORMANCE",
            "6. PURCHASING PATTERNS",
            "7. CUSTOMER SEGMENT ANALYSIS",
            "8. PAYMENT METHOD PREFERENCE",
            "KEY INSIGHTS & RECOMMENDATIONS",
        ] {
            assert!(report.contains(title), "missing section {title}");
        }
    }

    #[test]
    fn test_overall_figures() {
        let report = report_for(&sample());
        // 1000 + 25 + 900
        assert!(report.contains("Total Revenue: Rp 1,925.00"));
        assert!(report.contains("Total Orders: 3"));
        assert!(report.contains("Total Items Sold: 5"));
        assert!(report.contains("Period: 2023-06-05 to 2024-06-10"));
        assert!(report.contains("Top selling product: Laptop"));
        assert!(report.contains("Peak Shopping Day: Monday"));
    }

    #[test]
    fn test_weekdays_always_listed() {
        let report = report_for(&sample());
        assert!(report.contains("Sunday: Rp 0.00 (0 orders)"));
    }

    #[test]
    fn test_growth_sentinel_without_base_year() {
        let records = vec![record("2024-03-01", "CUST1", "Books", "Novel", 1, 10.0)];
        let report = report_for(&records);
        assert!(report.contains("YoY Revenue Growth (2024 vs 2023): n/a"));
        assert!(!report.contains("inf"));
        assert!(!report.contains("NaN"));
    }

    #[test]
    fn test_report_is_repeatable() {
        assert_eq!(report_for(&sample()), report_for(&sample()));
    }

    #[test]
    fn test_generate_json_report() {
        let config = ReportConfig::default();
        let summary = SalesSummary::from_records(&sample(), &config).unwrap();
        let json = generate_json_report(&summary).unwrap();

        assert!(json.contains("\"overall\""));
        assert!(json.contains("\"peak_day\": \"Monday\""));
        assert!(json.contains("\"growth_percent\""));
    }
}
