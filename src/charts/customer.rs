//! Customer analysis: regions, weekdays, segments, and payment methods.

use super::palette::{PRIMARY, WEEKEND};
use super::widgets::{self, Area, FONT};
use crate::analysis::aggregator::{
    payments_by_orders, regions_by_revenue, segment_totals, weekday_totals,
};
use crate::config::ChartsConfig;
use crate::models::{weekday_name, TransactionRecord};
use anyhow::Result;
use chrono::Weekday;

/// Saturday and Sunday bars are highlighted.
pub fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}

pub fn draw(root: &Area, records: &[TransactionRecord], config: &ChartsConfig) -> Result<()> {
    let root = root.titled("Customer Analysis", (FONT, 36))?;
    let panels = root.split_evenly((2, 2));
    let revenue_desc = format!("Revenue ({})", config.currency);

    let regions = regions_by_revenue(records);
    let labels: Vec<String> = regions.iter().map(|r| r.key.clone()).collect();
    let values: Vec<f64> = regions.iter().map(|r| r.totals.revenue()).collect();
    widgets::vertical_bars(
        &panels[0],
        "Revenue by Region",
        &revenue_desc,
        &labels,
        &values,
        |_| PRIMARY,
    )?;

    let weekdays = weekday_totals(records);
    let labels: Vec<String> = weekdays
        .iter()
        .map(|(day, _)| weekday_name(*day)[..3].to_string())
        .collect();
    let values: Vec<f64> = weekdays.iter().map(|(_, t)| t.revenue()).collect();
    widgets::vertical_bars(
        &panels[1],
        "Revenue by Day of Week",
        &revenue_desc,
        &labels,
        &values,
        |i| {
            if is_weekend(weekdays[i].0) {
                WEEKEND
            } else {
                PRIMARY
            }
        },
    )?;

    let segments = segment_totals(records);
    let labels: Vec<String> = segments.iter().map(|(s, _, _)| s.to_string()).collect();
    let revenue: Vec<f64> = segments.iter().map(|(_, t, _)| t.revenue()).collect();
    let orders: Vec<f64> = segments.iter().map(|(_, t, _)| t.orders as f64).collect();
    let (left, right) = widgets::revenue_and_orders(&revenue, &orders);
    widgets::dual_bars(
        &panels[2],
        "Revenue and Orders by Customer Segment",
        &labels,
        left,
        right,
    )?;

    let payments: Vec<(String, f64)> = payments_by_orders(records)
        .into_iter()
        .map(|p| (p.key.to_string(), p.totals.orders as f64))
        .collect();
    widgets::pie(&panels[3], "Orders by Payment Method", &payments)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekend_days() {
        assert!(is_weekend(Weekday::Sat));
        assert!(is_weekend(Weekday::Sun));
        assert!(!is_weekend(Weekday::Fri));
        assert!(!is_weekend(Weekday::Mon));
    }
}
