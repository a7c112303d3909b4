//! Dashboard overview: monthly trend, top products, and category share.

use super::palette::{ACCENT, PRIMARY};
use super::widgets::{self, Area, FONT, TITLE_SIZE};
use crate::analysis::aggregator::{
    categories_by_revenue, monthly_revenue, peak_month, products_by_revenue, KeyedTotals,
    MonthlyRevenue,
};
use crate::config::ChartsConfig;
use crate::format::compact;
use crate::models::{month_abbr, TransactionRecord};
use anyhow::Result;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

/// Series behind the dashboard panels.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub monthly: Vec<MonthlyRevenue>,
    pub top_products: Vec<(String, f64)>,
    pub categories: Vec<(String, f64)>,
}

impl DashboardData {
    pub fn from_records(records: &[TransactionRecord], top_products: usize) -> Self {
        let revenue_pairs = |ranked: Vec<KeyedTotals<String>>| {
            ranked
                .into_iter()
                .map(|k| (k.key, k.totals.revenue()))
                .collect::<Vec<_>>()
        };

        let mut products = revenue_pairs(products_by_revenue(records));
        products.truncate(top_products);

        Self {
            monthly: monthly_revenue(records),
            top_products: products,
            categories: revenue_pairs(categories_by_revenue(records)),
        }
    }
}

/// `Jan 23` style label for a month.
fn month_label(month: &MonthlyRevenue) -> String {
    format!("{} {:02}", month_abbr(month.month), month.year.rem_euclid(100))
}

pub fn draw(root: &Area, records: &[TransactionRecord], config: &ChartsConfig) -> Result<()> {
    let data = DashboardData::from_records(records, config.top_products);

    let root = root.titled("Sales Dashboard Overview", (FONT, 36))?;
    let (width, height) = root.dim_in_pixel();
    let (upper, lower) = root.split_vertically(height / 2);
    let (left, right) = lower.split_horizontally(width * 3 / 5);

    draw_trend(&upper, &data.monthly, &config.currency)?;

    let (labels, values): (Vec<String>, Vec<f64>) = data.top_products.iter().cloned().unzip();
    widgets::horizontal_bars(
        &left,
        &format!("Top {} Products by Revenue", labels.len()),
        &format!("Revenue ({})", config.currency),
        &labels,
        &values,
    )?;

    widgets::pie(&right, "Revenue Share by Category", &data.categories)?;

    Ok(())
}

fn draw_trend(area: &Area, monthly: &[MonthlyRevenue], currency: &str) -> Result<()> {
    let title = "Monthly Revenue Trend";
    if monthly.is_empty() {
        return widgets::no_data(area, title);
    }

    let values: Vec<f64> = monthly.iter().map(|m| m.totals.revenue()).collect();
    let last = (monthly.len().max(2) - 1) as i32;

    let mut chart = ChartBuilder::on(area)
        .caption(title, (FONT, TITLE_SIZE))
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(80)
        .build_cartesian_2d(0..last, 0f64..widgets::axis_max(&values))?;

    chart
        .configure_mesh()
        .x_labels(monthly.len())
        .x_label_formatter(&|x| {
            usize::try_from(*x)
                .ok()
                .and_then(|i| monthly.get(i))
                .map(month_label)
                .unwrap_or_default()
        })
        .y_label_formatter(&|v| compact(*v))
        .y_desc(format!("Revenue ({currency})"))
        .draw()?;

    let points: Vec<(i32, f64)> = values
        .iter()
        .enumerate()
        .map(|(i, v)| (i as i32, *v))
        .collect();

    chart.draw_series(
        AreaSeries::new(points.iter().copied(), 0.0, PRIMARY.mix(0.25))
            .border_style(PRIMARY.stroke_width(3)),
    )?;
    chart.draw_series(points.iter().map(|p| Circle::new(*p, 4, PRIMARY.filled())))?;

    if let Some(peak) = peak_month(monthly) {
        let (x, y) = points[peak];
        chart.draw_series(std::iter::once(Circle::new((x, y), 8, ACCENT.filled())))?;
        chart.draw_series(std::iter::once(Text::new(
            format!("Peak: {} {}", currency, compact(y)),
            (x, y),
            (FONT, 16)
                .into_font()
                .color(&ACCENT)
                .pos(Pos::new(HPos::Center, VPos::Bottom)),
        )))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_support::record;

    #[test]
    fn test_dashboard_data() {
        let records = vec![
            record("2023-01-05", "CUST1", "Electronics", "Laptop", 1, 900.0),
            record("2023-01-09", "CUST2", "Books", "Novel", 3, 10.0),
            record("2023-02-11", "CUST3", "Books", "Comic", 1, 5.0),
        ];
        let data = DashboardData::from_records(&records, 2);

        assert_eq!(data.monthly.len(), 2);
        assert_eq!(
            data.top_products,
            vec![("Laptop".to_string(), 900.0), ("Novel".to_string(), 30.0)]
        );
        assert_eq!(data.categories[0], ("Electronics".to_string(), 900.0));
        assert_eq!(data.categories[1], ("Books".to_string(), 35.0));
    }

    #[test]
    fn test_month_label() {
        let month = MonthlyRevenue {
            year: 2024,
            month: 11,
            totals: Default::default(),
        };
        assert_eq!(month_label(&month), "Nov 24");
    }
}
