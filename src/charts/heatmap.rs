//! Weekday by month revenue heatmap with a color legend.

use super::palette::{heat_color, TEXT};
use super::widgets::{slot_range, Area, FONT};
use crate::analysis::aggregator::weekday_month_matrix;
use crate::config::ChartsConfig;
use crate::format::compact;
use crate::models::{month_abbr, weekday_name, TransactionRecord, WEEKDAYS};
use anyhow::Result;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

const LEGEND_WIDTH: u32 = 180;
const LEGEND_STEPS: i32 = 100;

/// Revenue grid (weekday rows from Monday, month columns from January) and its maximum.
pub fn revenue_grid(records: &[TransactionRecord]) -> ([[f64; 12]; 7], f64) {
    let cents = weekday_month_matrix(records);
    let grid = cents.map(|row| row.map(|c| c as f64 / 100.0));
    let max = grid.iter().flatten().copied().fold(0.0, f64::max);
    (grid, max)
}

/// Position of `value` on the color scale.
pub fn intensity(value: f64, max: f64) -> f64 {
    if max > 0.0 {
        value / max
    } else {
        0.0
    }
}

pub fn draw(root: &Area, records: &[TransactionRecord], config: &ChartsConfig) -> Result<()> {
    let (grid, max) = revenue_grid(records);

    let root = root.titled("Sales Heatmap: Day of Week vs Month", (FONT, 36))?;
    let (width, _) = root.dim_in_pixel();
    let (main, legend) = root.split_horizontally(width.saturating_sub(LEGEND_WIDTH));

    let months: Vec<String> = (1..=12).map(|m| month_abbr(m).to_string()).collect();
    // Slot 0 is the bottom row, so Monday takes the top slot.
    let days: Vec<String> = WEEKDAYS
        .iter()
        .rev()
        .map(|d| weekday_name(*d).to_string())
        .collect();

    let mut chart = ChartBuilder::on(&main)
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(110)
        .build_cartesian_2d(
            slot_range(months.len()).into_segmented(),
            slot_range(days.len()).into_segmented(),
        )?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(months.len())
        .y_labels(days.len())
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) => months.get(*i as usize).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .y_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) => days.get(*i as usize).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .x_desc("Month")
        .draw()?;

    let cells = grid.iter().enumerate().flat_map(|(weekday, row)| {
        let slot = (WEEKDAYS.len() - 1 - weekday) as u32;
        row.iter().enumerate().map(move |(month, value)| (slot, month as u32, *value))
    });

    chart.draw_series(cells.clone().map(|(slot, month, value)| {
        let mut cell = Rectangle::new(
            [
                (SegmentValue::Exact(month), SegmentValue::Exact(slot)),
                (SegmentValue::Exact(month + 1), SegmentValue::Exact(slot + 1)),
            ],
            heat_color(intensity(value, max)).filled(),
        );
        cell.set_margin(1, 1, 1, 1);
        cell
    }))?;

    chart.draw_series(cells.map(|(slot, month, value)| {
        let color = if intensity(value, max) > 0.6 { &WHITE } else { &TEXT };
        Text::new(
            compact(value),
            (SegmentValue::CenterOf(month), SegmentValue::CenterOf(slot)),
            (FONT, 14)
                .into_font()
                .color(color)
                .pos(Pos::new(HPos::Center, VPos::Center)),
        )
    }))?;

    draw_legend(&legend, max, &config.currency)?;
    Ok(())
}

/// Vertical gradient bar from zero (bottom) to `max` (top).
fn draw_legend(area: &Area, max: f64, currency: &str) -> Result<()> {
    let (_, height) = area.dim_in_pixel();
    let top = 60;
    let bottom = height as i32 - 80;
    let span = (bottom - top).max(1);
    let (left, right) = (20, 50);

    for step in 0..LEGEND_STEPS {
        let y0 = bottom - span * (step + 1) / LEGEND_STEPS;
        let y1 = bottom - span * step / LEGEND_STEPS;
        let t = (f64::from(step) + 0.5) / f64::from(LEGEND_STEPS);
        area.draw(&Rectangle::new([(left, y0), (right, y1)], heat_color(t).filled()))?;
    }
    area.draw(&Rectangle::new([(left, top), (right, bottom)], TEXT.stroke_width(1)))?;

    let style = |pos: Pos| (FONT, 14).into_font().color(&TEXT).pos(pos);
    area.draw(&Text::new(
        compact(max),
        (right + 6, top),
        style(Pos::new(HPos::Left, VPos::Center)),
    ))?;
    area.draw(&Text::new(
        "0",
        (right + 6, bottom),
        style(Pos::new(HPos::Left, VPos::Center)),
    ))?;
    area.draw(&Text::new(
        format!("Revenue ({currency})"),
        (left, top - 20),
        style(Pos::new(HPos::Left, VPos::Bottom)),
    ))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_support::record;

    #[test]
    fn test_revenue_grid() {
        let records = vec![
            // Monday in January
            record("2024-01-01", "CUST1", "Books", "Novel", 2, 10.0),
            // Sunday in March
            record("2024-03-03", "CUST2", "Books", "Novel", 1, 50.0),
        ];
        let (grid, max) = revenue_grid(&records);
        assert_eq!(grid[0][0], 20.0);
        assert_eq!(grid[6][2], 50.0);
        assert_eq!(max, 50.0);
        assert_eq!(grid.iter().flatten().filter(|v| **v > 0.0).count(), 2);
    }

    #[test]
    fn test_intensity_handles_empty_grid() {
        assert_eq!(intensity(0.0, 0.0), 0.0);
        assert_eq!(intensity(25.0, 50.0), 0.5);
    }
}
