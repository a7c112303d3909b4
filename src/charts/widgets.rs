//! Reusable chart panels drawn onto a region of a bitmap.
//!
//! Categorical axes use segmented coordinates over `slot_range(n)`, which
//! holds exactly `n` slots: bar `i` spans `Exact(i)..Exact(i + 1)` and its
//! label sits at `CenterOf(i)`.

use super::palette::{self, PRIMARY, SECONDARY, TEXT};
use crate::format::compact;
use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::f64::consts::{FRAC_PI_2, TAU};
use std::ops::Range;

/// A region of the image being rendered.
pub type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

pub const FONT: &str = "sans-serif";
pub const TITLE_SIZE: u32 = 22;
const LABEL_SIZE: u32 = 15;

/// Discrete axis range with exactly `n` slots.
pub fn slot_range(n: usize) -> Range<u32> {
    0..(n.max(2) - 1) as u32
}

/// Upper bound of a value axis, leaving headroom for annotations.
pub fn axis_max(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(0.0, f64::max);
    if max > 0.0 {
        max * 1.15
    } else {
        1.0
    }
}

fn slot_label(labels: &[String], value: &SegmentValue<u32>) -> String {
    match value {
        SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
        _ => String::new(),
    }
}

fn label_style(color: &'static RGBColor, pos: Pos) -> TextStyle<'static> {
    TextStyle::from((FONT, LABEL_SIZE).into_font())
        .color(color)
        .pos(pos)
}

/// Titled panel with a centered "No data" note.
pub fn no_data(area: &Area, title: &str) -> Result<()> {
    let area = area.titled(title, (FONT, TITLE_SIZE))?;
    let (w, h) = area.dim_in_pixel();
    area.draw(&Text::new(
        "No data",
        (w as i32 / 2, h as i32 / 2),
        label_style(&TEXT, Pos::new(HPos::Center, VPos::Center)),
    ))?;
    Ok(())
}

/// Vertical bars, one per label, colored by `color_of(index)`.
pub fn vertical_bars(
    area: &Area,
    title: &str,
    y_desc: &str,
    labels: &[String],
    values: &[f64],
    color_of: impl Fn(usize) -> RGBColor,
) -> Result<()> {
    if labels.is_empty() {
        return no_data(area, title);
    }

    let mut chart = ChartBuilder::on(area)
        .caption(title, (FONT, TITLE_SIZE))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(slot_range(labels.len()).into_segmented(), 0f64..axis_max(values))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&|v| slot_label(labels, v))
        .y_label_formatter(&|v| compact(*v))
        .y_desc(y_desc)
        .draw()?;

    chart.draw_series(values.iter().enumerate().map(|(i, value)| {
        let i = i as u32;
        let mut bar = Rectangle::new(
            [
                (SegmentValue::Exact(i), 0.0),
                (SegmentValue::Exact(i + 1), *value),
            ],
            color_of(i as usize).filled(),
        );
        bar.set_margin(0, 0, 8, 8);
        bar
    }))?;

    Ok(())
}

/// Horizontal bars, first label on top, with value annotations.
pub fn horizontal_bars(
    area: &Area,
    title: &str,
    x_desc: &str,
    labels: &[String],
    values: &[f64],
) -> Result<()> {
    if labels.is_empty() {
        return no_data(area, title);
    }

    let n = labels.len();
    // Slot 0 is the bottom row.
    let row_of = |rank: usize| (n - 1 - rank) as u32;
    let rows: Vec<String> = labels.iter().rev().cloned().collect();

    let mut chart = ChartBuilder::on(area)
        .caption(title, (FONT, TITLE_SIZE))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(140)
        .build_cartesian_2d(0f64..axis_max(values), slot_range(n).into_segmented())?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(n)
        .y_label_formatter(&|v| slot_label(&rows, v))
        .x_label_formatter(&|v| compact(*v))
        .x_desc(x_desc)
        .draw()?;

    chart.draw_series(values.iter().enumerate().map(|(rank, value)| {
        let row = row_of(rank);
        let mut bar = Rectangle::new(
            [
                (0.0, SegmentValue::Exact(row)),
                (*value, SegmentValue::Exact(row + 1)),
            ],
            PRIMARY.filled(),
        );
        bar.set_margin(4, 4, 0, 0);
        bar
    }))?;

    chart.draw_series(values.iter().enumerate().map(|(rank, value)| {
        Text::new(
            format!(" {}", compact(*value)),
            (*value, SegmentValue::CenterOf(row_of(rank))),
            label_style(&TEXT, Pos::new(HPos::Left, VPos::Center)),
        )
    }))?;

    Ok(())
}

/// One series of a dual-axis bar chart.
pub struct BarSeries<'a> {
    pub name: &'a str,
    pub values: &'a [f64],
    pub color: RGBColor,
}

/// Paired bars per label: `left` on the primary axis, `right` on the secondary.
pub fn dual_bars(
    area: &Area,
    title: &str,
    labels: &[String],
    left: BarSeries<'_>,
    right: BarSeries<'_>,
) -> Result<()> {
    if labels.is_empty() {
        return no_data(area, title);
    }

    let n = labels.len();
    let mut chart = ChartBuilder::on(area)
        .caption(title, (FONT, TITLE_SIZE))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .right_y_label_area_size(70)
        .build_cartesian_2d(slot_range(n).into_segmented(), 0f64..axis_max(left.values))?
        .set_secondary_coord(slot_range(n).into_segmented(), 0f64..axis_max(right.values));

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&|v| slot_label(labels, v))
        .y_label_formatter(&|v| compact(*v))
        .y_desc(left.name)
        .draw()?;

    chart
        .configure_secondary_axes()
        .y_label_formatter(&|v| compact(*v))
        .y_desc(right.name)
        .draw()?;

    let left_color = left.color;
    chart
        .draw_series(left.values.iter().enumerate().map(|(i, value)| {
            let i = i as u32;
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0.0),
                    (SegmentValue::CenterOf(i), *value),
                ],
                left_color.filled(),
            );
            bar.set_margin(0, 0, 10, 2);
            bar
        }))?
        .label(left.name)
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], left_color.filled()));

    let right_color = right.color;
    chart
        .draw_secondary_series(right.values.iter().enumerate().map(|(i, value)| {
            let i = i as u32;
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::CenterOf(i), 0.0),
                    (SegmentValue::Exact(i + 1), *value),
                ],
                right_color.filled(),
            );
            bar.set_margin(0, 0, 2, 10);
            bar
        }))?
        .label(right.name)
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], right_color.filled()));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}

/// Default colors for a two-series chart.
pub fn revenue_and_orders<'a>(revenue: &'a [f64], orders: &'a [f64]) -> (BarSeries<'a>, BarSeries<'a>) {
    (
        BarSeries {
            name: "Revenue",
            values: revenue,
            color: PRIMARY,
        },
        BarSeries {
            name: "Orders",
            values: orders,
            color: SECONDARY,
        },
    )
}

/// Slices with a positive value; zero and negative slices are not drawn.
pub fn visible_slices(slices: &[(String, f64)]) -> Vec<(&str, f64)> {
    slices
        .iter()
        .filter(|(_, value)| *value > 0.0)
        .map(|(label, value)| (label.as_str(), *value))
        .collect()
}

/// Outline of a pie wedge starting at `start` and sweeping `sweep` radians.
pub fn wedge(center: (i32, i32), radius: f64, start: f64, sweep: f64) -> Vec<(i32, i32)> {
    // One arc point per two degrees, at least two.
    let steps = ((sweep.to_degrees() / 2.0 - 1e-9).ceil() as usize).max(2);
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);

    for step in 0..=steps {
        let angle = start + sweep * step as f64 / steps as f64;
        points.push((
            center.0 + (radius * angle.cos()).round() as i32,
            center.1 + (radius * angle.sin()).round() as i32,
        ));
    }

    points
}

/// Pie of `slices`, clockwise from twelve o'clock, labeled with shares.
pub fn pie(area: &Area, title: &str, slices: &[(String, f64)]) -> Result<()> {
    let visible = visible_slices(slices);
    let total: f64 = visible.iter().map(|(_, value)| value).sum();
    if visible.is_empty() || total <= 0.0 {
        return no_data(area, title);
    }

    let area = area.titled(title, (FONT, TITLE_SIZE))?;
    let (w, h) = area.dim_in_pixel();
    let center = (w as i32 / 2, h as i32 / 2);
    let radius = f64::from(w.min(h)) * 0.32;

    let mut start = -FRAC_PI_2;
    for (i, (label, value)) in visible.iter().enumerate() {
        let sweep = value / total * TAU;
        let color = palette::categorical(i);
        area.draw(&Polygon::new(
            wedge(center, radius, start, sweep),
            color.filled(),
        ))?;

        let mid = start + sweep / 2.0;
        let anchor = (
            center.0 + (radius * 1.12 * mid.cos()).round() as i32,
            center.1 + (radius * 1.12 * mid.sin()).round() as i32,
        );
        let hpos = if mid.cos() >= 0.0 { HPos::Left } else { HPos::Right };
        area.draw(&Text::new(
            format!("{} ({:.1}%)", label, value / total * 100.0),
            anchor,
            label_style(&TEXT, Pos::new(hpos, VPos::Center)),
        ))?;

        start += sweep;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_range_sizes() {
        assert_eq!(slot_range(0), 0..1);
        assert_eq!(slot_range(1), 0..1);
        assert_eq!(slot_range(2), 0..1);
        assert_eq!(slot_range(7), 0..6);
    }

    #[test]
    fn test_axis_max() {
        assert_eq!(axis_max(&[]), 1.0);
        assert_eq!(axis_max(&[0.0, 0.0]), 1.0);
        assert!((axis_max(&[10.0, 40.0]) - 46.0).abs() < 1e-9);
    }

    #[test]
    fn test_pie_with_zero_slices_draws() {
        let (width, height) = (480, 240);
        let mut buffer = vec![0u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).unwrap();
            let (left, right) = root.split_horizontally(width / 2);

            let partial = vec![
                ("Books".to_string(), 10.0),
                ("Sports".to_string(), 0.0),
                ("Clothing".to_string(), 5.0),
            ];
            pie(&left, "Category Share", &partial).unwrap();

            let all_zero = vec![("Books".to_string(), 0.0), ("Sports".to_string(), 0.0)];
            pie(&right, "Payment Share", &all_zero).unwrap();

            root.present().unwrap();
        }

        // The first wedge is drawn in the first categorical color.
        let first = palette::categorical(0);
        let painted = buffer
            .chunks(3)
            .any(|px| px == [first.0, first.1, first.2]);
        assert!(painted);
    }

    #[test]
    fn test_zero_slices_are_omitted() {
        let slices = vec![
            ("Books".to_string(), 10.0),
            ("Sports".to_string(), 0.0),
            ("Clothing".to_string(), 5.0),
        ];
        let visible = visible_slices(&slices);
        assert_eq!(visible, vec![("Books", 10.0), ("Clothing", 5.0)]);

        let empty = vec![("Books".to_string(), 0.0)];
        assert!(visible_slices(&empty).is_empty());
    }

    #[test]
    fn test_wedge_outline() {
        let points = wedge((100, 100), 50.0, 0.0, FRAC_PI_2);
        assert_eq!(points[0], (100, 100));
        assert_eq!(points[1], (150, 100));
        assert_eq!(*points.last().unwrap(), (100, 150));
        assert_eq!(points.len(), 45 + 2);
    }

    #[test]
    fn test_slot_label_only_at_centers() {
        let labels = vec!["Mon".to_string(), "Tue".to_string()];
        assert_eq!(slot_label(&labels, &SegmentValue::CenterOf(1)), "Tue");
        assert_eq!(slot_label(&labels, &SegmentValue::CenterOf(5)), "");
        assert_eq!(slot_label(&labels, &SegmentValue::Exact(0)), "");
        assert_eq!(slot_label(&labels, &SegmentValue::Last), "");
    }
}
