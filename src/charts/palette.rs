//! Colors shared by every chart.

use plotters::style::RGBColor;

pub const PRIMARY: RGBColor = RGBColor(46, 134, 171);
pub const SECONDARY: RGBColor = RGBColor(241, 143, 1);
pub const ACCENT: RGBColor = RGBColor(199, 62, 29);
pub const WEEKEND: RGBColor = RGBColor(231, 76, 60);
pub const TEXT: RGBColor = RGBColor(40, 40, 40);

/// Qualitative colors for pie slices and grouped bars.
pub const CATEGORICAL: [RGBColor; 8] = [
    RGBColor(46, 134, 171),
    RGBColor(162, 59, 114),
    RGBColor(241, 143, 1),
    RGBColor(199, 62, 29),
    RGBColor(106, 153, 78),
    RGBColor(114, 9, 183),
    RGBColor(76, 201, 240),
    RGBColor(247, 37, 133),
];

/// Color for the `i`th series entry, cycling through [`CATEGORICAL`].
pub fn categorical(i: usize) -> RGBColor {
    CATEGORICAL[i % CATEGORICAL.len()]
}

/// Yellow-orange-red ramp stops, light to dark.
const HEAT_STOPS: [(u8, u8, u8); 5] = [
    (255, 255, 204),
    (254, 217, 118),
    (253, 141, 60),
    (227, 26, 28),
    (128, 0, 38),
];

/// Map `t` in `[0, 1]` onto the heat ramp. Out-of-range input is clamped.
pub fn heat_color(t: f64) -> RGBColor {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (HEAT_STOPS.len() - 1) as f64;
    let lo = (scaled.floor() as usize).min(HEAT_STOPS.len() - 2);
    let frac = scaled - lo as f64;

    let (r0, g0, b0) = HEAT_STOPS[lo];
    let (r1, g1, b1) = HEAT_STOPS[lo + 1];
    let lerp = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * frac).round() as u8;

    RGBColor(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}
