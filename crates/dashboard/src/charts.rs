//! Character-cell chart primitives.

use analytics::ScatterPoint;
use comfy_table::Color;
use core_types::PropertyType;

const BAR_CHAR: char = '█';

/// A horizontal bar whose length is `value / max` of `width` characters.
///
/// Any positive value gets at least one character so that small bars stay visible.
pub fn bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || value <= 0.0 || width == 0 {
        return String::new();
    }
    let len = ((value / max) * width as f64).round() as usize;
    BAR_CHAR.to_string().repeat(len.clamp(1, width))
}

/// Background and foreground colours for a heatmap cell at position `t` in `[0, 1]`.
///
/// Light purple-white for the lowest value through to dark blue for the highest.
pub fn heat_colors(t: f64) -> (Color, Color) {
    const LOW: (f64, f64, f64) = (255.0, 247.0, 251.0);
    const HIGH: (f64, f64, f64) = (2.0, 56.0, 88.0);

    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    let background = Color::Rgb {
        r: lerp(LOW.0, HIGH.0),
        g: lerp(LOW.1, HIGH.1),
        b: lerp(LOW.2, HIGH.2),
    };
    let foreground = if t > 0.5 { Color::White } else { Color::Black };
    (background, foreground)
}

pub fn marker(property_type: PropertyType) -> char {
    match property_type {
        PropertyType::Apartment => 'A',
        PropertyType::Condo => 'C',
        PropertyType::Landed => 'L',
    }
}

/// Plots size (x) against price (y) on a `width` x `height` grid.
///
/// Each point is drawn with its property type's marker; cells shared by
/// different types show `*`. Returns the grid rows top to bottom, framed by a
/// left and bottom axis.
pub fn scatter_plot(points: &[ScatterPoint], width: usize, height: usize) -> Vec<String> {
    if points.is_empty() || width == 0 || height == 0 {
        return Vec::new();
    }

    let (min_x, max_x) = min_max(points.iter().map(|p| f64::from(p.size_sqft)));
    let (min_y, max_y) = min_max(points.iter().map(|p| f64::from(p.price)));

    let mut grid = vec![vec![' '; width]; height];
    for point in points {
        let col = scale(f64::from(point.size_sqft), min_x, max_x, width);
        let row = height - 1 - scale(f64::from(point.price), min_y, max_y, height);
        let cell = &mut grid[row][col];
        let mark = marker(point.property_type);
        *cell = match *cell {
            ' ' => mark,
            existing if existing == mark => mark,
            _ => '*',
        };
    }

    let mut lines: Vec<String> = grid
        .into_iter()
        .map(|row| format!("│{}", row.into_iter().collect::<String>()))
        .collect();
    lines.push(format!("└{}", "─".repeat(width)));
    lines
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

/// Maps `value` in `[min, max]` onto `0..cells`; a zero-width range maps to the middle.
fn scale(value: f64, min: f64, max: f64, cells: usize) -> usize {
    if max <= min {
        return cells / 2;
    }
    let position = ((value - min) / (max - min) * (cells - 1) as f64).round() as usize;
    position.min(cells - 1)
}
