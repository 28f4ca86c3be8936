//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - line segments: `-`
//! - isolated points (single-bucket segments): `o`
//! - annotations: `P` (peak), `L` (low), `*` (other), listed below the grid

use crate::domain::Figure;

/// Render a figure into a fixed-size character grid.
pub fn render_ascii_plot(figure: &Figure, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = figure.x_range().map(widen).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = figure.y_range().map(widen).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    for segment in &figure.segments {
        draw_segment(&mut grid, segment, x_min, x_max, y_min, y_max);
    }

    for a in &figure.annotations {
        let x = map_x(a.x, x_min, x_max, width);
        let y = map_y(a.y, y_min, y_max, height);
        grid[y][x] = annotation_marker(&a.text);
    }

    // Build final string. We include a small header with ranges.
    let mut out = String::new();
    out.push_str(&format!("{}\n", figure.title));
    out.push_str(&format!(
        "Plot: {}=[{}, {}] | {}=[{y_min:.4}, {y_max:.4}]\n",
        figure.x_label,
        figure.x_kind.format(x_min),
        figure.x_kind.format(x_max),
        figure.y_label,
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    for a in &figure.annotations {
        out.push_str(&format!("{} {} ({:.4})\n", annotation_marker(&a.text), a.text, a.y));
    }

    out
}

fn annotation_marker(text: &str) -> char {
    if text.starts_with("Peak") {
        'P'
    } else if text.starts_with("Low") {
        'L'
    } else {
        '*'
    }
}

/// Give degenerate (single-value) ranges some width.
fn widen((min, max): (f64, f64)) -> (f64, f64) {
    if max > min {
        (min, max)
    } else {
        let half = (min.abs() * 0.01).max(0.5);
        (min - half, max + half)
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_segment(grid: &mut [Vec<char>], segment: &[(f64, f64)], x_min: f64, x_max: f64, y_min: f64, y_max: f64) {
    let height = grid.len();
    let width = grid[0].len();

    if let [(x, y)] = segment {
        grid[map_y(*y, y_min, y_max, height)][map_x(*x, x_min, x_max, width)] = 'o';
        return;
    }

    let mut prev = None;
    for &(x, y) in segment {
        let px = map_x(x, x_min, x_max, width);
        let py = map_y(y, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, px, py, '-');
        } else {
            grid[py][px] = '-';
        }
        prev = Some((px, py));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
