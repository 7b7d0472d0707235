//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observed samples: `o`
//! - fitted curve: `-` line
//! - offset asymptote `y = c` (when inside the y range): `.` line

use crate::domain::{CurveFile, ExpParams, SampleResidual};
use crate::models::predict;

/// Render a plot for an in-memory fit.
pub fn render_ascii_plot(residuals: &[SampleResidual], params: &ExpParams, width: usize, height: usize) -> String {
    let (x_min, x_max) = x_range_from_residuals(residuals).unwrap_or((0.0, 1.0));
    let curve = sample_curve(params, x_min, x_max, width.max(2));
    render_plot(residuals, &curve, Some(params.c), x_min, x_max, width, height)
}

/// Render a plot from a saved curve JSON file (curve only, no overlay points).
pub fn render_ascii_plot_from_curve_file(curve: &CurveFile, width: usize, height: usize) -> String {
    let (x_min, x_max) = curve_x_range(curve).unwrap_or((0.0, 1.0));
    let points: Vec<(f64, f64)> = curve
        .grid
        .x
        .iter()
        .zip(curve.grid.y.iter())
        .map(|(&x, &y)| (x, y))
        .collect();

    render_plot(&[], &points, Some(curve.params.c), x_min, x_max, width, height)
}

fn render_plot(
    residuals: &[SampleResidual],
    curve: &[(f64, f64)],
    asymptote: Option<f64>,
    x_min: f64,
    x_max: f64,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (y_min, y_max) = y_range(residuals, curve).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Asymptote first, then curve, then points on top.
    if let Some(c) = asymptote.filter(|c| (y_min..=y_max).contains(c)) {
        let row = map_y(c, y_min, y_max, height);
        for cell in grid[row].iter_mut() {
            *cell = '.';
        }
    }
    draw_curve(&mut grid, curve, x_min, x_max, y_min, y_max);

    for r in residuals {
        let x = map_x(r.x, x_min, x_max, width);
        let y = map_y(r.y_obs, y_min, y_max, height);
        grid[y][x] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.3}, {y_max:.3}]\n"
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn x_range_from_residuals(residuals: &[SampleResidual]) -> Option<(f64, f64)> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for r in residuals {
        min_x = min_x.min(r.x);
        max_x = max_x.max(r.x);
    }
    if min_x.is_finite() && max_x.is_finite() && max_x > min_x {
        Some((min_x, max_x))
    } else {
        None
    }
}

fn curve_x_range(curve: &CurveFile) -> Option<(f64, f64)> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for &x in &curve.grid.x {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
    }
    if min_x.is_finite() && max_x.is_finite() && max_x > min_x {
        Some((min_x, max_x))
    } else {
        None
    }
}

fn sample_curve(params: &ExpParams, x_min: f64, x_max: f64, n: usize) -> Vec<(f64, f64)> {
    let n = n.max(2);
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let u = i as f64 / (n as f64 - 1.0);
        let x = x_min + u * (x_max - x_min);
        out.push((x, predict(params, x)));
    }
    out
}

fn y_range(residuals: &[SampleResidual], curve: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for r in residuals {
        min_y = min_y.min(r.y_obs);
        max_y = max_y.max(r.y_obs);
    }
    for &(_, y) in curve {
        if y.is_finite() {
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
    }

    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
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

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], x_min: f64, x_max: f64, y_min: f64, y_max: f64) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(xv, y) in curve {
        if !y.is_finite() {
            prev = None;
            continue;
        }
        let x = map_x(xv, x_min, x_max, width);
        let yy = map_y(y, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, x, yy, '-');
        } else if grid[yy][x] == ' ' || grid[yy][x] == '.' {
            grid[yy][x] = '-';
        }
        prev = Some((x, yy));
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
            && matches!(grid[y0 as usize][x0 as usize], ' ' | '.')
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_golden_snapshot_small() {
        let residuals = vec![
            SampleResidual { index: 0, x: 1.0, y_obs: 100.0, y_fit: 100.0, residual: 0.0 },
            SampleResidual { index: 1, x: 10.0, y_obs: 110.0, y_fit: 100.0, residual: 10.0 },
        ];
        // Flat curve at 100 (b = 0), asymptote far below the plot.
        let params = ExpParams::new(200.0, 0.0, -100.0);

        let txt = render_ascii_plot(&residuals, &params, 10, 5);
        let expected = concat!(
            "Plot: x=[1.000, 10.000] | y=[99.500, 110.500]\n",
            "         o\n",
            "          \n",
            "          \n",
            "          \n",
            "o---------\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn asymptote_drawn_when_in_range() {
        let residuals = vec![
            SampleResidual { index: 0, x: 0.0, y_obs: 0.0, y_fit: 0.0, residual: 0.0 },
            SampleResidual { index: 1, x: 4.0, y_obs: 1.0, y_fit: 1.0, residual: 0.0 },
        ];
        let params = ExpParams::new(-1.0, -1.0, 1.0);
        let txt = render_ascii_plot(&residuals, &params, 20, 8);
        assert!(txt.lines().skip(1).any(|l| l.contains('.')));
        assert_eq!(txt.lines().count(), 9);
    }
}
