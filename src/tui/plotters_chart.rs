//! Plotters-powered figure widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::domain::Figure;

/// A lightweight, render-only chart description.
///
/// All series and bounds are computed outside the render call, keeping
/// `render()` focused on drawing.
pub struct FigureChart<'a> {
    pub figure: &'a Figure,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

impl<'a> FigureChart<'a> {
    /// Derive padded bounds from the figure contents.
    pub fn new(figure: &'a Figure) -> Self {
        let (x0, x1) = figure.x_range().unwrap_or((0.0, 1.0));
        let (x0, x1) = if x1 > x0 { (x0, x1) } else { (x0 - 1.0, x1 + 1.0) };

        let (y0, y1) = figure.y_range().unwrap_or((0.0, 1.0));
        let span = y1 - y0;
        let pad = if span > 0.0 { span * 0.08 } else { (y0.abs() * 0.01).max(0.01) };

        Self {
            figure,
            x_bounds: [x0, x1],
            y_bounds: [y0 - pad, y1 + pad],
        }
    }
}

impl Widget for FigureChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let figure = self.figure;
        let x_kind = figure.x_kind;

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 8)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(figure.x_label.as_str())
                .y_desc(figure.y_label.as_str())
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| x_kind.format(*v))
                .y_label_formatter(&|v| format!("{v:.4}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            let line_color = RGBColor(0, 255, 255); // cyan
            let peak_color = RGBColor(0, 255, 0); // green
            let low_color = RGBColor(255, 0, 0); // red

            for segment in &figure.segments {
                if segment.len() == 1 {
                    chart.draw_series(segment.iter().map(|&p| Pixel::new(p, line_color)))?;
                } else {
                    chart.draw_series(LineSeries::new(segment.iter().copied(), &line_color))?;
                }
            }

            // Colored `Pixel`s instead of `Circle`s: the ratatui backend maps
            // circle radii to canvas units incorrectly.
            for a in &figure.annotations {
                let color = if a.text.starts_with("Low") { low_color } else { peak_color };
                chart.draw_series(std::iter::once(Pixel::new((a.x, a.y), color)))?;
                chart.draw_series(std::iter::once(Text::new(
                    a.text.clone(),
                    (a.x, a.y),
                    ("sans-serif", 10).into_font().color(&color),
                )))?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}
