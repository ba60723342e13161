//! Static line plot drawn to SVG with plotters.
//!
//! Besides the SVG markup, rendering reports where every data point and the
//! plotting area landed in pixel space, so the HTML hover overlay can place
//! its tooltip and crosshair without re-deriving the axis scales.

use plotters::prelude::*;
use std::ops::Range;
use tickerview_core::palette::Rgb;

use super::RenderError;
use crate::reporting::format::clock_label;

/// One polyline in data space (x = seconds since midnight).
#[derive(Debug, Clone)]
pub struct LineSpec {
    pub color: Rgb,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone)]
pub struct LinePlot {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub width: u32,
    pub height: u32,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub y_label_decimals: usize,
    pub lines: Vec<LineSpec>,
}

/// Plotting-area bounds in SVG pixels.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct PlotArea {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

#[derive(Debug, Clone)]
pub struct RenderedPlot {
    pub svg: String,
    pub area: PlotArea,
    /// Pixel position of each point, per line, in input order.
    pub pixels: Vec<Vec<(i32, i32)>>,
}

fn plot_err(e: impl std::fmt::Display) -> RenderError {
    RenderError::Plot(e.to_string())
}

/// Pad a data range so flat or single-point series still get a usable axis.
pub fn padded_range(min: f64, max: f64, pad_fraction: f64, flat_pad: f64) -> Range<f64> {
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    let span = max - min;
    if span <= f64::EPSILON {
        return (min - flat_pad)..(max + flat_pad);
    }
    let pad = span * pad_fraction;
    (min - pad)..(max + pad)
}

pub fn render(plot: &LinePlot) -> Result<RenderedPlot, RenderError> {
    let mut svg = String::new();
    let mut pixels: Vec<Vec<(i32, i32)>> = Vec::with_capacity(plot.lines.len());
    let area;

    {
        let root = SVGBackend::with_string(&mut svg, (plot.width, plot.height)).into_drawing_area();
        root.fill(&WHITE).map_err(plot_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&plot.title, ("sans-serif", 13).into_font())
            .margin(8)
            .x_label_area_size(34)
            .y_label_area_size(52)
            .build_cartesian_2d(plot.x_range.clone(), plot.y_range.clone())
            .map_err(plot_err)?;

        let decimals = plot.y_label_decimals;
        chart
            .configure_mesh()
            .x_desc(plot.x_desc.as_str())
            .y_desc(plot.y_desc.as_str())
            .x_labels(5)
            .y_labels(6)
            .x_label_formatter(&|x| clock_label(*x))
            .y_label_formatter(&|y| format!("{y:.decimals$}"))
            .label_style(("sans-serif", 10))
            .draw()
            .map_err(plot_err)?;

        for line in &plot.lines {
            let color = RGBColor(line.color.r, line.color.g, line.color.b);
            let finite: Vec<(f64, f64)> = line
                .points
                .iter()
                .copied()
                .filter(|(x, y)| x.is_finite() && y.is_finite())
                .collect();
            chart
                .draw_series(LineSeries::new(finite, color.stroke_width(1)))
                .map_err(plot_err)?;
            pixels.push(line.points.iter().map(|p| chart.backend_coord(p)).collect());
        }

        let (x_px, y_px) = chart.plotting_area().get_pixel_range();
        area = PlotArea {
            left: x_px.start,
            right: x_px.end,
            top: y_px.start,
            bottom: y_px.end,
        };

        root.present().map_err(plot_err)?;
    }

    Ok(RenderedPlot { svg, area, pixels })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_plot() -> LinePlot {
        LinePlot {
            title: "AAPL test".into(),
            x_desc: "Time".into(),
            y_desc: "Stock Price".into(),
            width: 400,
            height: 250,
            x_range: 30_600.0..31_200.0,
            y_range: 99.0..103.0,
            y_label_decimals: 2,
            lines: vec![LineSpec {
                color: Rgb::new(27, 158, 119),
                points: vec![(30_600.0, 100.0), (30_900.0, 102.0), (31_200.0, 101.0)],
            }],
        }
    }

    #[test]
    fn renders_svg_with_pixels_inside_area() {
        let rendered = render(&sample_plot()).unwrap();
        assert!(rendered.svg.contains("<svg"));
        assert!(rendered.svg.contains("AAPL test"));
        assert_eq!(rendered.pixels.len(), 1);
        assert_eq!(rendered.pixels[0].len(), 3);

        let area = rendered.area;
        assert!(area.left < area.right && area.top < area.bottom);
        for &(x, y) in &rendered.pixels[0] {
            assert!(x >= area.left - 1 && x <= area.right + 1);
            assert!(y >= area.top - 1 && y <= area.bottom + 1);
        }
        // Later times map further right.
        assert!(rendered.pixels[0][0].0 < rendered.pixels[0][2].0);
        // Higher prices map further up.
        assert!(rendered.pixels[0][1].1 < rendered.pixels[0][0].1);
    }

    #[test]
    fn rendering_is_deterministic() {
        let a = render(&sample_plot()).unwrap();
        let b = render(&sample_plot()).unwrap();
        assert_eq!(a.svg, b.svg);
    }

    #[test]
    fn padded_range_handles_flat_series() {
        assert_eq!(padded_range(5.0, 5.0, 0.05, 1.0), 4.0..6.0);
        let r = padded_range(100.0, 110.0, 0.1, 1.0);
        assert!((r.start - 99.0).abs() < 1e-9 && (r.end - 111.0).abs() < 1e-9);
        assert_eq!(padded_range(f64::NAN, 1.0, 0.1, 1.0), 0.0..1.0);
    }
}
