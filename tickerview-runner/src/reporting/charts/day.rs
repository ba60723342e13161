//! Single-day price chart: open price over time of day.

use tickerview_core::domain::DaySlice;
use tickerview_core::palette::Rgb;

use super::html::{self, HoverMode, HoverPoint};
use super::plot::{self, padded_range, LinePlot, LineSpec};
use super::RenderError;
use crate::reporting::format::{money, seconds_from_midnight};

pub fn render_day_chart(
    symbol: &str,
    day: &DaySlice,
    color: Rgb,
    width: u32,
    height: u32,
) -> Result<String, RenderError> {
    let title = format!("{symbol} Stock Prices for {}", day.date().format("%Y-%m-%d"));
    let points: Vec<(f64, f64)> = day
        .observations()
        .iter()
        .map(|o| (seconds_from_midnight(o.time_of_day), o.open))
        .collect();

    let metrics = day.metrics();
    let x_start = seconds_from_midnight(day.opening().time_of_day);
    let x_end = seconds_from_midnight(day.closing().time_of_day);

    let rendered = plot::render(&LinePlot {
        title: title.clone(),
        x_desc: "Time".into(),
        y_desc: "Stock Price".into(),
        width,
        height,
        x_range: padded_range(x_start.min(x_end), x_start.max(x_end), 0.0, 300.0),
        y_range: padded_range(metrics.min_price, metrics.max_price, 0.05, 1.0),
        y_label_decimals: 2,
        lines: vec![LineSpec { color, points }],
    })?;

    let hover: Vec<HoverPoint> = day
        .observations()
        .iter()
        .zip(rendered.pixels.iter().flatten())
        .map(|(o, &(x, y))| HoverPoint {
            x,
            y,
            rows: vec![
                ("Stock Price".to_string(), money(o.open)),
                ("Time of Day".to_string(), o.time_of_day_string.clone()),
            ],
        })
        .collect();

    html::page(&title, &rendered.svg, HoverMode::Vline, rendered.area, &hover)
}
