//! All days of one ticker overlaid as percent-of-open lines.

use chrono::NaiveDate;
use tickerview_core::domain::EnrichedSeries;
use tickerview_core::palette::{sample_palette, Rgb};

use super::html::{self, HoverMode, HoverPoint};
use super::plot::{self, padded_range, LinePlot, LineSpec};
use super::RenderError;
use crate::reporting::format::seconds_from_midnight;

/// A day opening at 0 has no defined percent-of-open; it is drawn flat at 0
/// so every day keeps its line.
fn plotted_percent(percent: f64) -> f64 {
    if percent.is_finite() {
        percent
    } else {
        0.0
    }
}

#[derive(Debug, Clone)]
pub struct CombinedChart {
    pub html: String,
    /// Line color assigned to each day, oldest first.
    pub series_colors: Vec<(NaiveDate, Rgb)>,
}

pub fn render_combined_chart(
    series: &EnrichedSeries,
    width: u32,
    height: u32,
) -> Result<CombinedChart, RenderError> {
    let (first, last) = match (series.first_date(), series.last_date()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(RenderError::EmptySeries(series.symbol.clone())),
    };
    let title = format!(
        "{} Stock Price changes from {} to {}",
        series.symbol,
        first.format("%Y-%m-%d"),
        last.format("%Y-%m-%d")
    );

    let colors = sample_palette(series.day_count());
    let series_colors: Vec<(NaiveDate, Rgb)> = series
        .days
        .iter()
        .zip(colors.iter().copied())
        .map(|(day, color)| (day.date(), color))
        .collect();

    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for o in series.observations() {
        let x = seconds_from_midnight(o.time_of_day);
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        let y = plotted_percent(o.percent_of_open_price);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    let lines = series
        .days
        .iter()
        .zip(colors.iter().copied())
        .map(|(day, color)| LineSpec {
            color,
            points: day
                .observations()
                .iter()
                .map(|o| {
                    (
                        seconds_from_midnight(o.time_of_day),
                        plotted_percent(o.percent_of_open_price),
                    )
                })
                .collect(),
        })
        .collect();

    let rendered = plot::render(&LinePlot {
        title: title.clone(),
        x_desc: "Time".into(),
        y_desc: "Percent of Open Price".into(),
        width,
        height,
        x_range: padded_range(x_min, x_max, 0.0, 300.0),
        y_range: padded_range(y_min, y_max, 0.05, 0.5),
        y_label_decimals: 2,
        lines,
    })?;

    let mut hover = Vec::new();
    for (day, pixels) in series.days.iter().zip(&rendered.pixels) {
        for (o, &(x, y)) in day.observations().iter().zip(pixels) {
            if !o.percent_of_open_price.is_finite() {
                continue;
            }
            hover.push(HoverPoint {
                x,
                y,
                rows: vec![
                    (
                        "Percent of Open Price".to_string(),
                        format!("{:.3}", o.percent_of_open_price),
                    ),
                    ("Time of Day".to_string(), o.time_of_day_string.clone()),
                    ("Date".to_string(), o.date_string.clone()),
                ],
            });
        }
    }

    let html = html::page(&title, &rendered.svg, HoverMode::Mouse, rendered.area, &hover)?;
    Ok(CombinedChart {
        html,
        series_colors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use tickerview_core::domain::{DaySlice, LocalObservation};
    use tickerview_core::palette::DARK2;

    fn day(date: NaiveDate, opens: &[f64]) -> DaySlice {
        let observations = opens
            .iter()
            .enumerate()
            .map(|(i, &open)| {
                let time = NaiveTime::from_hms_opt(8, 30 + 5 * i as u32, 0).unwrap();
                LocalObservation {
                    local_time: date.and_time(time),
                    date,
                    date_string: date.format("%Y-%m-%d").to_string(),
                    time_of_day: time,
                    time_of_day_string: time.format("%H:%M").to_string(),
                    open,
                    close: open,
                    percent_of_open_price: (open / opens[0] - 1.0) * 100.0,
                }
            })
            .collect();
        DaySlice::new(date, observations).unwrap()
    }

    fn series(days: usize) -> EnrichedSeries {
        let start = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        EnrichedSeries {
            symbol: "AAPL".into(),
            days: (0..days)
                .map(|i| {
                    let date = start + chrono::Duration::days(i as i64);
                    day(date, &[100.0, 102.0, 101.0])
                })
                .collect(),
        }
    }

    #[test]
    fn title_spans_first_and_last_day() {
        let chart = render_combined_chart(&series(2), 400, 250).unwrap();
        assert!(chart
            .html
            .contains("<title>AAPL Stock Price changes from 2024-03-04 to 2024-03-05</title>"));
        assert!(chart.html.contains(r#""mode":"mouse""#));
        assert!(chart.html.contains(r#"["Percent of Open Price","2.000"]"#));
        assert!(chart.html.contains(r#"["Date","2024-03-05"]"#));
    }

    #[test]
    fn one_color_per_day_from_palette() {
        let chart = render_combined_chart(&series(3), 400, 250).unwrap();
        let colors: Vec<Rgb> = chart.series_colors.iter().map(|(_, c)| *c).collect();
        assert_eq!(colors, vec![DARK2[0], DARK2[4], DARK2[7]]);
    }

    #[test]
    fn single_day_uses_first_palette_color() {
        let chart = render_combined_chart(&series(1), 400, 250).unwrap();
        assert_eq!(chart.series_colors.len(), 1);
        assert!(chart.html.contains("AAPL Stock Price changes from 2024-03-04 to 2024-03-04"));
    }

    #[test]
    fn zero_opening_day_still_draws_its_line() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let series = EnrichedSeries {
            symbol: "AAPL".into(),
            days: vec![
                day(start, &[100.0, 102.0, 101.0]),
                day(start + chrono::Duration::days(1), &[105.0, 104.0, 106.0]),
                day(start + chrono::Duration::days(2), &[0.0, 1.0]),
            ],
        };
        let chart = render_combined_chart(&series, 400, 250).unwrap();
        let html = chart.html.to_ascii_lowercase();
        for color in [DARK2[0], DARK2[4], DARK2[7]] {
            assert!(html.contains(&color.to_string()), "missing line colour {color}");
        }
    }

    #[test]
    fn empty_series_is_an_error() {
        let empty = EnrichedSeries {
            symbol: "AAPL".into(),
            days: Vec::new(),
        };
        assert!(matches!(
            render_combined_chart(&empty, 400, 250),
            Err(RenderError::EmptySeries(s)) if s == "AAPL"
        ));
    }
}
