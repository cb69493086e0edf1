//! Trend charts drawn from the chart regions' current figures.

use chrono::{Local, TimeZone};
use ratatui::{
    layout::Rect,
    style::Style,
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};

use crate::chart::Figure;
use crate::document::Document;
use crate::ui::theme::{MUTED, SERIES};

fn time_label(secs: f64) -> String {
    Local
        .timestamp_opt(secs as i64, 0)
        .single()
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_default()
}

// (x, y) pairs per series, x in unix seconds
pub fn series_data(fig: &Figure) -> Vec<Vec<(f64, f64)>> {
    fig.series
        .iter()
        .map(|s| {
            s.points
                .iter()
                .map(|p| (p.timestamp.timestamp() as f64, p.value))
                .collect()
        })
        .collect()
}

pub fn draw_trend(f: &mut ratatui::Frame<'_>, area: Rect, doc: &Document, chart_id: &str, title: &str) {
    let Some(fig) = doc.figure(chart_id) else {
        let block = Block::default().borders(Borders::ALL).title(title.to_string());
        f.render_widget(
            Paragraph::new(Span::styled("no data", Style::default().fg(MUTED))).block(block),
            area,
        );
        return;
    };
    let block = Block::default().borders(Borders::ALL).title(fig.title.clone());

    let data = series_data(fig);
    let (lo, hi) = fig.x_bounds().unwrap_or((0.0, 1.0));
    // Single-sample figures still need a non-empty x range
    let hi = if hi > lo { hi } else { lo + 60.0 };

    let datasets: Vec<Dataset> = fig
        .series
        .iter()
        .zip(data.iter())
        .enumerate()
        .map(|(i, (s, pts))| {
            Dataset::default()
                .name(s.name.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(SERIES[i % SERIES.len()]))
                .data(pts)
        })
        .collect();

    let (ylo, yhi) = fig.y_range;
    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(MUTED))
                .bounds([lo, hi])
                .labels(vec![
                    Span::raw(time_label(lo)),
                    Span::raw(time_label((lo + hi) / 2.0)),
                    Span::raw(time_label(hi)),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(MUTED))
                .bounds([ylo, yhi])
                .labels(vec![Span::raw("0"), Span::raw("50"), Span::raw("100")]),
        );
    f.render_widget(chart, area);
}
