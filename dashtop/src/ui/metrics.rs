//! Overview row: CPU / Memory / Disk gauges and installed application versions.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::document::{ids, Document};
use crate::format::Level;
use crate::ui::theme::{level_color, CPU, MUTED};

// Percentage for a progress region, clamped for the gauge
fn gauge_percent(doc: &Document, bar_id: &str) -> u16 {
    doc.element(bar_id)
        .and_then(|e| e.width)
        .map(|w| w.clamp(0.0, 100.0).round() as u16)
        .unwrap_or(0)
}

fn draw_gauge(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    doc: &Document,
    title: &str,
    (text_id, bar_id, card_id): (&str, &str, Option<&str>),
) {
    // A metric with no text region is not part of this page
    let Some(text) = doc.text(text_id) else {
        f.render_widget(Block::default().borders(Borders::ALL).title(title), area);
        return;
    };
    let color = match card_id {
        Some(card) => level_color(
            doc.element(card)
                .and_then(|e| e.class.as_deref())
                .and_then(Level::from_class),
        ),
        None => CPU,
    };
    let label = if text.is_empty() { "…" } else { text };
    let g = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .gauge_style(Style::default().fg(color))
        .percent(gauge_percent(doc, bar_id))
        .label(label.to_string());
    f.render_widget(g, area);
}

pub fn draw_metrics(f: &mut ratatui::Frame<'_>, area: Rect, doc: &Document) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    draw_gauge(f, cols[0], doc, "CPU", (ids::CPU_PERCENT, ids::CPU_PROGRESS, None));
    draw_gauge(
        f,
        cols[1],
        doc,
        "Memory",
        (ids::MEMORY_PERCENT, ids::MEMORY_PROGRESS, Some(ids::MEMORY_CARD)),
    );
    draw_gauge(
        f,
        cols[2],
        doc,
        "Disk (max)",
        (ids::DISK_PERCENT, ids::DISK_PROGRESS, Some(ids::DISK_CARD)),
    );
    draw_apps(f, cols[3], doc);
}

fn draw_apps(f: &mut ratatui::Frame<'_>, area: Rect, doc: &Document) {
    let line = |name: &str, id: &str| {
        Line::from(vec![
            Span::styled(format!("{name:<7}"), Style::default().fg(MUTED)),
            Span::styled(
                doc.text(id).unwrap_or_default().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ])
    };
    let lines = vec![
        line("Python", ids::PYTHON_VERSION),
        line("Java", ids::JAVA_VERSION),
        line("Docker", ids::DOCKER_VERSION),
    ];
    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Applications")),
        area,
    );
}
