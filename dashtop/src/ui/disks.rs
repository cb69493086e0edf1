//! Disk details table: one row per device with a usage bar in the last column.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row, Table},
};

use crate::document::{self, ids, Document};
use crate::format::Level;
use crate::ui::theme::{level_color, TITLE};
use crate::ui::util::{disk_icon, truncate_middle};

const COLS: [Constraint; 6] = [
    Constraint::Percentage(24), // Device
    Constraint::Percentage(16), // Mount
    Constraint::Length(11),     // Total
    Constraint::Length(11),     // Used
    Constraint::Length(11),     // Free
    Constraint::Min(16),        // Usage
];

const BAR_WIDTH: usize = 8;

// Text bar like "█████░░░ 62.50%"
fn usage_line(cell: &document::Cell) -> Line<'static> {
    let pct = cell.width.unwrap_or(0.0).clamp(0.0, 100.0);
    let filled = ((pct / 100.0) * BAR_WIDTH as f64).round() as usize;
    let color = level_color(cell.class.as_deref().and_then(Level::from_class));
    Line::from(vec![
        Span::styled("█".repeat(filled), Style::default().fg(color)),
        Span::styled("░".repeat(BAR_WIDTH - filled), Style::default().fg(Color::DarkGray)),
        Span::raw(format!(" {}", cell.text)),
    ])
}

pub fn draw_disks(f: &mut ratatui::Frame<'_>, area: Rect, doc: &Document) {
    let collected = doc.text(ids::DISK_COLLECTION_TIME).unwrap_or_default();
    let block = Block::default().borders(Borders::ALL).title(if collected.is_empty() {
        "Disks".to_string()
    } else {
        format!("Disks (collected {collected})")
    });
    let Some(rows) = doc.rows(ids::DISK_TABLE) else {
        f.render_widget(block, area);
        return;
    };

    let name_w = (area.width as usize * 24 / 100).saturating_sub(3);
    let body = rows.iter().filter(|r| r.len() >= 6).map(|r| {
        Row::new(vec![
            Cell::from(format!(
                "{} {}",
                disk_icon(&r[0].text),
                truncate_middle(&r[0].text, name_w)
            )),
            Cell::from(r[1].text.clone()),
            Cell::from(r[2].text.clone()),
            Cell::from(r[3].text.clone()),
            Cell::from(r[4].text.clone()),
            Cell::from(usage_line(&r[5])),
        ])
    });

    let header = Row::new(vec!["Device", "Mount", "Total", "Used", "Free", "Usage"])
        .style(Style::default().fg(TITLE).add_modifier(Modifier::BOLD));
    let table = Table::new(body, COLS.to_vec())
        .header(header)
        .column_spacing(1)
        .block(block);
    f.render_widget(table, area);
}
