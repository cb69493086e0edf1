//! Server details panel: one labelled line per detail region.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::document::{ids, Document};
use crate::ui::theme::MUTED;

const FIELDS: [(&str, &str); 10] = [
    ("OS", ids::OS_INFO),
    ("Version", ids::OS_VERSION),
    ("Hostname", ids::HOSTNAME),
    ("Arch", ids::ARCHITECTURE),
    ("CPU", ids::PROCESSOR),
    ("Cores", ids::CPU_CORES),
    ("Memory", ids::TOTAL_MEMORY),
    ("Python", ids::PYTHON_VERSION_DETAIL),
    ("Booted", ids::BOOT_TIME),
    ("Kernel", ids::KERNEL_VERSION),
];

pub fn draw_details(f: &mut ratatui::Frame<'_>, area: Rect, doc: &Document) {
    let lines: Vec<Line> = FIELDS
        .iter()
        .filter_map(|(label, id)| {
            doc.text(id).map(|text| {
                Line::from(vec![
                    Span::styled(format!("{label:<9}"), Style::default().fg(MUTED)),
                    Span::raw(text.to_string()),
                ])
            })
        })
        .collect();
    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Server")),
        area,
    );
}
