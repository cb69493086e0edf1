//! Top header with server address, refresh indicator and key hints.

use crate::document::{ids, Document};
use crate::render::ProcSortBy;
use ratatui::{
    layout::Rect,
    widgets::{Block, Borders},
};

pub fn header_title(doc: &Document, base_url: &str, sort: ProcSortBy) -> String {
    let ip = doc
        .text(ids::SERVER_IP)
        .filter(|s| !s.is_empty())
        .unwrap_or("Server IP: …");
    let refreshing = doc
        .element(ids::REFRESH_INDICATOR)
        .is_some_and(|e| e.visible);
    let status = if refreshing { " | ⟳ refreshing" } else { "" };
    format!(
        "dashtop — {base_url} | {ip}{status}  (r: refresh, s: sort [{}], q: quit)",
        sort.label()
    )
}

pub fn draw_header(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    doc: &Document,
    base_url: &str,
    sort: ProcSortBy,
) {
    let title = header_title(doc, base_url, sort);
    f.render_widget(Block::default().title(title).borders(Borders::BOTTOM), area);
}
