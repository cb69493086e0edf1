//! Process table with status coloring, zebra striping and wheel/key scrolling.

use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::style::Modifier;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Cell, Row, Table},
};

use crate::document::{ids, Document};
use crate::render::ProcSortBy;
use crate::ui::theme::{status_color, MUTED, TITLE};
use crate::ui::util::inner;

const COLS: [Constraint; 5] = [
    Constraint::Length(8),      // PID
    Constraint::Percentage(40), // Name
    Constraint::Length(10),     // Status
    Constraint::Length(8),      // CPU %
    Constraint::Length(8),      // Mem %
];

// Visible body rows: borders (2) + header (1)
pub fn page_size(area: Rect) -> usize {
    area.height.saturating_sub(3).max(1) as usize
}

pub fn clamp_offset(offset: &mut usize, total_rows: usize, page: usize) {
    *offset = (*offset).min(total_rows.saturating_sub(page));
}

pub fn processes_title(doc: &Document, sort_by: ProcSortBy) -> String {
    let shown = doc.rows(ids::PROCESS_TABLE).map_or(0, <[_]>::len);
    let collected = doc.text(ids::PROCESS_COLLECTION_TIME).unwrap_or_default();
    let mut title = format!("Processes (top {shown}, by {})", sort_by.label());
    if !collected.is_empty() {
        title.push_str(&format!(" | collected {collected}"));
    }
    title
}

pub fn draw_processes(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    doc: &Document,
    scroll_offset: usize,
    sort_by: ProcSortBy,
) {
    let rows = doc.rows(ids::PROCESS_TABLE).unwrap_or_default();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(processes_title(doc, sort_by));

    let page = page_size(area);
    let mut offset = scroll_offset;
    clamp_offset(&mut offset, rows.len(), page);

    let body = rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(page)
        .filter(|(_, r)| r.len() >= 5)
        .map(|(i, r)| {
            let zebra = if i % 2 == 1 {
                Style::default().bg(Color::Rgb(30, 30, 36))
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(r[0].text.clone()).style(Style::default().fg(MUTED)),
                Cell::from(r[1].text.clone()),
                Cell::from(r[2].text.clone())
                    .style(Style::default().fg(status_color(r[2].class.as_deref()))),
                Cell::from(r[3].text.clone()),
                Cell::from(r[4].text.clone()),
            ])
            .style(zebra)
        });

    let cpu_hdr = if sort_by == ProcSortBy::CpuDesc { "CPU % •" } else { "CPU %" };
    let mem_hdr = if sort_by == ProcSortBy::MemDesc { "Mem % •" } else { "Mem %" };
    let header = Row::new(vec!["PID", "Name", "Status", cpu_hdr, mem_hdr])
        .style(Style::default().fg(TITLE).add_modifier(Modifier::BOLD));

    let table = Table::new(body, COLS.to_vec())
        .header(header)
        .column_spacing(1)
        .block(block);
    f.render_widget(table, area);
}

/// Handle keyboard scrolling (Up/Down/PageUp/PageDown/Home/End)
pub fn processes_handle_key(scroll_offset: &mut usize, key: KeyEvent, page_size: usize) {
    match key.code {
        KeyCode::Up => *scroll_offset = scroll_offset.saturating_sub(1),
        KeyCode::Down => *scroll_offset = scroll_offset.saturating_add(1),
        KeyCode::PageUp => *scroll_offset = scroll_offset.saturating_sub(page_size.max(1)),
        KeyCode::PageDown => *scroll_offset = scroll_offset.saturating_add(page_size.max(1)),
        KeyCode::Home => *scroll_offset = 0,
        KeyCode::End => *scroll_offset = usize::MAX,
        _ => {}
    }
}

/// Wheel scrolling while the pointer is over the table body.
pub fn processes_handle_mouse(scroll_offset: &mut usize, mouse: MouseEvent, area: Rect) {
    let content = inner(area);
    let inside = mouse.column >= content.x
        && mouse.column < content.x + content.width
        && mouse.row >= content.y
        && mouse.row < content.y + content.height;
    if !inside {
        return;
    }
    match mouse.kind {
        MouseEventKind::ScrollUp => *scroll_offset = scroll_offset.saturating_sub(1),
        MouseEventKind::ScrollDown => *scroll_offset = scroll_offset.saturating_add(1),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn keys_move_and_clamp() {
        let mut off = 0usize;
        processes_handle_key(&mut off, key(KeyCode::Up), 10);
        assert_eq!(off, 0);
        processes_handle_key(&mut off, key(KeyCode::PageDown), 10);
        assert_eq!(off, 10);
        processes_handle_key(&mut off, key(KeyCode::End), 10);
        clamp_offset(&mut off, 20, 10);
        assert_eq!(off, 10);
        processes_handle_key(&mut off, key(KeyCode::Home), 10);
        assert_eq!(off, 0);
    }

    #[test]
    fn title_shows_count_sort_and_collection_time() {
        let mut doc = Document::standard();
        assert_eq!(
            processes_title(&doc, ProcSortBy::CpuDesc),
            "Processes (top 0, by CPU %)"
        );
        doc.set_text(ids::PROCESS_COLLECTION_TIME, "2024-05-01 10:00:00");
        assert_eq!(
            processes_title(&doc, ProcSortBy::MemDesc),
            "Processes (top 0, by Mem %) | collected 2024-05-01 10:00:00"
        );
    }

    #[test]
    fn page_size_excludes_borders_and_header() {
        assert_eq!(page_size(Rect::new(0, 0, 80, 23)), 20);
        assert_eq!(page_size(Rect::new(0, 0, 80, 2)), 1);
    }
}
