//! Shared UI theme: region classes -> colors.

use ratatui::style::Color;

use crate::format::Level;

pub const TITLE: Color = Color::Cyan;
pub const MUTED: Color = Color::DarkGray;
pub const CPU: Color = Color::Cyan;

pub fn level_color(level: Option<Level>) -> Color {
    match level {
        Some(Level::Normal) => Color::Green,
        Some(Level::Warning) => Color::Yellow,
        Some(Level::Critical) => Color::Red,
        None => Color::Magenta,
    }
}

pub fn status_color(class: Option<&str>) -> Color {
    match class {
        Some("status-sleeping") => Color::Blue,
        Some("status-stopped") => Color::Red,
        _ => Color::Green,
    }
}

// One color per trend series, cycled by index
pub const SERIES: [Color; 6] = [
    Color::Cyan,
    Color::LightBlue,
    Color::Magenta,
    Color::Yellow,
    Color::LightGreen,
    Color::LightRed,
];
