//! Small UI helpers: truncation, icons, inner rects.

use ratatui::layout::Rect;

pub fn truncate_middle(s: &str, max: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max {
        return s.to_string();
    }
    if max <= 3 {
        return "...".into();
    }
    let keep = max - 3;
    let left = keep / 2;
    let right = keep - left;
    let head: String = chars[..left].iter().collect();
    let tail: String = chars[chars.len() - right..].iter().collect();
    format!("{head}...{tail}")
}

pub fn disk_icon(device: &str) -> &'static str {
    let n = device.to_ascii_lowercase();
    if n.contains(':') {
        "🗄️"
    } else if n.contains("nvme") {
        "⚡"
    } else if n.contains("/sd") || n.starts_with("sd") {
        "💽"
    } else if n.contains("overlay") {
        "📦"
    } else {
        "🖴"
    }
}

// Area inside a one-cell border
pub fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_in_the_middle() {
        assert_eq!(truncate_middle("/dev/sda1", 20), "/dev/sda1");
        assert_eq!(truncate_middle("/dev/mapper/vg0-root", 11), "/dev...root");
        assert_eq!(truncate_middle("abcdef", 3), "...");
    }

    #[test]
    fn icons_by_device_kind() {
        assert_eq!(disk_icon("/dev/nvme0n1p1"), "⚡");
        assert_eq!(disk_icon("/dev/sda1"), "💽");
        assert_eq!(disk_icon("C:"), "🗄️");
        assert_eq!(disk_icon("overlay"), "📦");
    }
}
