//! Display rules shared by every panel: percentages, byte sizes, thresholds,
//! process status classes and timestamps.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

/// Fixed user-facing placeholders.
pub mod placeholder {
    pub const UNAVAILABLE: &str = "Unavailable";
    pub const NOT_INSTALLED: &str = "Not installed";
    pub const UNKNOWN: &str = "Unknown";
    pub const SERVER_IP_UNAVAILABLE: &str = "Server IP unavailable";
}

pub fn format_percent(v: f64) -> String {
    format!("{v:.2}%")
}

const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Scale by the largest power of 1024 not exceeding `b` (capped at TB).
pub fn format_bytes(b: u64) -> String {
    if b == 0 {
        return "0 Bytes".into();
    }
    let mut i = 0usize;
    let mut scale = 1u64;
    while i + 1 < UNITS.len() {
        match scale.checked_mul(1024) {
            Some(next) if next <= b => {
                scale = next;
                i += 1;
            }
            _ => break,
        }
    }
    format!("{:.2} {}", b as f64 / scale as f64, UNITS[i])
}

/// Threshold band for memory and disk usage. Not configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Normal,
    Warning,
    Critical,
}

impl Level {
    pub fn classify(p: f64) -> Self {
        if p > 80.0 {
            Level::Critical
        } else if p > 60.0 {
            Level::Warning
        } else {
            Level::Normal
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Level::Normal => "normal",
            Level::Warning => "warning",
            Level::Critical => "critical",
        }
    }

    pub fn card_class(self) -> String {
        format!("metric-card {}", self.name())
    }

    pub fn bar_class(self) -> &'static str {
        match self {
            Level::Normal => "bg-success",
            Level::Warning => "bg-warning",
            Level::Critical => "bg-danger",
        }
    }

    // Recover the level from a class string written by card_class/bar_class
    pub fn from_class(class: &str) -> Option<Self> {
        class.split_whitespace().find_map(|c| match c {
            "normal" | "bg-success" => Some(Level::Normal),
            "warning" | "bg-warning" => Some(Level::Warning),
            "critical" | "bg-danger" => Some(Level::Critical),
            _ => None,
        })
    }
}

pub fn status_class(status: &str) -> &'static str {
    match status {
        "sleeping" => "status-sleeping",
        "stopped" => "status-stopped",
        _ => "status-running",
    }
}

/// Accepts RFC 3339, or ISO-8601 / `YYYY-MM-DD HH:MM:SS` without offset (read as local time).
pub fn parse_timestamp(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
}

pub fn format_local(dt: &DateTime<Local>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn epoch_to_local(secs: f64) -> Option<DateTime<Local>> {
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9) as u32;
    DateTime::from_timestamp(whole as i64, nanos).map(|dt| dt.with_timezone(&Local))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn bytes_zero_and_units() {
        assert_eq!(format_bytes(0), "0 Bytes");
        assert_eq!(format_bytes(1), "1.00 Bytes");
        assert_eq!(format_bytes(1023), "1023.00 Bytes");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.00 MB");
        assert_eq!(format_bytes(8_589_934_592), "8.00 GB");
        assert_eq!(format_bytes(3 * 1024u64.pow(4)), "3.00 TB");
    }

    #[test]
    fn bytes_beyond_tb_stay_in_tb() {
        assert_eq!(format_bytes(2048 * 1024u64.pow(4)), "2048.00 TB");
        assert!(format_bytes(u64::MAX).ends_with(" TB"));
    }

    #[test]
    fn threshold_boundaries() {
        assert_eq!(Level::classify(0.0), Level::Normal);
        assert_eq!(Level::classify(60.0), Level::Normal);
        assert_eq!(Level::classify(60.01), Level::Warning);
        assert_eq!(Level::classify(80.0), Level::Warning);
        assert_eq!(Level::classify(80.01), Level::Critical);
        assert_eq!(Level::classify(100.0), Level::Critical);
    }

    #[test]
    fn classes_round_trip_through_names() {
        for l in [Level::Normal, Level::Warning, Level::Critical] {
            assert_eq!(Level::from_class(&l.card_class()), Some(l));
            assert_eq!(Level::from_class(l.bar_class()), Some(l));
        }
        assert_eq!(Level::card_class(Level::Critical), "metric-card critical");
        assert_eq!(Level::from_class("metric-card"), None);
    }

    #[test]
    fn status_lookup_defaults_to_running() {
        assert_eq!(status_class("sleeping"), "status-sleeping");
        assert_eq!(status_class("stopped"), "status-stopped");
        assert_eq!(status_class("running"), "status-running");
        assert_eq!(status_class("zombie"), "status-running");
        assert_eq!(status_class(""), "status-running");
    }

    #[test]
    fn percent_has_two_decimals() {
        assert_eq!(format_percent(12.346), "12.35%");
        assert_eq!(format_percent(0.0), "0.00%");
        assert_eq!(format_percent(100.0), "100.00%");
    }

    #[test]
    fn timestamps_with_and_without_offset() {
        let naive = parse_timestamp("2024-05-01T10:20:30.123456").unwrap();
        assert_eq!((naive.hour(), naive.minute(), naive.second()), (10, 20, 30));
        let spaced = parse_timestamp("2024-05-01 10:20:30").unwrap();
        assert_eq!(spaced.day(), 1);
        assert!(parse_timestamp("2024-05-01T10:20:30+00:00").is_some());
        assert!(parse_timestamp("2024-05-01T10:20:30Z").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn epoch_seconds_convert() {
        let dt = epoch_to_local(1_700_000_000.0).unwrap();
        assert_eq!(dt.timestamp(), 1_700_000_000);
        assert!(epoch_to_local(f64::NAN).is_none());
    }
}
