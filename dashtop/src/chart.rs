//! Trend figures and the charting seam.
//!
//! Figures are plain data. Drawing is delegated to a [`Plotter`], which the
//! controller may not have at all; in that case charts are skipped quietly.

use std::collections::BTreeMap;

use tracing::{trace, warn};

use crate::document::Document;
use crate::format::parse_timestamp;
use crate::types::{DiskHistoryPoint, HistoryPoint, MemoryHistoryPoint};

pub const Y_RANGE: (f64, f64) = (0.0, 100.0);

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    // sorted by timestamp
    pub points: Vec<HistoryPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: String,
    pub series: Vec<Series>,
    pub y_range: (f64, f64),
}

impl Figure {
    /// Time span across all series, as (min, max) unix seconds.
    pub fn x_bounds(&self) -> Option<(f64, f64)> {
        let mut it = self
            .series
            .iter()
            .flat_map(|s| s.points.iter())
            .map(|p| p.timestamp.timestamp() as f64);
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), x| (lo.min(x), hi.max(x))))
    }
}

/// Drawing backend for figures (line + marker style, fixed y range).
pub trait Plotter: Send + Sync {
    fn new_plot(&self, doc: &mut Document, target: &str, figure: Figure);
}

/// Stores the figure in the target chart region for the terminal UI to draw.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentPlotter;

impl Plotter for DocumentPlotter {
    fn new_plot(&self, doc: &mut Document, target: &str, figure: Figure) {
        doc.set_figure(target, figure);
    }
}

fn to_points<'a, I>(series: &str, raw: I) -> Vec<HistoryPoint>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut points: Vec<HistoryPoint> = raw
        .into_iter()
        .filter_map(|(ts, value)| match parse_timestamp(ts) {
            Some(timestamp) => Some(HistoryPoint { timestamp, value }),
            None => {
                warn!(series, timestamp = ts, "dropping sample with unparsable timestamp");
                None
            }
        })
        .collect();
    points.sort_by_key(|p| p.timestamp);
    points
}

pub fn memory_figure(history: &[MemoryHistoryPoint]) -> Option<Figure> {
    if history.is_empty() {
        return None;
    }
    let points = to_points(
        "memory",
        history.iter().map(|h| (h.timestamp.as_str(), h.memory_percent)),
    );
    trace!(points = points.len(), "memory figure built");
    Some(Figure {
        title: "Memory usage trend".into(),
        series: vec![Series {
            name: "Memory usage".into(),
            points,
        }],
        y_range: Y_RANGE,
    })
}

pub fn disk_figure(history: &BTreeMap<String, Vec<DiskHistoryPoint>>) -> Option<Figure> {
    if history.is_empty() {
        return None;
    }
    let series: Vec<Series> = history
        .iter()
        .map(|(device, samples)| Series {
            name: device.clone(),
            points: to_points(device, samples.iter().map(|h| (h.timestamp.as_str(), h.percent))),
        })
        .collect();
    trace!(devices = series.len(), "disk figure built");
    Some(Figure {
        title: "Disk usage trend".into(),
        series,
        y_range: Y_RANGE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disk(ts: &str, percent: f64) -> DiskHistoryPoint {
        DiskHistoryPoint {
            timestamp: ts.into(),
            percent,
        }
    }

    #[test]
    fn single_device_yields_one_series_in_time_order() {
        let mut h = BTreeMap::new();
        h.insert(
            "/dev/sda1".to_string(),
            vec![disk("2024-05-01T10:00:00", 10.0), disk("2024-05-01T10:05:00", 20.0)],
        );
        let fig = disk_figure(&h).unwrap();
        assert_eq!(fig.series.len(), 1);
        assert_eq!(fig.series[0].name, "/dev/sda1");
        let values: Vec<f64> = fig.series[0].points.iter().map(|p| p.value).collect();
        assert_eq!(values, [10.0, 20.0]);
        assert_eq!(fig.y_range, (0.0, 100.0));
    }

    #[test]
    fn out_of_order_samples_are_sorted() {
        let mut h = BTreeMap::new();
        h.insert(
            "nvme0n1p2".to_string(),
            vec![disk("2024-05-01T10:05:00", 20.0), disk("2024-05-01T10:00:00", 10.0)],
        );
        let fig = disk_figure(&h).unwrap();
        assert!(fig.series[0].points[0].timestamp < fig.series[0].points[1].timestamp);
        assert_eq!(fig.series[0].points[0].value, 10.0);
    }

    #[test]
    fn empty_history_builds_nothing() {
        assert!(disk_figure(&BTreeMap::new()).is_none());
        assert!(memory_figure(&[]).is_none());
    }

    #[test]
    fn bad_timestamps_are_dropped() {
        let h = vec![
            MemoryHistoryPoint {
                timestamp: "garbage".into(),
                memory_percent: 50.0,
            },
            MemoryHistoryPoint {
                timestamp: "2024-05-01 10:00:00".into(),
                memory_percent: 51.0,
            },
        ];
        let fig = memory_figure(&h).unwrap();
        assert_eq!(fig.series[0].points.len(), 1);
        assert!(fig.x_bounds().is_some());
    }

    #[test]
    fn document_plotter_needs_a_container() {
        let fig = memory_figure(&[MemoryHistoryPoint {
            timestamp: "2024-05-01T10:00:00".into(),
            memory_percent: 40.0,
        }])
        .unwrap();
        let mut doc = Document::standard().without(crate::document::ids::MEMORY_CHART);
        DocumentPlotter.new_plot(&mut doc, crate::document::ids::MEMORY_CHART, fig);
        assert!(doc.figure(crate::document::ids::MEMORY_CHART).is_none());
    }
}
