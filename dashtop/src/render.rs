//! Region writers: turn one backend response into document mutations.
//!
//! Each writer touches only its own regions and replaces what was there. A
//! region missing from the document is skipped without affecting the rest.

use std::cmp::Ordering;

use chrono::{DateTime, Local};

use crate::document::{ids, Cell, Document, TableRow};
use crate::format::{
    epoch_to_local, format_bytes, format_local, format_percent, parse_timestamp, placeholder,
    status_class, Level,
};
use crate::types::{DiskResponse, MetricSnapshot, ProcessRow, SystemDetails};

pub const PROCESS_LIMIT: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcSortBy {
    #[default]
    CpuDesc,
    MemDesc,
    // keep the backend's order
    Server,
}

impl ProcSortBy {
    pub fn next(self) -> Self {
        match self {
            ProcSortBy::CpuDesc => ProcSortBy::MemDesc,
            ProcSortBy::MemDesc => ProcSortBy::Server,
            ProcSortBy::Server => ProcSortBy::CpuDesc,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProcSortBy::CpuDesc => "CPU %",
            ProcSortBy::MemDesc => "Mem %",
            ProcSortBy::Server => "server order",
        }
    }
}

/// Sort descending by the chosen key (stable on ties) and keep the first `limit`.
pub fn top_processes(mut rows: Vec<ProcessRow>, sort_by: ProcSortBy, limit: usize) -> Vec<ProcessRow> {
    match sort_by {
        ProcSortBy::CpuDesc => {
            rows.sort_by(|a, b| b.cpu_percent.partial_cmp(&a.cpu_percent).unwrap_or(Ordering::Equal))
        }
        ProcSortBy::MemDesc => rows.sort_by(|a, b| {
            b.memory_percent
                .partial_cmp(&a.memory_percent)
                .unwrap_or(Ordering::Equal)
        }),
        ProcSortBy::Server => {}
    }
    rows.truncate(limit);
    rows
}

pub fn render_refresh_indicator(doc: &mut Document, visible: bool) {
    doc.set_visible(ids::REFRESH_INDICATOR, visible);
}

fn render_scalar(doc: &mut Document, text_id: &str, bar_id: &str, card_id: Option<&str>, v: f64) {
    doc.set_text(text_id, format_percent(v));
    doc.set_width(bar_id, v);
    if let Some(card) = card_id {
        doc.set_class(card, Level::classify(v).card_class());
    }
}

pub fn render_overview(doc: &mut Document, snap: &MetricSnapshot) {
    render_scalar(doc, ids::CPU_PERCENT, ids::CPU_PROGRESS, None, snap.cpu_percent);
    render_scalar(
        doc,
        ids::MEMORY_PERCENT,
        ids::MEMORY_PROGRESS,
        Some(ids::MEMORY_CARD),
        snap.memory_percent,
    );
    render_scalar(
        doc,
        ids::DISK_PERCENT,
        ids::DISK_PROGRESS,
        Some(ids::DISK_CARD),
        snap.disk_percent,
    );

    let apps = &snap.applications;
    for (id, version) in [
        (ids::PYTHON_VERSION, &apps.python),
        (ids::JAVA_VERSION, &apps.java),
        (ids::DOCKER_VERSION, &apps.docker),
    ] {
        let text = version
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or(placeholder::NOT_INSTALLED);
        doc.set_text(id, text);
    }
}

fn or_unknown(v: Option<u32>) -> String {
    v.filter(|n| *n > 0)
        .map(|n| n.to_string())
        .unwrap_or_else(|| placeholder::UNKNOWN.to_string())
}

pub fn render_details(doc: &mut Document, d: &SystemDetails) {
    doc.set_text(ids::OS_INFO, format!("{} {}", d.system, d.release));
    doc.set_text(ids::OS_VERSION, d.version.as_str());
    doc.set_text(ids::HOSTNAME, d.node.as_str());
    doc.set_text(ids::ARCHITECTURE, d.machine.as_str());
    doc.set_text(
        ids::PROCESSOR,
        d.processor
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(placeholder::UNKNOWN),
    );
    doc.set_text(ids::PYTHON_VERSION_DETAIL, d.python_version.as_str());
    doc.set_text(
        ids::CPU_CORES,
        format!(
            "{} physical cores, {} logical cores",
            or_unknown(d.cpu_count_physical),
            or_unknown(d.cpu_count_logical)
        ),
    );
    doc.set_text(ids::TOTAL_MEMORY, format_bytes(d.memory.total));
    // Boot time is left alone when the backend omits it
    if let Some(boot) = d.boot_time.filter(|b| *b > 0.0).and_then(epoch_to_local) {
        doc.set_text(ids::BOOT_TIME, format_local(&boot));
    }
    doc.set_text(ids::KERNEL_VERSION, d.version.as_str());
}

pub fn render_details_unavailable(doc: &mut Document) {
    for id in ids::DETAIL_FIELDS {
        doc.set_text(id, placeholder::UNAVAILABLE);
    }
}

/// Server-provided collection time when parsable, else the client's clock.
pub fn render_collection_time(doc: &mut Document, id: &str, server: Option<&str>, now: DateTime<Local>) {
    let at = server.and_then(parse_timestamp).unwrap_or(now);
    doc.set_text(id, format_local(&at));
}

pub fn disk_table_rows(disk: &DiskResponse) -> Vec<TableRow> {
    disk.disks
        .iter()
        .map(|d| {
            vec![
                Cell::text(d.device.as_str()),
                Cell::text(d.mountpoint.as_str()),
                Cell::text(format_bytes(d.total)),
                Cell::text(format_bytes(d.used)),
                Cell::text(format_bytes(d.free)),
                Cell::text(format_percent(d.percent))
                    .with_class(Level::classify(d.percent).bar_class())
                    .with_width(d.percent),
            ]
        })
        .collect()
}

pub fn render_disk_table(doc: &mut Document, disk: &DiskResponse, now: DateTime<Local>) {
    // No table body means nothing in this group is drawn, timestamp included
    if doc.rows(ids::DISK_TABLE).is_none() {
        tracing::debug!(table = ids::DISK_TABLE, "target table missing; skipped");
        return;
    }
    render_collection_time(doc, ids::DISK_COLLECTION_TIME, disk.collection_time.as_deref(), now);
    doc.replace_rows(ids::DISK_TABLE, disk_table_rows(disk));
}

pub fn process_table_rows(rows: &[ProcessRow]) -> Vec<TableRow> {
    rows.iter()
        .map(|p| {
            vec![
                Cell::text(p.pid.to_string()),
                Cell::text(p.name.as_str()),
                Cell::text(p.status.as_str()).with_class(status_class(&p.status)),
                Cell::text(format!("{:.2}", p.cpu_percent)),
                Cell::text(format!("{:.2}", p.memory_percent)),
            ]
        })
        .collect()
}

pub fn render_process_table(
    doc: &mut Document,
    collection_time: Option<&str>,
    rows: &[ProcessRow],
    now: DateTime<Local>,
) {
    if doc.rows(ids::PROCESS_TABLE).is_none() {
        tracing::debug!(table = ids::PROCESS_TABLE, "target table missing; skipped");
        return;
    }
    render_collection_time(doc, ids::PROCESS_COLLECTION_TIME, collection_time, now);
    doc.replace_rows(ids::PROCESS_TABLE, process_table_rows(rows));
}

pub fn render_server_ip(doc: &mut Document, ip: Option<&str>) {
    match ip.filter(|s| !s.is_empty()) {
        Some(ip) => doc.set_text(ids::SERVER_IP, format!("Server IP: {ip}")),
        None => doc.set_text(ids::SERVER_IP, placeholder::SERVER_IP_UNAVAILABLE),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Applications, DiskRow};

    fn proc(pid: u32, cpu: f64, mem: f64) -> ProcessRow {
        ProcessRow {
            pid,
            name: format!("p{pid}"),
            status: "running".into(),
            cpu_percent: cpu,
            memory_percent: mem,
        }
    }

    #[test]
    fn top_processes_sorts_cpu_desc() {
        let rows = vec![proc(1, 10.0, 0.0), proc(2, 90.0, 0.0), proc(3, 50.0, 0.0)];
        let cpu: Vec<f64> = top_processes(rows, ProcSortBy::CpuDesc, PROCESS_LIMIT)
            .iter()
            .map(|p| p.cpu_percent)
            .collect();
        assert_eq!(cpu, [90.0, 50.0, 10.0]);
    }

    #[test]
    fn top_processes_keeps_at_most_twenty() {
        let rows: Vec<ProcessRow> = (0..35).map(|i| proc(i, i as f64, 0.0)).collect();
        let top = top_processes(rows, ProcSortBy::CpuDesc, PROCESS_LIMIT);
        assert_eq!(top.len(), 20);
        assert_eq!(top[0].pid, 34);
        assert_eq!(top[19].pid, 15);
    }

    #[test]
    fn server_order_is_untouched_and_mem_sort_works() {
        let rows = vec![proc(1, 10.0, 5.0), proc(2, 90.0, 1.0), proc(3, 50.0, 9.0)];
        let server: Vec<u32> = top_processes(rows.clone(), ProcSortBy::Server, PROCESS_LIMIT)
            .iter()
            .map(|p| p.pid)
            .collect();
        assert_eq!(server, [1, 2, 3]);
        let mem: Vec<u32> = top_processes(rows, ProcSortBy::MemDesc, PROCESS_LIMIT)
            .iter()
            .map(|p| p.pid)
            .collect();
        assert_eq!(mem, [3, 1, 2]);
    }

    #[test]
    fn overview_sets_text_width_and_class() {
        let mut doc = Document::standard();
        let snap = MetricSnapshot {
            cpu_percent: 12.5,
            memory_percent: 81.0,
            disk_percent: 65.333,
            applications: Applications {
                python: Some("3.11.4".into()),
                java: None,
                docker: Some(String::new()),
            },
        };
        render_overview(&mut doc, &snap);
        assert_eq!(doc.text(ids::CPU_PERCENT), Some("12.50%"));
        assert_eq!(doc.element(ids::CPU_PROGRESS).unwrap().width, Some(12.5));
        assert!(doc.element(ids::CPU_PROGRESS).unwrap().class.is_none());
        assert!(doc.element(ids::MEMORY_CARD).unwrap().has_class("critical"));
        assert!(doc.element(ids::DISK_CARD).unwrap().has_class("warning"));
        assert_eq!(doc.text(ids::DISK_PERCENT), Some("65.33%"));
        assert_eq!(doc.text(ids::PYTHON_VERSION), Some("3.11.4"));
        assert_eq!(doc.text(ids::JAVA_VERSION), Some(placeholder::NOT_INSTALLED));
        assert_eq!(doc.text(ids::DOCKER_VERSION), Some(placeholder::NOT_INSTALLED));
    }

    #[test]
    fn overview_survives_missing_regions() {
        let mut doc = Document::standard()
            .without(ids::CPU_PERCENT)
            .without(ids::MEMORY_CARD);
        let snap = MetricSnapshot {
            cpu_percent: 1.0,
            memory_percent: 2.0,
            disk_percent: 3.0,
            applications: Applications::default(),
        };
        render_overview(&mut doc, &snap);
        assert!(doc.text(ids::CPU_PERCENT).is_none());
        assert_eq!(doc.text(ids::MEMORY_PERCENT), Some("2.00%"));
        assert_eq!(doc.text(ids::DISK_PERCENT), Some("3.00%"));
    }

    #[test]
    fn details_fill_fallbacks() {
        let mut doc = Document::standard();
        let d = SystemDetails {
            system: "Linux".into(),
            release: "6.1.0".into(),
            version: "#1 SMP".into(),
            node: "web01".into(),
            machine: "x86_64".into(),
            processor: Some(String::new()),
            python_version: "3.11.4".into(),
            cpu_count_physical: None,
            cpu_count_logical: Some(8),
            memory: crate::types::MemoryTotals { total: 16 * 1024u64.pow(3) },
            boot_time: None,
        };
        doc.set_text(ids::BOOT_TIME, "earlier");
        render_details(&mut doc, &d);
        assert_eq!(doc.text(ids::OS_INFO), Some("Linux 6.1.0"));
        assert_eq!(doc.text(ids::PROCESSOR), Some(placeholder::UNKNOWN));
        assert_eq!(doc.text(ids::CPU_CORES), Some("Unknown physical cores, 8 logical cores"));
        assert_eq!(doc.text(ids::TOTAL_MEMORY), Some("16.00 GB"));
        assert_eq!(doc.text(ids::KERNEL_VERSION), Some("#1 SMP"));
        assert_eq!(doc.text(ids::BOOT_TIME), Some("earlier"));
    }

    #[test]
    fn unavailable_covers_all_detail_fields() {
        let mut doc = Document::standard();
        render_details_unavailable(&mut doc);
        for id in ids::DETAIL_FIELDS {
            assert_eq!(doc.text(id), Some(placeholder::UNAVAILABLE), "{id}");
        }
    }

    #[test]
    fn disk_rows_format_bytes_and_bar_class() {
        let disk = DiskResponse {
            max_disk_percent: 91.0,
            applications: Applications::default(),
            disks: vec![DiskRow {
                device: "/dev/sda1".into(),
                mountpoint: "/".into(),
                total: 100 * 1024u64.pow(3),
                used: 91 * 1024u64.pow(3),
                free: 9 * 1024u64.pow(3),
                percent: 91.0,
            }],
            collection_time: Some("2024-05-01T10:00:00".into()),
        };
        let mut doc = Document::standard();
        render_disk_table(&mut doc, &disk, Local::now());
        let rows = doc.rows(ids::DISK_TABLE).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][2].text, "100.00 GB");
        assert_eq!(rows[0][4].text, "9.00 GB");
        assert_eq!(rows[0][5].class.as_deref(), Some("bg-danger"));
        assert_eq!(rows[0][5].width, Some(91.0));
        assert_eq!(doc.text(ids::DISK_COLLECTION_TIME), Some("2024-05-01 10:00:00"));
    }

    #[test]
    fn collection_time_falls_back_to_client_clock() {
        let mut doc = Document::standard();
        let now = Local::now();
        render_collection_time(&mut doc, ids::PROCESS_COLLECTION_TIME, None, now);
        assert_eq!(doc.text(ids::PROCESS_COLLECTION_TIME), Some(format_local(&now).as_str()));
        render_collection_time(&mut doc, ids::PROCESS_COLLECTION_TIME, Some("n/a"), now);
        assert_eq!(doc.text(ids::PROCESS_COLLECTION_TIME), Some(format_local(&now).as_str()));
    }

    #[test]
    fn process_rows_carry_status_class() {
        let mut p = proc(7, 1.234, 5.678);
        p.status = "sleeping".into();
        let rows = process_table_rows(&[p]);
        assert_eq!(rows[0][0].text, "7");
        assert_eq!(rows[0][2].class.as_deref(), Some("status-sleeping"));
        assert_eq!(rows[0][3].text, "1.23");
        assert_eq!(rows[0][4].text, "5.68");
    }

    #[test]
    fn server_ip_placeholder() {
        let mut doc = Document::standard();
        render_server_ip(&mut doc, Some("10.0.0.5"));
        assert_eq!(doc.text(ids::SERVER_IP), Some("Server IP: 10.0.0.5"));
        render_server_ip(&mut doc, Some(""));
        assert_eq!(doc.text(ids::SERVER_IP), Some(placeholder::SERVER_IP_UNAVAILABLE));
    }
}
