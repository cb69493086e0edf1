//! In-memory page model. Every render step writes named regions here and the
//! terminal UI draws whatever the regions currently hold.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::Mutex;
use tracing::debug;

use crate::chart::Figure;

pub type SharedDocument = Arc<Mutex<Document>>;

/// Region ids used by the standard dashboard layout.
pub mod ids {
    pub const REFRESH_INDICATOR: &str = "refresh-indicator";
    pub const SERVER_IP: &str = "server-ip";

    pub const CPU_PERCENT: &str = "cpu-percent";
    pub const CPU_PROGRESS: &str = "cpu-progress";
    pub const MEMORY_PERCENT: &str = "memory-percent";
    pub const MEMORY_PROGRESS: &str = "memory-progress";
    pub const MEMORY_CARD: &str = "memory-card";
    pub const DISK_PERCENT: &str = "disk-percent";
    pub const DISK_PROGRESS: &str = "disk-progress";
    pub const DISK_CARD: &str = "disk-card";

    pub const PYTHON_VERSION: &str = "python-version";
    pub const JAVA_VERSION: &str = "java-version";
    pub const DOCKER_VERSION: &str = "docker-version";

    pub const OS_INFO: &str = "os-info";
    pub const OS_VERSION: &str = "os-version";
    pub const HOSTNAME: &str = "hostname";
    pub const ARCHITECTURE: &str = "architecture";
    pub const PROCESSOR: &str = "processor";
    pub const PYTHON_VERSION_DETAIL: &str = "python-version-detail";
    pub const CPU_CORES: &str = "cpu-cores";
    pub const TOTAL_MEMORY: &str = "total-memory";
    pub const BOOT_TIME: &str = "boot-time";
    pub const KERNEL_VERSION: &str = "kernel-version";

    /// Detail fields overwritten with the "unavailable" placeholder when details fail.
    pub const DETAIL_FIELDS: [&str; 10] = [
        OS_INFO,
        OS_VERSION,
        HOSTNAME,
        ARCHITECTURE,
        PROCESSOR,
        PYTHON_VERSION_DETAIL,
        CPU_CORES,
        TOTAL_MEMORY,
        BOOT_TIME,
        KERNEL_VERSION,
    ];

    pub const DISK_COLLECTION_TIME: &str = "disk-collection-time";
    pub const PROCESS_COLLECTION_TIME: &str = "process-collection-time";

    pub const DISK_TABLE: &str = "disk-table-body";
    pub const PROCESS_TABLE: &str = "process-table-body";

    pub const MEMORY_CHART: &str = "memory-chart";
    pub const DISK_CHART: &str = "disk-chart";
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub text: String,
    pub class: Option<String>,
    // progress width in percent
    pub width: Option<f64>,
    pub visible: bool,
}

impl Element {
    pub fn has_class(&self, name: &str) -> bool {
        self.class
            .as_deref()
            .is_some_and(|c| c.split_whitespace().any(|x| x == name))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    pub text: String,
    pub class: Option<String>,
    pub width: Option<f64>,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }
}

pub type TableRow = Vec<Cell>;

#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: HashMap<String, Element>,
    tables: HashMap<String, Vec<TableRow>>,
    charts: HashMap<String, Option<Figure>>,
}

impl Document {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every region the dashboard renders into.
    pub fn standard() -> Self {
        use ids::*;
        let mut doc = Self::empty();
        for id in [
            REFRESH_INDICATOR,
            SERVER_IP,
            CPU_PERCENT,
            CPU_PROGRESS,
            MEMORY_PERCENT,
            MEMORY_PROGRESS,
            MEMORY_CARD,
            DISK_PERCENT,
            DISK_PROGRESS,
            DISK_CARD,
            PYTHON_VERSION,
            JAVA_VERSION,
            DOCKER_VERSION,
            DISK_COLLECTION_TIME,
            PROCESS_COLLECTION_TIME,
        ]
        .into_iter()
        .chain(DETAIL_FIELDS)
        {
            doc.add_element(id);
        }
        doc.add_table(DISK_TABLE);
        doc.add_table(PROCESS_TABLE);
        doc.add_chart(MEMORY_CHART);
        doc.add_chart(DISK_CHART);
        doc
    }

    pub fn add_element(&mut self, id: &str) {
        self.elements.entry(id.to_string()).or_default();
    }

    pub fn add_table(&mut self, id: &str) {
        self.tables.entry(id.to_string()).or_default();
    }

    pub fn add_chart(&mut self, id: &str) {
        self.charts.entry(id.to_string()).or_default();
    }

    /// Drop a region of any kind; later writes to it become no-ops.
    pub fn remove(&mut self, id: &str) {
        self.elements.remove(id);
        self.tables.remove(id);
        self.charts.remove(id);
    }

    pub fn without(mut self, id: &str) -> Self {
        self.remove(id);
        self
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.text.as_str())
    }

    pub fn rows(&self, id: &str) -> Option<&[TableRow]> {
        self.tables.get(id).map(Vec::as_slice)
    }

    pub fn figure(&self, id: &str) -> Option<&Figure> {
        self.charts.get(id).and_then(Option::as_ref)
    }

    pub fn has_chart(&self, id: &str) -> bool {
        self.charts.contains_key(id)
    }

    fn with_element(&mut self, id: &str, f: impl FnOnce(&mut Element)) -> bool {
        match self.elements.get_mut(id) {
            Some(el) => {
                f(el);
                true
            }
            None => {
                debug!(element = id, "target element missing; skipped");
                false
            }
        }
    }

    pub fn set_text(&mut self, id: &str, text: impl Into<String>) -> bool {
        let text = text.into();
        self.with_element(id, |el| el.text = text)
    }

    pub fn set_class(&mut self, id: &str, class: impl Into<String>) -> bool {
        let class = class.into();
        self.with_element(id, |el| el.class = Some(class))
    }

    pub fn set_width(&mut self, id: &str, pct: f64) -> bool {
        self.with_element(id, |el| el.width = Some(pct))
    }

    pub fn set_visible(&mut self, id: &str, visible: bool) -> bool {
        self.with_element(id, |el| el.visible = visible)
    }

    /// Replace the whole table body; prior rows never survive.
    pub fn replace_rows(&mut self, id: &str, rows: Vec<TableRow>) -> bool {
        match self.tables.get_mut(id) {
            Some(body) => {
                *body = rows;
                true
            }
            None => {
                debug!(table = id, "target table missing; skipped");
                false
            }
        }
    }

    pub fn set_figure(&mut self, id: &str, figure: Figure) -> bool {
        match self.charts.get_mut(id) {
            Some(slot) => {
                *slot = Some(figure);
                true
            }
            None => {
                debug!(chart = id, "chart container missing; skipped");
                false
            }
        }
    }
}
