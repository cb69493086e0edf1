//! Types that mirror the backend's JSON responses, plus the view-models built from them.

use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize, Clone)]
pub struct CpuResponse {
    pub cpu_percent: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MemoryResponse {
    pub memory_percent: f64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Applications {
    #[serde(default)]
    pub python: Option<String>,
    #[serde(default)]
    pub java: Option<String>,
    #[serde(default)]
    pub docker: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DiskRow {
    pub device: String,
    pub mountpoint: String,
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub percent: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DiskResponse {
    pub max_disk_percent: f64,
    #[serde(default)]
    pub applications: Applications,
    #[serde(default)]
    pub disks: Vec<DiskRow>,
    #[serde(default)]
    pub collection_time: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct MemoryTotals {
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct SystemDetails {
    pub system: String,
    pub release: String,
    pub version: String,
    pub node: String,
    pub machine: String,
    pub processor: Option<String>,
    pub python_version: String,
    pub cpu_count_physical: Option<u32>,
    pub cpu_count_logical: Option<u32>,
    pub memory: MemoryTotals,
    // epoch seconds
    pub boot_time: Option<f64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MemoryHistoryPoint {
    pub timestamp: String,
    pub memory_percent: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DiskHistoryPoint {
    pub timestamp: String,
    pub percent: f64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct MemoryTrendResponse {
    #[serde(default)]
    pub history: Vec<MemoryHistoryPoint>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DiskTrendResponse {
    // device key -> ordered samples
    #[serde(default)]
    pub history: BTreeMap<String, Vec<DiskHistoryPoint>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProcessRow {
    pub pid: u32,
    pub name: String,
    pub status: String,
    pub cpu_percent: f64,
    pub memory_percent: f64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ProcessesResponse {
    #[serde(default)]
    pub collection_time: Option<String>,
    #[serde(default)]
    pub processes: Vec<ProcessRow>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ServerIpResponse {
    #[serde(default)]
    pub ip: Option<String>,
}

/// One chart sample after timestamp parsing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryPoint {
    pub timestamp: chrono::DateTime<chrono::Local>,
    pub value: f64,
}

/// Scalars shown in the overview row for one refresh cycle; never cached.
#[derive(Debug, Clone)]
pub struct MetricSnapshot {
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub disk_percent: f64,
    pub applications: Applications,
}

impl MetricSnapshot {
    pub fn from_responses(cpu: &CpuResponse, mem: &MemoryResponse, disk: &DiskResponse) -> Self {
        Self {
            cpu_percent: cpu.cpu_percent,
            memory_percent: mem.memory_percent,
            disk_percent: disk.max_disk_percent,
            applications: disk.applications.clone(),
        }
    }
}
