//! Refresh controller: one fan-out/fan-in batch of backend reads per cycle.
//!
//! Every sub-operation fetches on its own, renders its own regions, and logs
//! its own failure; a failing request never cancels or blanks its siblings.

use std::{
    future::Future,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use chrono::Local;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::api::{ApiClient, Endpoint};
use crate::chart::{disk_figure, memory_figure, Plotter};
use crate::document::{ids, SharedDocument};
use crate::error::FetchError;
use crate::render::{
    render_details, render_details_unavailable, render_disk_table, render_overview,
    render_process_table, render_refresh_indicator, render_server_ip, top_processes, ProcSortBy,
    PROCESS_LIMIT,
};
use crate::types::{
    CpuResponse, DiskResponse, DiskTrendResponse, MemoryResponse, MemoryTrendResponse,
    MetricSnapshot, ProcessesResponse, ServerIpResponse, SystemDetails,
};

pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone)]
pub struct RefreshOptions {
    // keep the indicator up this long after the last sub-fetch settles
    pub settle_delay: Duration,
    pub process_sort: ProcSortBy,
    pub process_limit: usize,
}

impl Default for RefreshOptions {
    fn default() -> Self {
        Self {
            settle_delay: DEFAULT_SETTLE_DELAY,
            process_sort: ProcSortBy::default(),
            process_limit: PROCESS_LIMIT,
        }
    }
}

pub struct RefreshController {
    api: ApiClient,
    doc: SharedDocument,
    plotter: Option<Arc<dyn Plotter>>,
    settle_delay: Duration,
    process_limit: usize,
    process_sort: Mutex<ProcSortBy>,
    in_flight: AtomicBool,
}

// Clears the in-flight flag even if the cycle future is dropped mid-way
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl RefreshController {
    pub fn new(
        api: ApiClient,
        doc: SharedDocument,
        plotter: Option<Arc<dyn Plotter>>,
        opts: RefreshOptions,
    ) -> Self {
        Self {
            api,
            doc,
            plotter,
            settle_delay: opts.settle_delay,
            process_limit: opts.process_limit,
            process_sort: Mutex::new(opts.process_sort),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn document(&self) -> &SharedDocument {
        &self.doc
    }

    pub fn process_sort(&self) -> ProcSortBy {
        self.process_sort.lock().map(|s| *s).unwrap_or_default()
    }

    pub fn set_process_sort(&self, sort: ProcSortBy) {
        if let Ok(mut s) = self.process_sort.lock() {
            *s = sort;
        }
    }

    pub fn is_refreshing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Initial load: the full cycle plus the server IP lookup.
    pub async fn on_page_load(&self) {
        futures::join!(self.load_all(), self.load_server_ip());
    }

    // None when a cycle already holds the flag
    fn claim(&self) -> Option<InFlight<'_>> {
        match self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => Some(InFlight(&self.in_flight)),
            Err(_) => {
                debug!("refresh already in flight; trigger ignored");
                None
            }
        }
    }

    /// Initial load holding the in-flight flag, so triggers during it are ignored.
    pub async fn try_page_load(&self) -> bool {
        let Some(_guard) = self.claim() else {
            return false;
        };
        self.on_page_load().await;
        true
    }

    /// Run one cycle unless one is already in flight. Returns whether it ran.
    pub async fn try_refresh(&self) -> bool {
        let Some(_guard) = self.claim() else {
            return false;
        };
        self.load_all().await;
        true
    }

    /// One refresh cycle. Never fails; sub-operation errors are logged.
    pub async fn load_all(&self) {
        render_refresh_indicator(&mut *self.doc.lock().await, true);
        info!("refresh cycle started");

        let (overview, details, mem_trend, disk_trend, disks, procs) = futures::join!(
            guarded("system overview", self.load_system_overview()),
            self.load_server_details(),
            guarded("memory trend", self.load_memory_trend()),
            guarded("disk trend", self.load_disk_trend()),
            guarded("disk details", self.load_disk_details()),
            self.load_process_list(),
        );
        let ok = [overview, details, mem_trend, disk_trend, disks, procs]
            .iter()
            .filter(|ok| **ok)
            .count();
        info!(ok, failed = 6 - ok, "refresh cycle settled");

        if !self.settle_delay.is_zero() {
            sleep(self.settle_delay).await;
        }
        render_refresh_indicator(&mut *self.doc.lock().await, false);
    }

    pub async fn load_system_overview(&self) -> Result<(), FetchError> {
        let (cpu, mem, disk) = futures::try_join!(
            self.api.get::<CpuResponse>(Endpoint::Cpu),
            self.api.get::<MemoryResponse>(Endpoint::Memory),
            self.api.get::<DiskResponse>(Endpoint::Disk),
        )?;
        let snap = MetricSnapshot::from_responses(&cpu, &mem, &disk);
        render_overview(&mut *self.doc.lock().await, &snap);
        Ok(())
    }

    /// Details degrade to the "unavailable" placeholder on failure.
    pub async fn load_server_details(&self) -> bool {
        match self.api.get::<SystemDetails>(Endpoint::Details).await {
            Ok(d) => {
                render_details(&mut *self.doc.lock().await, &d);
                true
            }
            Err(e) => {
                warn!(op = "server details", error = %e, "sub-operation failed");
                render_details_unavailable(&mut *self.doc.lock().await);
                false
            }
        }
    }

    pub async fn load_memory_trend(&self) -> Result<(), FetchError> {
        let trend: MemoryTrendResponse = self.api.get(Endpoint::MemoryTrend).await?;
        match memory_figure(&trend.history) {
            Some(fig) => self.plot(ids::MEMORY_CHART, fig).await,
            None => debug!(chart = ids::MEMORY_CHART, "no memory history; chart left as is"),
        }
        Ok(())
    }

    pub async fn load_disk_trend(&self) -> Result<(), FetchError> {
        let trend: DiskTrendResponse = self.api.get(Endpoint::DiskTrend).await?;
        match disk_figure(&trend.history) {
            Some(fig) => self.plot(ids::DISK_CHART, fig).await,
            None => debug!(chart = ids::DISK_CHART, "no disk history; chart left as is"),
        }
        Ok(())
    }

    async fn plot(&self, target: &str, fig: crate::chart::Figure) {
        let Some(plotter) = self.plotter.as_ref() else {
            debug!(chart = target, "no chart backend; skipped");
            return;
        };
        let mut doc = self.doc.lock().await;
        if !doc.has_chart(target) {
            debug!(chart = target, "chart container missing; skipped");
            return;
        }
        debug!(chart = target, series = fig.series.len(), "drawing chart");
        plotter.new_plot(&mut doc, target, fig);
    }

    pub async fn load_disk_details(&self) -> Result<(), FetchError> {
        let disk: DiskResponse = self.api.get(Endpoint::Disk).await?;
        render_disk_table(&mut *self.doc.lock().await, &disk, Local::now());
        Ok(())
    }

    /// The collection time is refreshed from the client clock even on failure.
    pub async fn load_process_list(&self) -> bool {
        match self.api.get::<ProcessesResponse>(Endpoint::Processes).await {
            Ok(resp) => {
                let rows = top_processes(resp.processes, self.process_sort(), self.process_limit);
                render_process_table(
                    &mut *self.doc.lock().await,
                    resp.collection_time.as_deref(),
                    &rows,
                    Local::now(),
                );
                true
            }
            Err(e) => {
                warn!(op = "process list", error = %e, "sub-operation failed");
                let mut doc = self.doc.lock().await;
                crate::render::render_collection_time(
                    &mut doc,
                    ids::PROCESS_COLLECTION_TIME,
                    None,
                    Local::now(),
                );
                false
            }
        }
    }

    pub async fn load_server_ip(&self) -> bool {
        match self.api.get::<ServerIpResponse>(Endpoint::ServerIp).await {
            Ok(resp) => {
                render_server_ip(&mut *self.doc.lock().await, resp.ip.as_deref());
                true
            }
            Err(e) => {
                warn!(op = "server ip", error = %e, "sub-operation failed");
                render_server_ip(&mut *self.doc.lock().await, None);
                false
            }
        }
    }
}

async fn guarded<F>(op: &'static str, fut: F) -> bool
where
    F: Future<Output = Result<(), FetchError>>,
{
    match fut.await {
        Ok(()) => true,
        Err(e) => {
            warn!(op, network = e.is_network(), error = %e, "sub-operation failed");
            false
        }
    }
}
