//! App state and main loop: input handling, triggering refresh cycles, and drawing.

use std::{
    io,
    sync::Arc,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Terminal,
};
use tokio::time::sleep;
use tracing::info;

use crate::controller::RefreshController;
use crate::document::{ids, Document};
use crate::ui::{
    charts::draw_trend,
    details::draw_details,
    disks::draw_disks,
    header::draw_header,
    metrics::draw_metrics,
    processes::{
        clamp_offset, draw_processes, page_size, processes_handle_key, processes_handle_mouse,
    },
};

pub struct App {
    controller: Arc<RefreshController>,
    base_url: String,

    // None = refresh on start and on demand only
    refresh_interval: Option<Duration>,
    last_refresh: Instant,

    should_quit: bool,

    pub procs_scroll_offset: usize,
    last_procs_area: Option<Rect>,
}

impl App {
    pub fn new(controller: Arc<RefreshController>, base_url: String, refresh_interval: Option<Duration>) -> Self {
        Self {
            controller,
            base_url,
            refresh_interval,
            last_refresh: Instant::now(),
            should_quit: false,
            procs_scroll_offset: 0,
            last_procs_area: None,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        // Initial load runs in the background so the first frame shows immediately
        let ctl = self.controller.clone();
        tokio::spawn(async move { ctl.try_page_load().await });
        self.last_refresh = Instant::now();

        // Terminal setup
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        // Main loop
        let res = self.event_loop(&mut terminal).await;

        // Teardown
        disable_raw_mode()?;
        let backend = terminal.backend_mut();
        execute!(backend, DisableMouseCapture, LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    // Manual, timer and sort-change triggers all go through the in-flight guard
    fn trigger_refresh(&mut self, reason: &'static str) {
        self.last_refresh = Instant::now();
        let ctl = self.controller.clone();
        tokio::spawn(async move {
            if !ctl.try_refresh().await {
                info!(reason, "refresh skipped: previous cycle still running");
            }
        });
    }

    fn handle_key(&mut self, k: KeyEvent) {
        match k.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('r') | KeyCode::Char('R') => self.trigger_refresh("manual"),
            KeyCode::Char('s') | KeyCode::Char('S') => {
                // The table holds rendered rows, so a new order needs a new fetch
                let next = self.controller.process_sort().next();
                self.controller.set_process_sort(next);
                self.trigger_refresh("sort change");
            }
            _ => {
                if let Some(p_area) = self.last_procs_area {
                    processes_handle_key(&mut self.procs_scroll_offset, k, page_size(p_area));
                }
            }
        }
    }

    async fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> anyhow::Result<()> {
        loop {
            // Input (non-blocking)
            while event::poll(Duration::from_millis(10))? {
                match event::read()? {
                    Event::Key(k) => self.handle_key(k),
                    Event::Mouse(m) => {
                        if let Some(p_area) = self.last_procs_area {
                            processes_handle_mouse(&mut self.procs_scroll_offset, m, p_area);
                        }
                    }
                    _ => {}
                }
            }
            if self.should_quit {
                break;
            }

            if let Some(every) = self.refresh_interval {
                if self.last_refresh.elapsed() >= every {
                    self.trigger_refresh("timer");
                }
            }

            // Draw from the current document state
            let ctl = self.controller.clone();
            let doc = ctl.document().lock().await;
            terminal.draw(|f| self.draw(f, &doc))?;
            drop(doc);

            // Tick rate
            sleep(Duration::from_millis(200)).await;
        }

        Ok(())
    }

    pub fn draw(&mut self, f: &mut ratatui::Frame<'_>, doc: &Document) {
        let area = f.area();

        // Root rows: header, overview, details + charts, disks, processes
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),      // header
                Constraint::Length(5),      // gauges + applications
                Constraint::Length(12),     // server details + trend charts
                Constraint::Percentage(30), // disks
                Constraint::Min(8),         // processes
            ])
            .split(area);

        draw_header(f, rows[0], doc, &self.base_url, self.controller.process_sort());
        draw_metrics(f, rows[1], doc);

        let mid = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Percentage(35),
                Constraint::Percentage(35),
            ])
            .split(rows[2]);
        draw_details(f, mid[0], doc);
        draw_trend(f, mid[1], doc, ids::MEMORY_CHART, "Memory trend");
        draw_trend(f, mid[2], doc, ids::DISK_CHART, "Disk trend");

        draw_disks(f, rows[3], doc);

        let procs_area = rows[4];
        // Cache for input handlers
        self.last_procs_area = Some(procs_area);
        let total = doc.rows(ids::PROCESS_TABLE).map_or(0, <[_]>::len);
        clamp_offset(&mut self.procs_scroll_offset, total, page_size(procs_area));
        draw_processes(
            f,
            procs_area,
            doc,
            self.procs_scroll_offset,
            self.controller.process_sort(),
        );
    }
}
