use std::collections::VecDeque;
use std::time::Instant;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::api::{ApiError, Client, Photo};
use crate::theme::Theme;
use crate::trigger::{RowBand, SentinelTrigger};

/// Photos requested per page; also the number of skeleton rows shown while a
/// fetch is outstanding.
pub const PER_PAGE: usize = 6;

/// Rows occupied by one photo entry in the gallery.
pub const PHOTO_ROWS: usize = 2;
/// Rows occupied by one skeleton placeholder entry.
pub const PLACEHOLDER_ROWS: usize = 2;
/// Rows occupied by the sentinel at the end of the content.
pub const SENTINEL_ROWS: usize = 1;

/// Header line, status bar, and the two list borders.
const LAYOUT_OVERHEAD: u16 = 4;

pub enum AsyncResult {
    Page {
        generation: u64,
        page: usize,
        task_id: u64,
        result: Result<Vec<Photo>, ApiError>,
    },
}

#[derive(Debug)]
pub struct TaskInfo {
    pub id: u64,
    pub description: String,
    pub started_at: Instant,
}

#[derive(Debug)]
pub struct LogEntry {
    pub message: String,
}

/// Debug panel state: task tracking and log messages.
#[derive(Debug, Default)]
pub struct DebugState {
    pub visible: bool,
    pub running_tasks: Vec<TaskInfo>,
    pub log: VecDeque<LogEntry>,
    next_task_id: u64,
}

impl DebugState {
    const MAX_LOG_ENTRIES: usize = 50;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&mut self, msg: impl Into<String>) {
        self.log.push_back(LogEntry {
            message: msg.into(),
        });
        if self.log.len() > Self::MAX_LOG_ENTRIES {
            self.log.pop_front();
        }
    }

    pub fn start_task(&mut self, description: impl Into<String>) -> u64 {
        let id = self.next_task_id;
        self.next_task_id += 1;
        let desc = description.into();
        self.log(format!("Started: {}", desc));
        self.running_tasks.push(TaskInfo {
            id,
            description: desc,
            started_at: Instant::now(),
        });
        id
    }

    pub fn end_task(&mut self, id: u64, outcome: &str) {
        if let Some(pos) = self.running_tasks.iter().position(|t| t.id == id) {
            let task = self.running_tasks.remove(pos);
            let elapsed = task.started_at.elapsed();
            self.log(format!("{} {}: {:.2?}", task.description, outcome, elapsed));
        }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }
}

/// Loading and pagination state. `in_flight` is the sole backpressure guard:
/// it gates both duplicate fetches and the sentinel trigger.
#[derive(Debug, Default)]
pub struct LoadState {
    pub in_flight: bool,
    pub loading_start: Option<Instant>,
    pub has_more: bool,
    pub error: Option<String>,
}

impl LoadState {
    pub fn new() -> Self {
        Self {
            has_more: true,
            ..Default::default()
        }
    }

    pub fn begin(&mut self) {
        self.in_flight = true;
        self.loading_start = Some(Instant::now());
    }

    /// Clears the in-flight flag. Must run on every settle path, success or
    /// failure, or pagination freezes permanently.
    pub fn settle(&mut self) {
        self.in_flight = false;
    }

    pub fn should_show_spinner(&self) -> bool {
        const MIN_SPINNER_DURATION: std::time::Duration = std::time::Duration::from_millis(500);
        if let Some(start) = self.loading_start {
            self.in_flight || start.elapsed() < MIN_SPINNER_DURATION
        } else {
            false
        }
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error = Some(msg.into());
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    SelectNext,
    SelectPrev,
    SelectFirst,
    SelectLast,
    PageDown,
    PageUp,
    OpenUrl,
    /// The sentinel entered the viewport: request the next page.
    Advance,
    Refresh,
    Quit,
    ToggleHelp,
    ToggleDebug,
    UpdateViewportHeight(u16),
}

pub struct App {
    pub photos: Vec<Photo>,
    /// Last requested page of the curated feed. Monotonic; the trigger
    /// advances it by exactly one per firing.
    pub page: usize,
    pub selected_index: usize,
    /// Top visible content row of the gallery list.
    pub scroll_offset: usize,
    pub load: LoadState,
    pub should_quit: bool,
    pub show_help: bool,
    pub client: Client,
    pub theme: Theme,
    pub trigger: SentinelTrigger,
    // Async task management
    pub result_tx: mpsc::Sender<AsyncResult>,
    pub result_rx: mpsc::Receiver<AsyncResult>,
    /// Queue filled by the sentinel callback, drained into `Advance`.
    pub fire_rx: mpsc::UnboundedReceiver<()>,
    pub generation: u64,
    // Debug pane
    pub debug: DebugState,
    pub viewport_height: Option<u16>,
}

impl App {
    pub fn new(theme: Theme, client: Client) -> Self {
        let (result_tx, result_rx) = mpsc::channel(10);
        let (fire_tx, fire_rx) = mpsc::unbounded_channel();
        let trigger = SentinelTrigger::attach(
            Box::new(move || {
                let _ = fire_tx.send(());
            }),
            false,
        );
        Self {
            photos: Vec::new(),
            page: 0,
            selected_index: 0,
            scroll_offset: 0,
            load: LoadState::new(),
            should_quit: false,
            show_help: false,
            client,
            theme,
            trigger,
            result_tx,
            result_rx,
            fire_rx,
            generation: 0,
            debug: DebugState::new(),
            viewport_height: None,
        }
    }

    pub fn update(&mut self, msg: Message) {
        self.load.clear_error();

        match msg {
            Message::SelectNext => self.select_next(),
            Message::SelectPrev => self.select_prev(),
            Message::SelectFirst => self.select_first(),
            Message::SelectLast => self.select_last(),
            Message::PageDown => self.jump(10),
            Message::PageUp => self.jump(-10),
            Message::OpenUrl => self.open_photo(),
            Message::Advance => self.advance(),
            Message::Refresh => self.load_gallery(),
            Message::Quit => self.should_quit = true,
            Message::ToggleHelp => self.show_help = !self.show_help,
            Message::ToggleDebug => self.debug.toggle(),
            Message::UpdateViewportHeight(height) => self.viewport_height = Some(height),
        }

        self.clamp_scroll();
    }

    /// Starts over from page 1: used on mount and on refresh. Results from
    /// any older fetch are discarded by the generation bump.
    pub fn load_gallery(&mut self) {
        self.generation += 1;
        self.photos.clear();
        self.selected_index = 0;
        self.scroll_offset = 0;
        self.load = LoadState::new();
        self.request_page(1);
    }

    /// One trigger firing advances the page by exactly one. While a fetch is
    /// in flight the page number does not move and no fetch is issued.
    fn advance(&mut self) {
        if self.load.in_flight {
            debug!("trigger fired while in flight; ignoring");
            return;
        }
        self.request_page(self.page + 1);
    }

    fn request_page(&mut self, page: usize) {
        if self.load.in_flight {
            debug!(page, "fetch already in flight; skipping page change");
            return;
        }
        self.load.begin();
        self.page = page;
        self.spawn_page_fetch(page);
    }

    fn spawn_page_fetch(&mut self, page: usize) {
        let client = self.client.clone();
        let tx = self.result_tx.clone();
        let generation = self.generation;
        let task_id = self.debug.start_task(format!("Load page {page}"));

        tokio::spawn(async move {
            let result = client.curated(page, PER_PAGE).await;
            let _ = tx
                .send(AsyncResult::Page {
                    generation,
                    page,
                    task_id,
                    result,
                })
                .await;
        });
    }

    pub fn handle_async_result(&mut self, result: AsyncResult) {
        match result {
            AsyncResult::Page {
                generation,
                page,
                task_id,
                result,
            } => {
                if generation != self.generation {
                    self.debug.end_task(task_id, "discarded (stale)");
                    return;
                }
                self.debug.end_task(
                    task_id,
                    if result.is_ok() {
                        "completed"
                    } else {
                        "failed"
                    },
                );
                match result {
                    Ok(photos) => {
                        if photos.len() < PER_PAGE {
                            debug!(page, count = photos.len(), "short page; feed exhausted");
                            self.load.has_more = false;
                        }
                        self.photos.extend(photos);
                        self.load.settle();
                    }
                    Err(e) => {
                        warn!(page, error = %e, "page fetch failed");
                        self.load.set_error(e.user_message());
                        self.load.settle();
                        if e.is_fatal() {
                            self.should_quit = true;
                        }
                    }
                }
                self.clamp_scroll();
            }
        }
    }

    /// The trigger is enabled exactly while another page could be requested:
    /// nothing in flight, the feed not exhausted, and no error pending
    /// acknowledgement.
    pub fn trigger_enabled(&self) -> bool {
        !self.load.in_flight && self.load.has_more && self.load.error.is_none()
    }

    /// Per-frame sample: derives the trigger gate, measures the sentinel
    /// against the visible band, and drains any firings into `Advance`.
    pub fn observe_sentinel(&mut self) {
        let enabled = self.trigger_enabled();
        let band = self.sentinel_band();
        let root = RowBand::new(self.scroll_offset, self.list_height());
        self.trigger.set_enabled(enabled);
        self.trigger.observe(band, root);
        while self.fire_rx.try_recv().is_ok() {
            self.update(Message::Advance);
        }
    }

    /// Content rows of the gallery: photos, then skeleton placeholders while
    /// a fetch is outstanding, then the sentinel row.
    pub fn content_rows(&self) -> usize {
        let mut rows = self.photos.len() * PHOTO_ROWS;
        if self.load.in_flight {
            rows += PER_PAGE * PLACEHOLDER_ROWS;
        }
        rows + SENTINEL_ROWS
    }

    /// The sentinel's band in content coordinates, or `None` before the
    /// first layout pass.
    pub fn sentinel_band(&self) -> Option<RowBand> {
        self.viewport_height?;
        Some(RowBand::new(self.content_rows() - SENTINEL_ROWS, SENTINEL_ROWS))
    }

    /// Inner height of the gallery list in rows.
    pub fn list_height(&self) -> usize {
        self.viewport_height
            .map(|h| h.saturating_sub(LAYOUT_OVERHEAD) as usize)
            .unwrap_or(0)
    }

    fn select_next(&mut self) {
        if !self.photos.is_empty() && self.selected_index < self.photos.len() - 1 {
            self.selected_index += 1;
        }
    }

    fn select_prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    fn select_first(&mut self) {
        self.selected_index = 0;
        self.scroll_offset = 0;
    }

    fn select_last(&mut self) {
        if !self.photos.is_empty() {
            self.selected_index = self.photos.len() - 1;
        }
    }

    fn jump(&mut self, delta: i64) {
        if self.photos.is_empty() {
            return;
        }
        let max = self.photos.len() as i64 - 1;
        self.selected_index = (self.selected_index as i64 + delta).clamp(0, max) as usize;
    }

    fn open_photo(&self) {
        if let Some(photo) = self.photos.get(self.selected_index) {
            let _ = open::that(&photo.url);
        }
    }

    /// Keeps the selection on screen; selecting the last photo scrolls all
    /// the way down so the trailing placeholders and sentinel are shown.
    fn clamp_scroll(&mut self) {
        let height = self.list_height();
        if height == 0 {
            return;
        }
        if self.selected_index >= self.photos.len() {
            self.selected_index = self.photos.len().saturating_sub(1);
        }

        let max_scroll = self.content_rows().saturating_sub(height);
        if !self.photos.is_empty() && self.selected_index == self.photos.len() - 1 {
            self.scroll_offset = max_scroll;
            return;
        }

        let sel_top = self.selected_index * PHOTO_ROWS;
        let sel_bottom = sel_top + PHOTO_ROWS;
        if sel_top < self.scroll_offset {
            self.scroll_offset = sel_top;
        } else if sel_bottom > self.scroll_offset + height {
            self.scroll_offset = sel_bottom - height;
        }
        self.scroll_offset = self.scroll_offset.min(max_scroll);
    }
}
