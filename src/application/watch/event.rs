//! Watch event types and options

use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

/// Smallest accepted poll interval in milliseconds
pub const MIN_POLL_INTERVAL_MS: u64 = 20;
/// Poll interval used when nothing else is configured
pub const DEFAULT_POLL_INTERVAL_MS: u64 = MIN_POLL_INTERVAL_MS;
/// Consecutive identical signatures needed before a change counts as settled
pub const DEFAULT_STABLE_SAMPLES: u32 = 2;
/// Retry window for the first load
pub const DEFAULT_INITIAL_LOAD_TIMEOUT_MS: u64 = 2_000;
/// Floor for the delay between first-load attempts
pub(crate) const MIN_INITIAL_RETRY_MS: u64 = 50;

/// Watch options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchOptions {
    /// Layout file to watch
    pub path: PathBuf,
    /// Delay between two polls (never below `MIN_POLL_INTERVAL_MS`)
    pub poll_interval: Duration,
    /// Consecutive identical observations required (never below 1)
    pub stable_samples_required: u32,
    /// Show all cells after every load
    pub show_all: bool,
    /// Zoom to fit after every load
    pub zoom_fit: bool,
    /// How long the first load may be retried
    pub initial_load_timeout: Duration,
    /// Marker file written once the first load succeeded
    pub ready_signal_path: Option<PathBuf>,
}

impl WatchOptions {
    /// Create new watch options with defaults for everything but the path
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            stable_samples_required: DEFAULT_STABLE_SAMPLES,
            show_all: true,
            zoom_fit: true,
            initial_load_timeout: Duration::from_millis(DEFAULT_INITIAL_LOAD_TIMEOUT_MS),
            ready_signal_path: None,
        }
    }

    /// Set the poll interval, clamped to `MIN_POLL_INTERVAL_MS`
    pub fn with_poll_interval_ms(mut self, ms: u64) -> Self {
        self.poll_interval = Duration::from_millis(ms.max(MIN_POLL_INTERVAL_MS));
        self
    }

    /// Set the number of stable samples, clamped to at least 1
    pub fn with_stable_samples(mut self, samples: u32) -> Self {
        self.stable_samples_required = samples.max(1);
        self
    }

    pub fn with_show_all(mut self, show_all: bool) -> Self {
        self.show_all = show_all;
        self
    }

    pub fn with_zoom_fit(mut self, zoom_fit: bool) -> Self {
        self.zoom_fit = zoom_fit;
        self
    }

    pub fn with_initial_load_timeout_ms(mut self, ms: u64) -> Self {
        self.initial_load_timeout = Duration::from_millis(ms);
        self
    }

    pub fn with_ready_signal_path(mut self, path: Option<PathBuf>) -> Self {
        self.ready_signal_path = path;
        self
    }

    /// Delay between first-load attempts
    pub(crate) fn initial_retry_delay(&self) -> Duration {
        self.poll_interval
            .max(Duration::from_millis(MIN_INITIAL_RETRY_MS))
    }
}

/// How a settled change reached the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReloadMode {
    /// Reloaded in place on the tracked session
    Soft,
    /// No view was open, so the file was loaded fresh
    Open,
    /// Soft reload failed and the file was reopened in a new session
    Reopen,
}

/// Watch event types for NDJSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PreviewEvent {
    WatchStarted {
        path: String,
        poll_interval_ms: u64,
        stable_samples_required: u32,
    },
    InitialLoadRetry {
        attempt: u32,
        message: String,
    },
    Loaded {
        path: String,
        session: usize,
    },
    Ready {
        signal_path: Option<String>,
    },
    ReadySignalFailed {
        signal_path: String,
        message: String,
    },
    ChangeObserved {
        pending_count: u32,
        required: u32,
    },
    Settled {
        size: u64,
    },
    Reloaded {
        mode: ReloadMode,
        session: usize,
    },
    SoftReloadFailed {
        message: String,
    },
    ReopenFailed {
        message: String,
    },
    ViewerClosed {
        reloads: usize,
    },
}

impl PreviewEvent {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Routine progress only worth showing in verbose mode
    pub fn is_verbose(&self) -> bool {
        matches!(
            self,
            PreviewEvent::ChangeObserved { .. } | PreviewEvent::InitialLoadRetry { .. }
        )
    }

    /// Something went wrong, even if the watcher recovered
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            PreviewEvent::ReadySignalFailed { .. }
                | PreviewEvent::SoftReloadFailed { .. }
                | PreviewEvent::ReopenFailed { .. }
        )
    }
}
