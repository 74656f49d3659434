//! Watch Use Case
//!
//! Keeps an external viewer in sync with a layout file on disk. It
//! orchestrates:
//! - Signature polling on a fixed interval
//! - Debouncing (a change must be seen unchanged for N consecutive polls)
//! - Two-tier reload (soft reload in place, full reopen as fallback)
//! - A bounded retry window for the very first load
//!
//! ## Architecture
//!
//! - `WatchState` - debounce state machine, pure and I/O free
//! - `ReloadController` - drives the `Viewer` port for loads and reloads
//! - `WatchUseCase` - main orchestrator, runs the poll loop
//! - `PreviewEvent` - events emitted during the watch
//!
//! ## Usage
//!
//! ```ignore
//! let options = WatchOptions::new(PathBuf::from("out/chip.gds"));
//! let mut use_case = WatchUseCase::new(options);
//! let report = use_case.run(&mut viewer, &|event| println!("{}", event.to_json()))?;
//! ```

mod controller;
mod event;
mod state;
mod use_case;


pub use controller::{ReloadController, ReloadOutcome};
pub use event::{
    PreviewEvent, ReloadMode, WatchOptions, DEFAULT_INITIAL_LOAD_TIMEOUT_MS,
    DEFAULT_POLL_INTERVAL_MS, DEFAULT_STABLE_SAMPLES, MIN_POLL_INTERVAL_MS,
};
pub use state::{PollDecision, WatchState};
pub use use_case::{watch, WatchReport, WatchUseCase};
