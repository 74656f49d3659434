//! layout-preview - live-reload companion for external layout viewers
//!
//! Watches a GDS (or any layout) file on disk and keeps an external viewer in
//! sync with it. Reloads are debounced on the file's metadata signature so a
//! half-written file is never shown.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::watch::{
    watch, PollDecision, PreviewEvent, ReloadMode, WatchOptions, WatchReport, WatchState, WatchUseCase,
};
pub use config::Config;
pub use domain::ports::{EventPump, PumpStatus, SessionHandle, ViewHandle, Viewer, ViewerError};
pub use domain::value_objects::{signature, FileSignature};
pub use error::{PreviewError, PreviewResult};
pub use infrastructure::viewer::CommandViewer;
