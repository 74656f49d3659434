//! Application Layer
//!
//! Use cases that orchestrate the flow between the domain and the
//! infrastructure.
//!
//! ## Use Cases
//!
//! - `WatchUseCase` - Watches one layout file and reloads the viewer on settled changes

pub mod watch;

pub use watch::{
    PollDecision, PreviewEvent, ReloadController, ReloadMode, WatchOptions, WatchReport,
    WatchState, WatchUseCase,
};
