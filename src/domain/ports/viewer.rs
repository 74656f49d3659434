//! Viewer port - abstraction over the external layout viewer
//!
//! The watcher never owns the viewer. It borrows it for the duration of the
//! watch loop and tolerates every call failing.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for viewer operations
pub type ViewerResult<T> = Result<T, ViewerError>;

/// Errors raised by a viewer implementation
#[derive(Error, Debug)]
pub enum ViewerError {
    /// The layout could not be loaded
    #[error("cannot load {path}: {message}")]
    Load { path: PathBuf, message: String },

    /// The viewer does not provide this operation
    #[error("viewer does not support {0}")]
    Unsupported(&'static str),

    /// A viewer command ran but reported failure
    #[error("{operation} failed: {message}")]
    Command {
        operation: &'static str,
        message: String,
    },

    /// IO error talking to the viewer
    #[error("viewer I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Index of a loaded layout inside the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionHandle(pub usize);

impl SessionHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque token for the view currently shown by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewHandle(pub usize);

/// Outcome of one pass of the viewer's event processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpStatus {
    /// Keep watching
    Continue,
    /// The viewer window is gone
    Closed,
}

/// The external viewer.
///
/// Implementations:
/// - `CommandViewer` - drives a viewer program through shell commands
/// - test doubles that record every call
pub trait Viewer {
    /// Load `path` as a new layout, returning its session.
    fn open(&mut self, path: &Path) -> ViewerResult<SessionHandle>;

    /// The view currently shown, if any.
    fn current_view(&mut self) -> ViewerResult<Option<ViewHandle>>;

    /// Reload an already loaded session in place.
    fn reload(&mut self, view: ViewHandle, session: SessionHandle) -> ViewerResult<()>;

    /// Make every cell of the layout visible.
    fn show_all_cells(&mut self, view: ViewHandle) -> ViewerResult<()>;

    /// Fit the camera to the layout extents.
    fn zoom_to_fit(&mut self, view: ViewHandle) -> ViewerResult<()>;
}

/// The GUI event pump, run once per poll cycle to keep the viewer responsive.
pub trait EventPump {
    fn process_events(&mut self) -> PumpStatus;
}
