//! Error types for layout-preview
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::ViewerError;

/// Result type alias for layout-preview operations
pub type PreviewResult<T> = Result<T, PreviewError>;

/// Main error type for layout-preview operations
#[derive(Error, Debug)]
pub enum PreviewError {
    /// No file to watch was configured
    #[error("no layout file configured - pass a PATH, set PREVIEW_GDS_FILE or [watch].path")]
    MissingPath,

    /// The viewer cannot provide a session at all
    #[error("no viewer session available: {reason}")]
    NoViewerSession { reason: String },

    /// The first load did not succeed before the retry deadline
    #[error("initial load of {path} failed after {attempts} attempt(s): {source}")]
    InitialLoad {
        path: PathBuf,
        attempts: u32,
        #[source]
        source: ViewerError,
    },

    /// Viewer call failed outside the recoverable reload path
    #[error("viewer error: {0}")]
    Viewer(#[from] ViewerError),

    /// Config file could not be parsed
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// The ready marker never appeared
    #[error("timed out after {waited_ms}ms waiting for ready signal {path}")]
    ReadyTimeout { path: PathBuf, waited_ms: u64 },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
