//! Infrastructure Layer
//!
//! Concrete implementations of domain ports and the remaining I/O.
//!
//! ## Structure
//!
//! - `viewer/` - Viewer implementations (CommandViewer)
//! - `ready` - Ready-signal marker file

pub mod ready;
pub mod viewer;

pub use viewer::CommandViewer;
