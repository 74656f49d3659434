//! Domain Ports (Interfaces)
//!
//! These traits define the boundary between the watcher and the viewer it
//! drives. Infrastructure provides concrete implementations.

pub mod viewer;

pub use viewer::{EventPump, PumpStatus, SessionHandle, ViewHandle, Viewer, ViewerError, ViewerResult};
