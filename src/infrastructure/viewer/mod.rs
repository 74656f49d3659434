//! Viewer implementations

mod command;

pub use command::CommandViewer;
