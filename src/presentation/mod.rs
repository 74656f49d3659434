//! Presentation Layer
//!
//! CLI argument parsing (via clap). Rendering lives in the binary's `ui`
//! module.

pub mod cli;

pub use cli::{Cli, ColorWhen, Commands, WatchArgs};
