//! Domain Layer
//!
//! Value types and the ports the watcher talks through.
//!
//! ## Structure
//!
//! - `value_objects/` - Immutable value types (FileSignature)
//! - `ports/` - Interface definitions for the external viewer

pub mod ports;
pub mod value_objects;
