//! Value Objects
//!
//! Immutable types with equality semantics.

mod signature;

pub use signature::{signature, FileSignature};
