//! Terminal output for the CLI

pub mod context;
pub mod primitives;
pub mod terminal;
pub mod theme;
pub mod views;
