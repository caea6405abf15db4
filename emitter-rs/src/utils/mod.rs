//! Shared utilities for the emitter-rs CLI

pub mod format;
pub mod table;

pub use format::*;
pub use table::*;
