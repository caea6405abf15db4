//! Emitter-RS library
//!
//! Command definitions and helpers behind the `emitter-rs` binary.

pub mod cli;
pub mod commands;
pub mod utils;
