//! CLI layer - Command-line interface

pub mod commands;
pub mod output;

pub use commands::{journal_selector, Cli, Commands};
pub use output::{ensure_writable, write_output};
