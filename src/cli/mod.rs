//! CLI command handlers

pub mod commands;

pub use commands::{export, format_table, inspect, ExportConfig};
