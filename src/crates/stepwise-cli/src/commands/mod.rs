//! Subcommand implementations

pub mod ask;
pub mod config;
pub mod shell;
pub mod tools;
