//! Subcommand implementations.

pub mod config;
pub mod now;
pub mod window;
