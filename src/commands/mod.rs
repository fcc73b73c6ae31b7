//! Subcommand handlers

pub mod config;
pub mod list;
pub mod play;
pub mod serve;
