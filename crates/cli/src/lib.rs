//! CLI tool for exercising a consistent hash ring with bounded loads.
//!
//! Provides commands for:
//! - Plain key lookups
//! - Simulating bounded-load request routing
//! - Measuring key movement when a host leaves

pub mod commands;
pub mod config;
pub mod logging;

pub use commands::{Command, CommandResult};
pub use config::CliConfig;
