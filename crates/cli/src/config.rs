//! Command-line configuration.

use crate::commands::Command;
use crate::logging;
use anyhow::Context;
use clap::Parser;
use corelib::{HasherKind, RingConfig};
use std::path::PathBuf;
use tracing::debug;

/// Drive a consistent hash ring from the command line.
#[derive(Debug, Parser)]
#[command(name = "ringctl", version)]
pub struct CliConfig {
    /// JSON file holding a ring configuration; flags override its fields.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Virtual nodes per host.
    #[arg(long, global = true)]
    pub replicas: Option<usize>,

    /// Slack above the mean load a host may carry (0.25 = 25%).
    #[arg(long, global = true)]
    pub load_bound_factor: Option<f64>,

    /// Key hasher: blake3, siphash or xxh3.
    #[arg(long, global = true)]
    pub hasher: Option<HasherKind>,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Resolves the ring configuration from the optional file and flags.
    pub fn ring_config(&self) -> anyhow::Result<RingConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => RingConfig::default(),
        };

        if let Some(replicas) = self.replicas {
            config.replicas = replicas;
        }
        if let Some(factor) = self.load_bound_factor {
            config.load_bound_factor = factor;
        }
        if let Some(hasher) = self.hasher {
            config.hasher = hasher;
        }
        config.validate()?;
        Ok(config)
    }

    /// Runs the selected command and prints its result as JSON.
    pub fn run(self) -> anyhow::Result<()> {
        logging::init(&self.log_level);

        let ring_config = self.ring_config()?;
        debug!(?ring_config, "resolved ring configuration");

        let result = self.command.execute(&ring_config)?;
        println!("{}", serde_json::to_string_pretty(&result)?);
        Ok(())
    }
}
