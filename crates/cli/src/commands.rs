//! Subcommands and their results.

use clap::Subcommand;
use corelib::{HashRing, RingConfig};
use serde::Serialize;
use std::collections::{BTreeMap, VecDeque};
use tracing::info;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Map keys to hosts with plain consistent hashing.
    Lookup {
        /// Host to register (repeatable).
        #[arg(long = "host", required = true)]
        hosts: Vec<String>,
        /// Keys to look up.
        keys: Vec<String>,
    },
    /// Route requests with bounded loads and report the resulting loads.
    Simulate {
        /// Host to register (repeatable).
        #[arg(long = "host", required = true)]
        hosts: Vec<String>,
        /// Number of requests to route.
        #[arg(long, default_value_t = 100)]
        requests: usize,
        /// Number of distinct keys the requests cycle through.
        #[arg(long, default_value_t = 1)]
        keys: usize,
        /// Release the oldest reservation after every N requests.
        #[arg(long)]
        release_every: Option<usize>,
    },
    /// Remove a host and count how many keys change owner.
    Churn {
        /// Host to register (repeatable).
        #[arg(long = "host", required = true)]
        hosts: Vec<String>,
        /// Host to unregister after the first mapping.
        #[arg(long)]
        remove: String,
        /// Number of keys to map.
        #[arg(long, default_value_t = 10_000)]
        keys: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CommandResult {
    Lookup {
        assignments: BTreeMap<String, String>,
    },
    Simulate {
        requests: usize,
        total_load: i64,
        max_load: i64,
        loads: BTreeMap<String, i64>,
    },
    Churn {
        keys: usize,
        moved: usize,
        moved_fraction: f64,
        /// Share of keys the removed host owned in an ideal split.
        expected_fraction: f64,
    },
}

impl Command {
    pub fn execute(&self, config: &RingConfig) -> anyhow::Result<CommandResult> {
        match self {
            Command::Lookup { hosts, keys } => {
                let ring = build_ring(config, hosts)?;
                let assignments: BTreeMap<String, String> = keys
                    .iter()
                    .map(|key| -> anyhow::Result<(String, String)> {
                        Ok((key.clone(), ring.get_key(key)?))
                    })
                    .collect::<anyhow::Result<_>>()?;
                Ok(CommandResult::Lookup { assignments })
            }
            Command::Simulate {
                hosts,
                requests,
                keys,
                release_every,
            } => simulate(config, hosts, *requests, *keys, *release_every),
            Command::Churn {
                hosts,
                remove,
                keys,
            } => churn(config, hosts, remove, *keys),
        }
    }
}

fn build_ring(config: &RingConfig, hosts: &[String]) -> anyhow::Result<HashRing> {
    let ring = HashRing::with_config(config.clone())?;
    for host in hosts {
        ring.register_host(host)?;
    }
    Ok(ring)
}

fn simulate(
    config: &RingConfig,
    hosts: &[String],
    requests: usize,
    keys: usize,
    release_every: Option<usize>,
) -> anyhow::Result<CommandResult> {
    let ring = build_ring(config, hosts)?;
    let keys = keys.max(1);
    let mut in_flight = VecDeque::new();

    for i in 0..requests {
        let host = ring.get_key_least(&format!("key-{}", i % keys))?;
        ring.inc(&host);
        in_flight.push_back(host);

        if let Some(every) = release_every.filter(|&n| n > 0) {
            if (i + 1) % every == 0 {
                if let Some(oldest) = in_flight.pop_front() {
                    ring.done(&oldest);
                }
            }
        }
    }

    let result = CommandResult::Simulate {
        requests,
        total_load: ring.total_load(),
        max_load: ring.max_load(),
        loads: ring.loads().into_iter().collect(),
    };
    info!(requests, in_flight = in_flight.len(), "simulation finished");
    Ok(result)
}

fn churn(
    config: &RingConfig,
    hosts: &[String],
    remove: &str,
    keys: usize,
) -> anyhow::Result<CommandResult> {
    let ring = build_ring(config, hosts)?;
    let names: Vec<String> = (0..keys).map(|i| format!("key-{i}")).collect();

    let before = names
        .iter()
        .map(|key| ring.get_key(key))
        .collect::<Result<Vec<_>, _>>()?;

    ring.unregister_host(remove)?;

    let mut moved = 0;
    for (key, old) in names.iter().zip(&before) {
        if ring.get_key(key).map_or(true, |new| &new != old) {
            moved += 1;
        }
    }

    let fraction = |n: usize, d: usize| if d == 0 { 0.0 } else { n as f64 / d as f64 };
    info!(removed = remove, moved, keys, "churn finished");
    Ok(CommandResult::Churn {
        keys,
        moved,
        moved_fraction: fraction(moved, keys),
        expected_fraction: fraction(1, hosts.len()),
    })
}
