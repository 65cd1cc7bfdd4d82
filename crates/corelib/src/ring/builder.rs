//! Fluent construction of a populated ring.

use crate::config::RingConfig;
use crate::error::Result;
use crate::hash::{HasherKind, KeyHasher};
use crate::ring::hash_ring::HashRing;
use std::fmt;
use std::sync::Arc;

/// Builds a [`HashRing`] and registers an initial set of hosts.
///
/// # Example
///
/// ```rust
/// use corelib::RingBuilder;
///
/// let ring = RingBuilder::new()
///     .with_replicas(20)
///     .with_load_bound_factor(0.5)
///     .add_host("10.0.0.1:80")
///     .add_host("10.0.0.2:80")
///     .build()
///     .unwrap();
///
/// assert_eq!(ring.token_count(), 40);
/// ```
#[derive(Default)]
pub struct RingBuilder {
    config: RingConfig,
    hasher: Option<Arc<dyn KeyHasher>>,
    hosts: Vec<String>,
}

impl RingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: RingConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_replicas(mut self, replicas: usize) -> Self {
        self.config.replicas = replicas;
        self
    }

    pub fn with_load_bound_factor(mut self, factor: f64) -> Self {
        self.config.load_bound_factor = factor;
        self
    }

    /// Selects one of the built-in hashers.
    pub fn with_hasher_kind(mut self, kind: HasherKind) -> Self {
        self.config.hasher = kind;
        self.hasher = None;
        self
    }

    /// Injects a custom hasher, overriding the configured kind.
    pub fn with_hasher<H: KeyHasher>(mut self, hasher: H) -> Self {
        self.hasher = Some(Arc::new(hasher));
        self
    }

    pub fn add_host(mut self, host: impl Into<String>) -> Self {
        self.hosts.push(host.into());
        self
    }

    /// Validates the configuration and registers the hosts in order.
    ///
    /// A host listed twice fails with `HostAlreadyExists`.
    pub fn build(self) -> Result<HashRing> {
        let hasher = self.hasher.unwrap_or_else(|| self.config.hasher.build());
        let ring = HashRing::with_hasher(self.config, hasher)?;
        for host in &self.hosts {
            ring.register_host(host)?;
        }
        Ok(ring)
    }
}

impl fmt::Debug for RingBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuilder")
            .field("config", &self.config)
            .field("hasher", &self.hasher.as_ref().map(|h| h.name()))
            .field("hosts", &self.hosts)
            .finish()
    }
}
