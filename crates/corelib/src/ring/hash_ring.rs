//! The consistent hash ring with bounded-load host selection.

use crate::config::RingConfig;
use crate::error::{Error, Result};
use crate::hash::KeyHasher;
use crate::host::Host;
use crate::registry::HostRegistry;
use crate::ring::bounded;
use crate::ring::guard::LoadGuard;
use crate::ring::index::RingIndex;
use crate::vnode::{replica_key, VirtualNode};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Everything guarded by the ring lock.
#[derive(Debug, Default)]
struct RingState {
    index: RingIndex,
    registry: HostRegistry,
}

/// Maps keys to hosts by consistent hashing, optionally bounding how far
/// any host's load may rise above the mean.
///
/// One reader/writer lock covers the ring index, the registry and every load
/// counter. Membership and load changes take it exclusively; lookups and
/// snapshots share it, so each call observes a single consistent state.
///
/// # Bounded mode
///
/// [`get_key_least`](Self::get_key_least) only *chooses* a host. Reserving
/// capacity is a separate [`inc`](Self::inc), released later with
/// [`done`](Self::done); [`reserve`](Self::reserve) bundles both behind an
/// RAII guard.
///
/// # Example
///
/// ```rust
/// use corelib::HashRing;
///
/// let ring = HashRing::new();
/// ring.register_host("127.0.0.1:8000").unwrap();
/// ring.register_host("127.0.0.1:8001").unwrap();
///
/// let host = ring.get_key_least("user:42").unwrap();
/// ring.inc(&host);
/// // ... forward the request ...
/// ring.done(&host);
/// ```
pub struct HashRing {
    config: RingConfig,
    hasher: Arc<dyn KeyHasher>,
    state: RwLock<RingState>,
}

impl HashRing {
    /// Creates an empty ring with the default configuration.
    pub fn new() -> Self {
        let config = RingConfig::default();
        let hasher = config.hasher.build();
        Self::from_parts(config, hasher)
    }

    /// Creates an empty ring using the hasher named in `config`.
    pub fn with_config(config: RingConfig) -> Result<Self> {
        let hasher = config.hasher.build();
        Self::with_hasher(config, hasher)
    }

    /// Creates an empty ring with an injected hasher; `config.hasher` is
    /// ignored.
    pub fn with_hasher(config: RingConfig, hasher: Arc<dyn KeyHasher>) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(config, hasher))
    }

    fn from_parts(config: RingConfig, hasher: Arc<dyn KeyHasher>) -> Self {
        Self {
            config,
            hasher,
            state: RwLock::new(RingState::default()),
        }
    }

    /// Configuration the ring was built with.
    pub fn config(&self) -> &RingConfig {
        &self.config
    }

    /// Name of the injected key hasher.
    pub fn hasher_name(&self) -> &'static str {
        self.hasher.name()
    }

    // ------------------------------------------------------------------
    // Membership
    // ------------------------------------------------------------------

    /// Adds `name` with zero load and places its virtual nodes on the ring.
    ///
    /// A virtual node whose position is already taken is moved to the next
    /// free position, so each host always owns exactly `replicas` slots.
    pub fn register_host(&self, name: &str) -> Result<()> {
        let mut state = self.state.write();
        if state.registry.contains(name) {
            return Err(Error::HostAlreadyExists);
        }

        let mut host = Host::new(name);
        host.tokens = self.place(&state.index, name);
        state.index.insert(name, &host.tokens);
        state.registry.insert(host);

        debug!(host = name, replicas = self.config.replicas, "registered host");
        metrics::gauge!("ring_hosts").set(state.registry.len() as f64);
        Ok(())
    }

    /// Removes `name` and every virtual node it owns.
    ///
    /// Any load still attributed to the host leaves the aggregate with it.
    pub fn unregister_host(&self, name: &str) -> Result<()> {
        let mut state = self.state.write();
        let host = state.registry.remove(name).ok_or(Error::HostNotFound)?;
        for &token in &host.tokens {
            state.index.remove(token);
        }

        debug!(host = name, load = host.load, "unregistered host");
        metrics::gauge!("ring_hosts").set(state.registry.len() as f64);
        metrics::gauge!("ring_total_load").set(state.registry.total_load() as f64);
        Ok(())
    }

    fn place(&self, index: &RingIndex, name: &str) -> Vec<u64> {
        let mut tokens: Vec<u64> = Vec::with_capacity(self.config.replicas);
        for i in 0..self.config.replicas {
            let natural = self.hasher.hash_key(&replica_key(name, i));
            let mut token = natural;
            while index.contains(token) || tokens.contains(&token) {
                token = token.wrapping_add(1);
            }
            if token != natural {
                debug!(host = name, replica = i, natural, token, "virtual node collision, probed");
            }
            tokens.push(token);
        }
        tokens
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    /// Plain consistent hashing: the owner of the key's successor.
    ///
    /// Deterministic for a fixed ring and hasher; never touches load.
    pub fn get_key(&self, key: &str) -> Result<String> {
        let hash = self.hasher.hash_key(key);
        let state = self.state.read();
        let host = state
            .index
            .successor(hash)
            .and_then(|idx| state.index.owner_at(idx))
            .ok_or(Error::HostNotFound)?;

        metrics::counter!("ring_lookups_total", "mode" => "plain").increment(1);
        Ok(host.to_owned())
    }

    /// Bounded-load lookup: the first host clockwise from the key whose
    /// load would stay within bound after one more request.
    ///
    /// Does not reserve anything; follow with [`inc`](Self::inc) once the
    /// request is committed to the returned host.
    pub fn get_key_least(&self, key: &str) -> Result<String> {
        let hash = self.hasher.hash_key(key);
        let state = self.state.read();
        self.select(&state, key, hash).map(str::to_owned)
    }

    /// Selects a host like [`get_key_least`](Self::get_key_least) and
    /// increments its load under the same exclusive lock.
    ///
    /// The returned guard calls [`done`](Self::done) when dropped.
    pub fn reserve(&self, key: &str) -> Result<LoadGuard<'_>> {
        let hash = self.hasher.hash_key(key);
        let mut state = self.state.write();
        let host = self.select(&state, key, hash)?.to_owned();
        state.registry.add_load(&host, 1);
        metrics::gauge!("ring_total_load").set(state.registry.total_load() as f64);
        Ok(LoadGuard::new(self, host))
    }

    fn select<'a>(&self, state: &'a RingState, key: &str, hash: u64) -> Result<&'a str> {
        if state.registry.is_empty() {
            return Err(Error::HostNotFound);
        }

        let factor = self.config.load_bound_factor;
        match bounded::select(&state.index, &state.registry, hash, factor) {
            Some(selection) => {
                metrics::counter!("ring_lookups_total", "mode" => "bounded").increment(1);
                metrics::counter!("ring_bounded_skips_total").increment(selection.skipped as u64);
                Ok(selection.host)
            }
            None => {
                error!(
                    key,
                    hosts = state.registry.len(),
                    total_load = state.registry.total_load(),
                    "bounded scan found no host under capacity"
                );
                Err(Error::HostNotFound)
            }
        }
    }

    // ------------------------------------------------------------------
    // Load tracking
    // ------------------------------------------------------------------

    /// Adds one unit of load to `host`. Unknown hosts are ignored.
    pub fn inc(&self, host: &str) {
        self.add_load(host, 1);
    }

    /// Removes one unit of load from `host`. Unknown hosts are ignored.
    ///
    /// Pair every `inc` with exactly one `done`. Loads are clamped at zero,
    /// so an extra call on an idle host changes nothing.
    pub fn done(&self, host: &str) {
        self.add_load(host, -1);
    }

    fn add_load(&self, host: &str, delta: i64) {
        let mut state = self.state.write();
        if !state.registry.add_load(host, delta) {
            warn!(host, delta, "load change for unknown host ignored");
            return;
        }
        metrics::gauge!("ring_total_load").set(state.registry.total_load() as f64);
    }

    /// Overwrites the load of `host`, e.g. to inject externally measured
    /// load. Negative values are clamped to zero; unknown hosts are ignored.
    pub fn update_load(&self, host: &str, load: i64) {
        let mut state = self.state.write();
        if state.registry.set_load(host, load) {
            metrics::gauge!("ring_total_load").set(state.registry.total_load() as f64);
        }
    }

    // ------------------------------------------------------------------
    // Snapshots
    // ------------------------------------------------------------------

    /// Names of all registered hosts, in no particular order.
    pub fn hosts(&self) -> Vec<String> {
        self.state.read().registry.names()
    }

    /// Load of every registered host.
    pub fn loads(&self) -> HashMap<String, i64> {
        self.state.read().registry.loads()
    }

    /// Current per-host ceiling: `ceil(total / hosts * (1 + factor))`.
    pub fn max_load(&self) -> i64 {
        self.state.read().registry.max_load(self.config.load_bound_factor)
    }

    /// Load of `host`, or `None` if it is not registered.
    pub fn load(&self, host: &str) -> Option<i64> {
        self.state.read().registry.load(host)
    }

    /// Sum of all per-host loads.
    pub fn total_load(&self) -> i64 {
        self.state.read().registry.total_load()
    }

    /// True if `host` is registered.
    pub fn contains_host(&self, host: &str) -> bool {
        self.state.read().registry.contains(host)
    }

    /// Number of registered hosts.
    pub fn host_count(&self) -> usize {
        self.state.read().registry.len()
    }

    /// Number of virtual nodes on the ring.
    pub fn token_count(&self) -> usize {
        self.state.read().index.len()
    }

    /// Every virtual node in ring order (for debugging).
    pub fn tokens(&self) -> Vec<VirtualNode> {
        self.state
            .read()
            .index
            .entries()
            .map(|(token, host)| VirtualNode::new(token, host))
            .collect()
    }
}

impl Default for HashRing {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HashRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("HashRing")
            .field("config", &self.config)
            .field("hasher", &self.hasher.name())
            .field("hosts", &state.registry.len())
            .field("tokens", &state.index.len())
            .field("total_load", &state.registry.total_load())
            .finish()
    }
}
