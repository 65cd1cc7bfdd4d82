//! Host registry and load tracking.
//!
//! Per-host loads and their aggregate live side by side in one plain struct.
//! Every mutation touches both, so the aggregate always equals the sum of
//! the per-host loads. Synchronization is the caller's job (see
//! [`HashRing`](crate::HashRing)); nothing in here is atomic.

use crate::host::Host;
use std::collections::HashMap;

/// Live hosts plus their in-flight load.
#[derive(Debug, Default, Clone)]
pub struct HostRegistry {
    hosts: HashMap<String, Host>,
    total_load: i64,
}

impl HostRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.hosts.contains_key(name)
    }

    #[inline]
    pub fn total_load(&self) -> i64 {
        self.total_load
    }

    /// Adds `host`. The caller has already checked for duplicates.
    pub fn insert(&mut self, host: Host) {
        self.total_load = self.total_load.saturating_add(host.load);
        self.hosts.insert(host.name.clone(), host);
    }

    /// Removes `name`, taking its load out of the aggregate.
    pub fn remove(&mut self, name: &str) -> Option<Host> {
        let host = self.hosts.remove(name)?;
        self.total_load = self.total_load.saturating_sub(host.load);
        Some(host)
    }

    /// Current load of `name`.
    pub fn load(&self, name: &str) -> Option<i64> {
        self.hosts.get(name).map(|host| host.load)
    }

    /// Adds `delta` to the load of `name` and moves the aggregate by the
    /// change actually applied. Loads never drop below zero, so an unmatched
    /// release on an idle host changes nothing.
    /// Returns false, changing nothing, if the host is unknown.
    pub fn add_load(&mut self, name: &str, delta: i64) -> bool {
        match self.hosts.get(name) {
            Some(host) => {
                let load = host.load.saturating_add(delta);
                self.set_load(name, load)
            }
            None => false,
        }
    }

    /// Sets the load of `name` (clamped at zero), moving the aggregate by
    /// the delta.
    pub fn set_load(&mut self, name: &str, load: i64) -> bool {
        match self.hosts.get_mut(name) {
            Some(host) => {
                let load = load.max(0);
                self.total_load = self.total_load.saturating_add(load - host.load);
                host.load = load;
                true
            }
            None => false,
        }
    }

    pub fn names(&self) -> Vec<String> {
        self.hosts.keys().cloned().collect()
    }

    pub fn loads(&self) -> HashMap<String, i64> {
        self.hosts
            .iter()
            .map(|(name, host)| (name.clone(), host.load))
            .collect()
    }

    /// Ceiling any single host may currently carry:
    /// `ceil(total / hosts * (1 + factor))`, with both operands floored to 1.
    pub fn max_load(&self, load_bound_factor: f64) -> i64 {
        bounded(self.total_load.max(1), self.hosts.len(), load_bound_factor)
    }

    /// Ceiling used when placing one more unit of load: like
    /// [`max_load`](Self::max_load) but computed over `total + 1`.
    pub fn capacity_for_next(&self, load_bound_factor: f64) -> i64 {
        bounded(self.total_load.max(0).saturating_add(1), self.hosts.len(), load_bound_factor)
    }
}

// Float-to-int `as` saturates, so huge totals cap at `i64::MAX`.
fn bounded(total: i64, hosts: usize, load_bound_factor: f64) -> i64 {
    let hosts = hosts.max(1) as f64;
    ((total as f64 / hosts) * (1.0 + load_bound_factor)).ceil() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(names: &[&str]) -> HostRegistry {
        let mut registry = HostRegistry::new();
        for name in names {
            registry.insert(Host::new(*name));
        }
        registry
    }

    #[test]
    fn test_add_load_tracks_total() {
        let mut reg = registry(&["a", "b"]);
        assert!(reg.add_load("a", 1));
        assert!(reg.add_load("a", 1));
        assert!(reg.add_load("b", 1));
        assert!(!reg.add_load("c", 1));
        assert_eq!(reg.load("a"), Some(2));
        assert_eq!(reg.total_load(), 3);

        assert!(reg.add_load("a", -1));
        assert_eq!(reg.load("a"), Some(1));
        assert_eq!(reg.total_load(), 2);
    }

    #[test]
    fn test_set_load_adjusts_total_by_delta() {
        let mut reg = registry(&["a", "b"]);
        reg.add_load("b", 3);
        assert!(reg.set_load("a", 10));
        assert_eq!(reg.total_load(), 13);
        assert!(reg.set_load("a", 4));
        assert_eq!(reg.total_load(), 7);
        assert!(!reg.set_load("missing", 100));
        assert_eq!(reg.total_load(), 7);
    }

    #[test]
    fn test_remove_drops_load_from_total() {
        let mut reg = registry(&["a", "b"]);
        reg.set_load("a", 5);
        reg.set_load("b", 2);
        let removed = reg.remove("a").unwrap();
        assert_eq!(removed.load, 5);
        assert_eq!(reg.total_load(), 2);
        assert!(reg.remove("a").is_none());
    }

    #[test]
    fn test_max_load() {
        let mut reg = registry(&["a", "b"]);
        // Nothing in flight: 1 / 2 * 1.25 rounds up to 1.
        assert_eq!(reg.max_load(0.25), 1);

        reg.set_load("a", 60);
        reg.set_load("b", 40);
        assert_eq!(reg.max_load(0.25), 63);
        assert_eq!(reg.max_load(0.0), 50);
    }

    #[test]
    fn test_max_load_without_hosts() {
        assert_eq!(HostRegistry::new().max_load(0.25), 2);
    }

    #[test]
    fn test_loads_clamp_at_zero() {
        let mut reg = registry(&["a", "b"]);
        reg.add_load("b", 2);
        assert!(reg.add_load("a", -1));
        assert_eq!(reg.load("a"), Some(0));
        assert_eq!(reg.total_load(), 2);

        assert!(reg.set_load("b", -10));
        assert_eq!(reg.load("b"), Some(0));
        assert_eq!(reg.total_load(), 0);
    }

    #[test]
    fn test_capacity_for_next() {
        let mut reg = registry(&["a", "b"]);
        assert_eq!(reg.capacity_for_next(0.25), 1);

        reg.set_load("a", 3);
        // (3 + 1) / 2 * 1.25 = 2.5
        assert_eq!(reg.capacity_for_next(0.25), 3);
    }

    #[test]
    fn test_extreme_loads_saturate() {
        let mut reg = registry(&["a", "b"]);
        assert!(reg.set_load("a", i64::MAX));
        assert!(reg.add_load("a", 1));
        assert!(reg.add_load("b", 1));
        assert_eq!(reg.load("a"), Some(i64::MAX));
        assert_eq!(reg.total_load(), i64::MAX);
        assert_eq!(reg.capacity_for_next(0.25), i64::MAX);
        assert_eq!(reg.max_load(0.25), i64::MAX);

        assert!(reg.set_load("a", 0));
        assert_eq!(reg.load("a"), Some(0));
        assert!(reg.total_load() >= 0);
    }
}
