//! Construction-time ring configuration.

use crate::error::{Error, Result};
use crate::hash::HasherKind;
use serde::{Deserialize, Serialize};

/// Default number of virtual nodes per host.
pub const DEFAULT_REPLICAS: usize = 10;

/// Default slack above the mean load a host may carry in bounded mode.
pub const DEFAULT_LOAD_BOUND_FACTOR: f64 = 0.25;

/// Tunables fixed for the lifetime of a [`HashRing`](crate::HashRing).
///
/// Missing fields take their defaults when deserialized, so an empty JSON
/// object is a valid configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    /// Virtual nodes placed on the ring for every registered host.
    pub replicas: usize,
    /// How far above the mean load (as a fraction) a host may be pushed
    /// before bounded selection routes elsewhere.
    pub load_bound_factor: f64,
    /// Built-in hasher used when no custom hasher is injected.
    pub hasher: HasherKind,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            replicas: DEFAULT_REPLICAS,
            load_bound_factor: DEFAULT_LOAD_BOUND_FACTOR,
            hasher: HasherKind::default(),
        }
    }
}

impl RingConfig {
    /// Checks that the configuration can back a ring.
    pub fn validate(&self) -> Result<()> {
        if self.replicas == 0 {
            return Err(Error::InvalidConfig("replicas must be positive".into()));
        }
        if !self.load_bound_factor.is_finite() || self.load_bound_factor < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "load bound factor must be a non-negative number, got {}",
                self.load_bound_factor
            )));
        }
        Ok(())
    }
}
