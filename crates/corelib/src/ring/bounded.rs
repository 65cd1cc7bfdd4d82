//! Consistent hashing with bounded loads.
//!
//! Starting at the key's successor, walk the ring clockwise and take the
//! first host that can absorb one more unit of load without exceeding
//! `ceil((total + 1) / hosts * (1 + factor))`.
//!
//! # Termination
//!
//! The least loaded host carries at most `floor(total / hosts)`, which is
//! strictly below `(total + 1) / hosts`, so it always fits under the ceiling.
//! Every host owns at least one slot, therefore one full revolution of the
//! ring is enough to find a candidate.

use crate::registry::HostRegistry;
use crate::ring::index::RingIndex;
use tracing::trace;

/// Outcome of a bounded scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Selection<'a> {
    pub host: &'a str,
    /// Slots passed over before `host` qualified.
    pub skipped: usize,
}

/// Picks the first host at or after `hash` with spare capacity.
///
/// Returns `None` if the ring is empty or, which the invariants rule out,
/// if no host qualifies after a full revolution.
pub(crate) fn select<'a>(
    index: &'a RingIndex,
    registry: &HostRegistry,
    hash: u64,
    load_bound_factor: f64,
) -> Option<Selection<'a>> {
    let start = index.successor(hash)?;
    let capacity = registry.capacity_for_next(load_bound_factor);
    let len = index.len();

    (0..len)
        .map(|step| (step, (start + step) % len))
        .find_map(|(step, idx)| {
            let host = index.owner_at(idx)?;
            let load = registry.load(host)?;
            if load.saturating_add(1) <= capacity {
                Some(Selection { host, skipped: step })
            } else {
                trace!(host, load, capacity, "host over bound, skipping");
                None
            }
        })
}
