//! Consistent hash ring implementation.
//!
//! The ring keeps virtual-node positions in a sorted index, tracks per-host
//! load in a registry, and offers both plain and bounded-load lookups.

pub(crate) mod bounded;
pub mod guard;
pub mod hash_ring;
pub mod index;

mod builder;

pub use builder::RingBuilder;
pub use guard::LoadGuard;
pub use hash_ring::HashRing;
pub use index::RingIndex;
