//! Core library for consistent hashing with bounded loads.
//!
//! This crate provides:
//! - Pluggable key hashers
//! - Virtual node derivation
//! - A sorted ring index with wrap-around successor lookup
//! - A host registry that tracks per-host and aggregate load
//! - The [`HashRing`] façade offering plain and bounded-load selection

pub mod config;
pub mod error;
pub mod hash;
pub mod host;
pub mod registry;
pub mod ring;
pub mod vnode;

pub use config::RingConfig;
pub use error::{Error, Result};
pub use hash::{HasherKind, KeyHasher};
pub use host::Host;
pub use ring::{HashRing, LoadGuard, RingBuilder};
pub use vnode::VirtualNode;
