//! Virtual node abstractions.
//!
//! # Virtual Nodes (VNodes) Concept
//!
//! Each physical host is placed on the ring several times. Virtual node `i`
//! of host `h` sits at `hash("{h}{i}")`, so placements are deterministic and
//! can be recomputed from the host name alone.
//!
//! More virtual nodes smooth out the key distribution at the cost of a larger
//! ring index:
//!
//! - **Memory**: O(h * r) ring slots for h hosts with r replicas each
//! - **Lookup**: O(log n) binary search over n = h * r slots
//! - **Rebalancing**: roughly 1/h of the keys move when a host joins or leaves

use crate::hash::KeyHasher;
use std::fmt;

/// Builds the hash input for replica `index` of `host`.
///
/// The index is appended with no separator: `replica_key("a", 1) == "a1"`.
#[inline]
pub fn replica_key(host: &str, index: usize) -> String {
    format!("{host}{index}")
}

/// A virtual node on the hash ring.
///
/// # Invariants
///
/// - No two virtual nodes on a ring share a token
/// - Every virtual node belongs to exactly one registered host
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtualNode {
    /// Position on the ring.
    pub token: u64,
    /// Name of the owning host.
    pub host: String,
}

impl VirtualNode {
    #[inline]
    pub fn new(token: u64, host: impl Into<String>) -> Self {
        Self {
            token,
            host: host.into(),
        }
    }

    /// Creates virtual node `index` of `host` at its natural (unprobed)
    /// position.
    ///
    /// # Example
    /// ```rust
    /// use corelib::hash::Blake3Hasher;
    /// use corelib::VirtualNode;
    ///
    /// let vnode0 = VirtualNode::from_index("127.0.0.1:8000", 0, &Blake3Hasher);
    /// let vnode1 = VirtualNode::from_index("127.0.0.1:8000", 1, &Blake3Hasher);
    /// assert_ne!(vnode0.token, vnode1.token);
    /// ```
    pub fn from_index(host: &str, index: usize, hasher: &dyn KeyHasher) -> Self {
        Self::new(hasher.hash_key(&replica_key(host, index)), host)
    }
}

impl fmt::Display for VirtualNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VNode(token={:016x}, host={})", self.token, self.host)
    }
}
