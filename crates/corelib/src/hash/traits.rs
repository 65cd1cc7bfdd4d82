//! Core hasher trait definitions.

/// Converts string keys into positions on the ring.
///
/// Hashers are stateless and thread-safe: one instance is shared by every
/// reader of the ring without synchronization.
pub trait KeyHasher: Send + Sync + 'static {
    /// Hashes `key` to a 64-bit ring position.
    ///
    /// Only uniform distribution is required; implementations need not be
    /// cryptographically strong.
    fn hash_key(&self, key: &str) -> u64;

    /// Returns the name of this hasher.
    fn name(&self) -> &'static str;
}
