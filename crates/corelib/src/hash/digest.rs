//! BLAKE3 digest hasher (the default).

use crate::hash::traits::KeyHasher;

/// Hashes keys with BLAKE3 and keeps the first 8 digest bytes.
///
/// The bytes are read little-endian, so the position is a plain truncation
/// of the 256-bit digest.
#[derive(Clone, Copy, Debug, Default)]
pub struct Blake3Hasher;

impl KeyHasher for Blake3Hasher {
    fn hash_key(&self, key: &str) -> u64 {
        let digest = ::blake3::hash(key.as_bytes());
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest.as_bytes()[..8]);
        u64::from_le_bytes(head)
    }

    fn name(&self) -> &'static str {
        "Blake3Hasher"
    }
}
