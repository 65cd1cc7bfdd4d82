//! XXH3 hasher.

use crate::hash::traits::KeyHasher;
use xxhash_rust::xxh3::xxh3_64;

/// XXH3-64 over the raw key bytes.
#[derive(Clone, Copy, Debug, Default)]
pub struct Xxh3Hasher;

impl KeyHasher for Xxh3Hasher {
    fn hash_key(&self, key: &str) -> u64 {
        xxh3_64(key.as_bytes())
    }

    fn name(&self) -> &'static str {
        "Xxh3Hasher"
    }
}
