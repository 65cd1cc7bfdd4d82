//! SipHash-1-3 hasher.

use crate::hash::traits::KeyHasher;
use siphasher::sip::SipHasher13;
use std::hash::Hasher;

/// SipHash-1-3 over the raw key bytes, keyed with zeros.
#[derive(Clone, Copy, Debug, Default)]
pub struct SipHasher;

impl KeyHasher for SipHasher {
    fn hash_key(&self, key: &str) -> u64 {
        let mut hasher = SipHasher13::new();
        hasher.write(key.as_bytes());
        hasher.finish()
    }

    fn name(&self) -> &'static str {
        "SipHasher"
    }
}
