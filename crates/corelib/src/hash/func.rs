//! Closure-backed hasher.

use crate::hash::traits::KeyHasher;
use std::fmt;

/// Adapts any `Fn(&str) -> u64` into a [`KeyHasher`].
///
/// Mostly useful for tests that need fully predictable ring positions.
///
/// # Example
///
/// ```rust
/// use corelib::hash::{FnHasher, KeyHasher};
///
/// let hasher = FnHasher::new(|key: &str| key.len() as u64);
/// assert_eq!(hasher.hash_key("abc"), 3);
/// ```
pub struct FnHasher<F> {
    func: F,
}

impl<F> FnHasher<F>
where
    F: Fn(&str) -> u64 + Send + Sync + 'static,
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> KeyHasher for FnHasher<F>
where
    F: Fn(&str) -> u64 + Send + Sync + 'static,
{
    fn hash_key(&self, key: &str) -> u64 {
        (self.func)(key)
    }

    fn name(&self) -> &'static str {
        "FnHasher"
    }
}

impl<F> fmt::Debug for FnHasher<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnHasher")
    }
}
