//! Sorted virtual-node index.
//!
//! The ring is kept as an ascending `Vec<u64>` of virtual-node tokens plus a
//! token -> host map. Lookups are a binary search; removals splice the vector
//! (O(n) shift), which is fine while host churn stays rare.

use std::collections::HashMap;

/// Ring positions and their owners.
///
/// # Invariants
///
/// - `tokens` is sorted ascending and holds no duplicates
/// - the key set of `owners` equals the value set of `tokens`
#[derive(Debug, Default, Clone)]
pub struct RingIndex {
    tokens: Vec<u64>,
    owners: HashMap<u64, String>,
}

impl RingIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of virtual nodes on the ring.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// True if some virtual node already sits at `token`.
    #[inline]
    pub fn contains(&self, token: u64) -> bool {
        self.owners.contains_key(&token)
    }

    /// Places `host` at every position in `tokens`, then re-sorts the ring.
    ///
    /// Callers must pass positions that are not yet occupied.
    pub fn insert(&mut self, host: &str, tokens: &[u64]) {
        for &token in tokens {
            debug_assert!(!self.contains(token), "token {token:016x} already placed");
            self.owners.insert(token, host.to_owned());
            self.tokens.push(token);
        }
        self.tokens.sort_unstable();
    }

    /// Removes the virtual node at `token`. Returns false if none was there.
    pub fn remove(&mut self, token: u64) -> bool {
        if self.owners.remove(&token).is_none() {
            return false;
        }
        match self.tokens.binary_search(&token) {
            Ok(idx) => {
                self.tokens.remove(idx);
                true
            }
            Err(_) => false,
        }
    }

    /// Index of the first virtual node at or after `hash`, wrapping to 0
    /// past the largest token. `None` only when the ring is empty.
    pub fn successor(&self, hash: u64) -> Option<usize> {
        if self.tokens.is_empty() {
            return None;
        }
        let idx = self.tokens.partition_point(|&token| token < hash);
        Some(if idx == self.tokens.len() { 0 } else { idx })
    }

    /// Owner of the virtual node at ring index `idx`.
    pub fn owner_at(&self, idx: usize) -> Option<&str> {
        self.tokens
            .get(idx)
            .and_then(|token| self.owners.get(token))
            .map(String::as_str)
    }

    /// All `(token, host)` pairs in ring order.
    pub fn entries(&self) -> impl Iterator<Item = (u64, &str)> + '_ {
        self.tokens
            .iter()
            .filter_map(|token| self.owners.get(token).map(|host| (*token, host.as_str())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(tokens: &[u64]) -> RingIndex {
        let mut index = RingIndex::new();
        index.insert("h", tokens);
        index
    }

    #[test]
    fn test_insert_sorts() {
        let mut index = RingIndex::new();
        index.insert("a", &[30, 10]);
        index.insert("b", &[20, 5]);
        let tokens: Vec<u64> = index.entries().map(|(t, _)| t).collect();
        assert_eq!(tokens, vec![5, 10, 20, 30]);
        assert_eq!(index.owner_at(0), Some("b"));
        assert_eq!(index.owner_at(3), Some("a"));
        assert_eq!(index.owner_at(4), None);
    }

    #[test]
    fn test_successor_wraps() {
        let index = index_of(&[10, 20, 30]);
        assert_eq!(index.successor(0), Some(0));
        assert_eq!(index.successor(10), Some(0));
        assert_eq!(index.successor(11), Some(1));
        assert_eq!(index.successor(30), Some(2));
        assert_eq!(index.successor(31), Some(0));
        assert_eq!(index.successor(u64::MAX), Some(0));
    }

    #[test]
    fn test_successor_empty() {
        assert_eq!(RingIndex::new().successor(42), None);
    }

    #[test]
    fn test_remove() {
        let items = [0, 1, 2, 3, 5, 20, 22, 23, 25, 27, 28, 30, 35, 37, 1008, 1009];
        let mut index = index_of(&items);

        for token in [25, 37, 1009, 3] {
            assert!(index.remove(token));
        }
        assert!(!index.remove(100_000));
        assert!(!index.remove(25));

        let left: Vec<u64> = index.entries().map(|(t, _)| t).collect();
        assert_eq!(left, vec![0, 1, 2, 5, 20, 22, 23, 27, 28, 30, 35, 1008]);
        assert_eq!(index.len(), 12);
        assert!(!index.contains(37));
    }
}
