//! RAII load reservations.

use crate::ring::hash_ring::HashRing;

/// One unit of load reserved on a host by [`HashRing::reserve`].
///
/// Dropping the guard releases the reservation with [`HashRing::done`]. If
/// the host was unregistered in the meantime the release is a no-op.
#[must_use = "dropping the guard releases the reservation immediately"]
#[derive(Debug)]
pub struct LoadGuard<'a> {
    ring: &'a HashRing,
    host: String,
}

impl<'a> LoadGuard<'a> {
    pub(crate) fn new(ring: &'a HashRing, host: String) -> Self {
        Self { ring, host }
    }

    /// The host holding the reservation.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Releases the reservation now.
    pub fn release(self) {}
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        self.ring.done(&self.host);
    }
}
