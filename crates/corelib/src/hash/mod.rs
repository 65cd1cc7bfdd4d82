//! Key hashing abstraction for the ring.
//!
//! A key hasher turns host replica names and request keys into positions on
//! the 64-bit ring. Hashers are injected into a [`HashRing`](crate::HashRing)
//! at construction time, so tests can substitute deterministic stubs.

pub mod digest;
pub mod func;
pub mod kind;
pub mod sip;
pub mod traits;
pub mod xxh3;

pub use digest::Blake3Hasher;
pub use func::FnHasher;
pub use kind::HasherKind;
pub use sip::SipHasher;
pub use traits::KeyHasher;
pub use xxh3::Xxh3Hasher;
