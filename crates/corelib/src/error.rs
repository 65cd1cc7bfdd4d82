//! Error types for the core library.

/// Result type alias for the core library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the core library.
///
/// Every error is returned synchronously and leaves the ring untouched, so
/// a `HashRing` stays usable after any failed call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A host with the same name is already registered.
    #[error("host already exists")]
    HostAlreadyExists,
    /// The referenced host is not registered, or the ring has no hosts.
    #[error("host not found")]
    HostNotFound,
    /// Construction-time configuration was rejected.
    #[error("invalid ring configuration: {0}")]
    InvalidConfig(String),
}
