//! Registered hosts.

/// A physical host known to the ring.
///
/// Owned exclusively by the registry; callers only ever see its name and a
/// copy of its load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Host {
    /// Host identity, typically a network address such as `127.0.0.1:8000`.
    pub name: String,
    /// Current in-flight count, never below zero.
    pub load: i64,
    /// Ring positions actually occupied by this host's virtual nodes.
    pub tokens: Vec<u64>,
}

impl Host {
    /// Creates a host with zero load and no ring positions yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            load: 0,
            tokens: Vec::new(),
        }
    }
}
