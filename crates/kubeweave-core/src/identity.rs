//! Schema type identities

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Opaque, globally unique name of a schema type.
///
/// Identities are structural, not per-instance: every container in a pod
/// carries the same `io.k8s.api.core.v1.Container` identity, and the
/// registry keys its context table by identity so lookups stay a plain map
/// access. The last dot-segment doubles as the human-facing short name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeIdentity(String);

impl TypeIdentity {
    /// Create an identity from a fully qualified name
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The full identity string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last dot-segment of the identity
    ///
    /// `io.k8s.api.core.v1.Container` yields `Container`. Identities
    /// without dots are their own short name.
    pub fn short_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeIdentity {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TypeIdentity {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for TypeIdentity {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TypeIdentity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
