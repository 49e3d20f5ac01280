//! Type-safe identifier wrapper for insurance policies.
//!
//! Policy identifiers are opaque, case-sensitive strings (e.g. `P12345`).
//! Wrapping them prevents accidentally mixing a policy key with the other
//! free-form labels on a [`RiskEvent`](crate::RiskEvent) such as the
//! insured location or event type.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Unique identifier for an insurance policy within an event store.
///
/// As a newtype it serializes as a bare JSON string and binds to a plain
/// TypeScript `string`. Comparison is exact: `p12345` and
/// `P12345` are different policies.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PolicyId(pub String);

impl PolicyId {
    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the identifier is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume the wrapper and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl core::fmt::Display for PolicyId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PolicyId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for PolicyId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<PolicyId> for String {
    fn from(id: PolicyId) -> Self {
        id.0
    }
}

impl core::borrow::Borrow<str> for PolicyId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_bare_string() {
        let id = PolicyId::from("P12345");
        let json = serde_json::to_string(&id).unwrap_or_default();
        assert_eq!(json, "\"P12345\"");

        let restored: Result<PolicyId, _> = serde_json::from_str("\"P67890\"");
        assert_eq!(restored.ok(), Some(PolicyId::from("P67890")));
    }

    #[test]
    fn binds_to_typescript_string() {
        assert_eq!(PolicyId::inline(), "string");
    }

    #[test]
    fn comparison_is_case_sensitive() {
        assert_ne!(PolicyId::from("P12345"), PolicyId::from("p12345"));
    }
}
