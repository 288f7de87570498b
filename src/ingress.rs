//! Minimal model of the routing resource the extractor reads.
//!
//! Only the parts of an ingress rule this crate consumes are modelled:
//! object metadata with its string-keyed annotation map.  The surrounding
//! controller owns the full resource and its lifecycle; the extractor only
//! ever reads a snapshot.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Object metadata carried by a routing rule.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ObjectMeta {
    /// Resource name.
    pub name: String,

    /// Namespace the resource lives in.
    pub namespace: String,

    /// String-keyed annotation metadata used for extended configuration.
    pub annotations: HashMap<String, String>,
}

/// A declarative routing rule mapping external traffic to internal services.
///
/// Deserialises directly from the YAML/JSON manifests these resources are
/// written in, so tests and callers can load fixtures without glue code.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Ingress {
    /// Standard object metadata (name, namespace, annotations).
    pub metadata: ObjectMeta,
}

impl Ingress {
    /// Look up an annotation value by its full key.
    #[must_use]
    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.metadata.annotations.get(key).map(String::as_str)
    }
}
