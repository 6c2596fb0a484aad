//! Recursive property-delta tree.
//!
//! Each node describes one property's before/after values plus its nested
//! child changes, preserving the full shape of the source payload (a tag
//! map gaining keys, one of which itself has structured children) without
//! flattening. Downstream consumers walk the tree depth-first in source
//! order; sibling paths are independent, never merged.

use serde::{Deserialize, Serialize};

use super::document::LazyDocument;

/// One property's change, recursively nested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDelta {
    /// Dotted property path (e.g. `tags.myNewTag`).
    #[serde(default)]
    pub path: String,
    /// Classification of the property change.
    pub property_change_type: PropertyChangeType,
    /// Value before the deployment, absent for created properties.
    #[serde(default, skip_serializing_if = "LazyDocument::is_absent")]
    pub before: LazyDocument,
    /// Value after the deployment, absent for deleted properties.
    #[serde(default, skip_serializing_if = "LazyDocument::is_absent")]
    pub after: LazyDocument,
    /// Sub-property changes beneath this path, empty for leaves.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PropertyDelta>,
}

/// Classification of a property-level change.
///
/// Closed on the wire; unrecognized values round-trip unchanged through
/// [`PropertyChangeType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PropertyChangeType {
    /// The property will be created.
    Create,
    /// The property will be deleted.
    Delete,
    /// The property is an array with element-level changes.
    Array,
    /// The property will be modified.
    Modify,
    /// The change has no effect on the resource.
    NoEffect,
    /// An unrecognized property change type, surfaced unchanged.
    Other(String),
}

impl From<String> for PropertyChangeType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Create" => Self::Create,
            "Delete" => Self::Delete,
            "Array" => Self::Array,
            "Modify" => Self::Modify,
            "NoEffect" => Self::NoEffect,
            _ => Self::Other(value),
        }
    }
}

impl From<PropertyChangeType> for String {
    fn from(value: PropertyChangeType) -> Self {
        match value {
            PropertyChangeType::Create => Self::from("Create"),
            PropertyChangeType::Delete => Self::from("Delete"),
            PropertyChangeType::Array => Self::from("Array"),
            PropertyChangeType::Modify => Self::from("Modify"),
            PropertyChangeType::NoEffect => Self::from("NoEffect"),
            PropertyChangeType::Other(s) => s,
        }
    }
}

impl std::fmt::Display for PropertyChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => write!(f, "Create"),
            Self::Delete => write!(f, "Delete"),
            Self::Array => write!(f, "Array"),
            Self::Modify => write!(f, "Modify"),
            Self::NoEffect => write!(f, "NoEffect"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

impl PropertyDelta {
    /// Returns the depth of this subtree (a leaf has depth 1).
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(Self::depth)
            .max()
            .unwrap_or_default()
    }

    /// Visits this node and all descendants depth-first, children in
    /// source order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Self)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    /// Collects all paths in this subtree in depth-first source order.
    #[must_use]
    pub fn paths(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.walk(&mut |node| out.push(node.path.as_str()));
        out
    }
}
