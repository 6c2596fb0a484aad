//! Lazy document materialization for what-if sub-documents.
//!
//! Before/after payloads arrive as raw, possibly-absent JSON fragments
//! nested inside the what-if envelope. Parsing every fragment eagerly is
//! wasted work for changes the pipeline never inspects, so each payload is
//! kept verbatim and materialized into a structured view on first access.
//!
//! The memoization sentinel is the parse itself (a [`OnceLock`]), never the
//! presence of a particular key in the payload, so a document that happens
//! to lack an `id` or `path` field is still parsed exactly once.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_json::value::RawValue;

/// A lazily materialized JSON document.
///
/// The raw payload is preserved byte-exact for re-serialization; the parsed
/// view is derived state and never travels over the wire. An absent payload
/// materializes as [`Value::Null`] rather than an error.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LazyDocument {
    /// Raw JSON payload exactly as it appeared in the envelope.
    raw: Option<Box<RawValue>>,
    /// Memoized structured view, populated on first access.
    #[serde(skip)]
    view: OnceLock<Value>,
}

impl LazyDocument {
    /// Creates an absent document.
    #[must_use]
    pub fn absent() -> Self {
        Self::default()
    }

    /// Creates a document from a raw JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        Ok(Self {
            raw: Some(RawValue::from_string(json.to_string())?),
            view: OnceLock::new(),
        })
    }

    /// Returns true if no payload is present.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        self.raw.is_none()
    }

    /// Returns the raw JSON text, if present.
    #[must_use]
    pub fn raw_json(&self) -> Option<&str> {
        self.raw.as_deref().map(RawValue::get)
    }

    /// Returns the materialized view of the payload, parsing at most once.
    ///
    /// An absent or unparseable payload yields [`Value::Null`]; callers
    /// probe for the fields they need rather than assuming a shape.
    pub fn view(&self) -> &Value {
        self.view.get_or_init(|| match &self.raw {
            Some(raw) => serde_json::from_str(raw.get()).unwrap_or(Value::Null),
            None => Value::Null,
        })
    }

    /// Returns a top-level field of the materialized view.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.view().get(name)
    }

    /// Returns a top-level field as a string slice.
    #[must_use]
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }

    /// Returns a nested field addressed by a dotted path
    /// (e.g. `properties.osProfile.windowsConfiguration`).
    #[must_use]
    pub fn query(&self, path: &str) -> Option<&Value> {
        let mut current = self.view();
        for segment in path.split('.') {
            current = current.get(segment)?;
        }
        Some(current)
    }
}

impl PartialEq for LazyDocument {
    fn eq(&self, other: &Self) -> bool {
        self.raw_json() == other.raw_json()
    }
}

impl From<Option<Box<RawValue>>> for LazyDocument {
    fn from(raw: Option<Box<RawValue>>) -> Self {
        Self {
            raw,
            view: OnceLock::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_document_views_as_null() {
        let doc = LazyDocument::absent();
        assert!(doc.is_absent());
        assert_eq!(*doc.view(), Value::Null);
    }

    #[test]
    fn test_view_is_memoized() {
        let doc = LazyDocument::from_json(r#"{"id":"/sub/1","type":"Microsoft.Foo/bar"}"#)
            .expect("valid json");
        let first = doc.view();
        let second = doc.view();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first, second);
    }

    #[test]
    fn test_view_is_memoized_without_id_field() {
        // Memoization must not depend on any particular key being present.
        let doc = LazyDocument::from_json(r#"{"location":"westus2"}"#).expect("valid json");
        let first = doc.view();
        let second = doc.view();
        assert!(std::ptr::eq(first, second));
        assert_eq!(doc.str_field("location"), Some("westus2"));
    }

    #[test]
    fn test_raw_json_round_trips_exactly() {
        let json = r#"{"id":"/sub/1",  "tags":{"a":"b"}}"#;
        let doc: LazyDocument = serde_json::from_str(json).expect("deserialize");
        let out = serde_json::to_string(&doc).expect("serialize");
        assert_eq!(out, json);
    }

    #[test]
    fn test_query_dotted_path() {
        let doc = LazyDocument::from_json(
            r#"{"properties":{"osProfile":{"windowsConfiguration":{"timeZone":"UTC"}}}}"#,
        )
        .expect("valid json");
        assert!(doc.query("properties.osProfile.windowsConfiguration").is_some());
        assert!(doc.query("properties.osProfile.linuxConfiguration").is_none());
        assert_eq!(
            doc.query("properties.osProfile.windowsConfiguration.timeZone")
                .and_then(Value::as_str),
            Some("UTC")
        );
    }

    #[test]
    fn test_scalar_payload() {
        let doc = LazyDocument::from_json("\"my tag value\"").expect("valid json");
        assert_eq!(doc.view().as_str(), Some("my tag value"));
    }
}
