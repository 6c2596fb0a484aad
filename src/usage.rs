//! Usage-estimation inputs.
//!
//! Usage records carry the per-resource usage quantities (requests per
//! month, storage consumed, and so on) that usage-sensitive cost functions
//! consult. Loading usage files is the caller's concern; this module only
//! defines the lookup shape the pipeline consumes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Usage inputs for a single resource, keyed by usage parameter name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    /// Address of the resource this usage applies to.
    pub address: String,
    /// Usage parameter values.
    #[serde(default)]
    pub items: HashMap<String, Value>,
}

/// Lookup from resource address to its usage record.
pub type UsageMap = HashMap<String, UsageRecord>;

impl UsageRecord {
    /// Creates an empty usage record for the given resource address.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            items: HashMap::new(),
        }
    }

    /// Adds a usage parameter value.
    #[must_use]
    pub fn with_item(mut self, key: impl Into<String>, value: Value) -> Self {
        self.items.insert(key.into(), value);
        self
    }

    /// Returns a usage parameter value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.items.get(key)
    }

    /// Returns a usage parameter as a float.
    #[must_use]
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    /// Summarizes which usage parameters were actually populated, for
    /// attachment to a priced outcome.
    #[must_use]
    pub fn calc_estimation_summary(&self) -> HashMap<String, bool> {
        self.items
            .iter()
            .map(|(key, value)| (key.clone(), !value.is_null()))
            .collect()
    }
}
