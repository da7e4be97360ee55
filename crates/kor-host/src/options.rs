//! Process-wide mutable options map
//!
//! Global options outlive any single request, so overrides against them must
//! be restored once the request completes.

use crate::value::Value;
use indexmap::IndexMap;

/// Named, ordered map of process-wide options
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    entries: IndexMap<String, Value>,
}

impl GlobalOptions {
    /// Create empty options map
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options map with the host's stock entries
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut options = Self::new();
        options.set("clip_stop_at_last_layers", Value::Int(1));
        options.set("eta_noise_seed_delta", Value::Int(0));
        options
    }

    /// Look up an option by name
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Set an option, inserting it if absent
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.entries.insert(name.into(), value);
    }

    /// Check whether an option exists
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
