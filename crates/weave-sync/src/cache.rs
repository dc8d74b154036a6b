//! Cache store: the persisted name to value map.
//!
//! The store is serialized as one JSON object. Entry order is kept across
//! a save/load round-trip.

use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::warn;

use crate::error::SyncError;
use crate::value::Value;

/// Flat mapping from field name to last-known value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStore {
    entries: IndexMap<SmolStr, Value>,
}

impl CacheStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Stores `value` under `key`, keeping the position of an existing entry.
    pub fn set(&mut self, key: impl Into<SmolStr>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// Returns true if `key` has an entry.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&SmolStr, &Value)> {
        self.entries.iter()
    }

    /// Reads a flag entry; `default` when absent.
    #[must_use]
    pub fn flag(&self, key: &str, default: bool) -> bool {
        self.get(key).map_or(default, Value::as_flag)
    }

    /// Serializes the store as a JSON object.
    #[must_use]
    pub fn serialize(&self) -> String {
        match serde_json::to_string(&self.entries) {
            Ok(text) => text,
            Err(err) => {
                warn!(%err, "failed to serialize cache, saving empty store");
                String::from("{}")
            }
        }
    }

    /// Parses stored text, failing on anything that is not a JSON object.
    ///
    /// Entries whose value is `null`, an array or an object are skipped.
    pub fn parse(text: &str) -> Result<Self, SyncError> {
        let raw: IndexMap<String, serde_json::Value> = serde_json::from_str(text)
            .map_err(|err| SyncError::MalformedCache(err.to_string().into()))?;
        let mut store = Self::new();
        for (key, json) in raw {
            match Value::from_json(&json) {
                Some(value) => store.set(key, value),
                None => warn!(key = %key, "skipping cache entry with unsupported value"),
            }
        }
        Ok(store)
    }

    /// Loads stored text, degrading to an empty store.
    ///
    /// Blank text is an empty store. Malformed text is logged and also
    /// yields an empty store.
    #[must_use]
    pub fn deserialize(text: &str) -> Self {
        if text.trim().is_empty() {
            return Self::new();
        }
        match Self::parse(text) {
            Ok(store) => store,
            Err(err) => {
                warn!(%err, "ignoring malformed cache");
                Self::new()
            }
        }
    }
}

impl FromIterator<(SmolStr, Value)> for CacheStore {
    fn from_iter<I: IntoIterator<Item = (SmolStr, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_keeps_position() {
        let mut store = CacheStore::new();
        store.set("a", 1_i64);
        store.set("b", true);
        store.set("a", 2_i64);
        let keys: Vec<_> = store.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(store.get("a"), Some(&Value::Int(2)));
    }

    #[test]
    fn remove_shifts() {
        let mut store = CacheStore::new();
        store.set("a", 1_i64);
        store.set("b", 2_i64);
        store.set("c", 3_i64);
        assert_eq!(store.remove("b"), Some(Value::Int(2)));
        assert_eq!(store.serialize(), r#"{"a":1,"c":3}"#);
    }

    #[test]
    fn parse_rejects_non_objects() {
        assert!(matches!(
            CacheStore::parse("[1, 2]"),
            Err(SyncError::MalformedCache(_))
        ));
        assert!(CacheStore::parse("{").is_err());
    }

    #[test]
    fn parse_skips_nested_values() {
        let store = CacheStore::parse(r#"{"a": null, "b": [1], "c": "x"}"#).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("c"), Some(&Value::from("x")));
    }

    #[test]
    fn deserialize_degrades() {
        assert!(CacheStore::deserialize("not json").is_empty());
        assert!(CacheStore::deserialize("   ").is_empty());
        assert_eq!(CacheStore::deserialize(r#"{"k":0.5}"#).len(), 1);
    }

    #[test]
    fn flag_default() {
        let mut store = CacheStore::new();
        assert!(store.flag("missing", true));
        store.set("f", "off");
        assert!(!store.flag("f", true));
    }
}
