//! Serializable snapshot of a [`VariableStore`](super::VariableStore)
//!
//! The persisted layout is a two-key JSON object:
//!
//! ```json
//! { "global": { "baseUrl": "https://api.example.com" }, "local": { "userId": 42 } }
//! ```

use crate::value::TemplateValue;
use serde::{Deserialize, Serialize};
use serde_json::Map;

/// Deep copy of both store scopes, safe to serialize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Variables from the global scope
    #[serde(default)]
    pub global: Map<String, TemplateValue>,

    /// Variables from the local scope
    #[serde(default)]
    pub local: Map<String, TemplateValue>,
}

impl StoreSnapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes the snapshot to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parses a snapshot from JSON text.
    ///
    /// Either scope may be omitted; a missing scope imports as empty.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Converts the snapshot into a [`TemplateValue`] with the persisted layout.
    pub fn to_value(&self) -> TemplateValue {
        let mut root = Map::new();
        root.insert("global".to_string(), TemplateValue::Object(self.global.clone()));
        root.insert("local".to_string(), TemplateValue::Object(self.local.clone()));
        TemplateValue::Object(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::VariableStore;
    use serde_json::json;

    #[test]
    fn test_json_layout() {
        let mut store = VariableStore::new();
        store.set_global("baseUrl", json!("https://api.example.com"));
        store.set_local("ids", json!([1, 2, 3]));

        let value: TemplateValue =
            serde_json::from_str(&store.export_snapshot().to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "global": {"baseUrl": "https://api.example.com"},
                "local": {"ids": [1, 2, 3]}
            })
        );
        assert_eq!(store.export_snapshot().to_value(), value);
    }

    #[test]
    fn test_from_json_missing_scope() {
        let snapshot = StoreSnapshot::from_json(r#"{"global": {"a": 1}}"#).unwrap();
        assert_eq!(snapshot.global.get("a"), Some(&json!(1)));
        assert!(snapshot.local.is_empty());
    }

    #[test]
    fn test_from_json_rejects_non_object_scope() {
        assert!(StoreSnapshot::from_json(r#"{"global": [1, 2]}"#).is_err());
    }

    #[test]
    fn test_round_trip_into_fresh_store() {
        let mut store = VariableStore::new();
        store.set_global("user", json!({"name": "Alice", "roles": ["admin"]}));
        store.set_local("count", json!(3));
        store.set_local("user", json!(null));

        let json = store.export_snapshot().to_json().unwrap();
        let mut fresh = VariableStore::new();
        fresh.import_snapshot(StoreSnapshot::from_json(&json).unwrap());

        for key in store.keys() {
            assert_eq!(fresh.get(&key), store.get(&key));
        }
        assert_eq!(fresh, store);
    }
}
