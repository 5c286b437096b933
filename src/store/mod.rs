//! Scoped variable store
//!
//! Holds the values that test steps share with each other. Variables live in
//! one of two scopes:
//!
//! - **global**: survives across test steps for the whole run
//! - **local**: cleared between steps or tests
//!
//! Lookups prefer the local scope, so a local variable shadows a global one
//! with the same name. Writing to one scope never touches the other.
//!
//! # Example
//!
//! ```
//! use request_templates::store::VariableStore;
//! use serde_json::json;
//!
//! let mut store = VariableStore::new();
//! store.set_global("baseUrl", json!("https://api.example.com"));
//! store.set_local("userId", json!(42));
//!
//! assert_eq!(store.get("userId"), Some(&json!(42)));
//! assert!(store.has("baseUrl"));
//! ```

pub mod snapshot;

pub use snapshot::StoreSnapshot;

use crate::value::TemplateValue;
use serde::{Deserialize, Serialize};
use serde_json::Map;
use std::collections::BTreeSet;
use std::fmt;

/// The partition of the store a variable lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Process-wide, survives across test steps
    Global,
    /// Per step or test, shadows global
    Local,
}

impl Scope {
    /// Parses a scope name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "global" => Some(Scope::Global),
            "local" => Some(Scope::Local),
            _ => None,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Global => write!(f, "global"),
            Scope::Local => write!(f, "local"),
        }
    }
}

/// Two-scope key/value store consulted by the template resolver.
///
/// Both scopes keep insertion order, which is also the order used by
/// [`VariableStore::export_snapshot`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableStore {
    global: Map<String, TemplateValue>,
    local: Map<String, TemplateValue>,
}

impl VariableStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a variable in the global scope, overwriting any previous value.
    pub fn set_global(&mut self, key: impl Into<String>, value: TemplateValue) {
        self.set(Scope::Global, key, value);
    }

    /// Sets a variable in the local scope, overwriting any previous value.
    pub fn set_local(&mut self, key: impl Into<String>, value: TemplateValue) {
        self.set(Scope::Local, key, value);
    }

    /// Sets a variable in the given scope.
    pub fn set(&mut self, scope: Scope, key: impl Into<String>, value: TemplateValue) {
        let key = key.into();
        log::trace!("set {} variable '{}'", scope, key);
        self.scope_mut(scope).insert(key, value);
    }

    /// Looks a variable up, local scope first, then global.
    pub fn get(&self, key: &str) -> Option<&TemplateValue> {
        self.local.get(key).or_else(|| self.global.get(key))
    }

    /// Looks a variable up in the global scope only.
    pub fn get_global(&self, key: &str) -> Option<&TemplateValue> {
        self.global.get(key)
    }

    /// Looks a variable up in the local scope only.
    pub fn get_local(&self, key: &str) -> Option<&TemplateValue> {
        self.local.get(key)
    }

    /// Returns true if the key is present in either scope.
    pub fn has(&self, key: &str) -> bool {
        self.local.contains_key(key) || self.global.contains_key(key)
    }

    /// Removes a key from both scopes.
    ///
    /// A key present in both scopes is removed from both, so a subsequent
    /// `get` never falls back to a stale global value. Returns true if
    /// anything was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        let local = self.local.shift_remove(key).is_some();
        let global = self.global.shift_remove(key).is_some();
        local || global
    }

    /// Removes a key from a single scope, leaving the other untouched.
    pub fn delete_from(&mut self, scope: Scope, key: &str) -> bool {
        self.scope_mut(scope).shift_remove(key).is_some()
    }

    /// Removes every local variable.
    pub fn clear_local(&mut self) {
        log::debug!("clearing {} local variables", self.local.len());
        self.local.clear();
    }

    /// Removes every global variable.
    pub fn clear_global(&mut self) {
        log::debug!("clearing {} global variables", self.global.len());
        self.global.clear();
    }

    /// Removes every variable from both scopes.
    pub fn clear_all(&mut self) {
        self.clear_local();
        self.clear_global();
    }

    /// Returns the names of all variables in either scope, without duplicates.
    pub fn keys(&self) -> BTreeSet<String> {
        self.local
            .keys()
            .chain(self.global.keys())
            .cloned()
            .collect()
    }

    /// Number of distinct variable names across both scopes.
    pub fn len(&self) -> usize {
        self.keys().len()
    }

    /// Checks if both scopes are empty.
    pub fn is_empty(&self) -> bool {
        self.local.is_empty() && self.global.is_empty()
    }

    /// Returns a deep copy of both scopes.
    pub fn export_snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            global: self.global.clone(),
            local: self.local.clone(),
        }
    }

    /// Merges a snapshot into the store.
    ///
    /// Every key in the snapshot overwrites the same key in the matching
    /// scope. Keys missing from the snapshot are left as they are.
    pub fn import_snapshot(&mut self, snapshot: StoreSnapshot) {
        log::debug!(
            "importing snapshot with {} global and {} local variables",
            snapshot.global.len(),
            snapshot.local.len()
        );
        self.global.extend(snapshot.global);
        self.local.extend(snapshot.local);
    }

    /// Creates a store from a snapshot.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            global: snapshot.global,
            local: snapshot.local,
        }
    }

    fn scope_mut(&mut self, scope: Scope) -> &mut Map<String, TemplateValue> {
        match scope {
            Scope::Global => &mut self.global,
            Scope::Local => &mut self.local,
        }
    }
}
