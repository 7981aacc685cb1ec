//! Per-node property storage with locked keys.
//!
//! A property store holds only a node's local values. Inherited resolution
//! (local wins, else walk the ancestor chain, else the caller's default)
//! lives on [`crate::Scene`], which owns the tree structure.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

/// Well-known property keys.
pub mod keys {
    /// Caller-assigned identifier, used by child lookups.
    pub const ID: &str = "id";
    /// Stroke/fill color as a hex string, e.g. `"#ff0000"`.
    pub const COLOR: &str = "color";
    /// Normalized style code (meaning is component-specific).
    pub const STYLE: &str = "style";
    /// Stroke width in logical units.
    pub const WIDTH: &str = "width";
    /// Component size (font size for text, radius for markers).
    pub const SIZE: &str = "size";
    /// Whether closed shapes are filled.
    pub const FILLED: &str = "filled";
    /// Whether the component (and its subtree) is hidden.
    pub const HIDDEN: &str = "hidden";
    /// Whether the component is currently selected.
    pub const SELECTED: &str = "selected";
    /// Whether the component is mid-draw (being constructed interactively).
    pub const DRAWING: &str = "drawing";
    /// Whether the component responds to pointer input.
    pub const ENABLED: &str = "enabled";

    /// Keys implicitly locked for every node regardless of component type.
    pub const RESERVED: [&str; 10] = [
        ID, COLOR, STYLE, WIDTH, SIZE, FILLED, HIDDEN, SELECTED, DRAWING, ENABLED,
    ];
}

/// A dynamically typed property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum PropValue {
    /// Boolean flag.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f32),
    /// Text value (also carries hex color strings).
    Text(String),
}

impl PropValue {
    /// The boolean value, if this is a `Bool`.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer value, if this is an `Int`.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            PropValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The float value; integers are widened.
    #[must_use]
    pub fn as_float(&self) -> Option<f32> {
        match self {
            PropValue::Float(f) => Some(*f),
            #[allow(clippy::cast_precision_loss)]
            PropValue::Int(i) => Some(*i as f32),
            _ => None,
        }
    }

    /// The text value, if this is `Text`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for PropValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropValue::Bool(b) => write!(f, "{b}"),
            PropValue::Int(i) => write!(f, "{i}"),
            PropValue::Float(x) => write!(f, "{x}"),
            PropValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Bool(b)
    }
}

impl From<i64> for PropValue {
    fn from(i: i64) -> Self {
        PropValue::Int(i)
    }
}

impl From<i32> for PropValue {
    fn from(i: i32) -> Self {
        PropValue::Int(i64::from(i))
    }
}

impl From<f32> for PropValue {
    fn from(f: f32) -> Self {
        PropValue::Float(f)
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::Text(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        PropValue::Text(s)
    }
}

/// A node's local key/value configuration with a fixed locked-key set.
///
/// Locked keys may be overwritten but never removed; removal attempts warn
/// and leave the store unchanged. The locked set is fixed at construction.
#[derive(Debug, Clone)]
pub struct PropertyStore {
    values: HashMap<String, PropValue>,
    locked: BTreeSet<String>,
}

impl PropertyStore {
    /// Create a store whose locked set is the reserved keys plus `extra_locked`.
    #[must_use]
    pub(crate) fn new(extra_locked: &[&str]) -> Self {
        let locked = keys::RESERVED
            .iter()
            .chain(extra_locked.iter())
            .map(|k| (*k).to_string())
            .collect();
        Self {
            values: HashMap::new(),
            locked,
        }
    }

    /// Set a local value. Always succeeds.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<PropValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// The local value for `key`, never consulting ancestors.
    #[must_use]
    pub fn local(&self, key: &str) -> Option<&PropValue> {
        self.values.get(key)
    }

    /// Whether a local value for `key` exists.
    #[must_use]
    pub fn has_local(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Whether `key` is locked against removal.
    #[must_use]
    pub fn is_locked(&self, key: &str) -> bool {
        self.locked.contains(key)
    }

    /// Remove the local entry for `key`.
    ///
    /// Locked keys are never removed: the attempt warns and returns `false`,
    /// leaving the store unchanged. Otherwise returns whether a local entry
    /// existed (an ancestor-inherited value becomes visible again).
    pub fn remove(&mut self, key: &str) -> bool {
        if self.is_locked(key) {
            tracing::warn!("refusing to remove locked property '{key}'");
            return false;
        }
        self.values.remove(key).is_some()
    }

    /// Sorted local keys.
    #[must_use]
    pub fn local_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.values.keys().cloned().collect();
        keys.sort_unstable();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_local() {
        let mut store = PropertyStore::new(&[]);
        store.put("color", "#ff0000");
        assert_eq!(store.local("color").and_then(PropValue::as_str), Some("#ff0000"));
        assert!(store.local("width").is_none());
    }

    #[test]
    fn test_reserved_keys_are_locked() {
        let store = PropertyStore::new(&[]);
        for key in keys::RESERVED {
            assert!(store.is_locked(key), "{key} should be locked");
        }
        assert!(!store.is_locked("custom"));
    }

    #[test]
    fn test_extra_locked_keys() {
        let mut store = PropertyStore::new(&["text"]);
        store.put("text", "hello");
        assert!(!store.remove("text"));
        assert!(store.has_local("text"));
    }

    #[test]
    fn test_remove_locked_is_rejected() {
        let mut store = PropertyStore::new(&[]);
        store.put(keys::SELECTED, false);
        assert!(!store.remove(keys::SELECTED));
        assert!(store.has_local(keys::SELECTED));
    }

    #[test]
    fn test_remove_unlocked() {
        let mut store = PropertyStore::new(&[]);
        store.put("note", "temp");
        assert!(store.remove("note"));
        assert!(!store.has_local("note"));
        // Removing an absent key reports nothing removed.
        assert!(!store.remove("note"));
    }

    #[test]
    fn test_local_keys_sorted() {
        let mut store = PropertyStore::new(&[]);
        store.put("zeta", 1);
        store.put("alpha", 2);
        store.put("mid", 3);
        assert_eq!(store.local_keys(), ["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(PropValue::from(true).as_bool(), Some(true));
        assert_eq!(PropValue::from(7i64).as_int(), Some(7));
        assert_eq!(PropValue::from(7i32).as_float(), Some(7.0));
        assert_eq!(PropValue::from("x").as_str(), Some("x"));
        assert!(PropValue::from(1.5f32).as_str().is_none());
    }
}
