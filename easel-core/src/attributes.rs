//! Named attribute bundles with a current selection and temporary-override
//! history.
//!
//! A bundle groups the rendering attributes (color, style, width, size,
//! filled, hidden); every field is optional and absence means "inherit".
//! Selecting a bundle copies its present fields into the node's local
//! property store, which is how attribute selection becomes visible through
//! the property-inheritance path. Tree-wide selection and propagation live
//! on [`crate::Scene`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The bundle id every node starts on.
pub const DEFAULT_BUNDLE: &str = "default";

/// One named collection of rendering attributes, selectable as a unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeBundle {
    /// Color as a hex string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Normalized style code (component-specific meaning).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<i32>,
    /// Stroke width in logical units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    /// Component size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f32>,
    /// Whether closed shapes are filled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filled: Option<bool>,
    /// Whether the component is hidden.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
}

impl AttributeBundle {
    /// Whether no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.color.is_none()
            && self.style.is_none()
            && self.width.is_none()
            && self.size.is_none()
            && self.filled.is_none()
            && self.hidden.is_none()
    }
}

/// A node's collection of named attribute bundles.
///
/// Tracks which bundle is current and keeps a last-in-first-out history of
/// previously current ids for the temporary-override mechanism.
#[derive(Debug, Clone)]
pub struct AttributeSet {
    bundles: HashMap<String, AttributeBundle>,
    current_id: String,
    history: Vec<String>,
}

impl Default for AttributeSet {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributeSet {
    /// Create an empty set with `"default"` as the current id.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bundles: HashMap::new(),
            current_id: DEFAULT_BUNDLE.to_string(),
            history: Vec::new(),
        }
    }

    /// The currently selected bundle id.
    #[must_use]
    pub fn current_id(&self) -> &str {
        &self.current_id
    }

    /// Make `id` current if a bundle of that name exists locally.
    ///
    /// Unresolved ids are silently ignored (returns `false`): attribute
    /// propagation over a tree may pass ids meaningful only to some
    /// subtrees.
    pub fn use_id(&mut self, id: &str) -> bool {
        if self.bundles.contains_key(id) {
            self.current_id = id.to_string();
            true
        } else {
            false
        }
    }

    /// The bundle named `id`, if locally defined.
    #[must_use]
    pub fn bundle(&self, id: &str) -> Option<&AttributeBundle> {
        self.bundles.get(id)
    }

    /// The currently selected bundle, if locally defined.
    #[must_use]
    pub fn current(&self) -> Option<&AttributeBundle> {
        self.bundles.get(&self.current_id)
    }

    /// Mutable access to the bundle named `id`, creating it if absent.
    pub fn bundle_mut(&mut self, id: &str) -> &mut AttributeBundle {
        self.bundles.entry(id.to_string()).or_default()
    }

    /// Delete the locally owned bundle named `id`.
    ///
    /// A node cannot delete a bundle it does not locally own: the attempt
    /// warns and returns `false`.
    pub fn remove(&mut self, id: &str) -> bool {
        if self.bundles.remove(id).is_some() {
            true
        } else {
            tracing::warn!("refusing to remove non-local attribute bundle '{id}'");
            false
        }
    }

    /// Sorted ids of the locally defined bundles.
    #[must_use]
    pub fn bundle_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.bundles.keys().cloned().collect();
        ids.sort_unstable();
        ids
    }

    /// Depth of the temporary-override history.
    #[must_use]
    pub fn history_depth(&self) -> usize {
        self.history.len()
    }

    pub(crate) fn push_history(&mut self) {
        self.history.push(self.current_id.clone());
    }

    pub(crate) fn pop_history(&mut self) -> Option<String> {
        self.history.pop()
    }

    /// Force the current id without requiring a local bundle.
    ///
    /// Used when unwinding temporary overrides: the history records what the
    /// current id actually was, so restoring it must not depend on a bundle
    /// of that name existing.
    pub(crate) fn set_current_id(&mut self, id: &str) {
        self.current_id = id.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_default() {
        let set = AttributeSet::new();
        assert_eq!(set.current_id(), DEFAULT_BUNDLE);
        assert!(set.current().is_none());
        assert_eq!(set.history_depth(), 0);
    }

    #[test]
    fn test_use_unknown_id_is_ignored() {
        let mut set = AttributeSet::new();
        assert!(!set.use_id("hover"));
        assert_eq!(set.current_id(), DEFAULT_BUNDLE);
    }

    #[test]
    fn test_use_known_id() {
        let mut set = AttributeSet::new();
        set.bundle_mut("hover").color = Some("#ffff00".to_string());
        assert!(set.use_id("hover"));
        assert_eq!(set.current_id(), "hover");
    }

    #[test]
    fn test_bundle_mut_creates() {
        let mut set = AttributeSet::new();
        assert!(set.bundle("thick").is_none());
        set.bundle_mut("thick").width = Some(4.0);
        assert_eq!(set.bundle("thick").and_then(|b| b.width), Some(4.0));
    }

    #[test]
    fn test_remove_non_local_is_rejected() {
        let mut set = AttributeSet::new();
        assert!(!set.remove("inherited"));
        set.bundle_mut("mine").filled = Some(true);
        assert!(set.remove("mine"));
        assert!(set.bundle("mine").is_none());
    }

    #[test]
    fn test_history_stack_discipline() {
        let mut set = AttributeSet::new();
        set.bundle_mut("a");
        set.bundle_mut("b");
        set.push_history();
        set.use_id("a");
        set.push_history();
        set.use_id("b");
        assert_eq!(set.pop_history().as_deref(), Some("a"));
        assert_eq!(set.pop_history().as_deref(), Some(DEFAULT_BUNDLE));
        assert_eq!(set.pop_history(), None);
    }

    #[test]
    fn test_bundle_ids_sorted() {
        let mut set = AttributeSet::new();
        set.bundle_mut("hover");
        set.bundle_mut("default");
        assert_eq!(set.bundle_ids(), ["default", "hover"]);
    }

    #[test]
    fn test_empty_bundle() {
        let mut bundle = AttributeBundle::default();
        assert!(bundle.is_empty());
        bundle.hidden = Some(false);
        assert!(!bundle.is_empty());
    }
}
