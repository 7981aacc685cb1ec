//! Scene nodes - the entries of the component tree.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::attributes::AttributeSet;
use crate::coords::CoordinateSystem;
use crate::geometry::Point;
use crate::hooks::ComponentHooks;
use crate::properties::{keys, PropValue, PropertyStore};
use crate::scene::Scene;

/// Unique identifier (handle) for a node in a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(Uuid);

impl NodeId {
    /// Create a new unique node ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Callback invoked after every `set_points`, with the scene re-borrowable.
pub type UpdateHook = Box<dyn FnMut(&mut Scene, NodeId)>;

/// A node in the component tree.
///
/// Nodes live in a [`Scene`] arena and refer to each other by [`NodeId`]
/// handles: the parent link is a non-owning back-handle, the children list
/// is the owning direction. Both are maintained exclusively by the scene's
/// tree operations so a node is never registered under two parents.
pub struct Node {
    id: NodeId,
    component_type: String,
    tool_type: Option<String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) coords: Option<Arc<dyn CoordinateSystem>>,
    pub(crate) properties: PropertyStore,
    pub(crate) attributes: AttributeSet,
    pub(crate) points: Vec<Point>,
    pub(crate) hooks: ComponentHooks,
    pub(crate) update_hook: Option<UpdateHook>,
}

impl Node {
    /// Create a detached node with the locked default property set.
    ///
    /// Only [`Scene::create_node`] calls this; tree registration happens
    /// there.
    pub(crate) fn new(component_type: &str, hooks: ComponentHooks, extra_locked: &[&str]) -> Self {
        let mut properties = PropertyStore::new(extra_locked);
        properties.put(keys::ID, "");
        properties.put(keys::SELECTED, false);
        properties.put(keys::DRAWING, false);
        properties.put(keys::ENABLED, true);
        Self {
            id: NodeId::new(),
            component_type: component_type.to_string(),
            tool_type: None,
            parent: None,
            children: Vec::new(),
            coords: None,
            properties,
            attributes: AttributeSet::new(),
            points: Vec::new(),
            hooks,
            update_hook: None,
        }
    }

    /// The node's handle.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The component type tag, fixed at creation.
    #[must_use]
    pub fn component_type(&self) -> &str {
        &self.component_type
    }

    /// The tool type, if this node is part of an interactive tool.
    #[must_use]
    pub fn tool_type(&self) -> Option<&str> {
        self.tool_type.as_deref()
    }

    /// Set the tool type.
    pub fn set_tool_type(&mut self, tool_type: impl Into<String>) {
        self.tool_type = Some(tool_type.into());
    }

    /// The parent handle, if attached.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The ordered child handles.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// The construction points.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The capability table.
    #[must_use]
    pub fn hooks(&self) -> &ComponentHooks {
        &self.hooks
    }

    /// The local property store.
    #[must_use]
    pub fn properties(&self) -> &PropertyStore {
        &self.properties
    }

    /// The attribute set.
    #[must_use]
    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    /// Mutable access to the attribute set (for node-local operations like
    /// selecting or editing bundles without propagation).
    pub fn attributes_mut(&mut self) -> &mut AttributeSet {
        &mut self.attributes
    }

    /// Mutable access to the local property store.
    pub fn properties_mut(&mut self) -> &mut PropertyStore {
        &mut self.properties
    }

    /// Set a local property value.
    pub fn put_property(&mut self, key: impl Into<String>, value: impl Into<PropValue>) {
        self.properties.put(key, value);
    }

    /// The local value for `key`, never consulting ancestors.
    #[must_use]
    pub fn local_property(&self, key: &str) -> Option<&PropValue> {
        self.properties.local(key)
    }

    /// Whether a local value for `key` exists.
    #[must_use]
    pub fn has_local_property(&self, key: &str) -> bool {
        self.properties.has_local(key)
    }

    /// Remove the local entry for `key`; rejected for locked keys.
    pub fn remove_property(&mut self, key: &str) -> bool {
        self.properties.remove(key)
    }

    /// The local coordinate system override, if any.
    #[must_use]
    pub fn local_coordinate_system(&self) -> Option<Arc<dyn CoordinateSystem>> {
        self.coords.clone()
    }

    /// Install the update hook fired after every `set_points`.
    pub fn set_update_hook(&mut self, hook: UpdateHook) {
        self.update_hook = Some(hook);
    }

    /// One-line description used by tree dumps.
    #[must_use]
    pub fn summary(&self) -> String {
        let id = self
            .local_property(keys::ID)
            .and_then(PropValue::as_str)
            .unwrap_or("");
        let tool = self
            .tool_type
            .as_deref()
            .map(|t| format!(" tool={t}"))
            .unwrap_or_default();
        if id.is_empty() {
            format!(
                "{} ({} points){tool}",
                self.component_type,
                self.points.len()
            )
        } else {
            format!(
                "{} #{id} ({} points){tool}",
                self.component_type,
                self.points.len()
            )
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("component_type", &self.component_type)
            .field("tool_type", &self.tool_type)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("points", &self.points)
            .field("has_update_hook", &self.update_hook.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_seeds_locked_defaults() {
        let node = Node::new("line", ComponentHooks::default(), &[]);
        assert_eq!(node.local_property(keys::ID).and_then(PropValue::as_str), Some(""));
        assert_eq!(
            node.local_property(keys::SELECTED).and_then(PropValue::as_bool),
            Some(false)
        );
        assert_eq!(
            node.local_property(keys::DRAWING).and_then(PropValue::as_bool),
            Some(false)
        );
        assert_eq!(
            node.local_property(keys::ENABLED).and_then(PropValue::as_bool),
            Some(true)
        );
        // Rendering keys are locked but not seeded, so they can inherit.
        assert!(!node.has_local_property(keys::COLOR));
        assert!(node.properties().is_locked(keys::COLOR));
    }

    #[test]
    fn test_component_type_fixed() {
        let node = Node::new("text", ComponentHooks::default(), &["text"]);
        assert_eq!(node.component_type(), "text");
        assert!(node.properties().is_locked("text"));
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Node::new("group", ComponentHooks::default(), &[]);
        let b = Node::new("group", ComponentHooks::default(), &[]);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_summary_with_id() {
        let mut node = Node::new("line", ComponentHooks::default(), &[]);
        node.put_property(keys::ID, "axis");
        assert_eq!(node.summary(), "line #axis (0 points)");
        node.set_tool_type("slider");
        assert!(node.summary().ends_with("tool=slider"));
    }
}
