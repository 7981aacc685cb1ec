//! The scene: an arena-owned component tree.
//!
//! All nodes live in one [`Scene`] and refer to each other by [`NodeId`]
//! handles, so reparenting can maintain both halves of the parent/child
//! relation in a single place. Ancestor-dependent behavior (property
//! inheritance, coordinate-system resolution, attribute propagation) is
//! implemented here as explicit parent-handle walks bounded by tree depth.

use std::collections::{BTreeSet, HashMap};
use std::fmt::{self, Write as _};
use std::sync::Arc;

use thiserror::Error;

use crate::coords::{default_coordinate_system, CoordinateSystem};
use crate::geometry::{Bounds, Point, Shape};
use crate::hooks::ComponentHooks;
use crate::node::{Node, NodeId};
use crate::properties::{keys, PropValue};

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Errors that can occur in scene operations.
///
/// Only arena-level misuse is an error; per the graceful-degradation policy,
/// missing properties resolve through inheritance and defaults, and rejected
/// removals report through the warning channel instead.
#[derive(Debug, Error)]
pub enum SceneError {
    /// The handle does not refer to a node in this scene.
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    /// Reparenting would place a node inside its own subtree.
    #[error("reparenting {child} under {parent} would create a cycle")]
    WouldCycle {
        /// The node being reparented.
        child: NodeId,
        /// The requested new parent.
        parent: NodeId,
    },
}

/// A rooted, mutable, acyclic tree of drawable components.
pub struct Scene {
    nodes: HashMap<NodeId, Node>,
    roots: Vec<NodeId>,
    default_coords: Arc<dyn CoordinateSystem>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene using the process-wide default coordinate
    /// system.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            roots: Vec::new(),
            default_coords: default_coordinate_system(),
        }
    }

    /// Number of nodes in the scene.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Handles of the root-level nodes, in creation/attach order.
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Get a node by handle.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Get a mutable node by handle.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Get a node by handle, failing on unknown handles.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if the node is not in this scene.
    pub fn node(&self, id: NodeId) -> SceneResult<&Node> {
        self.nodes.get(&id).ok_or(SceneError::NodeNotFound(id))
    }

    /// Get a mutable node by handle, failing on unknown handles.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if the node is not in this scene.
    pub fn node_mut(&mut self, id: NodeId) -> SceneResult<&mut Node> {
        self.nodes.get_mut(&id).ok_or(SceneError::NodeNotFound(id))
    }

    // ------------------------------------------------------------------
    // Creation and tree structure
    // ------------------------------------------------------------------

    /// Create a node: the single factory for all components.
    ///
    /// The node starts with the locked default property set, the given
    /// capability table, and its locked-key set extended by `extra_locked`.
    /// It is registered under `parent`, or as a root when `parent` is
    /// `None`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if `parent` is not in this
    /// scene.
    pub fn create_node(
        &mut self,
        component_type: &str,
        parent: Option<NodeId>,
        hooks: ComponentHooks,
        extra_locked: &[&str],
    ) -> SceneResult<NodeId> {
        if let Some(p) = parent {
            if !self.nodes.contains_key(&p) {
                return Err(SceneError::NodeNotFound(p));
            }
        }
        let mut node = Node::new(component_type, hooks, extra_locked);
        node.parent = parent;
        let id = node.id();
        self.nodes.insert(id, node);
        match parent {
            Some(p) => self.add_child(p, id),
            None => self.roots.push(id),
        }
        Ok(id)
    }

    /// Move `child` under `new_parent` (or to the root level for `None`).
    ///
    /// Both halves of the relation are updated here: the child is removed
    /// from its previous parent's children (or the root list) and appended
    /// to the new parent's, so a node is never registered twice. Calling
    /// with the current parent is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] for unknown handles and
    /// [`SceneError::WouldCycle`] when `new_parent` lies inside `child`'s
    /// own subtree.
    pub fn set_parent(&mut self, child: NodeId, new_parent: Option<NodeId>) -> SceneResult<()> {
        let current = self.node(child)?.parent();
        if let Some(p) = new_parent {
            if !self.nodes.contains_key(&p) {
                return Err(SceneError::NodeNotFound(p));
            }
            if p == child || self.ancestors(p).any(|a| a == child) {
                return Err(SceneError::WouldCycle { child, parent: p });
            }
        }
        if current == new_parent {
            return Ok(());
        }
        self.detach(child, current);
        if let Some(p) = new_parent {
            self.add_child(p, child);
        } else {
            self.roots.push(child);
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = new_parent;
        }
        Ok(())
    }

    /// Append `child` to `parent`'s children unless already present.
    ///
    /// Private on purpose: callers go through `create_node`/`set_parent`,
    /// which keep the back-reference consistent.
    fn add_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.nodes.get_mut(&parent) {
            if !node.children.contains(&child) {
                node.children.push(child);
            }
        }
    }

    /// Remove `child` from its previous registration point.
    fn detach(&mut self, child: NodeId, previous_parent: Option<NodeId>) {
        match previous_parent {
            Some(p) => {
                if let Some(node) = self.nodes.get_mut(&p) {
                    node.children.retain(|c| *c != child);
                }
            }
            None => self.roots.retain(|r| *r != child),
        }
    }

    /// Detach and return all of `parent`'s children.
    ///
    /// Each removed child gets a `None` parent and is promoted to a root:
    /// its own subtree stays intact but is no longer reachable from the
    /// original tree.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if `parent` is unknown.
    pub fn remove_children(&mut self, parent: NodeId) -> SceneResult<Vec<NodeId>> {
        self.remove_children_where(parent, |_| true)
    }

    /// Detach and return the children of `parent` matching `predicate`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if `parent` is unknown.
    pub fn remove_children_where(
        &mut self,
        parent: NodeId,
        predicate: impl Fn(&Node) -> bool,
    ) -> SceneResult<Vec<NodeId>> {
        let parent_node = self.node(parent)?;
        let removed: Vec<NodeId> = parent_node
            .children()
            .iter()
            .copied()
            .filter(|cid| self.nodes.get(cid).is_some_and(&predicate))
            .collect();
        for cid in &removed {
            if let Some(child) = self.nodes.get_mut(cid) {
                child.parent = None;
            }
            self.roots.push(*cid);
        }
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.retain(|c| !removed.contains(c));
        }
        Ok(removed)
    }

    /// Remove a node and its whole subtree from the scene, returning the
    /// number of nodes removed.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if `id` is unknown.
    pub fn remove_subtree(&mut self, id: NodeId) -> SceneResult<usize> {
        let parent = self.node(id)?.parent();
        self.detach(id, parent);
        let ids = self.descendants(id);
        for nid in &ids {
            self.nodes.remove(nid);
        }
        Ok(ids.len())
    }

    /// The child handles of `parent`, in order. Empty for unknown handles.
    #[must_use]
    pub fn children(&self, parent: NodeId) -> Vec<NodeId> {
        self.get(parent)
            .map(|n| n.children().to_vec())
            .unwrap_or_default()
    }

    /// The children of `parent` matching `predicate`, in order.
    #[must_use]
    pub fn children_where(
        &self,
        parent: NodeId,
        predicate: impl Fn(&Node) -> bool,
    ) -> Vec<NodeId> {
        self.get(parent)
            .map(|n| {
                n.children()
                    .iter()
                    .copied()
                    .filter(|cid| self.nodes.get(cid).is_some_and(&predicate))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The children of `parent` whose local `id` property equals `child_id`.
    #[must_use]
    pub fn children_by_id(&self, parent: NodeId, child_id: &str) -> Vec<NodeId> {
        self.children_where(parent, |n| {
            n.local_property(keys::ID).and_then(PropValue::as_str) == Some(child_id)
        })
    }

    /// Walk from `id`'s parent up to the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let first = self.get(id).and_then(Node::parent);
        std::iter::successors(first, move |&p| self.get(p).and_then(Node::parent))
    }

    /// Depth-first handles of `id`'s subtree, the node itself first.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            if let Some(node) = self.nodes.get(&cur) {
                out.push(cur);
                stack.extend(node.children().iter().rev().copied());
            }
        }
        out
    }

    // ------------------------------------------------------------------
    // Property inheritance
    // ------------------------------------------------------------------

    /// Resolve `key` on `id`: local value wins, else the nearest ancestor's,
    /// else `None`. Terminates at the root.
    #[must_use]
    pub fn resolve_property(&self, id: NodeId, key: &str) -> Option<PropValue> {
        let mut cur = Some(id);
        while let Some(c) = cur {
            let node = self.nodes.get(&c)?;
            if let Some(v) = node.local_property(key) {
                return Some(v.clone());
            }
            cur = node.parent();
        }
        None
    }

    /// Resolve `key` on `id`, falling back to `default` when no node on the
    /// ancestor chain defines it.
    #[must_use]
    pub fn get_property(&self, id: NodeId, key: &str, default: impl Into<PropValue>) -> PropValue {
        self.resolve_property(id, key)
            .unwrap_or_else(|| default.into())
    }

    /// Sorted keys visible on `id`: local keys only, or the duplicate-free
    /// union over the whole ancestor chain.
    #[must_use]
    pub fn property_keys(&self, id: NodeId, local_only: bool) -> Vec<String> {
        if local_only {
            return self
                .get(id)
                .map(|n| n.properties().local_keys())
                .unwrap_or_default();
        }
        let mut set = BTreeSet::new();
        let mut cur = Some(id);
        while let Some(c) = cur {
            let Some(node) = self.nodes.get(&c) else { break };
            set.extend(node.properties().local_keys());
            cur = node.parent();
        }
        set.into_iter().collect()
    }

    /// Membership test over the key sets of [`Scene::property_keys`].
    #[must_use]
    pub fn has_property(&self, id: NodeId, key: &str, local_only: bool) -> bool {
        if local_only {
            self.get(id).is_some_and(|n| n.has_local_property(key))
        } else {
            self.resolve_property(id, key).is_some()
        }
    }

    fn flag(&self, id: NodeId, key: &str, default: bool) -> bool {
        self.get_property(id, key, default)
            .as_bool()
            .unwrap_or(default)
    }

    // ------------------------------------------------------------------
    // Coordinate systems
    // ------------------------------------------------------------------

    /// The coordinate system in effect for `id`: the local override if set,
    /// else the nearest ancestor's, else the scene default.
    #[must_use]
    pub fn coordinate_system(&self, id: NodeId) -> Arc<dyn CoordinateSystem> {
        if let Some(node) = self.get(id) {
            if let Some(c) = node.local_coordinate_system() {
                return c;
            }
            for anc in self.ancestors(id) {
                if let Some(c) = self.get(anc).and_then(Node::local_coordinate_system) {
                    return c;
                }
            }
        }
        self.default_coords.clone()
    }

    /// Set or clear `id`'s local coordinate-system override.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if `id` is unknown.
    pub fn set_coordinate_system(
        &mut self,
        id: NodeId,
        coords: Option<Arc<dyn CoordinateSystem>>,
    ) -> SceneResult<()> {
        self.node_mut(id)?.coords = coords;
        Ok(())
    }

    /// Replace the scene-level default coordinate system.
    pub fn set_default_coordinate_system(&mut self, coords: Arc<dyn CoordinateSystem>) {
        self.default_coords = coords;
    }

    // ------------------------------------------------------------------
    // Geometry dispatch
    // ------------------------------------------------------------------

    /// The construction points of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if `id` is unknown.
    pub fn points(&self, id: NodeId) -> SceneResult<&[Point]> {
        Ok(self.node(id)?.points())
    }

    /// Replace `id`'s construction points.
    ///
    /// The raw points pass through the component's normalization hook before
    /// storage; afterwards the node's update hook (if installed) fires with
    /// the scene mutable again.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if `id` is unknown.
    pub fn set_points(&mut self, id: NodeId, points: Vec<Point>) -> SceneResult<()> {
        let node = self.node_mut(id)?;
        node.points = (node.hooks.normalize)(points);
        // The hook gets the scene back, so it is taken out for the call.
        if let Some(mut hook) = self.nodes.get_mut(&id).and_then(|n| n.update_hook.take()) {
            hook(self, id);
            if let Some(node) = self.nodes.get_mut(&id) {
                if node.update_hook.is_none() {
                    node.update_hook = Some(hook);
                }
            }
        }
        Ok(())
    }

    /// The drawable shape of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if `id` is unknown.
    pub fn shape(&self, id: NodeId) -> SceneResult<Shape> {
        let node = self.node(id)?;
        Ok((node.hooks.shape)(node))
    }

    /// The logical bounds of `id` (its own geometry only).
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if `id` is unknown.
    pub fn bounds(&self, id: NodeId) -> SceneResult<Bounds> {
        let node = self.node(id)?;
        Ok((node.hooks.bounds)(node))
    }

    /// The union of the logical bounds over `id`'s whole subtree, skipping
    /// nodes without geometry. This is the useful notion of bounds for
    /// groups.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if `id` is unknown.
    pub fn subtree_bounds(&self, id: NodeId) -> SceneResult<Bounds> {
        self.node(id)?;
        let mut acc: Option<Bounds> = None;
        for nid in self.descendants(id) {
            let Some(node) = self.get(nid) else { continue };
            if node.points().is_empty() {
                continue;
            }
            let b = (node.hooks.bounds)(node);
            acc = Some(acc.map_or(b, |a| a.union(b)));
        }
        Ok(acc.unwrap_or_default())
    }

    /// The physical bounds of `id`: every logical bounds corner mapped
    /// through the node's resolved coordinate system.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if `id` is unknown.
    pub fn physical_bounds(&self, id: NodeId) -> SceneResult<Bounds> {
        let logical = self.bounds(id)?;
        let coords = self.coordinate_system(id);
        let mapped: Vec<Point> = logical
            .corners()
            .iter()
            .map(|p| coords.map_point(*p))
            .collect();
        Ok(Bounds::from_points(&mapped))
    }

    /// Whether the logical point hits `id`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if `id` is unknown.
    pub fn contains(&self, id: NodeId, logical: Point) -> SceneResult<bool> {
        let node = self.node(id)?;
        Ok((node.hooks.contains)(node, logical))
    }

    /// Distance from the logical point to `id`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if `id` is unknown.
    pub fn distance(&self, id: NodeId, logical: Point) -> SceneResult<f32> {
        let node = self.node(id)?;
        Ok((node.hooks.distance)(node, logical))
    }

    /// Translate `id`'s geometry by `(dx, dy)` through its translation hook.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if `id` is unknown.
    pub fn translate(&mut self, id: NodeId, dx: f32, dy: f32) -> SceneResult<()> {
        let node = self.node(id)?;
        let mut pts = node.points().to_vec();
        (node.hooks.translate)(&mut pts, dx, dy);
        self.set_points(id, pts)
    }

    /// Scale `id`'s geometry by `factors` about `reference` through its
    /// scale hook.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if `id` is unknown.
    pub fn scale(&mut self, id: NodeId, factors: (f32, f32), reference: Point) -> SceneResult<()> {
        let node = self.node(id)?;
        let mut pts = node.points().to_vec();
        (node.hooks.scale)(&mut pts, factors, reference);
        self.set_points(id, pts)
    }

    /// Translate `id` and every descendant.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if `id` is unknown.
    pub fn translate_subtree(&mut self, id: NodeId, dx: f32, dy: f32) -> SceneResult<()> {
        self.node(id)?;
        for nid in self.descendants(id) {
            self.translate(nid, dx, dy)?;
        }
        Ok(())
    }

    /// Scale `id` and every descendant about the same reference point.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if `id` is unknown.
    pub fn scale_subtree(
        &mut self,
        id: NodeId,
        factors: (f32, f32),
        reference: Point,
    ) -> SceneResult<()> {
        self.node(id)?;
        for nid in self.descendants(id) {
            self.scale(nid, factors, reference)?;
        }
        Ok(())
    }

    /// Find the topmost node at the given physical point.
    ///
    /// The point is mapped into each candidate's logical space through its
    /// resolved coordinate system before the hit test. Subtrees whose
    /// resolved `hidden` is true are skipped entirely; nodes whose resolved
    /// `enabled` is false are skipped individually. Among hits, the last in
    /// document order (later siblings, deeper nodes) wins.
    #[must_use]
    pub fn node_at(&self, physical: Point) -> Option<NodeId> {
        let mut best = None;
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(&id) else {
                continue;
            };
            if self.flag(id, keys::HIDDEN, false) {
                continue;
            }
            if self.flag(id, keys::ENABLED, true) {
                let logical = self.coordinate_system(id).unmap_point(physical);
                if (node.hooks.contains)(node, logical) {
                    best = Some(id);
                }
            }
            stack.extend(node.children().iter().rev().copied());
        }
        best
    }

    // ------------------------------------------------------------------
    // Attribute selection and propagation
    // ------------------------------------------------------------------

    /// Copy the present fields of the node's local bundle `attr` into its
    /// local properties, making the selection visible through the
    /// property-inheritance path. Nodes without a local bundle of that name
    /// are left untouched.
    fn apply_bundle_local(node: &mut Node, attr: &str) {
        let Some(bundle) = node.attributes.bundle(attr).cloned() else {
            return;
        };
        node.attributes.use_id(attr);
        if let Some(color) = bundle.color {
            node.properties.put(keys::COLOR, color);
        }
        if let Some(style) = bundle.style {
            node.properties.put(keys::STYLE, style);
        }
        if let Some(width) = bundle.width {
            node.properties.put(keys::WIDTH, width);
        }
        if let Some(size) = bundle.size {
            node.properties.put(keys::SIZE, size);
        }
        if let Some(filled) = bundle.filled {
            node.properties.put(keys::FILLED, filled);
        }
        if let Some(hidden) = bundle.hidden {
            node.properties.put(keys::HIDDEN, hidden);
        }
    }

    /// Select attribute bundle `attr` on `id` and, when `propagate` is true,
    /// on its whole subtree.
    ///
    /// Each node resolves its own bundle of that name; nodes for which the
    /// id is undefined are silently skipped while propagation continues into
    /// their children. Propagation is synchronous and depth-first.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if `id` is unknown.
    pub fn use_attributes(&mut self, id: NodeId, attr: &str, propagate: bool) -> SceneResult<()> {
        self.node(id)?;
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(&cur) {
                Self::apply_bundle_local(node, attr);
                if propagate {
                    stack.extend(node.children().iter().rev().copied());
                }
            }
        }
        Ok(())
    }

    /// Temporarily select bundle `attr` on `id`'s whole subtree.
    ///
    /// Every node pushes its current id onto its own history first, so the
    /// override is exactly reversible per node even when nested.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if `id` is unknown.
    pub fn use_temp_attributes(&mut self, id: NodeId, attr: &str) -> SceneResult<()> {
        self.node(id)?;
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(&cur) {
                node.attributes.push_history();
                Self::apply_bundle_local(node, attr);
                stack.extend(node.children().iter().rev().copied());
            }
        }
        Ok(())
    }

    /// Undo the most recent temporary override on `id`'s whole subtree.
    ///
    /// Each node pops its own history and re-applies the popped id; the
    /// current id is restored even when no bundle of that name exists (the
    /// history records what was actually current). Nodes with an empty
    /// history are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if `id` is unknown.
    pub fn restore_attributes(&mut self, id: NodeId) -> SceneResult<()> {
        self.node(id)?;
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(&cur) {
                if let Some(prev) = node.attributes.pop_history() {
                    Self::apply_bundle_local(node, &prev);
                    node.attributes.set_current_id(&prev);
                }
                stack.extend(node.children().iter().rev().copied());
            }
        }
        Ok(())
    }

    /// Delete `id`'s locally owned bundle `attr`.
    ///
    /// Returns `false` (after warning) when the node does not locally own a
    /// bundle of that name.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if `id` is unknown.
    pub fn remove_attributes(&mut self, id: NodeId, attr: &str) -> SceneResult<bool> {
        Ok(self.node_mut(id)?.attributes.remove(attr))
    }

    fn bundle_target(node: &Node, bundle: Option<&str>) -> String {
        bundle.unwrap_or(node.attributes.current_id()).to_string()
    }

    /// Set the color of a bundle: the named one (created if absent) or the
    /// current one for `None`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if `id` is unknown.
    pub fn set_color(&mut self, id: NodeId, bundle: Option<&str>, color: &str) -> SceneResult<()> {
        let node = self.node_mut(id)?;
        let target = Self::bundle_target(node, bundle);
        node.attributes.bundle_mut(&target).color = Some(color.to_string());
        Ok(())
    }

    /// Set the style of a bundle from a raw keyword, normalized through the
    /// component's style hook.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if `id` is unknown.
    pub fn set_style(&mut self, id: NodeId, bundle: Option<&str>, raw: &str) -> SceneResult<()> {
        let node = self.node_mut(id)?;
        let code = (node.hooks.style)(raw);
        let target = Self::bundle_target(node, bundle);
        node.attributes.bundle_mut(&target).style = Some(code);
        Ok(())
    }

    /// Set the stroke width of a bundle.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if `id` is unknown.
    pub fn set_width(&mut self, id: NodeId, bundle: Option<&str>, width: f32) -> SceneResult<()> {
        let node = self.node_mut(id)?;
        let target = Self::bundle_target(node, bundle);
        node.attributes.bundle_mut(&target).width = Some(width);
        Ok(())
    }

    /// Set the size of a bundle.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if `id` is unknown.
    pub fn set_size(&mut self, id: NodeId, bundle: Option<&str>, size: f32) -> SceneResult<()> {
        let node = self.node_mut(id)?;
        let target = Self::bundle_target(node, bundle);
        node.attributes.bundle_mut(&target).size = Some(size);
        Ok(())
    }

    /// Set the filled flag of a bundle.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if `id` is unknown.
    pub fn set_filled(&mut self, id: NodeId, bundle: Option<&str>, filled: bool) -> SceneResult<()> {
        let node = self.node_mut(id)?;
        let target = Self::bundle_target(node, bundle);
        node.attributes.bundle_mut(&target).filled = Some(filled);
        Ok(())
    }

    /// Set the hidden flag of a bundle.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if `id` is unknown.
    pub fn set_hidden(&mut self, id: NodeId, bundle: Option<&str>, hidden: bool) -> SceneResult<()> {
        let node = self.node_mut(id)?;
        let target = Self::bundle_target(node, bundle);
        node.attributes.bundle_mut(&target).hidden = Some(hidden);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    /// Indented text dump of `id`'s subtree.
    ///
    /// Verbosity 0 prints one line per node; 1 adds the current attribute
    /// id, bundle names and local property keys; 2 adds full local property
    /// values and the resolved coordinate system.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if `id` is unknown.
    pub fn tree(&self, id: NodeId, verbosity: u8) -> SceneResult<String> {
        self.node(id)?;
        let mut out = String::new();
        self.write_tree(id, verbosity, 0, &mut out);
        Ok(out)
    }

    /// Full dump of `id`'s subtree (verbosity 2).
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if `id` is unknown.
    pub fn dump(&self, id: NodeId) -> SceneResult<String> {
        self.tree(id, 2)
    }

    fn write_tree(&self, id: NodeId, verbosity: u8, depth: usize, out: &mut String) {
        let Some(node) = self.get(id) else { return };
        let indent = "  ".repeat(depth);
        let _ = write!(out, "{indent}{}", node.summary());
        if verbosity >= 1 {
            let _ = write!(
                out,
                " attrs={}{:?} props={:?}",
                node.attributes().current_id(),
                node.attributes().bundle_ids(),
                node.properties().local_keys()
            );
        }
        let _ = writeln!(out);
        if verbosity >= 2 {
            for key in node.properties().local_keys() {
                if let Some(value) = node.local_property(&key) {
                    let _ = writeln!(out, "{indent}    {key} = {value}");
                }
            }
            let _ = writeln!(out, "{indent}    coords = {}", self.coordinate_system(id));
        }
        for child in node.children() {
            self.write_tree(*child, verbosity, depth + 1, out);
        }
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "scene ({} nodes)", self.node_count())?;
        for root in &self.roots {
            if let Ok(subtree) = self.tree(*root, 0) {
                write!(f, "{subtree}")?;
            }
        }
        Ok(())
    }
}
