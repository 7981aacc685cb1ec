//! Routing of raw pointer events to interactive tool callbacks.
//!
//! Components become tools by binding a set of action handlers in a
//! [`ToolLayer`]. The layer hit-tests incoming events against the scene,
//! synthesizes enter/exit transitions from hover changes, and captures the
//! pressed component so drags keep flowing to it even when the pointer
//! leaves its geometry.

use std::collections::HashMap;

use crate::event::{PointerEvent, PointerKind};
use crate::node::NodeId;
use crate::scene::Scene;

/// A tool action callback. Invoked for side effects only.
pub type ToolHandler = Box<dyn FnMut(&mut Scene, NodeId, &PointerEvent)>;

/// One optional handler per recognized action slot.
#[derive(Default)]
pub struct ToolHandlers {
    /// Pointer dragged while pressed on the component.
    pub drag: Option<ToolHandler>,
    /// Pointer moved over the component.
    pub moved: Option<ToolHandler>,
    /// Pointer entered the component.
    pub enter: Option<ToolHandler>,
    /// Pointer left the component.
    pub exit: Option<ToolHandler>,
    /// Button pressed on the component.
    pub press: Option<ToolHandler>,
    /// Button released after a press on the component.
    pub release: Option<ToolHandler>,
    /// Click completed on the component.
    pub click: Option<ToolHandler>,
}

impl ToolHandlers {
    /// Create an empty handler set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the drag handler.
    #[must_use]
    pub fn on_drag(mut self, f: impl FnMut(&mut Scene, NodeId, &PointerEvent) + 'static) -> Self {
        self.drag = Some(Box::new(f));
        self
    }

    /// Set the move handler.
    #[must_use]
    pub fn on_move(mut self, f: impl FnMut(&mut Scene, NodeId, &PointerEvent) + 'static) -> Self {
        self.moved = Some(Box::new(f));
        self
    }

    /// Set the enter handler.
    #[must_use]
    pub fn on_enter(mut self, f: impl FnMut(&mut Scene, NodeId, &PointerEvent) + 'static) -> Self {
        self.enter = Some(Box::new(f));
        self
    }

    /// Set the exit handler.
    #[must_use]
    pub fn on_exit(mut self, f: impl FnMut(&mut Scene, NodeId, &PointerEvent) + 'static) -> Self {
        self.exit = Some(Box::new(f));
        self
    }

    /// Set the press handler.
    #[must_use]
    pub fn on_press(mut self, f: impl FnMut(&mut Scene, NodeId, &PointerEvent) + 'static) -> Self {
        self.press = Some(Box::new(f));
        self
    }

    /// Set the release handler.
    #[must_use]
    pub fn on_release(
        mut self,
        f: impl FnMut(&mut Scene, NodeId, &PointerEvent) + 'static,
    ) -> Self {
        self.release = Some(Box::new(f));
        self
    }

    /// Set the click handler.
    #[must_use]
    pub fn on_click(mut self, f: impl FnMut(&mut Scene, NodeId, &PointerEvent) + 'static) -> Self {
        self.click = Some(Box::new(f));
        self
    }
}

impl std::fmt::Debug for ToolHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolHandlers")
            .field("drag", &self.drag.is_some())
            .field("moved", &self.moved.is_some())
            .field("enter", &self.enter.is_some())
            .field("exit", &self.exit.is_some())
            .field("press", &self.press.is_some())
            .field("release", &self.release.is_some())
            .field("click", &self.click.is_some())
            .finish()
    }
}

/// Dispatches pointer events to bound components.
#[derive(Debug, Default)]
pub struct ToolLayer {
    bindings: HashMap<NodeId, ToolHandlers>,
    hovered: Option<NodeId>,
    pressed: Option<NodeId>,
}

impl ToolLayer {
    /// Create an empty layer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind (or replace) the handlers for a component.
    pub fn bind(&mut self, node: NodeId, handlers: ToolHandlers) {
        self.bindings.insert(node, handlers);
    }

    /// Remove a component's handlers.
    pub fn unbind(&mut self, node: NodeId) {
        self.bindings.remove(&node);
        if self.hovered == Some(node) {
            self.hovered = None;
        }
        if self.pressed == Some(node) {
            self.pressed = None;
        }
    }

    /// Whether a component has handlers bound.
    #[must_use]
    pub fn is_bound(&self, node: NodeId) -> bool {
        self.bindings.contains_key(&node)
    }

    /// The component currently under the pointer, if any.
    #[must_use]
    pub fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    /// The component captured by the last press, if any.
    #[must_use]
    pub fn pressed(&self) -> Option<NodeId> {
        self.pressed
    }

    /// Route a raw event into the scene.
    ///
    /// Move events update the hover state, synthesizing an exit on the
    /// previously hovered component and an enter on the new one before the
    /// move itself is delivered. Press captures the hit component; drag,
    /// release and click are delivered to the captured component so a fast
    /// pointer cannot escape mid-gesture. Events that hit nothing bound are
    /// dropped.
    pub fn dispatch(&mut self, scene: &mut Scene, event: &PointerEvent) {
        match event.kind {
            PointerKind::Move => {
                let hit = scene.node_at(event.position());
                if hit != self.hovered {
                    if let Some(old) = self.hovered {
                        self.fire(scene, old, &event.as_kind(PointerKind::Exit));
                    }
                    if let Some(new) = hit {
                        self.fire(scene, new, &event.as_kind(PointerKind::Enter));
                    }
                    self.hovered = hit;
                }
                if let Some(node) = hit {
                    self.fire(scene, node, event);
                }
            }
            PointerKind::Press => {
                let hit = scene.node_at(event.position());
                self.pressed = hit;
                if let Some(node) = hit {
                    self.fire(scene, node, event);
                }
            }
            PointerKind::Drag => {
                if let Some(node) = self.pressed {
                    self.fire(scene, node, event);
                }
            }
            PointerKind::Release => {
                if let Some(node) = self.pressed.take() {
                    self.fire(scene, node, event);
                }
            }
            PointerKind::Click => {
                let target = scene.node_at(event.position());
                if let Some(node) = target {
                    self.fire(scene, node, event);
                }
            }
            PointerKind::Enter | PointerKind::Exit => {
                // Already targeted; deliver to whatever is under the point.
                if let Some(node) = scene.node_at(event.position()) {
                    self.fire(scene, node, event);
                }
            }
        }
    }

    fn fire(&mut self, scene: &mut Scene, node: NodeId, event: &PointerEvent) {
        let Some(handlers) = self.bindings.get_mut(&node) else {
            tracing::debug!("pointer {:?} on unbound component {node}", event.kind);
            return;
        };
        let slot = match event.kind {
            PointerKind::Drag => handlers.drag.as_mut(),
            PointerKind::Move => handlers.moved.as_mut(),
            PointerKind::Enter => handlers.enter.as_mut(),
            PointerKind::Exit => handlers.exit.as_mut(),
            PointerKind::Press => handlers.press.as_mut(),
            PointerKind::Release => handlers.release.as_mut(),
            PointerKind::Click => handlers.click.as_mut(),
        };
        if let Some(handler) = slot {
            tracing::debug!("pointer {:?} on component {node}", event.kind);
            handler(scene, node, event);
        }
    }
}
