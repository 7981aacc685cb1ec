//! Trace-only backend for headless debugging.

use easel_core::Scene;

use super::RenderBackend;
use crate::{BackendType, RenderResult};

/// Backend that paints nothing and only traces what it would paint.
#[derive(Debug, Default)]
pub struct NullBackend {
    width: u32,
    height: u32,
    rendered_nodes: usize,
}

impl NullBackend {
    /// Create a new null backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes visited by the last render pass.
    #[must_use]
    pub fn rendered_nodes(&self) -> usize {
        self.rendered_nodes
    }
}

impl RenderBackend for NullBackend {
    fn backend_type(&self) -> BackendType {
        BackendType::Null
    }

    fn render(&mut self, scene: &Scene) -> RenderResult<()> {
        tracing::trace!(
            "null render: {} nodes, surface {}x{}",
            scene.node_count(),
            self.width,
            self.height
        );
        self.rendered_nodes = 0;
        for root in scene.roots() {
            for id in scene.descendants(*root) {
                if let Ok(node) = scene.node(id) {
                    tracing::trace!("would render {}", node.summary());
                    self.rendered_nodes += 1;
                }
            }
        }
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) -> RenderResult<()> {
        self.width = width;
        self.height = height;
        tracing::debug!("null backend resized to {}x{}", width, height);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel_core::components;

    #[test]
    fn test_counts_visited_nodes() {
        let mut scene = Scene::new();
        let g = components::group(&mut scene, None).expect("group");
        components::line(&mut scene, Some(g)).expect("line");
        components::text(&mut scene, Some(g), "x").expect("text");
        let mut backend = NullBackend::new();
        backend.render(&scene).expect("should render");
        assert_eq!(backend.rendered_nodes(), 3);
        assert_eq!(backend.backend_type(), BackendType::Null);
    }
}
