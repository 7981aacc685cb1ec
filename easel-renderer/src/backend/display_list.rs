//! Display-list backend: resolves a scene into retained draw commands.
//!
//! Each render pass walks the roots depth-first, skips subtrees whose
//! resolved `hidden` is true, resolves color/style/width/size/filled through
//! the property-inheritance path, maps every shape point through the node's
//! resolved coordinate system, and retains one [`DrawCommand`] per drawable
//! shape. Paint targets replay the list; tests assert on it.

use serde::{Deserialize, Serialize};

use easel_core::{keys, Bounds, CoordinateSystem, NodeId, Point, Scene, Shape};

use super::RenderBackend;
use crate::{BackendType, RenderResult, RendererConfig};

/// Fallback color when neither the node nor any ancestor defines one.
const DEFAULT_COLOR: &str = "#000000";

/// One resolved, physically mapped drawing operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Fill the surface with the background color.
    Clear {
        /// Background color as hex.
        color: String,
    },
    /// Stroke an open polyline.
    Polyline {
        /// Physical vertices.
        points: Vec<Point>,
        /// Stroke color as hex.
        color: String,
        /// Stroke width in physical units.
        width: f32,
        /// Normalized style code.
        style: i32,
    },
    /// Stroke or fill a closed polygon.
    Polygon {
        /// Physical vertices.
        points: Vec<Point>,
        /// Color as hex.
        color: String,
        /// Stroke width in physical units.
        width: f32,
        /// Normalized style code.
        style: i32,
        /// Whether to fill the interior.
        filled: bool,
    },
    /// Stroke or fill an axis-aligned rectangle.
    Rect {
        /// Physical bounds.
        bounds: Bounds,
        /// Color as hex.
        color: String,
        /// Stroke width in physical units.
        width: f32,
        /// Whether to fill the interior.
        filled: bool,
    },
    /// Stroke or fill an ellipse inscribed in the box.
    Ellipse {
        /// Physical bounds.
        bounds: Bounds,
        /// Color as hex.
        color: String,
        /// Stroke width in physical units.
        width: f32,
        /// Whether to fill the interior.
        filled: bool,
    },
    /// Draw a text label.
    Text {
        /// Physical anchor position.
        origin: Point,
        /// Text content.
        content: String,
        /// Color as hex.
        color: String,
        /// Font size in physical units.
        size: f32,
        /// Normalized font style code.
        style: i32,
    },
}

/// Backend that retains resolved draw commands.
#[derive(Debug)]
pub struct DisplayListBackend {
    config: RendererConfig,
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl DisplayListBackend {
    /// Create a backend with the given configuration.
    #[must_use]
    pub fn new(config: RendererConfig) -> Self {
        Self {
            config,
            width: 800,
            height: 600,
            commands: Vec::new(),
        }
    }

    /// The commands retained by the last render pass.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop the retained commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    fn render_node(&mut self, scene: &Scene, id: NodeId) -> RenderResult<()> {
        if scene
            .get_property(id, keys::HIDDEN, false)
            .as_bool()
            .unwrap_or(false)
        {
            tracing::trace!("skipping hidden subtree at {id}");
            return Ok(());
        }
        let shape = scene.shape(id)?;
        if !shape.is_empty() {
            let coords = scene.coordinate_system(id);
            if let Some(command) = Self::resolve_command(scene, id, shape, coords.as_ref()) {
                tracing::trace!("render {}", scene.node(id)?.summary());
                self.commands.push(command);
            }
        }
        for child in scene.children(id) {
            self.render_node(scene, child)?;
        }
        Ok(())
    }

    fn resolve_command(
        scene: &Scene,
        id: NodeId,
        shape: Shape,
        coords: &dyn CoordinateSystem,
    ) -> Option<DrawCommand> {
        let color = scene
            .get_property(id, keys::COLOR, DEFAULT_COLOR)
            .as_str()
            .unwrap_or(DEFAULT_COLOR)
            .to_string();
        let zoom = coords.zoom_ratio();
        let width = scene
            .get_property(id, keys::WIDTH, 1.0f32)
            .as_float()
            .unwrap_or(1.0)
            * zoom;
        let style = scene
            .get_property(id, keys::STYLE, 0)
            .as_int()
            .and_then(|s| i32::try_from(s).ok())
            .unwrap_or(0);
        let filled = scene
            .get_property(id, keys::FILLED, false)
            .as_bool()
            .unwrap_or(false);
        let map_all =
            |points: &[Point]| points.iter().map(|p| coords.map_point(*p)).collect::<Vec<_>>();
        let map_bounds =
            |bounds: Bounds| Bounds::from_points(&map_all(&bounds.corners()));

        match shape {
            Shape::Empty => None,
            Shape::Segments(points) => Some(DrawCommand::Polyline {
                points: map_all(&points),
                color,
                width,
                style,
            }),
            Shape::Polygon(points) => Some(DrawCommand::Polygon {
                points: map_all(&points),
                color,
                width,
                style,
                filled,
            }),
            Shape::Rect(bounds) => Some(DrawCommand::Rect {
                bounds: map_bounds(bounds),
                color,
                width,
                filled,
            }),
            Shape::Ellipse(bounds) => Some(DrawCommand::Ellipse {
                bounds: map_bounds(bounds),
                color,
                width,
                filled,
            }),
            Shape::Label { origin, content } => Some(DrawCommand::Text {
                origin: coords.map_point(origin),
                content,
                color,
                size: scene
                    .get_property(id, keys::SIZE, 12.0f32)
                    .as_float()
                    .unwrap_or(12.0)
                    * zoom,
                style,
            }),
        }
    }
}

impl Default for DisplayListBackend {
    fn default() -> Self {
        Self::new(RendererConfig::default())
    }
}

impl RenderBackend for DisplayListBackend {
    fn backend_type(&self) -> BackendType {
        BackendType::DisplayList
    }

    fn render(&mut self, scene: &Scene) -> RenderResult<()> {
        tracing::trace!(
            "display-list render: {} nodes, surface {}x{}",
            scene.node_count(),
            self.width,
            self.height
        );
        self.commands.clear();
        self.commands.push(DrawCommand::Clear {
            color: self.config.background_color.clone(),
        });
        for root in scene.roots() {
            self.render_node(scene, *root)?;
        }
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) -> RenderResult<()> {
        self.width = width;
        self.height = height;
        tracing::debug!("display list resized to {}x{}", width, height);
        Ok(())
    }
}
