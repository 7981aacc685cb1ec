//! Coordinate system capability: logical to physical point mapping.
//!
//! A node's effective coordinate system is its local override if set, else
//! the nearest ancestor's, else the process-wide default.

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::geometry::Point;

/// Maps logical (model) coordinates to physical (device) coordinates.
///
/// `unmap_point` is the inverse direction; pointer hit-testing maps device
/// positions back into the model space a component's geometry lives in.
pub trait CoordinateSystem: fmt::Debug + fmt::Display + Send + Sync {
    /// Map a logical point to a physical point.
    fn map_point(&self, logical: Point) -> Point;

    /// Map a physical point back to a logical point.
    fn unmap_point(&self, physical: Point) -> Point;

    /// Ratio of physical units per logical unit.
    fn zoom_ratio(&self) -> f32;
}

/// The identity mapping: logical and physical spaces coincide.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityMap;

impl CoordinateSystem for IdentityMap {
    fn map_point(&self, logical: Point) -> Point {
        logical
    }

    fn unmap_point(&self, physical: Point) -> Point {
        physical
    }

    fn zoom_ratio(&self) -> f32 {
        1.0
    }
}

impl fmt::Display for IdentityMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "identity")
    }
}

/// Uniform zoom plus pan offset: `physical = logical * zoom + pan`.
#[derive(Debug, Clone, Copy)]
pub struct ZoomPanMap {
    /// Physical units per logical unit (1.0 = 100%).
    pub zoom: f32,
    /// Horizontal pan offset in physical units.
    pub pan_x: f32,
    /// Vertical pan offset in physical units.
    pub pan_y: f32,
}

impl ZoomPanMap {
    /// Create a new zoom/pan mapping.
    #[must_use]
    pub fn new(zoom: f32, pan_x: f32, pan_y: f32) -> Self {
        Self { zoom, pan_x, pan_y }
    }
}

impl Default for ZoomPanMap {
    fn default() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }
}

impl CoordinateSystem for ZoomPanMap {
    fn map_point(&self, logical: Point) -> Point {
        Point::new(
            logical.x * self.zoom + self.pan_x,
            logical.y * self.zoom + self.pan_y,
        )
    }

    fn unmap_point(&self, physical: Point) -> Point {
        Point::new(
            (physical.x - self.pan_x) / self.zoom,
            (physical.y - self.pan_y) / self.zoom,
        )
    }

    fn zoom_ratio(&self) -> f32 {
        self.zoom
    }
}

impl fmt::Display for ZoomPanMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "zoom {} pan ({}, {})", self.zoom, self.pan_x, self.pan_y)
    }
}

/// The process-wide default coordinate system (identity), used when neither
/// a node nor any of its ancestors defines one.
#[must_use]
pub fn default_coordinate_system() -> Arc<dyn CoordinateSystem> {
    static DEFAULT: OnceLock<Arc<IdentityMap>> = OnceLock::new();
    DEFAULT.get_or_init(|| Arc::new(IdentityMap)).clone()
}
