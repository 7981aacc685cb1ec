//! Per-component-type capability table for geometry dispatch.
//!
//! Component behavior (shape, bounds, hit test, distance, point
//! normalization, transforms, style normalization) is chosen at node
//! construction as a table of plain function pointers rather than through
//! subclassing. The generic defaults here suit any component whose geometry
//! is fully described by its construction points.

use crate::geometry::{Bounds, Point, Shape};
use crate::node::Node;

/// Normalizes raw points before storage (e.g. ordering rect corners).
pub type NormalizeFn = fn(Vec<Point>) -> Vec<Point>;
/// Produces the drawable shape for a node.
pub type ShapeFn = fn(&Node) -> Shape;
/// Computes the logical bounding box of a node.
pub type BoundsFn = fn(&Node) -> Bounds;
/// Tests whether a logical point hits the node.
pub type ContainsFn = fn(&Node, Point) -> bool;
/// Distance from a logical point to the node.
pub type DistanceFn = fn(&Node, Point) -> f32;
/// Applies a translation to the construction points.
pub type TranslateFn = fn(&mut Vec<Point>, f32, f32);
/// Applies a scale about a reference point to the construction points.
pub type ScaleFn = fn(&mut Vec<Point>, (f32, f32), Point);
/// Maps a raw style keyword to the stored style code.
pub type StyleFn = fn(&str) -> i32;

/// The capability table stored per node.
#[derive(Debug, Clone, Copy)]
pub struct ComponentHooks {
    /// Point normalization applied inside `set_points`.
    pub normalize: NormalizeFn,
    /// Shape dispatch.
    pub shape: ShapeFn,
    /// Bounds dispatch.
    pub bounds: BoundsFn,
    /// Hit-test dispatch.
    pub contains: ContainsFn,
    /// Distance dispatch.
    pub distance: DistanceFn,
    /// Translation; the default offsets every construction point.
    pub translate: TranslateFn,
    /// Scaling; the default scales every point about the reference point.
    pub scale: ScaleFn,
    /// Style keyword normalization.
    pub style: StyleFn,
}

impl Default for ComponentHooks {
    fn default() -> Self {
        Self {
            normalize: defaults::identity_normalize,
            shape: defaults::segments_shape,
            bounds: defaults::bounds_from_points,
            contains: defaults::contains_bounds,
            distance: defaults::distance_to_points,
            translate: defaults::translate_points,
            scale: defaults::scale_points,
            style: defaults::line_style,
        }
    }
}

/// Generic hook implementations usable by any component.
pub mod defaults {
    use super::{Bounds, Node, Point, Shape};

    /// Stores points unchanged.
    #[must_use]
    pub fn identity_normalize(points: Vec<Point>) -> Vec<Point> {
        points
    }

    /// Construction points as an open polyline.
    #[must_use]
    pub fn segments_shape(node: &Node) -> Shape {
        if node.points().is_empty() {
            Shape::Empty
        } else {
            Shape::Segments(node.points().to_vec())
        }
    }

    /// Tightest box around the construction points.
    #[must_use]
    pub fn bounds_from_points(node: &Node) -> Bounds {
        Bounds::from_points(node.points())
    }

    /// Hit when the point lies inside the node's bounds.
    #[must_use]
    pub fn contains_bounds(node: &Node, p: Point) -> bool {
        !node.points().is_empty() && (node.hooks().bounds)(node).contains(p)
    }

    /// Distance to the nearest construction point; infinite when there are
    /// no points.
    #[must_use]
    pub fn distance_to_points(node: &Node, p: Point) -> f32 {
        node.points()
            .iter()
            .map(|q| q.distance_to(p))
            .fold(f32::INFINITY, f32::min)
    }

    /// Offsets every construction point by `(dx, dy)`.
    pub fn translate_points(points: &mut Vec<Point>, dx: f32, dy: f32) {
        for p in points.iter_mut() {
            p.x += dx;
            p.y += dy;
        }
    }

    /// Scales every point about the reference point: `(x, y)` maps to
    /// `(x*sx + x0*(1-sx), y*sy + y0*(1-sy))`.
    pub fn scale_points(points: &mut Vec<Point>, (sx, sy): (f32, f32), reference: Point) {
        for p in points.iter_mut() {
            p.x = p.x * sx + reference.x * (1.0 - sx);
            p.y = p.y * sy + reference.y * (1.0 - sy);
        }
    }

    /// Line style keywords: `solid` (0), `dashed` (1), `dotted` (2).
    /// Unknown keywords fall back to solid.
    #[must_use]
    pub fn line_style(raw: &str) -> i32 {
        match raw {
            "dashed" => 1,
            "dotted" => 2,
            _ => 0,
        }
    }
}
