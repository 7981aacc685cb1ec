//! Built-in component constructors.
//!
//! Each constructor pairs a component type tag with its capability table and
//! goes through the single [`Scene::create_node`] factory. Consumers building
//! richer tools can reuse the `*_hooks` tables or assemble their own.

use crate::geometry::{distance_to_segment, Bounds, Point, Shape};
use crate::hooks::ComponentHooks;
use crate::node::{Node, NodeId};
use crate::properties::{keys, PropValue};
use crate::scene::{Scene, SceneResult};

/// Extra slop added to stroke hit tests, in logical units.
const HIT_TOLERANCE: f32 = 2.0;

fn local_float(node: &Node, key: &str, default: f32) -> f32 {
    node.local_property(key)
        .and_then(PropValue::as_float)
        .unwrap_or(default)
}

// ------------------------------------------------------------------
// group
// ------------------------------------------------------------------

fn group_shape(_node: &Node) -> Shape {
    Shape::Empty
}

fn group_contains(_node: &Node, _p: Point) -> bool {
    // Groups are never hit directly; their children are.
    false
}

fn group_distance(_node: &Node, _p: Point) -> f32 {
    f32::INFINITY
}

/// Capability table for group containers.
#[must_use]
pub fn group_hooks() -> ComponentHooks {
    ComponentHooks {
        shape: group_shape,
        contains: group_contains,
        distance: group_distance,
        ..ComponentHooks::default()
    }
}

/// Create a group container under `parent`.
///
/// # Errors
///
/// Returns an error if `parent` is not in the scene.
pub fn group(scene: &mut Scene, parent: Option<NodeId>) -> SceneResult<NodeId> {
    scene.create_node("group", parent, group_hooks(), &[])
}

// ------------------------------------------------------------------
// line
// ------------------------------------------------------------------

fn segment_distance(points: &[Point], p: Point, closed: bool) -> f32 {
    if points.len() < 2 {
        return points
            .first()
            .map_or(f32::INFINITY, |q| q.distance_to(p));
    }
    let mut best = points
        .windows(2)
        .map(|w| distance_to_segment(p, w[0], w[1]))
        .fold(f32::INFINITY, f32::min);
    if closed {
        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            best = best.min(distance_to_segment(p, *last, *first));
        }
    }
    best
}

fn line_contains(node: &Node, p: Point) -> bool {
    let tolerance = local_float(node, keys::WIDTH, 1.0) / 2.0 + HIT_TOLERANCE;
    segment_distance(node.points(), p, false) <= tolerance
}

fn line_distance(node: &Node, p: Point) -> f32 {
    segment_distance(node.points(), p, false)
}

/// Capability table for polylines.
#[must_use]
pub fn line_hooks() -> ComponentHooks {
    ComponentHooks {
        contains: line_contains,
        distance: line_distance,
        ..ComponentHooks::default()
    }
}

/// Create a polyline under `parent`.
///
/// # Errors
///
/// Returns an error if `parent` is not in the scene.
pub fn line(scene: &mut Scene, parent: Option<NodeId>) -> SceneResult<NodeId> {
    scene.create_node("line", parent, line_hooks(), &[])
}

// ------------------------------------------------------------------
// polygon
// ------------------------------------------------------------------

fn polygon_shape(node: &Node) -> Shape {
    if node.points().is_empty() {
        Shape::Empty
    } else {
        Shape::Polygon(node.points().to_vec())
    }
}

/// Even-odd ray cast.
fn point_in_polygon(points: &[Point], p: Point) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > p.y) != (b.y > p.y)
            && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn polygon_contains(node: &Node, p: Point) -> bool {
    point_in_polygon(node.points(), p)
        || segment_distance(node.points(), p, true)
            <= local_float(node, keys::WIDTH, 1.0) / 2.0 + HIT_TOLERANCE
}

fn polygon_distance(node: &Node, p: Point) -> f32 {
    if point_in_polygon(node.points(), p) {
        0.0
    } else {
        segment_distance(node.points(), p, true)
    }
}

/// Capability table for closed polygons.
#[must_use]
pub fn polygon_hooks() -> ComponentHooks {
    ComponentHooks {
        shape: polygon_shape,
        contains: polygon_contains,
        distance: polygon_distance,
        ..ComponentHooks::default()
    }
}

/// Create a closed polygon under `parent`.
///
/// # Errors
///
/// Returns an error if `parent` is not in the scene.
pub fn polygon(scene: &mut Scene, parent: Option<NodeId>) -> SceneResult<NodeId> {
    scene.create_node("polygon", parent, polygon_hooks(), &[])
}

// ------------------------------------------------------------------
// rect
// ------------------------------------------------------------------

/// Order two opposite corners into `[min, max]`.
fn rect_normalize(points: Vec<Point>) -> Vec<Point> {
    if points.len() < 2 {
        return points;
    }
    let bounds = Bounds::from_points(&points);
    vec![bounds.min, bounds.max]
}

fn rect_shape(node: &Node) -> Shape {
    if node.points().len() < 2 {
        Shape::Empty
    } else {
        Shape::Rect(Bounds::from_points(node.points()))
    }
}

fn rect_distance(node: &Node, p: Point) -> f32 {
    let points = node.points();
    if points.len() < 2 {
        return f32::INFINITY;
    }
    let bounds = Bounds::from_points(points);
    if bounds.contains(p) {
        return 0.0;
    }
    let corners = bounds.corners();
    segment_distance(&corners, p, true)
}

/// Capability table for rectangles (two opposite corner points).
#[must_use]
pub fn rect_hooks() -> ComponentHooks {
    ComponentHooks {
        normalize: rect_normalize,
        shape: rect_shape,
        distance: rect_distance,
        ..ComponentHooks::default()
    }
}

/// Create a rectangle under `parent`.
///
/// # Errors
///
/// Returns an error if `parent` is not in the scene.
pub fn rect(scene: &mut Scene, parent: Option<NodeId>) -> SceneResult<NodeId> {
    scene.create_node("rect", parent, rect_hooks(), &[])
}

// ------------------------------------------------------------------
// ellipse
// ------------------------------------------------------------------

fn ellipse_shape(node: &Node) -> Shape {
    if node.points().len() < 2 {
        Shape::Empty
    } else {
        Shape::Ellipse(Bounds::from_points(node.points()))
    }
}

fn ellipse_contains(node: &Node, p: Point) -> bool {
    let points = node.points();
    if points.len() < 2 {
        return false;
    }
    let bounds = Bounds::from_points(points);
    let center = bounds.center();
    let rx = bounds.width() / 2.0;
    let ry = bounds.height() / 2.0;
    if rx <= f32::EPSILON || ry <= f32::EPSILON {
        return false;
    }
    let nx = (p.x - center.x) / rx;
    let ny = (p.y - center.y) / ry;
    nx * nx + ny * ny <= 1.0
}

fn ellipse_distance(node: &Node, p: Point) -> f32 {
    let points = node.points();
    if points.len() < 2 {
        return f32::INFINITY;
    }
    if ellipse_contains(node, p) {
        return 0.0;
    }
    // Radial approximation: distance to the outline point in p's direction.
    let bounds = Bounds::from_points(points);
    let center = bounds.center();
    let rx = (bounds.width() / 2.0).max(f32::EPSILON);
    let ry = (bounds.height() / 2.0).max(f32::EPSILON);
    let angle = (p.y - center.y).atan2(p.x - center.x);
    let on_outline = Point::new(
        center.x + rx * angle.cos(),
        center.y + ry * angle.sin(),
    );
    p.distance_to(on_outline)
}

/// Capability table for ellipses (two opposite corner points of the box).
#[must_use]
pub fn ellipse_hooks() -> ComponentHooks {
    ComponentHooks {
        normalize: rect_normalize,
        shape: ellipse_shape,
        contains: ellipse_contains,
        distance: ellipse_distance,
        ..ComponentHooks::default()
    }
}

/// Create an ellipse under `parent`.
///
/// # Errors
///
/// Returns an error if `parent` is not in the scene.
pub fn ellipse(scene: &mut Scene, parent: Option<NodeId>) -> SceneResult<NodeId> {
    scene.create_node("ellipse", parent, ellipse_hooks(), &[])
}

// ------------------------------------------------------------------
// text
// ------------------------------------------------------------------

/// Estimated box of a text node: anchor point, content length and size.
fn text_box(node: &Node) -> Bounds {
    let Some(anchor) = node.points().first() else {
        return Bounds::default();
    };
    let size = local_float(node, keys::SIZE, 12.0);
    let content_len = node
        .local_property("text")
        .and_then(PropValue::as_str)
        .map_or(0, str::len);
    #[allow(clippy::cast_precision_loss)]
    let width = content_len as f32 * size * 0.6;
    Bounds::new(*anchor, Point::new(anchor.x + width, anchor.y + size))
}

fn text_shape(node: &Node) -> Shape {
    let Some(anchor) = node.points().first() else {
        return Shape::Empty;
    };
    let content = node
        .local_property("text")
        .and_then(PropValue::as_str)
        .unwrap_or("")
        .to_string();
    Shape::Label {
        origin: *anchor,
        content,
    }
}

fn text_bounds(node: &Node) -> Bounds {
    text_box(node)
}

fn text_contains(node: &Node, p: Point) -> bool {
    !node.points().is_empty() && text_box(node).contains(p)
}

fn text_distance(node: &Node, p: Point) -> f32 {
    if node.points().is_empty() {
        return f32::INFINITY;
    }
    if text_contains(node, p) {
        return 0.0;
    }
    segment_distance(&text_box(node).corners(), p, true)
}

/// Font style keywords: `plain` (0), `bold` (1), `italic` (2),
/// `bold-italic` (3). Unknown keywords fall back to plain.
#[must_use]
pub fn font_style(raw: &str) -> i32 {
    match raw {
        "bold" => 1,
        "italic" => 2,
        "bold-italic" => 3,
        _ => 0,
    }
}

/// Capability table for text labels (single anchor point).
#[must_use]
pub fn text_hooks() -> ComponentHooks {
    ComponentHooks {
        shape: text_shape,
        bounds: text_bounds,
        contains: text_contains,
        distance: text_distance,
        style: font_style,
        ..ComponentHooks::default()
    }
}

/// Create a text label under `parent` with the given content.
///
/// The `text` property is locked for text nodes: it must always be present.
///
/// # Errors
///
/// Returns an error if `parent` is not in the scene.
pub fn text(scene: &mut Scene, parent: Option<NodeId>, content: &str) -> SceneResult<NodeId> {
    let id = scene.create_node("text", parent, text_hooks(), &["text"])?;
    scene.node_mut(id)?.put_property("text", content);
    Ok(id)
}

// ------------------------------------------------------------------
// marker
// ------------------------------------------------------------------

fn marker_box(node: &Node) -> Bounds {
    let Some(center) = node.points().first() else {
        return Bounds::default();
    };
    let half = local_float(node, keys::SIZE, 6.0) / 2.0;
    Bounds::new(
        Point::new(center.x - half, center.y - half),
        Point::new(center.x + half, center.y + half),
    )
}

fn marker_shape(node: &Node) -> Shape {
    if node.points().is_empty() {
        Shape::Empty
    } else {
        Shape::Rect(marker_box(node))
    }
}

fn marker_bounds(node: &Node) -> Bounds {
    marker_box(node)
}

fn marker_contains(node: &Node, p: Point) -> bool {
    node.points()
        .first()
        .is_some_and(|center| center.distance_to(p) <= local_float(node, keys::SIZE, 6.0))
}

fn marker_distance(node: &Node, p: Point) -> f32 {
    node.points()
        .first()
        .map_or(f32::INFINITY, |center| center.distance_to(p))
}

/// Capability table for markers (a single draggable reference point).
#[must_use]
pub fn marker_hooks() -> ComponentHooks {
    ComponentHooks {
        shape: marker_shape,
        bounds: marker_bounds,
        contains: marker_contains,
        distance: marker_distance,
        ..ComponentHooks::default()
    }
}

/// Create a marker under `parent` at the given position.
///
/// # Errors
///
/// Returns an error if `parent` is not in the scene.
pub fn marker(scene: &mut Scene, parent: Option<NodeId>, at: Point) -> SceneResult<NodeId> {
    let id = scene.create_node("marker", parent, marker_hooks(), &[])?;
    scene.node_mut(id)?.set_tool_type("marker");
    scene.set_points(id, vec![at])?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_is_never_hit() {
        let mut scene = Scene::new();
        let g = group(&mut scene, None).expect("should create");
        assert!(!scene.contains(g, Point::new(0.0, 0.0)).expect("contains"));
        assert!(scene
            .distance(g, Point::new(0.0, 0.0))
            .expect("distance")
            .is_infinite());
    }

    #[test]
    fn test_line_hit_within_width() {
        let mut scene = Scene::new();
        let l = line(&mut scene, None).expect("should create");
        scene
            .set_points(l, vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)])
            .expect("should set points");
        assert!(scene.contains(l, Point::new(5.0, 1.0)).expect("contains"));
        assert!(!scene.contains(l, Point::new(5.0, 8.0)).expect("contains"));
        assert!(
            (scene.distance(l, Point::new(5.0, 3.0)).expect("distance") - 3.0).abs()
                < f32::EPSILON
        );
    }

    #[test]
    fn test_polygon_even_odd() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        assert!(point_in_polygon(&square, Point::new(5.0, 5.0)));
        assert!(!point_in_polygon(&square, Point::new(15.0, 5.0)));
        assert!(!point_in_polygon(&square[..2].to_vec(), Point::new(5.0, 5.0)));
    }

    #[test]
    fn test_rect_normalizes_corners() {
        let mut scene = Scene::new();
        let r = rect(&mut scene, None).expect("should create");
        scene
            .set_points(r, vec![Point::new(10.0, 10.0), Point::new(0.0, 0.0)])
            .expect("should set points");
        let points = scene.points(r).expect("points");
        assert_eq!(points[0], Point::new(0.0, 0.0));
        assert_eq!(points[1], Point::new(10.0, 10.0));
        assert!(matches!(
            scene.shape(r).expect("shape"),
            Shape::Rect(b) if b.max == Point::new(10.0, 10.0)
        ));
    }

    #[test]
    fn test_ellipse_contains() {
        let mut scene = Scene::new();
        let e = ellipse(&mut scene, None).expect("should create");
        scene
            .set_points(e, vec![Point::new(0.0, 0.0), Point::new(20.0, 10.0)])
            .expect("should set points");
        assert!(scene.contains(e, Point::new(10.0, 5.0)).expect("contains"));
        // Inside the box but outside the inscribed ellipse.
        assert!(!scene.contains(e, Point::new(0.5, 0.5)).expect("contains"));
    }

    #[test]
    fn test_text_shape_and_style() {
        let mut scene = Scene::new();
        let t = text(&mut scene, None, "hello").expect("should create");
        scene
            .set_points(t, vec![Point::new(5.0, 5.0)])
            .expect("should set points");
        assert!(matches!(
            scene.shape(t).expect("shape"),
            Shape::Label { content, .. } if content == "hello"
        ));
        scene.set_style(t, None, "bold").expect("should set style");
        assert_eq!(
            scene
                .node(t)
                .expect("node")
                .attributes()
                .bundle("default")
                .and_then(|b| b.style),
            Some(1)
        );
        // The text property is locked for text nodes.
        assert!(!scene.node_mut(t).expect("node").remove_property("text"));
    }

    #[test]
    fn test_marker_hit_radius() {
        let mut scene = Scene::new();
        let m = marker(&mut scene, None, Point::new(50.0, 50.0)).expect("should create");
        assert_eq!(scene.node(m).expect("node").tool_type(), Some("marker"));
        assert!(scene.contains(m, Point::new(53.0, 50.0)).expect("contains"));
        assert!(!scene.contains(m, Point::new(60.0, 50.0)).expect("contains"));
    }
}
