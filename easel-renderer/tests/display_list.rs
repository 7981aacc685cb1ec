//! Integration tests: inherited styling and coordinate mapping must be
//! visible in the emitted draw commands.

use std::sync::Arc;

use easel_core::{components, keys, Point, Scene, ZoomPanMap};
use easel_renderer::{DisplayListBackend, DrawCommand, RenderBackend};

fn line_at(scene: &mut Scene, parent: Option<easel_core::NodeId>) -> easel_core::NodeId {
    let id = components::line(scene, parent).expect("should create line");
    scene
        .set_points(id, vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)])
        .expect("should set points");
    id
}

#[test]
fn test_group_color_reaches_commands() {
    let mut scene = Scene::new();
    let g = components::group(&mut scene, None).expect("group");
    let l = line_at(&mut scene, Some(g));
    scene
        .node_mut(g)
        .expect("group")
        .put_property(keys::COLOR, "#aa00aa");

    let mut backend = DisplayListBackend::default();
    backend.render(&scene).expect("should render");

    let polyline = backend
        .commands()
        .iter()
        .find_map(|c| match c {
            DrawCommand::Polyline { color, .. } => Some(color.clone()),
            _ => None,
        })
        .expect("should emit a polyline");
    assert_eq!(polyline, "#aa00aa");

    // A local override on the leaf shadows the group for the next pass.
    scene
        .node_mut(l)
        .expect("line")
        .put_property(keys::COLOR, "#00aa00");
    backend.render(&scene).expect("should render");
    assert!(backend.commands().iter().any(|c| matches!(
        c,
        DrawCommand::Polyline { color, .. } if color == "#00aa00"
    )));
}

#[test]
fn test_hidden_subtree_is_skipped() {
    let mut scene = Scene::new();
    let g = components::group(&mut scene, None).expect("group");
    line_at(&mut scene, Some(g));
    let visible = line_at(&mut scene, None);

    scene
        .node_mut(g)
        .expect("group")
        .put_property(keys::HIDDEN, true);

    let mut backend = DisplayListBackend::default();
    backend.render(&scene).expect("should render");

    let polylines = backend
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCommand::Polyline { .. }))
        .count();
    assert_eq!(polylines, 1, "only the unhidden line should be emitted");
    assert!(scene.get(visible).is_some());
}

#[test]
fn test_coordinate_mapping_applies_to_commands() {
    let mut scene = Scene::new();
    let l = line_at(&mut scene, None);
    scene
        .set_coordinate_system(l, Some(Arc::new(ZoomPanMap::new(2.0, 100.0, 0.0))))
        .expect("should set coords");

    let mut backend = DisplayListBackend::default();
    backend.render(&scene).expect("should render");

    match &backend.commands()[1] {
        DrawCommand::Polyline { points, width, .. } => {
            assert_eq!(points[0], Point::new(100.0, 0.0));
            assert_eq!(points[1], Point::new(120.0, 20.0));
            // Stroke width scales with the zoom ratio.
            assert!((width - 2.0).abs() < f32::EPSILON);
        }
        other => panic!("expected a polyline, got {other:?}"),
    }
}

#[test]
fn test_attribute_selection_changes_commands() {
    let mut scene = Scene::new();
    let r = components::rect(&mut scene, None).expect("rect");
    scene
        .set_points(r, vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)])
        .expect("should set points");
    scene.set_color(r, Some("default"), "#111111").expect("set");
    scene.set_filled(r, Some("default"), false).expect("set");
    scene.set_color(r, Some("alert"), "#ee0000").expect("set");
    scene.set_filled(r, Some("alert"), true).expect("set");
    scene.use_attributes(r, "default", false).expect("apply");

    let mut backend = DisplayListBackend::default();
    backend.render(&scene).expect("should render");
    assert!(backend.commands().iter().any(|c| matches!(
        c,
        DrawCommand::Rect { color, filled, .. } if color == "#111111" && !filled
    )));

    scene.use_attributes(r, "alert", false).expect("apply");
    backend.render(&scene).expect("should render");
    assert!(backend.commands().iter().any(|c| matches!(
        c,
        DrawCommand::Rect { color, filled, .. } if color == "#ee0000" && *filled
    )));
}

#[test]
fn test_text_size_resolves_through_inheritance() {
    let mut scene = Scene::new();
    let g = components::group(&mut scene, None).expect("group");
    let t = components::text(&mut scene, Some(g), "legend").expect("text");
    scene
        .set_points(t, vec![Point::new(5.0, 5.0)])
        .expect("should set points");
    scene
        .node_mut(g)
        .expect("group")
        .put_property(keys::SIZE, 24.0f32);

    let mut backend = DisplayListBackend::default();
    backend.render(&scene).expect("should render");
    assert!(backend.commands().iter().any(|c| matches!(
        c,
        DrawCommand::Text { content, size, .. }
            if content == "legend" && (size - 24.0).abs() < f32::EPSILON
    )));
}
