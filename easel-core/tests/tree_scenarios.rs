//! End-to-end scenarios exercising the component tree, property
//! inheritance, attribute overrides and tool routing together.

use easel_core::{
    components, keys, Point, PointerEvent, PropValue, Scene, ToolHandlers, ToolLayer,
};

const RED: &str = "#ff0000";
const BLUE: &str = "#0000ff";
const YELLOW: &str = "#ffff00";

#[test]
fn test_unset_keys_resolve_through_ancestors_to_default() {
    let mut scene = Scene::new();
    let root = components::group(&mut scene, None).expect("root");
    let mid = components::group(&mut scene, Some(root)).expect("mid");
    let leaf = components::line(&mut scene, Some(mid)).expect("leaf");

    // No ancestor defines the key: every level resolves to the default.
    for id in [leaf, mid, root] {
        assert_eq!(
            scene.get_property(id, "stroke-cap", "round").as_str(),
            Some("round")
        );
    }

    // Defined on the root only: each descendant sees the root's value,
    // matching its parent's resolution.
    scene.node_mut(root).expect("root").put_property("stroke-cap", "square");
    assert_eq!(
        scene.get_property(leaf, "stroke-cap", "round"),
        scene.get_property(mid, "stroke-cap", "round")
    );
    assert_eq!(
        scene.get_property(mid, "stroke-cap", "round"),
        scene.get_property(root, "stroke-cap", "round")
    );
}

#[test]
fn test_reserved_keys_survive_removal() {
    let mut scene = Scene::new();
    let id = components::line(&mut scene, None).expect("node");
    // Give every reserved key a local value, then try to remove them all.
    {
        let node = scene.node_mut(id).expect("node");
        node.put_property(keys::COLOR, RED);
        node.put_property(keys::STYLE, 1);
        node.put_property(keys::WIDTH, 2.0f32);
        node.put_property(keys::SIZE, 10.0f32);
        node.put_property(keys::FILLED, true);
        node.put_property(keys::HIDDEN, false);
    }
    for key in keys::RESERVED {
        let node = scene.node_mut(id).expect("node");
        assert!(!node.remove_property(key), "{key} removal should be rejected");
        assert!(
            scene.has_property(id, key, true),
            "{key} should still be locally present"
        );
    }
}

#[test]
fn test_temp_restore_is_identity_at_any_depth() {
    let mut scene = Scene::new();
    let root = components::group(&mut scene, None).expect("root");
    let child = components::line(&mut scene, Some(root)).expect("child");

    for (id, base) in [(root, "#101010"), (child, "#202020")] {
        scene.set_color(id, Some("default"), base).expect("set");
        scene.set_color(id, Some("warm"), "#aa5500").expect("set");
        scene.set_color(id, Some("cold"), "#0055aa").expect("set");
    }
    scene.use_attributes(root, "default", true).expect("apply");

    let snapshot = |scene: &Scene| -> Vec<(String, Option<PropValue>)> {
        [root, child]
            .iter()
            .map(|id| {
                (
                    scene.node(*id).expect("node").attributes().current_id().to_string(),
                    scene.resolve_property(*id, keys::COLOR),
                )
            })
            .collect()
    };
    let before = snapshot(&scene);

    scene.use_temp_attributes(root, "warm").expect("temp warm");
    scene.use_temp_attributes(root, "cold").expect("temp cold");
    assert_eq!(
        scene.get_property(child, keys::COLOR, "").as_str(),
        Some("#0055aa")
    );
    scene.restore_attributes(root).expect("restore cold");
    assert_eq!(
        scene.get_property(child, keys::COLOR, "").as_str(),
        Some("#aa5500")
    );
    scene.restore_attributes(root).expect("restore warm");

    assert_eq!(snapshot(&scene), before);
}

#[test]
fn test_identity_scale_leaves_all_points() {
    let mut scene = Scene::new();
    let id = components::polygon(&mut scene, None).expect("node");
    let original = vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(5.0, 8.0),
    ];
    scene.set_points(id, original.clone()).expect("set points");
    scene
        .scale(id, (1.0, 1.0), Point::new(123.0, -456.0))
        .expect("scale");
    assert_eq!(scene.points(id).expect("points"), &original[..]);
}

#[test]
fn test_detach_invariant() {
    let mut scene = Scene::new();
    let parent = components::group(&mut scene, None).expect("parent");
    let a = components::line(&mut scene, Some(parent)).expect("a");
    let b = components::text(&mut scene, Some(parent), "label").expect("b");

    let removed = scene.remove_children(parent).expect("remove");
    assert_eq!(removed, vec![a, b]);
    assert!(scene.children(parent).is_empty());
    for id in removed {
        assert_eq!(scene.node(id).expect("node").parent(), None);
    }
}

#[test]
fn test_reparenting_moves_exactly_once() {
    let mut scene = Scene::new();
    let p1 = components::group(&mut scene, None).expect("p1");
    let p2 = components::group(&mut scene, None).expect("p2");
    let child = components::marker(&mut scene, Some(p1), Point::new(1.0, 1.0)).expect("child");

    scene.set_parent(child, Some(p2)).expect("reparent");
    assert!(!scene.children(p1).contains(&child));
    assert!(scene.children(p2).contains(&child));
    assert_eq!(scene.node(child).expect("child").parent(), Some(p2));
    // Still registered exactly once.
    assert_eq!(
        scene.children(p2).iter().filter(|c| **c == child).count(),
        1
    );
}

#[test]
fn test_group_color_inheritance_scenario() {
    let mut scene = Scene::new();
    let g = components::group(&mut scene, None).expect("group");
    let t = components::text(&mut scene, Some(g), "hello").expect("text");
    scene.node_mut(t).expect("text").put_property(keys::ID, "label");
    assert_eq!(scene.children_by_id(g, "label"), vec![t]);

    scene.node_mut(g).expect("group").put_property(keys::COLOR, RED);
    assert_eq!(
        scene.get_property(t, keys::COLOR, "#000000").as_str(),
        Some(RED)
    );

    scene.node_mut(t).expect("text").put_property(keys::COLOR, BLUE);
    assert_eq!(
        scene.get_property(t, keys::COLOR, "#000000").as_str(),
        Some(BLUE)
    );
    assert_eq!(
        scene.get_property(g, keys::COLOR, "#000000").as_str(),
        Some(RED)
    );
}

#[test]
fn test_hover_bundle_scenario() {
    let mut scene = Scene::new();
    let n = components::rect(&mut scene, None).expect("node");
    scene.set_color(n, Some("default"), BLUE).expect("set");
    scene.set_color(n, Some("hover"), YELLOW).expect("set");
    scene.use_attributes(n, "default", false).expect("apply");

    scene.use_temp_attributes(n, "hover").expect("temp");
    assert_eq!(
        scene.get_property(n, keys::COLOR, "#000000").as_str(),
        Some(YELLOW)
    );
    scene.restore_attributes(n).expect("restore");
    assert_eq!(
        scene.get_property(n, keys::COLOR, "#000000").as_str(),
        Some(BLUE)
    );
}

#[test]
fn test_hover_highlight_through_tool_layer() {
    // The classic use of temporary attributes: highlight on hover, restore
    // on exit, driven by synthesized enter/exit events.
    let mut scene = Scene::new();
    let button = components::rect(&mut scene, None).expect("button");
    scene
        .set_points(button, vec![Point::new(0.0, 0.0), Point::new(20.0, 10.0)])
        .expect("set points");
    scene.set_color(button, Some("default"), BLUE).expect("set");
    scene.set_color(button, Some("hover"), YELLOW).expect("set");
    scene.use_attributes(button, "default", false).expect("apply");

    let mut layer = ToolLayer::new();
    layer.bind(
        button,
        ToolHandlers::new()
            .on_enter(|scene, node, _| {
                let _ = scene.use_temp_attributes(node, "hover");
            })
            .on_exit(|scene, node, _| {
                let _ = scene.restore_attributes(node);
            }),
    );

    layer.dispatch(&mut scene, &PointerEvent::moved(10.0, 5.0));
    assert_eq!(
        scene.get_property(button, keys::COLOR, "").as_str(),
        Some(YELLOW)
    );
    layer.dispatch(&mut scene, &PointerEvent::moved(100.0, 100.0));
    assert_eq!(
        scene.get_property(button, keys::COLOR, "").as_str(),
        Some(BLUE)
    );
}

#[test]
fn test_marker_drag_updates_geometry() {
    let mut scene = Scene::new();
    let m = components::marker(&mut scene, None, Point::new(10.0, 10.0)).expect("marker");
    let mut layer = ToolLayer::new();
    layer.bind(
        m,
        ToolHandlers::new().on_drag(|scene, node, event| {
            let _ = scene.set_points(node, vec![event.position()]);
        }),
    );

    layer.dispatch(&mut scene, &PointerEvent::press(10.0, 10.0));
    layer.dispatch(&mut scene, &PointerEvent::drag(42.0, 17.0));
    layer.dispatch(&mut scene, &PointerEvent::release(42.0, 17.0));
    assert_eq!(
        scene.points(m).expect("points"),
        &[Point::new(42.0, 17.0)][..]
    );
}

#[test]
fn test_subtree_bounds_spans_children() {
    let mut scene = Scene::new();
    let g = components::group(&mut scene, None).expect("group");
    let a = components::line(&mut scene, Some(g)).expect("a");
    let b = components::line(&mut scene, Some(g)).expect("b");
    scene
        .set_points(a, vec![Point::new(-5.0, 0.0), Point::new(0.0, 5.0)])
        .expect("set points");
    scene
        .set_points(b, vec![Point::new(10.0, -2.0), Point::new(20.0, 8.0)])
        .expect("set points");
    let bounds = scene.subtree_bounds(g).expect("bounds");
    assert_eq!(bounds.min, Point::new(-5.0, -2.0));
    assert_eq!(bounds.max, Point::new(20.0, 8.0));
}

#[test]
fn test_dump_renders_whole_tree() {
    let mut scene = Scene::new();
    let g = components::group(&mut scene, None).expect("group");
    let t = components::text(&mut scene, Some(g), "caption").expect("text");
    scene.node_mut(t).expect("text").put_property(keys::ID, "caption");
    let dump = scene.dump(g).expect("dump");
    assert!(dump.contains("group"));
    assert!(dump.contains("text #caption"));
    assert!(dump.contains("text = caption"));
}
