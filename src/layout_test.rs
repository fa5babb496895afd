// Tests for canvas geometry: radial layout determinism, free placement
// distance, zoom clamping, and drag sessions.

#[cfg(test)]
mod tests {
    use crate::mindmap::layout::{
        auto_arrange_radial, free_child_position, DragSession, Viewport, MAX_SCALE, MIN_SCALE,
    };
    use crate::mindmap::{MindMap, ROOT_ID};

    fn sample_map() -> MindMap {
        let mut map = MindMap::new("Chemistry");
        let a = map.add_child(ROOT_ID, "Organic", false).unwrap();
        let b = map.add_child(ROOT_ID, "Inorganic", false).unwrap();
        map.add_child(ROOT_ID, "Physical", false);
        map.add_child(&a, "Alkanes", false);
        map.add_child(&a, "Alkenes", false);
        map.add_child(&b, "Acids", false);
        map
    }

    #[test]
    fn test_radial_layout_is_deterministic() {
        let mut first = sample_map();
        let mut second = first.clone();

        auto_arrange_radial(&mut first);
        auto_arrange_radial(&mut second);

        for (a, b) in first.nodes.iter().zip(second.nodes.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!((a.x, a.y), (b.x, b.y), "layout must not vary between runs");
        }

        // And re-running on an already arranged map changes nothing.
        let arranged = first.clone();
        auto_arrange_radial(&mut first);
        for (a, b) in first.nodes.iter().zip(arranged.nodes.iter()) {
            assert_eq!((a.x, a.y), (b.x, b.y), "layout must be idempotent");
        }
    }

    #[test]
    fn test_radial_layout_ring_radii() {
        let mut map = sample_map();
        auto_arrange_radial(&mut map);

        let (cx, cy) = {
            let root = map.node(ROOT_ID).unwrap();
            (root.x, root.y)
        };

        for child in map.children_of(ROOT_ID) {
            let r = ((child.x - cx).powi(2) + (child.y - cy).powi(2)).sqrt();
            assert!(
                (r - 200.0).abs() < 1e-9,
                "depth-1 node {} at radius {}",
                child.id,
                r
            );
            for gc in map.children_of(&child.id) {
                let r2 = ((gc.x - cx).powi(2) + (gc.y - cy).powi(2)).sqrt();
                assert!(
                    (r2 - 300.0).abs() < 1e-9,
                    "depth-2 node {} at radius {}",
                    gc.id,
                    r2
                );
            }
        }
    }

    #[test]
    fn test_free_placement_distance() {
        // Stochastic direction, fixed distance. Check the invariant many times.
        for _ in 0..50 {
            let (x, y) = free_child_position(120.0, -40.0, (0.0, 0.0));
            let d = ((x - 120.0).powi(2) + (y + 40.0).powi(2)).sqrt();
            assert!((d - 150.0).abs() < 1e-9, "child placed at distance {}", d);
        }
        // Parent on the origin: still 150 away, any direction.
        for _ in 0..50 {
            let (x, y) = free_child_position(0.0, 0.0, (0.0, 0.0));
            let d = (x.powi(2) + y.powi(2)).sqrt();
            assert!((d - 150.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zoom_clamps_under_arbitrary_wheel_sequences() {
        let mut vp = Viewport::default();

        // Zoom in hard.
        for _ in 0..100 {
            vp.apply_wheel(-1.0);
            assert!(vp.scale <= MAX_SCALE, "scale {} escaped the cap", vp.scale);
        }
        assert!((vp.scale - MAX_SCALE).abs() < 1e-9);

        // Zoom out hard.
        for _ in 0..200 {
            vp.apply_wheel(1.0);
            assert!(vp.scale >= MIN_SCALE, "scale {} escaped the floor", vp.scale);
        }
        assert!((vp.scale - MIN_SCALE).abs() < 1e-9);

        // Mixed sequence stays in range throughout.
        let deltas = [-1.0, 1.0, -3.0, -1.0, 5.0, -1.0, -1.0, 2.0];
        for _ in 0..25 {
            for d in deltas {
                vp.apply_wheel(d);
                assert!(vp.scale >= MIN_SCALE && vp.scale <= MAX_SCALE);
            }
        }
    }

    #[test]
    fn test_pan_and_reset() {
        let mut vp = Viewport::default();
        vp.pan(30.0, -12.5);
        vp.pan(-5.0, 2.5);
        assert_eq!((vp.x, vp.y), (25.0, -10.0));
        vp.apply_wheel(-1.0);
        vp.reset();
        assert_eq!(vp, Viewport::default());
    }

    #[test]
    fn test_drag_commits_only_on_end() {
        let mut map = MindMap::new("Chemistry");
        let child = map.add_child(ROOT_ID, "Organic", false).unwrap();
        let before = {
            let n = map.node(&child).unwrap();
            (n.x, n.y)
        };

        let mut drag = DragSession::begin(&map, &child).expect("node exists");
        drag.update(10.0, 20.0);
        drag.update(40.0, -5.0);

        // Store untouched while the drag is live.
        let during = {
            let n = map.node(&child).unwrap();
            (n.x, n.y)
        };
        assert_eq!(before, during, "no writes before commit");
        assert_eq!(drag.position(), (before.0 + 40.0, before.1 - 5.0));

        drag.commit(&mut map);
        let after = map.node(&child).unwrap();
        assert_eq!((after.x, after.y), (before.0 + 40.0, before.1 - 5.0));
    }

    #[test]
    fn test_drag_unknown_node_is_refused() {
        let map = MindMap::new("Chemistry");
        assert!(DragSession::begin(&map, "missing").is_none());
    }
}
