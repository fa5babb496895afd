//! Canvas geometry: radial auto-arrange, free child placement, viewport
//! zoom/pan, and drag sessions. All functions here are total over finite
//! coordinates; there are no error states.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use rand::Rng;

use super::{MindMap, ROOT_ID};

/// Ring radius for direct children of the root.
const PRIMARY_RADIUS: f64 = 200.0;
/// Ring radius for grandchildren.
const SECONDARY_RADIUS: f64 = 300.0;
/// Distance from parent for free (non-auto) placement of a new child.
const FREE_DISTANCE: f64 = 150.0;

pub const MIN_SCALE: f64 = 0.5;
pub const MAX_SCALE: f64 = 2.0;

/// Arrange the first two depth levels radially around the root.
///
/// Depth-1 children sit on a full circle at `PRIMARY_RADIUS`, one per
/// `2π / count` step. Each child's own children fan out at
/// `SECONDARY_RADIUS` across a quarter-turn arc centered on the parent's
/// angle, subdivided by sibling count. Purely a function of child index and
/// count, so repeated calls on the same graph produce identical coordinates.
pub fn auto_arrange_radial(map: &mut MindMap) {
    let (cx, cy) = match map.node(ROOT_ID) {
        Some(root) => (root.x, root.y),
        None => return,
    };

    let children: Vec<String> = map
        .links
        .iter()
        .filter(|l| l.source == ROOT_ID)
        .map(|l| l.target.clone())
        .collect();
    if children.is_empty() {
        return;
    }

    let step = 2.0 * PI / children.len() as f64;
    for (i, child_id) in children.iter().enumerate() {
        let angle = i as f64 * step;
        map.move_node(
            child_id,
            cx + PRIMARY_RADIUS * angle.cos(),
            cy + PRIMARY_RADIUS * angle.sin(),
        );

        let grandchildren: Vec<String> = map
            .links
            .iter()
            .filter(|l| &l.source == child_id)
            .map(|l| l.target.clone())
            .collect();
        let count = grandchildren.len();
        for (j, gc_id) in grandchildren.iter().enumerate() {
            // Quarter-turn arc centered on the parent's angle, one slot per
            // grandchild, positioned at the slot midpoint.
            let offset = (j as f64 + 0.5) / count as f64 * FRAC_PI_2 - FRAC_PI_4;
            let gc_angle = angle + offset;
            map.move_node(
                gc_id,
                cx + SECONDARY_RADIUS * gc_angle.cos(),
                cy + SECONDARY_RADIUS * gc_angle.sin(),
            );
        }
    }
}

/// Position for a freshly created child when auto-layout is off: parent
/// position plus `FREE_DISTANCE` along the parent's outward direction,
/// jittered by a random angle in [-π/4, π/4]. Deliberately stochastic so
/// siblings don't stack exactly; this is overlap avoidance, not packing.
pub fn free_child_position(px: f64, py: f64, origin: (f64, f64)) -> (f64, f64) {
    let outward = if (px - origin.0).abs() < f64::EPSILON && (py - origin.1).abs() < f64::EPSILON {
        // Parent sits on the origin (typically the root itself): any direction.
        rand::thread_rng().gen_range(0.0..2.0 * PI)
    } else {
        (py - origin.1).atan2(px - origin.0)
    };
    let jitter = rand::thread_rng().gen_range(-FRAC_PI_4..FRAC_PI_4);
    let angle = outward + jitter;
    (px + FREE_DISTANCE * angle.cos(), py + FREE_DISTANCE * angle.sin())
}

/// Zoom/pan state of the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub x: f64,
    pub y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            scale: 1.0,
            x: 0.0,
            y: 0.0,
        }
    }
}

impl Viewport {
    /// Apply one wheel delta. Positive deltas zoom out, negative zoom in;
    /// scale is clamped to [MIN_SCALE, MAX_SCALE] on every step.
    pub fn apply_wheel(&mut self, delta: f64) {
        let factor = if delta < 0.0 { 1.1 } else { 0.9 };
        self.scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
    }

    /// Free-form pan offset, no bounds.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    pub fn reset(&mut self) {
        *self = Viewport::default();
    }
}

/// One drag gesture. The delta accumulates against the pre-drag origin and
/// the store is only touched on `commit`; intermediate updates are pure
/// local state.
#[derive(Debug, Clone)]
pub struct DragSession {
    node_id: String,
    origin: (f64, f64),
    delta: (f64, f64),
}

impl DragSession {
    /// Start dragging a node. Returns `None` for unknown ids.
    pub fn begin(map: &MindMap, node_id: &str) -> Option<Self> {
        let node = map.node(node_id)?;
        Some(DragSession {
            node_id: node_id.to_string(),
            origin: (node.x, node.y),
            delta: (0.0, 0.0),
        })
    }

    pub fn update(&mut self, dx: f64, dy: f64) {
        self.delta = (dx, dy);
    }

    /// Preview position while the drag is in flight.
    pub fn position(&self) -> (f64, f64) {
        (self.origin.0 + self.delta.0, self.origin.1 + self.delta.1)
    }

    /// Commit the final position to the store (the single write of the
    /// gesture).
    pub fn commit(self, map: &mut MindMap) {
        let (x, y) = self.position();
        map.move_node(&self.node_id, x, y);
    }
}
