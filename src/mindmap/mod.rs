pub mod layout;

use serde::{Deserialize, Serialize};

/// Sentinel id of the central node. It is created with the map and can never
/// be deleted.
pub const ROOT_ID: &str = "root";

/// Palette cycled through when new child nodes are created.
const NODE_COLORS: [&str; 6] = [
    "#8b5cf6", "#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#ec4899",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Main,
    Sub,
    Leaf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindMapNode {
    pub id: String,
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub color: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub ai_generated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindMapLink {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// In-memory node/link collections for one mind map.
///
/// Nodes and links are parallel flat lists; link endpoints are resolved by
/// linear scan. Nothing enforces reachability from the root: deleting a node
/// removes only its incident links, so descendants can be left orphaned (see
/// `delete_node` vs `delete_branch`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindMap {
    pub title: String,
    pub nodes: Vec<MindMapNode>,
    pub links: Vec<MindMapLink>,
    #[serde(default)]
    next_id: u64,
}

impl MindMap {
    pub fn new(title: &str) -> Self {
        MindMap {
            title: title.to_string(),
            nodes: vec![MindMapNode {
                id: ROOT_ID.to_string(),
                text: title.to_string(),
                x: 0.0,
                y: 0.0,
                color: NODE_COLORS[0].to_string(),
                kind: NodeKind::Main,
                ai_generated: false,
            }],
            links: Vec::new(),
            next_id: 1,
        }
    }

    pub fn node(&self, id: &str) -> Option<&MindMapNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut MindMapNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Direct children of a node, in link insertion order.
    pub fn children_of(&self, id: &str) -> Vec<&MindMapNode> {
        self.links
            .iter()
            .filter(|l| l.source == id)
            .filter_map(|l| self.node(&l.target))
            .collect()
    }

    /// Links whose both endpoints still exist. A link with a missing endpoint
    /// is skipped here rather than treated as an error; the renderer simply
    /// draws nothing for it.
    pub fn renderable_links(&self) -> Vec<&MindMapLink> {
        self.links
            .iter()
            .filter(|l| self.node(&l.source).is_some() && self.node(&l.target).is_some())
            .collect()
    }

    fn fresh_id(&mut self, prefix: &str) -> String {
        let id = format!("{}-{}", prefix, self.next_id);
        self.next_id += 1;
        id
    }

    /// Create a child node under `parent_id` and link it.
    ///
    /// Returns the new node id, or `None` (no-op) when the parent does not
    /// exist. The child kind derives from the parent: `main` parents get `sub`
    /// children, everything else gets `leaf`.
    pub fn add_child(&mut self, parent_id: &str, text: &str, ai_generated: bool) -> Option<String> {
        let (px, py, parent_kind) = match self.node(parent_id) {
            Some(p) => (p.x, p.y, p.kind),
            None => {
                log::debug!("[add_child] parent {} not found, ignoring", parent_id);
                return None;
            }
        };

        let kind = match parent_kind {
            NodeKind::Main => NodeKind::Sub,
            _ => NodeKind::Leaf,
        };

        let sibling_count = self.links.iter().filter(|l| l.source == parent_id).count();
        let color = NODE_COLORS[(sibling_count + 1) % NODE_COLORS.len()].to_string();
        let (x, y) = layout::free_child_position(px, py, self.root_position());

        let node_id = self.fresh_id("node");
        let link_id = self.fresh_id("link");

        self.nodes.push(MindMapNode {
            id: node_id.clone(),
            text: text.to_string(),
            x,
            y,
            color,
            kind,
            ai_generated,
        });
        self.links.push(MindMapLink {
            id: link_id,
            source: parent_id.to_string(),
            target: node_id.clone(),
            label: None,
        });

        Some(node_id)
    }

    /// Overwrite a node's text. Empty text is permitted; unknown ids are a
    /// no-op.
    pub fn update_text(&mut self, node_id: &str, text: &str) {
        if let Some(node) = self.node_mut(node_id) {
            node.text = text.to_string();
        }
    }

    /// Unconditional coordinate overwrite.
    pub fn move_node(&mut self, node_id: &str, x: f64, y: f64) {
        if let Some(node) = self.node_mut(node_id) {
            node.x = x;
            node.y = y;
        }
    }

    /// Delete a node and every link touching it. The root is protected.
    ///
    /// Descendants are NOT removed: they stay in `nodes` with their links to
    /// the deleted node gone, i.e. orphaned. That is the historical contract;
    /// callers wanting a cascade use `delete_branch`.
    pub fn delete_node(&mut self, node_id: &str) -> bool {
        if node_id == ROOT_ID {
            log::debug!("[delete_node] refusing to delete root");
            return false;
        }
        if self.node(node_id).is_none() {
            return false;
        }
        self.nodes.retain(|n| n.id != node_id);
        self.links
            .retain(|l| l.source != node_id && l.target != node_id);
        true
    }

    /// Delete a node together with its whole subtree (children-index walk).
    /// The root is protected.
    pub fn delete_branch(&mut self, node_id: &str) -> bool {
        if node_id == ROOT_ID || self.node(node_id).is_none() {
            return false;
        }

        let mut doomed = vec![node_id.to_string()];
        let mut queue = vec![node_id.to_string()];
        while let Some(current) = queue.pop() {
            for link in self.links.iter().filter(|l| l.source == current) {
                if !doomed.contains(&link.target) {
                    doomed.push(link.target.clone());
                    queue.push(link.target.clone());
                }
            }
        }

        self.nodes.retain(|n| !doomed.contains(&n.id));
        self.links
            .retain(|l| !doomed.contains(&l.source) && !doomed.contains(&l.target));
        true
    }

    fn root_position(&self) -> (f64, f64) {
        self.node(ROOT_ID).map(|r| (r.x, r.y)).unwrap_or((0.0, 0.0))
    }
}

/// Sample map shown on first launch, before the user has created anything.
pub fn demo_map() -> MindMap {
    let mut map = MindMap::new("Study Topics");
    let math = map.add_child(ROOT_ID, "Mathematics", false);
    let bio = map.add_child(ROOT_ID, "Biology", false);
    map.add_child(ROOT_ID, "History", false);
    if let Some(ref id) = math {
        map.add_child(id, "Calculus", false);
        map.add_child(id, "Linear Algebra", false);
    }
    if let Some(ref id) = bio {
        map.add_child(id, "Cell Structure", false);
    }
    layout::auto_arrange_radial(&mut map);
    map
}
