use glam::Mat4;

use super::Transform;

/// Handle to a node stored in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Empty,
    Camera,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    /// Transform relative to the parent (or the world for root nodes)
    pub local: Transform,
    pub parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Flat arena of transform nodes with parent links.
///
/// Nodes are never removed, so a `NodeId` handed out stays valid for the
/// lifetime of the scene.
#[derive(Debug, Default, Clone)]
pub struct Scene {
    nodes: Vec<Node>,
}

impl Scene {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn spawn(&mut self, name: impl Into<String>, kind: NodeKind, local: Transform) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            name: name.into(),
            kind,
            local,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Spawn a node under `parent`. Returns `None` if the parent does not exist.
    pub fn spawn_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        kind: NodeKind,
        local: Transform,
    ) -> Option<NodeId> {
        if !self.contains(parent) {
            return None;
        }
        let id = self.spawn(name, kind, local);
        self.nodes[id.0 as usize].parent = Some(parent);
        self.nodes[parent.0 as usize].children.push(id);
        Some(id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        (id.0 as usize) < self.nodes.len()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    pub fn local(&self, id: NodeId) -> Option<&Transform> {
        self.get(id).map(|n| &n.local)
    }

    pub fn local_mut(&mut self, id: NodeId) -> Option<&mut Transform> {
        self.get_mut(id).map(|n| &mut n.local)
    }

    /// First camera in the hierarchy rooted at `root`, checking `root` itself
    /// before its descendants, depth-first in spawn order.
    pub fn find_camera_in_hierarchy(&self, root: NodeId) -> Option<NodeId> {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let node = self.get(id)?;
            if node.kind == NodeKind::Camera {
                return Some(id);
            }
            // Reversed so the first child is visited next
            stack.extend(node.children.iter().rev().copied());
        }
        None
    }

    /// World matrix of a node, composed up the parent chain.
    pub fn world_matrix(&self, id: NodeId) -> Option<Mat4> {
        let node = self.get(id)?;
        let local = node.local.matrix();
        match node.parent {
            Some(parent) => Some(self.world_matrix(parent)? * local),
            None => Some(local),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn finds_first_camera_child() {
        let mut scene = Scene::new();
        let body = scene.spawn("body", NodeKind::Empty, Transform::IDENTITY);
        let _arm = scene.spawn_child(body, "arm", NodeKind::Empty, Transform::IDENTITY);
        let eye = scene
            .spawn_child(body, "eye", NodeKind::Camera, Transform::IDENTITY)
            .unwrap();
        let _second = scene.spawn_child(body, "spare", NodeKind::Camera, Transform::IDENTITY);

        assert_eq!(scene.find_camera_in_hierarchy(body), Some(eye));
    }

    #[test]
    fn root_camera_wins_over_its_children() {
        let mut scene = Scene::new();
        let body = scene.spawn("body", NodeKind::Camera, Transform::IDENTITY);
        scene.spawn_child(body, "eye", NodeKind::Camera, Transform::IDENTITY);

        assert_eq!(scene.find_camera_in_hierarchy(body), Some(body));
    }

    #[test]
    fn grandchild_camera_is_found_depth_first() {
        let mut scene = Scene::new();
        let body = scene.spawn("body", NodeKind::Empty, Transform::IDENTITY);
        let head = scene
            .spawn_child(body, "head", NodeKind::Empty, Transform::IDENTITY)
            .unwrap();
        let eye = scene
            .spawn_child(head, "eye", NodeKind::Camera, Transform::IDENTITY)
            .unwrap();
        // Later sibling of `head`, reached only after head's subtree
        scene.spawn_child(body, "spare", NodeKind::Camera, Transform::IDENTITY);

        assert_eq!(scene.find_camera_in_hierarchy(body), Some(eye));
    }

    #[test]
    fn no_camera_in_hierarchy() {
        let mut scene = Scene::new();
        let body = scene.spawn("body", NodeKind::Empty, Transform::IDENTITY);
        scene.spawn_child(body, "arm", NodeKind::Empty, Transform::IDENTITY);
        scene.spawn("elsewhere", NodeKind::Camera, Transform::IDENTITY);

        assert_eq!(scene.find_camera_in_hierarchy(body), None);
    }

    #[test]
    fn spawn_child_of_missing_parent_fails() {
        let mut scene = Scene::new();
        assert!(scene
            .spawn_child(NodeId(3), "orphan", NodeKind::Empty, Transform::IDENTITY)
            .is_none());
        assert!(scene.is_empty());
    }

    #[test]
    fn world_matrix_composes_parent_chain() {
        let mut scene = Scene::new();
        let body = scene.spawn("body", NodeKind::Empty, Transform::from_position(Vec3::new(1.0, 0.0, 2.0)));
        let eye = scene
            .spawn_child(body, "eye", NodeKind::Camera, Transform::from_position(Vec3::new(0.0, 1.6, 0.0)))
            .unwrap();

        let world = scene.world_matrix(eye).unwrap();
        let origin = world.transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(1.0, 1.6, 2.0)).length() < 1e-5);
    }
}
