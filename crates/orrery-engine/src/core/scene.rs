use crate::api::types::NodeId;
use crate::components::node::Node;

/// Simple node storage using a flat Vec.
/// Designed for small scenes (dozens of nodes, not millions).
/// Hierarchy lives in `TransformGraph`, not here.
pub struct Scene {
    nodes: Vec<Node>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            nodes: Vec::with_capacity(64),
        }
    }

    /// Add a node to the scene.
    pub fn spawn(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Remove a node by ID. Returns the removed node if found.
    pub fn despawn(&mut self, id: NodeId) -> Option<Node> {
        let idx = self.nodes.iter().position(|n| n.id == id)?;
        Some(self.nodes.swap_remove(idx))
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    /// Find the first node with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.tag == tag)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn spawn_and_get() {
        let mut scene = Scene::new();
        let id = NodeId(1);
        scene.spawn(Node::new(id).with_position(Vec3::new(10.0, 20.0, 30.0)));
        let n = scene.get(id).unwrap();
        assert_eq!(n.position, Vec3::new(10.0, 20.0, 30.0));
    }

    #[test]
    fn despawn_removes_node() {
        let mut scene = Scene::new();
        scene.spawn(Node::new(NodeId(1)));
        assert_eq!(scene.len(), 1);
        assert!(scene.despawn(NodeId(1)).is_some());
        assert!(scene.is_empty());
        assert!(scene.despawn(NodeId(1)).is_none());
    }

    #[test]
    fn find_by_tag() {
        let mut scene = Scene::new();
        scene.spawn(Node::new(NodeId(1)).with_tag("Sun"));
        scene.spawn(Node::new(NodeId(2)).with_tag("Earth"));
        assert_eq!(scene.find_by_tag("Earth").unwrap().id, NodeId(2));
        assert!(scene.find_by_tag("Pluto").is_none());
    }
}
