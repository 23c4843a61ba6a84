// core/transform.rs
//
// Transform hierarchy: tracks parent-child relationships by NodeId.
// Nodes keep their own local transform; the graph composes them.
//
// Usage:
//   let mut graph = TransformGraph::new();
//   graph.set_parent(planet_id, Some(pivot_id));
//   let world = graph.world_matrix(&scene, planet_id);

use std::collections::HashMap;
use glam::{Mat4, Vec3};
use crate::api::types::NodeId;
use crate::core::scene::Scene;

#[derive(Debug, Clone, Default)]
struct TransformNode {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Transform hierarchy graph. Manages parent-child relationships.
///
/// Nodes themselves live in the flat `Scene`.
#[derive(Debug, Default)]
pub struct TransformGraph {
    nodes: HashMap<NodeId, TransformNode>,
    /// Nodes with no parent (top-level), in registration order.
    roots: Vec<NodeId>,
}

impl TransformGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node as a root. No-op if already registered.
    pub fn register(&mut self, id: NodeId) {
        if self.nodes.contains_key(&id) {
            return;
        }
        self.nodes.insert(id, TransformNode::default());
        self.roots.push(id);
    }

    /// Set the parent of a node. Pass `None` to make it a root.
    pub fn set_parent(&mut self, child: NodeId, parent: Option<NodeId>) {
        self.register(child);
        if let Some(p) = parent {
            self.register(p);
        }

        // Detach from old parent
        if let Some(old_parent) = self.nodes.get(&child).and_then(|n| n.parent) {
            if let Some(old_node) = self.nodes.get_mut(&old_parent) {
                old_node.children.retain(|&c| c != child);
            }
        }

        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = parent;
        }

        match parent {
            Some(p) => {
                if let Some(parent_node) = self.nodes.get_mut(&p) {
                    if !parent_node.children.contains(&child) {
                        parent_node.children.push(child);
                    }
                }
                self.roots.retain(|&r| r != child);
            }
            None => {
                if !self.roots.contains(&child) {
                    self.roots.push(child);
                }
            }
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(&id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Remove a node from the hierarchy. Its children become roots.
    pub fn remove(&mut self, id: NodeId) {
        let Some(node) = self.nodes.remove(&id) else { return };
        if let Some(parent) = node.parent {
            if let Some(parent_node) = self.nodes.get_mut(&parent) {
                parent_node.children.retain(|&c| c != id);
            }
        }
        for child in node.children {
            if let Some(child_node) = self.nodes.get_mut(&child) {
                child_node.parent = None;
            }
            if !self.roots.contains(&child) {
                self.roots.push(child);
            }
        }
        self.roots.retain(|&r| r != id);
    }

    /// World matrix of a node: its local matrix composed with every ancestor's.
    /// Nodes missing from the scene contribute identity.
    pub fn world_matrix(&self, scene: &Scene, id: NodeId) -> Mat4 {
        let mut world = scene.get(id).map(|n| n.local_matrix()).unwrap_or(Mat4::IDENTITY);
        let mut current = self.parent(id);
        // A cycle ends the walk with a warning.
        let mut depth = 0;
        while let Some(parent) = current {
            if depth > self.nodes.len() {
                log::warn!("transform cycle detected at {:?}", parent);
                break;
            }
            if let Some(node) = scene.get(parent) {
                world = node.local_matrix() * world;
            }
            current = self.parent(parent);
            depth += 1;
        }
        world
    }

    /// World-space origin of a node.
    pub fn world_position(&self, scene: &Scene, id: NodeId) -> Vec3 {
        self.world_matrix(scene, id).transform_point3(Vec3::ZERO)
    }

    /// Compute world matrices for every registered node, parents before children.
    pub fn propagate(&self, scene: &Scene) -> HashMap<NodeId, Mat4> {
        let mut out = HashMap::with_capacity(self.nodes.len());
        for &root in &self.roots {
            self.propagate_recursive(root, Mat4::IDENTITY, scene, &mut out);
        }
        out
    }

    fn propagate_recursive(
        &self,
        id: NodeId,
        parent_world: Mat4,
        scene: &Scene,
        out: &mut HashMap<NodeId, Mat4>,
    ) {
        let local = scene.get(id).map(|n| n.local_matrix()).unwrap_or(Mat4::IDENTITY);
        let world = parent_world * local;
        out.insert(id, world);
        for &child in self.children(id) {
            if !out.contains_key(&child) {
                self.propagate_recursive(child, world, scene, out);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::node::Node;
    use std::f32::consts::FRAC_PI_2;

    fn pivot_with_body(radius: f32) -> (Scene, TransformGraph, NodeId, NodeId) {
        let mut scene = Scene::new();
        let mut graph = TransformGraph::new();
        let pivot = NodeId(1);
        let body = NodeId(2);
        scene.spawn(Node::new(pivot));
        scene.spawn(Node::new(body).with_position(Vec3::new(radius, 0.0, 0.0)));
        graph.register(pivot);
        graph.set_parent(body, Some(pivot));
        (scene, graph, pivot, body)
    }

    #[test]
    fn parent_child_relationship() {
        let (_, graph, pivot, body) = pivot_with_body(62.0);
        assert_eq!(graph.parent(body), Some(pivot));
        assert_eq!(graph.children(pivot), &[body]);
        assert_eq!(graph.roots(), &[pivot]);
    }

    #[test]
    fn rotating_pivot_revolves_child_at_fixed_radius() {
        let (mut scene, graph, pivot, body) = pivot_with_body(62.0);
        scene.get_mut(pivot).unwrap().rotation.y = FRAC_PI_2;

        let p = graph.world_position(&scene, body);
        assert!((p - Vec3::new(0.0, 0.0, -62.0)).length() < 1e-3, "p = {p:?}");
        assert!((p.length() - 62.0).abs() < 1e-3);
    }

    #[test]
    fn propagate_matches_world_matrix() {
        let (mut scene, graph, pivot, body) = pivot_with_body(28.0);
        scene.get_mut(pivot).unwrap().rotation.y = 0.7;
        let all = graph.propagate(&scene);
        let a = all[&body].transform_point3(Vec3::ZERO);
        let b = graph.world_position(&scene, body);
        assert!((a - b).length() < 1e-5);
    }

    #[test]
    fn remove_orphans_children() {
        let (_, mut graph, pivot, body) = pivot_with_body(1.0);
        graph.remove(pivot);
        assert_eq!(graph.parent(body), None);
        assert!(graph.roots().contains(&body));
        assert!(!graph.roots().contains(&pivot));
    }
}
