/// Ray casting against scene meshes.
///
/// Bodies are tested as analytic spheres (their geometry radius scaled by the
/// node's world scale), which is exact for the sphere meshes we render.

use glam::Vec3;
use crate::api::types::NodeId;
use crate::core::scene::Scene;
use crate::core::transform::TransformGraph;

/// Half-line in world space. `direction` is always unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance along the ray to the first hit on a sphere, if any.
    /// A ray starting inside the sphere hits its far side.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sqrt_disc = disc.sqrt();
        let near = -b - sqrt_disc;
        if near >= 0.0 {
            return Some(near);
        }
        let far = -b + sqrt_disc;
        (far >= 0.0).then_some(far)
    }
}

/// One ray hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub node: NodeId,
    pub distance: f32,
    pub point: Vec3,
}

pub struct Raycaster;

impl Raycaster {
    /// Test `candidates` against the ray. Hits come back nearest first.
    /// Inactive nodes and nodes without a pickable mesh are skipped.
    pub fn intersect(
        ray: &Ray,
        scene: &Scene,
        graph: &TransformGraph,
        candidates: &[NodeId],
    ) -> Vec<Intersection> {
        let mut hits: Vec<Intersection> = candidates
            .iter()
            .filter_map(|&id| {
                let node = scene.get(id)?;
                if !node.active {
                    return None;
                }
                let local_radius = node.mesh.as_ref()?.pick_radius()?;
                let world = graph.world_matrix(scene, id);
                let (scale, _, center) = world.to_scale_rotation_translation();
                let distance = ray.intersect_sphere(center, local_radius * scale.max_element())?;
                Some(Intersection {
                    node: id,
                    distance,
                    point: ray.at(distance),
                })
            })
            .collect();

        hits.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(std::cmp::Ordering::Equal));
        hits
    }

    /// The nearest hit among `candidates`, if any.
    pub fn nearest(
        ray: &Ray,
        scene: &Scene,
        graph: &TransformGraph,
        candidates: &[NodeId],
    ) -> Option<Intersection> {
        Self::intersect(ray, scene, graph, candidates).into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::mesh::{Material, MeshComponent};
    use crate::components::node::Node;

    fn sphere_at(id: u32, x: f32, radius: f32) -> Node {
        Node::new(NodeId(id))
            .with_position(Vec3::new(x, 0.0, 0.0))
            .with_mesh(MeshComponent::sphere(radius, 30, Material::standard()))
    }

    #[test]
    fn ray_hits_and_misses_sphere() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        let d = ray.intersect_sphere(Vec3::ZERO, 2.0).unwrap();
        assert!((d - 8.0).abs() < 1e-5);
        assert!(ray.intersect_sphere(Vec3::new(5.0, 0.0, 0.0), 2.0).is_none());
        // Sphere behind the origin
        assert!(ray.intersect_sphere(Vec3::new(0.0, 0.0, 20.0), 2.0).is_none());
    }

    #[test]
    fn ray_from_inside_hits_far_side() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let d = ray.intersect_sphere(Vec3::ZERO, 3.0).unwrap();
        assert!((d - 3.0).abs() < 1e-5);
    }

    #[test]
    fn hits_sorted_nearest_first() {
        let mut scene = Scene::new();
        let graph = TransformGraph::new();
        // Ray travels along -X from x = 100: the body at 60 is nearer than the one at 20.
        scene.spawn(sphere_at(1, 20.0, 3.0));
        scene.spawn(sphere_at(2, 60.0, 3.0));
        let ray = Ray::new(Vec3::new(100.0, 0.0, 0.0), Vec3::NEG_X);

        let hits = Raycaster::intersect(&ray, &scene, &graph, &[NodeId(1), NodeId(2)]);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].node, NodeId(2));
        assert_eq!(hits[1].node, NodeId(1));
        assert!(hits[0].distance < hits[1].distance);
    }

    #[test]
    fn only_candidates_are_tested() {
        let mut scene = Scene::new();
        let graph = TransformGraph::new();
        scene.spawn(sphere_at(1, 0.0, 16.0));
        scene.spawn(sphere_at(2, 0.0, 5.0));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 50.0), Vec3::NEG_Z);
        let hit = Raycaster::nearest(&ray, &scene, &graph, &[NodeId(2)]).unwrap();
        assert_eq!(hit.node, NodeId(2));
    }

    #[test]
    fn inactive_and_meshless_nodes_are_skipped() {
        let mut scene = Scene::new();
        let graph = TransformGraph::new();
        let mut hidden = sphere_at(1, 0.0, 5.0);
        hidden.active = false;
        scene.spawn(hidden);
        scene.spawn(Node::new(NodeId(2)));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 50.0), Vec3::NEG_Z);
        assert!(Raycaster::nearest(&ray, &scene, &graph, &[NodeId(1), NodeId(2)]).is_none());
    }

    #[test]
    fn world_transform_moves_pick_target() {
        let mut scene = Scene::new();
        let mut graph = TransformGraph::new();
        scene.spawn(Node::new(NodeId(1)).with_rotation(Vec3::new(0.0, std::f32::consts::PI, 0.0)));
        scene.spawn(sphere_at(2, 62.0, 6.0));
        graph.register(NodeId(1));
        graph.set_parent(NodeId(2), Some(NodeId(1)));

        // After a half turn the body sits at x = -62.
        let down = Vec3::NEG_Y;
        let at_old = Ray::new(Vec3::new(62.0, 50.0, 0.0), down);
        let at_new = Ray::new(Vec3::new(-62.0, 50.0, 0.0), down);
        assert!(Raycaster::nearest(&at_old, &scene, &graph, &[NodeId(2)]).is_none());
        assert!(Raycaster::nearest(&at_new, &scene, &graph, &[NodeId(2)]).is_some());
    }
}
